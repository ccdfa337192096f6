use easy_chart::api::{LineChartConfig, PieChartConfig};
use easy_chart::core::{
    AxisId, AxisValue, DataPoint, JoinPlan, LinearScale, PieSlice, ScaleKind, ScaleSpec,
    generate_scale,
};
use easy_chart::{ChartComponent, ChartResult, LineChart, PieChart};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn no_dates(_: &str) -> ChartResult<f64> {
    Ok(0.0)
}

fn bench_linear_scale_round_trip(c: &mut Criterion) {
    let scale = LinearScale::new((0.0, 10_000.0), (1_080.0, 0.0)).expect("valid scale");

    c.bench_function("linear_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale.map(black_box(4_321.123));
            let _ = scale.invert(px);
        })
    });
}

fn bench_generate_scale_10k(c: &mut Criterion) {
    let values: Vec<AxisValue> = (0..10_000)
        .map(|i| AxisValue::Number(f64::from(i).sin() * 500.0))
        .collect();

    c.bench_function("generate_scale_10k", |b| {
        b.iter(|| {
            let _ = generate_scale(
                ScaleSpec::new(AxisId::Y, ScaleKind::Linear, black_box(900.0)),
                black_box(&values),
                &no_dates,
            )
            .expect("scale should build");
        })
    });
}

fn bench_keyed_join_1k(c: &mut Criterion) {
    let previous: Vec<String> = (0..1_000).map(|i| format!("k{i}")).collect();
    let next: Vec<String> = (500..1_500).map(|i| format!("k{i}")).collect();

    c.bench_function("keyed_join_1k", |b| {
        b.iter(|| {
            let _ = JoinPlan::keyed(black_box(previous.as_slice()), black_box(next.as_slice()));
        })
    });
}

fn bench_line_chart_render_2k(c: &mut Criterion) {
    let series: Vec<DataPoint> = (0..2_000)
        .map(|i| DataPoint::new(i, (i % 97) * 3))
        .collect();
    let config = LineChartConfig::new(vec![series])
        .with_size(1_600, 900)
        .with_axes(true)
        .with_data_points(true);
    let mut chart = LineChart::new(config).expect("chart init");

    c.bench_function("line_chart_render_2k", |b| {
        b.iter(|| {
            chart.mount(black_box(0.0)).expect("render should succeed");
            let _ = chart.output().to_json_pretty().expect("json should succeed");
        })
    });
}

fn bench_pie_chart_update_cycle(c: &mut Criterion) {
    let even: Vec<PieSlice> = (0..40).map(|i| PieSlice::new(format!("s{i}"), 1.0)).collect();
    let skewed: Vec<PieSlice> = (0..40)
        .map(|i| PieSlice::new(format!("s{i}"), f64::from(i + 1)))
        .collect();
    let mut chart = PieChart::new(PieChartConfig::new(even.clone()).with_labels(true))
        .expect("chart init");
    chart.mount(0.0).expect("mount");

    let mut now = 0.0;
    let mut flip = false;
    c.bench_function("pie_chart_update_cycle", |b| {
        b.iter(|| {
            flip = !flip;
            let data = if flip { skewed.clone() } else { even.clone() };
            now += 1_000.0;
            chart
                .update(PieChartConfig::new(data).with_labels(true), now)
                .expect("update should succeed");
            let _ = chart.animation_frame(now + 375.0).expect("frame");
            let _ = chart.animation_frame(now + 750.0).expect("frame");
        })
    });
}

criterion_group!(
    benches,
    bench_linear_scale_round_trip,
    bench_generate_scale_10k,
    bench_keyed_join_1k,
    bench_line_chart_render_2k,
    bench_pie_chart_update_cycle
);
criterion_main!(benches);
