use std::rc::Rc;
use std::sync::{Arc, Mutex};

use easy_chart::core::{DataPoint, DateParserCache, LineInterpolation, ScaleKind};
use easy_chart::interaction::{ChartEvent, Datum, EventHandlers, EventKind};
use easy_chart::render::{AttrValue, InertNode, NullRenderer};
use easy_chart::{ChartComponent, ChartError, LineChart, LineChartConfig};

fn mounted(config: LineChartConfig) -> LineChart {
    let mut chart = LineChart::new(config).expect("chart");
    chart.mount(0.0).expect("mount");
    chart
}

fn line_paths(tree: &InertNode) -> Vec<String> {
    tree.find_by_class("line")
        .into_iter()
        .filter_map(|node| node.attr_text("d"))
        .collect()
}

#[test]
fn two_point_series_without_axes_spans_the_viewport() {
    let chart = mounted(LineChartConfig::new(vec![vec![
        DataPoint::new(1, 2),
        DataPoint::new(2, 4),
    ]]));
    let output = chart.output();
    let tree = &output.tree;

    assert_eq!(tree.tag, "svg");
    assert_eq!(tree.attr("width"), Some(&AttrValue::Number(200.0)));
    assert_eq!(tree.attr("height"), Some(&AttrValue::Number(150.0)));
    assert_eq!(line_paths(tree), vec!["M0,150L200,0".to_owned()]);
    assert!(tree.find_by_class("axis").is_empty());
    assert!(tree.find_by_tag("circle").is_empty());

    let root_group = &tree.children[0];
    assert_eq!(root_group.attr_text("transform").as_deref(), Some("translate(0, 0)"));
}

#[test]
fn time_axis_places_the_earliest_date_at_zero() {
    let config = LineChartConfig::new(vec![vec![
        DataPoint::new("05-Jan-16", 10),
        DataPoint::new("01-Jan-16", 5),
    ]])
    .with_types(ScaleKind::Time, ScaleKind::Linear)
    .with_data_points(true);
    let chart = mounted(config);

    let layout = chart.layout().expect("layout");
    let x = layout.x.as_continuous().expect("continuous x");
    assert_eq!(x.domain().0, 1_451_606_400_000.0);

    let output = chart.output();
    let cx: Vec<f64> = output
        .tree
        .find_by_class("data-point")
        .into_iter()
        .filter_map(|node| node.attr("cx").and_then(AttrValue::as_number))
        .collect();
    assert_eq!(cx, vec![200.0, 0.0]);
    assert_eq!(chart.date_parser_cache().compilations(), 1);
}

#[test]
fn axes_reserve_margins_and_draw_both_groups() {
    let config = LineChartConfig::new(vec![vec![DataPoint::new(1, 2), DataPoint::new(2, 4)]])
        .with_axes(true)
        .with_axis_labels("Time", "Value");
    let chart = mounted(config);
    let output = chart.output();
    let tree = &output.tree;

    let layout = chart.layout().expect("layout");
    assert_eq!(layout.area.width, 130.0);
    assert_eq!(layout.area.height, 100.0);
    assert_eq!(
        tree.children[0].attr_text("transform").as_deref(),
        Some("translate(50, 20)")
    );

    let axes = tree.find_by_class("axis");
    assert_eq!(axes.len(), 2);
    assert_eq!(
        axes[0].attr_text("transform").as_deref(),
        Some("translate(0, 100)")
    );
    assert_eq!(tree.find_by_class("domain").len(), 2);
    assert!(!tree.find_by_class("tick").is_empty());

    let labels: Vec<&str> = tree
        .find_by_class("label")
        .into_iter()
        .filter_map(|node| node.text.as_deref())
        .collect();
    assert_eq!(labels, vec!["Time", "Value"]);
    assert_eq!(line_paths(tree), vec!["M0,100L130,0".to_owned()]);
}

#[test]
fn right_hand_y_axis_moves_to_the_far_edge() {
    let config = LineChartConfig::new(vec![vec![DataPoint::new(0, 0), DataPoint::new(1, 1)]])
        .with_axes(true)
        .with_y_axis_orient_right(true);
    let chart = mounted(config);
    let output = chart.output();

    let y_axis = output
        .tree
        .find_by_class("y")
        .into_iter()
        .next()
        .expect("y axis");
    assert_eq!(y_axis.attr_text("transform").as_deref(), Some("translate(130, 0)"));
    assert!(output.style.to_css().contains(".y.axis path{display:none;}"));
}

#[test]
fn colors_and_interpolation_follow_the_config() {
    let config = LineChartConfig::new(vec![
        vec![DataPoint::new(0, 0), DataPoint::new(1, 1)],
        vec![DataPoint::new(0, 1), DataPoint::new(1, 0)],
    ])
    .with_line_colors(vec!["red".to_owned()])
    .with_interpolate(LineInterpolation::StepAfter);
    let chart = mounted(config);
    let output = chart.output();

    let lines = output.tree.find_by_class("line");
    let strokes: Vec<&str> = lines
        .iter()
        .filter_map(|node| node.styles.get("stroke").map(String::as_str))
        .collect();
    assert_eq!(strokes, vec!["red", "#3F4C55"]);
    assert_eq!(
        line_paths(&output.tree),
        vec!["M0,150H200V0".to_owned(), "M0,0H200V150".to_owned()]
    );
}

#[test]
fn explicit_domain_overrides_the_data_extent() {
    let config = LineChartConfig::new(vec![vec![DataPoint::new(5, 5), DataPoint::new(10, 10)]])
        .with_x_domain_range(0, 10)
        .with_y_domain_range(0, 10);
    let chart = mounted(config);
    assert_eq!(line_paths(&chart.output().tree), vec!["M100,75L200,0".to_owned()]);
}

#[test]
fn vanishingly_small_domain_renders_without_ticks() {
    let config = LineChartConfig::new(vec![vec![DataPoint::new(0, 0), DataPoint::new(1, 1)]])
        .with_axes(true)
        .with_x_domain_range(0.0, 1e-309);
    let chart = mounted(config);
    let output = chart.output();
    assert_eq!(line_paths(&output.tree).len(), 1);
    assert!(!output.tree.find_by_class("tick").is_empty());
}

#[test]
fn data_point_clicks_reach_the_handler_with_the_point() {
    let seen: Arc<Mutex<Vec<DataPoint>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let handlers = EventHandlers::default().with_click(Arc::new(move |datum: &Datum, _: &ChartEvent| {
        if let (Some(point), Ok(mut seen)) = (datum.as_point(), sink.lock()) {
            seen.push(point.clone());
        }
    }));

    let config = LineChartConfig::new(vec![vec![
        DataPoint::new(1, 2).with_color("green"),
        DataPoint::new(2, 4),
    ]])
    .with_data_points(true);
    let mut chart = LineChart::new(config).expect("chart").with_handlers(handlers);
    chart.mount(0.0).expect("mount");

    let output = chart.output();
    let points = output.tree.find_by_class("data-point");
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].styles.get("stroke").map(String::as_str), Some("green"));
    assert_eq!(points[1].styles.get("stroke").map(String::as_str), Some("#3F4C55"));
    assert_eq!(points[0].events.len(), 4);

    let click = ChartEvent::new(EventKind::Click, 3.0, 4.0);
    assert!(chart.dispatch(points[0].id, &click).expect("dispatch"));
    let seen = seen.lock().expect("lock");
    assert_eq!(seen.as_slice(), &[DataPoint::new(1, 2).with_color("green")]);

    let line = output.tree.find_by_class("line")[0].id;
    let over = ChartEvent::new(EventKind::MouseOver, 0.0, 0.0);
    assert!(!chart.dispatch(line, &over).expect("line has no handlers"));
    assert!(matches!(
        chart.scene().node(line).expect("line").datum(),
        Some(Datum::Series(series)) if series.len() == 2
    ));
}

#[test]
fn missing_data_is_rejected() {
    let result = LineChart::new(LineChartConfig::default());
    assert!(matches!(result, Err(ChartError::MissingData)));
}

#[test]
fn unparsable_dates_fail_the_render_pass() {
    let config = LineChartConfig::new(vec![vec![DataPoint::new("2016-01-01", 1)]])
        .with_types(ScaleKind::Time, ScaleKind::Linear);
    let mut chart = LineChart::new(config).expect("chart");
    assert!(matches!(chart.mount(0.0), Err(ChartError::DateParse { .. })));

    let config = LineChartConfig::new(vec![vec![DataPoint::new("01", 1)]])
        .with_types(ScaleKind::Time, ScaleKind::Linear)
        .with_date_pattern("%Q");
    let mut chart = LineChart::new(config).expect("chart");
    assert!(matches!(
        chart.mount(0.0),
        Err(ChartError::InvalidDatePattern { .. })
    ));
}

#[test]
fn ordinal_y_axis_is_a_config_error() {
    let config = LineChartConfig::new(vec![vec![DataPoint::new(1, "a")]])
        .with_types(ScaleKind::Linear, ScaleKind::Ordinal);
    assert!(matches!(LineChart::new(config), Err(ChartError::InvalidConfig(_))));
}

#[test]
fn tiny_viewport_with_axes_collapses_the_plot_area() {
    let config = LineChartConfig::new(vec![vec![DataPoint::new(1, 2), DataPoint::new(2, 4)]])
        .with_size(10, 10)
        .with_axes(true);
    let chart = mounted(config);
    let layout = chart.layout().expect("layout");
    assert_eq!(layout.area.width, 0.0);
    assert_eq!(layout.area.height, 0.0);
    assert_eq!(line_paths(&chart.output().tree), vec!["M0,0L0,0".to_owned()]);
}

#[test]
fn charts_can_share_one_date_parser_cache() {
    let cache = Rc::new(DateParserCache::new());
    for _ in 0..2 {
        let config = LineChartConfig::new(vec![vec![DataPoint::new("01-Jan-16", 1)]])
            .with_types(ScaleKind::Time, ScaleKind::Linear);
        let mut chart = LineChart::new(config)
            .expect("chart")
            .with_date_parser_cache(Rc::clone(&cache));
        chart.mount(0.0).expect("mount");
    }
    assert_eq!(cache.compilations(), 1);
}

#[test]
fn update_redraws_with_new_data_and_unique_scope() {
    let mut chart = mounted(LineChartConfig::new(vec![vec![
        DataPoint::new(0, 0),
        DataPoint::new(1, 1),
    ]]));
    let other = mounted(LineChartConfig::new(vec![vec![DataPoint::new(0, 0)]]));
    assert_ne!(chart.class_name(), other.class_name());

    chart
        .update(
            LineChartConfig::new(vec![
                vec![DataPoint::new(0, 0), DataPoint::new(1, 1)],
                vec![DataPoint::new(0, 1), DataPoint::new(1, 0)],
            ]),
            16.0,
        )
        .expect("update");
    assert_eq!(line_paths(&chart.output().tree).len(), 2);
    assert!(chart.animation_frame(32.0).expect("frame").is_finished());

    let mut renderer = NullRenderer::default();
    chart.render_to(&mut renderer).expect("render");
    assert_eq!(renderer.mounts, 1);
    assert_eq!(renderer.last_interactive_count, 0);
}
