use easy_chart::api::{JoinStrategy, LineChartConfig, PieChartConfig};
use easy_chart::core::{AxisValue, DataPoint, LineInterpolation, PieSlice, ScaleKind};
use easy_chart::render::{CHART_OUTPUT_JSON_SCHEMA_V1, ChartOutput, MarkupRenderer};
use easy_chart::{ChartComponent, ChartError, LineChart, PieChart};

fn mounted_output(config: LineChartConfig) -> ChartOutput {
    let mut chart = LineChart::new(config).expect("chart");
    chart.mount(0.0).expect("mount");
    chart.output()
}

// Whole-pixel coordinates keep the float comparison exact.
fn line_output() -> ChartOutput {
    mounted_output(
        LineChartConfig::new(vec![vec![DataPoint::new(0, 0), DataPoint::new(2, 150)]])
            .with_data_points(true),
    )
}

#[test]
fn output_contract_v1_round_trips() {
    let output = line_output();
    let json = output.to_json_contract_v1_pretty().expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("value");
    assert_eq!(
        value["schema_version"].as_u64(),
        Some(u64::from(CHART_OUTPUT_JSON_SCHEMA_V1))
    );
    assert_eq!(value["output"]["tree"]["tag"], "svg");

    let restored = ChartOutput::from_json_compat_str(&json).expect("restore");
    assert_eq!(restored, output);
}

#[test]
fn bare_output_json_is_accepted() {
    let output = line_output();
    let json = output.to_json_pretty().expect("json");
    let restored = ChartOutput::from_json_compat_str(&json).expect("restore");
    assert_eq!(restored, output);
}

#[test]
fn unknown_schema_version_is_rejected() {
    let output = line_output();
    let json = output
        .to_json_contract_v1_pretty()
        .expect("json")
        .replacen("\"schema_version\": 1", "\"schema_version\": 2", 1);
    assert!(matches!(
        ChartOutput::from_json_compat_str(&json),
        Err(ChartError::InvalidData(_))
    ));
}

#[test]
fn restored_output_renders_the_same_markup() {
    let output = mounted_output(
        LineChartConfig::new(vec![vec![DataPoint::new(1, 2), DataPoint::new(2, 4)]])
            .with_axes(true)
            .with_axis_labels("x", "y"),
    );
    let restored = ChartOutput::from_json_compat_str(&output.to_json_pretty().expect("json"))
        .expect("restore");
    assert_eq!(
        MarkupRenderer::render_to_string(&restored),
        MarkupRenderer::render_to_string(&output)
    );
}

#[test]
fn line_config_reads_camel_case_props() {
    let config = LineChartConfig::from_json_str(
        r#"{
            "data": [[{"x": "01-Jan-16", "y": 2}, {"x": "02-Jan-16", "y": 4, "color": "red"}]],
            "xType": "time",
            "interpolate": "step-before",
            "axes": true,
            "verticalGrid": true,
            "yDomainRange": [0, 10],
            "axisLabels": {"x": "Day"},
            "margin": {"left": 70}
        }"#,
    )
    .expect("config");

    assert_eq!(config.width, 200);
    assert_eq!(config.height, 150);
    assert_eq!(config.x_type, ScaleKind::Time);
    assert_eq!(config.y_type, ScaleKind::Linear);
    assert_eq!(config.interpolate, LineInterpolation::StepBefore);
    assert!(config.vertical_grid);
    assert_eq!(
        config.y_domain_range,
        Some([AxisValue::Number(0.0), AxisValue::Number(10.0)])
    );
    assert_eq!(config.axis_labels.x, "Day");
    assert_eq!(config.axis_labels.y, "");
    assert_eq!(config.margin.and_then(|margin| margin.left), Some(70.0));

    let data = config.validate().expect("valid");
    assert_eq!(data[0][1].color.as_deref(), Some("red"));

    let again = LineChartConfig::from_json_str(&config.to_json_pretty().expect("json"))
        .expect("round trip");
    assert_eq!(again, config);
}

#[test]
fn text_type_names_an_ordinal_axis() {
    let config = LineChartConfig::from_json_str(r#"{"data": [], "xType": "text"}"#).expect("config");
    assert_eq!(config.x_type, ScaleKind::Ordinal);
    let json = config.to_json_pretty().expect("json");
    assert!(json.contains("\"xType\": \"text\""));
}

#[test]
fn pie_config_defaults_and_join_strategy() {
    let config = PieChartConfig::from_json_str(
        r#"{"data": [{"key": "a", "value": 1}], "labels": true, "join": "keyed"}"#,
    )
    .expect("config");
    assert_eq!(config.size, 400);
    assert_eq!(config.padding, 2.0);
    assert_eq!(config.inner_hole_size, 0.0);
    assert_eq!(config.join, JoinStrategy::Keyed);
    assert_eq!(config.data, Some(vec![PieSlice::new("a", 1.0)]));
}

#[test]
fn config_without_data_parses_but_cannot_build_a_chart() {
    let config = PieChartConfig::from_json_str("{}").expect("config");
    assert!(matches!(PieChart::new(config), Err(ChartError::MissingData)));

    assert!(matches!(
        LineChartConfig::from_json_str("{\"width\": \"wide\"}"),
        Err(ChartError::InvalidData(_))
    ));
}
