use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::sync::{Arc, Mutex};

use approx::assert_relative_eq;
use easy_chart::api::JoinStrategy;
use easy_chart::core::path::translate;
use easy_chart::core::{ArcGeometry, JoinCounts, PieSlice, RenderRole};
use easy_chart::interaction::{ChartEvent, Datum, EventHandlers, EventKind};
use easy_chart::render::{InertNode, NodeId, rules_from};
use easy_chart::transition::{FrameOutcome, lerp};
use easy_chart::{ChartComponent, ChartError, PieChart, PieChartConfig};

fn slices(values: &[(&str, f64)]) -> Vec<PieSlice> {
    values
        .iter()
        .map(|(key, value)| PieSlice::new(*key, *value))
        .collect()
}

fn mounted(config: PieChartConfig) -> PieChart {
    let mut chart = PieChart::new(config).expect("chart");
    chart.mount(0.0).expect("mount");
    chart
}

fn slice_paths(tree: &InertNode) -> Vec<String> {
    tree.find_by_class("pie-chart-slice")
        .into_iter()
        .filter_map(|node| node.attr_text("d"))
        .collect()
}

fn spans(chart: &PieChart) -> Vec<f64> {
    chart
        .persisted_state()
        .geometries(RenderRole::Slice)
        .iter()
        .map(|geometry| geometry.span())
        .collect()
}

#[test]
fn mount_draws_one_slice_per_datum_without_labels() {
    let chart = mounted(PieChartConfig::new(slices(&[("a", 1.0), ("b", 3.0)])));
    let output = chart.output();
    let tree = &output.tree;

    assert_eq!(tree.attr_text("width").as_deref(), Some("400"));
    assert_eq!(
        slice_paths(tree),
        vec![
            "M0,-198A198,198 0 0,1 198,0L0,0Z".to_owned(),
            "M198,0A198,198 0 1,1 0,-198L0,0Z".to_owned(),
        ]
    );
    assert!(tree.find_by_tag("text").is_empty());
    assert_eq!(tree.find_by_tag("g").len(), 1);

    let group = &tree.children[0];
    assert_eq!(group.attr_text("id"), Some(format!("slices-{}", chart.uid())));
    assert_eq!(group.attr_text("transform").as_deref(), Some("translate(200, 200)"));

    let spans = spans(&chart);
    assert_relative_eq!(spans[1] / spans[0], 3.0, epsilon = 1e-12);
    assert_relative_eq!(spans[0] + spans[1], TAU, epsilon = 1e-12);
    assert_eq!(chart.running_transitions(), 0);
}

#[test]
fn slices_use_palette_colors_unless_given_one() {
    let data = vec![PieSlice::new("a", 1.0), PieSlice::new("b", 1.0).with_color("tomato")];
    let chart = mounted(PieChartConfig::new(data));
    let output = chart.output();
    let fills: Vec<String> = output
        .tree
        .find_by_class("pie-chart-slice")
        .into_iter()
        .filter_map(|node| node.attr_text("fill"))
        .collect();
    assert_eq!(fills, vec!["#1f77b4".to_owned(), "tomato".to_owned()]);
}

#[test]
fn shrinking_update_removes_the_surplus_slice_and_tweens_the_rest() {
    let mut chart = mounted(PieChartConfig::new(slices(&[("a", 1.0), ("b", 3.0)])));
    chart
        .update(PieChartConfig::new(slices(&[("a", 1.0)])), 1_000.0)
        .expect("update");

    assert_eq!(chart.scene().removed_count(), 1);
    assert_eq!(chart.persisted_state().len(RenderRole::Slice), 1);
    assert_eq!(
        chart.last_join_counts(),
        Some(JoinCounts {
            update: 1,
            enter: 0,
            exit: 1
        })
    );
    assert_eq!(chart.running_transitions(), 1);
    assert_eq!(
        slice_paths(&chart.output().tree),
        vec!["M0,-198A198,198 0 0,1 198,0L0,0Z".to_owned()]
    );

    chart.animation_frame(1_375.0).expect("frame");
    let halfway = ArcGeometry::new(0.0, lerp(FRAC_PI_2, TAU, 0.5));
    assert_eq!(
        slice_paths(&chart.output().tree),
        vec![chart.slice_arc().path(halfway)]
    );

    let outcome = chart.animation_frame(1_750.0).expect("frame");
    assert!(outcome.is_finished());
    assert_eq!(
        slice_paths(&chart.output().tree),
        vec!["M0,198A198,198 0 1,1 0,-198A198,198 0 1,1 0,198Z".to_owned()]
    );
}

#[test]
fn clearing_the_data_then_refilling_it() {
    let config = PieChartConfig::new(slices(&[("a", 1.0), ("b", 3.0)])).with_labels(true);
    let mut chart = mounted(config);

    chart
        .update(PieChartConfig::new(Vec::new()).with_labels(true), 1_000.0)
        .expect("clear");
    assert_eq!(
        chart.last_join_counts(),
        Some(JoinCounts {
            update: 0,
            enter: 0,
            exit: 2
        })
    );
    assert_eq!(chart.persisted_state().len(RenderRole::Slice), 0);
    assert_eq!(chart.persisted_state().len(RenderRole::Label), 0);
    assert!(chart.output().tree.find_by_class("pie-chart-slice").is_empty());
    assert!(chart.output().tree.find_by_tag("text").is_empty());

    chart
        .update(PieChartConfig::new(slices(&[("c", 2.0)])).with_labels(true), 2_000.0)
        .expect("refill");
    assert_eq!(
        chart.last_join_counts(),
        Some(JoinCounts {
            update: 0,
            enter: 1,
            exit: 0
        })
    );
    assert_eq!(chart.persisted_state().len(RenderRole::Slice), 1);
    assert_eq!(chart.persisted_state().len(RenderRole::Label), 1);
    assert_eq!(chart.output().tree.find_by_class("pie-chart-slice").len(), 1);
    assert_eq!(chart.output().tree.find_by_tag("text").len(), 1);

    chart.finish_transitions().expect("finish");
    assert_eq!(
        slice_paths(&chart.output().tree),
        vec!["M0,198A198,198 0 1,1 0,-198A198,198 0 1,1 0,198Z".to_owned()]
    );
}

#[test]
fn growing_update_enters_new_slices_at_their_target() {
    let mut chart = mounted(PieChartConfig::new(slices(&[("a", 1.0)])));
    chart
        .update(
            PieChartConfig::new(slices(&[("a", 1.0), ("b", 1.0), ("c", 2.0)])),
            0.0,
        )
        .expect("update");

    assert_eq!(
        chart.last_join_counts(),
        Some(JoinCounts {
            update: 1,
            enter: 2,
            exit: 0
        })
    );
    let targets = chart.persisted_state().geometries(RenderRole::Slice).to_vec();
    let arc = chart.slice_arc();
    let paths = slice_paths(&chart.output().tree);
    assert_eq!(paths.len(), 3);
    assert_eq!(paths[1], arc.path(targets[1]));
    assert_eq!(paths[2], arc.path(targets[2]));
    assert_eq!(chart.scene().removed_count(), 0);
}

#[test]
fn frames_of_a_superseded_update_are_ignored() {
    let mut chart = mounted(PieChartConfig::new(slices(&[("a", 1.0), ("b", 1.0)])));
    chart
        .update(PieChartConfig::new(slices(&[("a", 2.0), ("b", 1.0)])), 0.0)
        .expect("first update");
    let superseded = chart.transition_generation();

    chart
        .update(PieChartConfig::new(slices(&[("a", 1.0), ("b", 2.0)])), 100.0)
        .expect("second update");
    let current = chart.transition_generation();
    assert!(current > superseded);

    let before = slice_paths(&chart.output().tree);
    let outcome = chart
        .animation_frame_for(superseded, 10_000.0)
        .expect("stale frame");
    assert_eq!(
        outcome,
        FrameOutcome::Stale {
            requested: superseded,
            current
        }
    );
    assert_eq!(slice_paths(&chart.output().tree), before);

    assert_eq!(chart.finish_transitions().expect("finish"), 2);
    let arc = chart.slice_arc();
    let expected: Vec<String> = chart
        .persisted_state()
        .geometries(RenderRole::Slice)
        .iter()
        .map(|geometry| arc.path(*geometry))
        .collect();
    assert_eq!(slice_paths(&chart.output().tree), expected);
}

#[test]
fn keyed_join_continues_slices_by_key() {
    let config = PieChartConfig::new(slices(&[("a", 1.0), ("b", 1.0)])).with_join(JoinStrategy::Keyed);
    let mut chart = mounted(config.clone());
    let previous_b = chart.persisted_state().geometries(RenderRole::Slice)[1];
    assert_relative_eq!(previous_b.start_angle, PI, epsilon = 1e-12);

    chart
        .update(config.with_data(slices(&[("b", 1.0), ("c", 3.0)])), 0.0)
        .expect("update");
    assert_eq!(
        chart.last_join_counts(),
        Some(JoinCounts {
            update: 1,
            enter: 1,
            exit: 1
        })
    );
    assert_eq!(chart.scene().removed_count(), 1);

    let arc = chart.slice_arc();
    let targets = chart.persisted_state().geometries(RenderRole::Slice).to_vec();
    assert_eq!(
        slice_paths(&chart.output().tree),
        vec![arc.path(previous_b), arc.path(targets[1])]
    );
}

#[test]
fn labels_sit_on_the_inner_label_ring() {
    let chart = mounted(
        PieChartConfig::new(slices(&[("a", 1.0), ("b", 3.0)])).with_labels(true),
    );
    let output = chart.output();
    let labels = output.tree.find_by_class("pie-chart-label");
    let texts: Vec<&str> = labels.iter().filter_map(|node| node.text.as_deref()).collect();
    assert_eq!(texts, vec!["a", "b"]);

    let label_arc = chart.label_arc();
    assert_eq!(label_arc.outer_radius(), 158.0);
    let geometry = chart.persisted_state().geometries(RenderRole::Label)[0];
    let (x, y) = label_arc.centroid(geometry);
    assert_eq!(labels[0].attr_text("transform"), Some(translate(x, y)));
    assert_eq!(labels[0].attr_text("dy").as_deref(), Some(".35em"));
    assert_eq!(
        output.tree.children[1].attr_text("id"),
        Some(format!("labels-{}", chart.uid()))
    );
}

#[test]
fn label_positions_tween_with_their_slices() {
    let config = PieChartConfig::new(slices(&[("a", 1.0), ("b", 3.0)])).with_labels(true);
    let mut chart = mounted(config.clone());
    chart
        .update(config.with_data(slices(&[("a", 3.0), ("b", 1.0)])), 0.0)
        .expect("update");
    assert_eq!(chart.running_transitions(), 4);

    chart.animation_frame(750.0).expect("frame");
    let label_arc = chart.label_arc();
    let geometry = chart.persisted_state().geometries(RenderRole::Label)[1];
    let (x, y) = label_arc.centroid(geometry);
    let output = chart.output();
    let labels = output.tree.find_by_class("pie-chart-label");
    assert_eq!(labels[1].attr_text("transform"), Some(translate(x, y)));
}

#[test]
fn turning_labels_off_drops_label_state() {
    let config = PieChartConfig::new(slices(&[("a", 1.0), ("b", 3.0)])).with_labels(true);
    let mut chart = mounted(config.clone());
    assert_eq!(chart.persisted_state().len(RenderRole::Label), 2);

    chart.update(config.with_labels(false), 0.0).expect("update");
    assert!(chart.persisted_state().is_empty(RenderRole::Label));
    assert!(chart.output().tree.find_by_tag("text").is_empty());
}

#[test]
fn donut_hole_and_oversized_padding() {
    let donut = mounted(
        PieChartConfig::new(slices(&[("a", 1.0)]))
            .with_size(200)
            .with_inner_hole_size(100.0),
    );
    assert_eq!(donut.inner_radius(), 50.0);
    assert_eq!(donut.slice_arc().inner_radius(), 48.0);
    assert_eq!(
        slice_paths(&donut.output().tree),
        vec!["M0,98A98,98 0 1,1 0,-98A98,98 0 1,1 0,98M0,48A48,48 0 1,0 0,-48A48,48 0 1,0 0,48Z".to_owned()]
    );

    let squeezed = mounted(PieChartConfig::new(slices(&[("a", 1.0)])).with_size(2));
    assert_eq!(squeezed.slice_arc().outer_radius(), 0.0);
    assert_eq!(slice_paths(&squeezed.output().tree).len(), 1);
}

#[test]
fn slice_clicks_carry_the_pie_arc() {
    let keys: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&keys);
    let handlers = EventHandlers::default().with_click(Arc::new(
        move |datum: &Datum, _: &ChartEvent| {
            if let (Some(arc), Ok(mut keys)) = (datum.as_slice(), sink.lock()) {
                keys.push(arc.data.key.clone());
            }
        },
    ));
    let mut chart = PieChart::new(PieChartConfig::new(slices(&[("a", 1.0), ("b", 2.0)])))
        .expect("chart")
        .with_handlers(handlers);

    let root: NodeId = serde_json::from_str("0").expect("node id");
    let click = ChartEvent::new(EventKind::Click, 0.0, 0.0);
    assert!(matches!(chart.dispatch(root, &click), Err(ChartError::InvalidData(_))));

    chart.mount(0.0).expect("mount");
    let output = chart.output();
    let nodes = output.tree.find_by_class("pie-chart-slice");
    assert!(chart.dispatch(nodes[1].id, &click).expect("dispatch"));
    assert_eq!(keys.lock().expect("lock").as_slice(), &["b".to_owned()]);
}

#[test]
fn user_styles_override_defaults_within_the_scope() {
    let config = PieChartConfig::new(slices(&[("a", 1.0)]))
        .with_styles(rules_from(&[(".pie-chart-slice", &[("stroke", "black")])]));
    let chart = mounted(config);
    let css = chart.output().style.to_css();
    let scoped = format!(".{} .pie-chart-slice{{stroke:black;stroke-width:1;opacity:1;}}", chart.class_name());
    assert!(css.contains(&scoped), "{css}");
}

#[test]
fn invalid_slices_are_rejected() {
    assert!(matches!(
        PieChart::new(PieChartConfig::default()),
        Err(ChartError::MissingData)
    ));
    assert!(matches!(
        PieChart::new(PieChartConfig::new(slices(&[("a", -1.0)]))),
        Err(ChartError::InvalidData(_))
    ));
}
