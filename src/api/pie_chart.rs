use tracing::debug;

use crate::core::path::translate;
use crate::core::{
    ArcGenerator, ArcGeometry, JoinCounts, JoinPlan, PersistedElementState, PieArc, PieSlice,
    RenderRole, Viewport, pie_layout,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{ChartEvent, Datum, EventHandlers};
use crate::render::{AttrValue, ChartOutput, NodeId, SceneGraph, StyleBlock};
use crate::transition::{FrameOutcome, TransitionScheduler, Tween};

use super::component::{ChartComponent, next_chart_uid};
use super::config::{JoinStrategy, PieChartConfig};
use super::palette::Palette;
use super::styles::compose_styles;

/// Share of the outer radius the label ring sits inside the slices.
const LABEL_RADIUS_INSET: f64 = 0.2;

/// Pie or donut chart whose slices tween between renders.
///
/// Each render pass rebuilds the scene. Continuity comes from the persisted
/// per-role geometry: the nodes of the previous pass are recreated from it,
/// joined against the new data, and updated slices are tweened from their
/// previous arc to the new one.
#[derive(Debug)]
pub struct PieChart {
    uid: u64,
    config: PieChartConfig,
    handlers: EventHandlers,
    palette: Palette,
    scene: SceneGraph,
    state: PersistedElementState<ArcGeometry>,
    slice_keys: Vec<String>,
    label_keys: Vec<String>,
    scheduler: TransitionScheduler,
    last_plan: Option<JoinPlan>,
    mounted: bool,
}

struct PieScene {
    scene: SceneGraph,
    slices: NodeId,
    labels: Option<NodeId>,
}

impl PieChart {
    /// Fails with [`ChartError::MissingData`] when the config has no dataset.
    pub fn new(config: PieChartConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            uid: next_chart_uid(),
            config,
            handlers: EventHandlers::default(),
            palette: Palette::category20(),
            scene: SceneGraph::new("svg"),
            state: PersistedElementState::new(),
            slice_keys: Vec::new(),
            label_keys: Vec::new(),
            scheduler: TransitionScheduler::new(),
            last_plan: None,
            mounted: false,
        })
    }

    #[must_use]
    pub fn with_handlers(mut self, handlers: EventHandlers) -> Self {
        self.handlers = handlers;
        self
    }

    #[must_use]
    pub fn with_scheduler(mut self, scheduler: TransitionScheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    #[must_use]
    pub fn uid(&self) -> u64 {
        self.uid
    }

    #[must_use]
    pub fn class_name(&self) -> String {
        format!("pie-chart-{}", self.uid)
    }

    #[must_use]
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    #[must_use]
    pub fn persisted_state(&self) -> &PersistedElementState<ArcGeometry> {
        &self.state
    }

    /// Slice join of the most recent render pass.
    #[must_use]
    pub fn last_join(&self) -> Option<&JoinPlan> {
        self.last_plan.as_ref()
    }

    #[must_use]
    pub fn last_join_counts(&self) -> Option<JoinCounts> {
        self.last_plan.as_ref().map(JoinPlan::counts)
    }

    #[must_use]
    pub fn transition_generation(&self) -> u64 {
        self.scheduler.generation()
    }

    #[must_use]
    pub fn running_transitions(&self) -> usize {
        self.scheduler.active_count()
    }

    /// Samples transitions on behalf of a frame callback requested for
    /// `generation`; callbacks of superseded passes change nothing.
    pub fn animation_frame_for(&mut self, generation: u64, now_ms: f64) -> ChartResult<FrameOutcome> {
        self.scheduler.frame(generation, now_ms, &mut self.scene)
    }

    /// Jumps all running transitions to their targets.
    pub fn finish_transitions(&mut self) -> ChartResult<usize> {
        self.scheduler.finish(&mut self.scene)
    }

    #[must_use]
    pub fn outer_radius(&self) -> f64 {
        f64::from(self.config.size) * 0.5
    }

    #[must_use]
    pub fn inner_radius(&self) -> f64 {
        self.config.inner_hole_size * 0.5
    }

    #[must_use]
    pub fn slice_arc(&self) -> ArcGenerator {
        let padding = self.config.padding;
        ArcGenerator::new(self.inner_radius() - padding, self.outer_radius() - padding)
    }

    #[must_use]
    pub fn label_arc(&self) -> ArcGenerator {
        let outer = self.outer_radius();
        let radius = outer - self.config.padding - LABEL_RADIUS_INSET * outer;
        ArcGenerator::new(radius, radius)
    }

    fn create_scene(&self) -> ChartResult<PieScene> {
        let size = Viewport::square(self.config.size).validate()?;
        let radius = self.outer_radius();

        let mut scene = SceneGraph::new("svg");
        let svg = scene.root();
        scene
            .select(svg)
            .attr("width", size.width)
            .attr("height", size.height);

        let slices = scene.append(svg, "g")?;
        scene
            .select(slices)
            .attr("id", format!("slices-{}", self.uid))
            .attr("transform", translate(radius, radius));

        let labels = if self.config.labels {
            let labels = scene.append(svg, "g")?;
            scene
                .select(labels)
                .attr("id", format!("labels-{}", self.uid))
                .attr("transform", translate(radius, radius));
            Some(labels)
        } else {
            None
        };

        Ok(PieScene {
            scene,
            slices,
            labels,
        })
    }

    fn plan(&self, previous_keys: &[String], next_keys: &[String]) -> JoinPlan {
        match self.config.join {
            JoinStrategy::Positional => JoinPlan::positional(previous_keys.len(), next_keys.len()),
            JoinStrategy::Keyed => JoinPlan::keyed(previous_keys, next_keys),
        }
    }

    fn slice_fill(&self, arc: &PieArc) -> String {
        arc.data
            .color
            .clone()
            .unwrap_or_else(|| self.palette.color(arc.index).to_owned())
    }

    fn style_slice(&self, scene: &mut SceneGraph, node: NodeId, arc: &PieArc) {
        scene
            .select(node)
            .attr("fill", self.slice_fill(arc))
            .datum(&Datum::Slice(arc.clone()))
            .on_all(&self.handlers);
    }

    /// Recreates the nodes of the previous pass from persisted geometry.
    fn restore_previous(&self, pie: &mut PieScene) -> ChartResult<()> {
        let slice_arc = self.slice_arc();
        for geometry in self.state.geometries(RenderRole::Slice) {
            let node = pie.scene.append(pie.slices, "path")?;
            pie.scene
                .select(node)
                .attr("class", "pie-chart-slice")
                .attr("d", slice_arc.path(*geometry));
        }

        if let Some(labels) = pie.labels {
            let label_arc = self.label_arc();
            let geometries = self.state.geometries(RenderRole::Label);
            for (geometry, key) in geometries.iter().zip(&self.label_keys) {
                let (x, y) = label_arc.centroid(*geometry);
                let node = pie.scene.append(labels, "text")?;
                pie.scene
                    .select(node)
                    .attr("dy", ".35em")
                    .attr("class", "pie-chart-label")
                    .attr("transform", translate(x, y))
                    .text(key);
            }
        }
        Ok(())
    }

    /// Joins, updates, enters and exits the slice and label nodes.
    fn reconcile(&mut self, mut pie: PieScene, now_ms: f64) -> ChartResult<()> {
        let data: Vec<PieSlice> = self.config.validate()?.to_vec();
        let arcs = pie_layout(&data);
        let next_keys: Vec<String> = data.iter().map(|slice| slice.key.clone()).collect();
        let targets: Vec<ArcGeometry> = arcs.iter().map(|arc| arc.geometry).collect();

        let plan = self.plan(&self.slice_keys, &next_keys);
        let groups = pie.scene.join_with_plan(pie.slices, "path", plan.clone())?;
        let transitions = self
            .state
            .retarget(RenderRole::Slice, &plan, targets.clone());

        let slice_arc = self.slice_arc();
        let entered = pie.scene.enter(pie.slices, "path", &groups.enter)?;
        for (node, index) in groups.update.iter().copied().chain(entered) {
            let (from, to) = transitions[index];
            self.style_slice(&mut pie.scene, node, &arcs[index]);
            pie.scene
                .select(node)
                .attr("class", "pie-chart-slice")
                .attr("d", slice_arc.path(from));
            self.scheduler.schedule_tween(
                node,
                "d",
                now_ms,
                Tween::new(from, to),
                move |geometry: &ArcGeometry| AttrValue::Text(slice_arc.path(*geometry)),
            );
        }
        pie.scene.exit(&groups.exit)?;

        match pie.labels {
            Some(labels) => {
                let label_plan = self.plan(&self.label_keys, &next_keys);
                let label_groups = pie.scene.join_with_plan(labels, "text", label_plan.clone())?;
                let label_transitions =
                    self.state.retarget(RenderRole::Label, &label_plan, targets);
                let label_arc = self.label_arc();

                for &(node, index) in &label_groups.update {
                    let (from, to) = label_transitions[index];
                    let start = label_arc.centroid(from);
                    pie.scene
                        .select(node)
                        .datum(&Datum::Slice(arcs[index].clone()))
                        .attr("transform", translate(start.0, start.1))
                        .text(&arcs[index].data.key);
                    self.scheduler.schedule_tween(
                        node,
                        "transform",
                        now_ms,
                        Tween::new(start, label_arc.centroid(to)),
                        |point: &(f64, f64)| AttrValue::Text(translate(point.0, point.1)),
                    );
                }
                for (node, index) in pie.scene.enter(labels, "text", &label_groups.enter)? {
                    let (x, y) = label_arc.centroid(label_transitions[index].1);
                    pie.scene
                        .select(node)
                        .datum(&Datum::Slice(arcs[index].clone()))
                        .attr("dy", ".35em")
                        .attr("class", "pie-chart-label")
                        .attr("transform", translate(x, y))
                        .text(&arcs[index].data.key);
                }
                pie.scene.exit(&label_groups.exit)?;
                self.label_keys = next_keys.clone();
            }
            None => {
                self.state.clear(RenderRole::Label);
                self.label_keys.clear();
            }
        }

        let counts = plan.counts();
        debug!(
            uid = self.uid,
            update = counts.update,
            enter = counts.enter,
            exit = counts.exit,
            removed = pie.scene.removed_count(),
            generation = self.scheduler.generation(),
            "pie chart reconciled"
        );

        self.slice_keys = next_keys;
        self.last_plan = Some(plan);
        self.scene = pie.scene;
        Ok(())
    }
}

impl ChartComponent for PieChart {
    type Config = PieChartConfig;

    fn config(&self) -> &PieChartConfig {
        &self.config
    }

    /// Draws every slice at its target geometry; nothing is tweened.
    fn mount(&mut self, now_ms: f64) -> ChartResult<()> {
        self.scheduler.begin_generation();
        self.state = PersistedElementState::new();
        self.slice_keys.clear();
        self.label_keys.clear();

        let pie = self.create_scene()?;
        self.reconcile(pie, now_ms)?;
        // Entered slices start at their target, so the first pass is final.
        self.scheduler.finish(&mut self.scene)?;
        self.mounted = true;
        Ok(())
    }

    fn update(&mut self, config: PieChartConfig, now_ms: f64) -> ChartResult<()> {
        config.validate()?;
        self.config = config;
        if !self.mounted {
            return self.mount(now_ms);
        }

        self.scheduler.begin_generation();
        let mut pie = self.create_scene()?;
        self.restore_previous(&mut pie)?;
        self.reconcile(pie, now_ms)
    }

    fn animation_frame(&mut self, now_ms: f64) -> ChartResult<FrameOutcome> {
        let generation = self.scheduler.generation();
        self.animation_frame_for(generation, now_ms)
    }

    fn output(&self) -> ChartOutput {
        let class_name = self.class_name();
        ChartOutput {
            style: StyleBlock::new(
                format!(".{class_name}"),
                compose_styles(&self.config.styles, None),
            ),
            class_name,
            tree: self.scene.snapshot(),
        }
    }

    fn dispatch(&self, node: NodeId, event: &ChartEvent) -> ChartResult<bool> {
        if !self.mounted {
            return Err(ChartError::InvalidData(
                "pie chart has not been mounted".to_owned(),
            ));
        }
        self.scene.dispatch(node, event)
    }
}
