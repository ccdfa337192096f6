use std::rc::Rc;

use tracing::debug;

use crate::core::path::translate;
use crate::core::{
    AxisId, AxisValue, DateParserCache, PlotArea, Scale, ScaleKind, ScaleSpec, Viewport,
    calculate_margin, generate_scale, map_value,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{ChartEvent, Datum, EventHandlers};
use crate::render::{ChartOutput, NodeId, SceneGraph, StyleBlock};
use crate::transition::FrameOutcome;

use super::axis::CartesianAxes;
use super::component::{ChartComponent, next_chart_uid};
use super::config::BarChartConfig;
use super::line_chart::CartesianLayout;
use super::palette::Palette;
use super::styles::{axis_styles, compose_styles};

/// Single-series bar chart.
///
/// Ordinal x-axes lay bars out in bands; linear and time x-axes centre a
/// fixed-width bar on each value. Bars grow from the y value `0`.
#[derive(Debug)]
pub struct BarChart {
    uid: u64,
    config: BarChartConfig,
    handlers: EventHandlers,
    dates: Rc<DateParserCache>,
    scene: SceneGraph,
    layout: Option<CartesianLayout>,
}

impl BarChart {
    pub fn new(config: BarChartConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            uid: next_chart_uid(),
            config,
            handlers: EventHandlers::default(),
            dates: Rc::new(DateParserCache::new()),
            scene: SceneGraph::new("svg"),
            layout: None,
        })
    }

    #[must_use]
    pub fn with_handlers(mut self, handlers: EventHandlers) -> Self {
        self.handlers = handlers;
        self
    }

    #[must_use]
    pub fn with_date_parser_cache(mut self, dates: Rc<DateParserCache>) -> Self {
        self.dates = dates;
        self
    }

    #[must_use]
    pub fn uid(&self) -> u64 {
        self.uid
    }

    #[must_use]
    pub fn class_name(&self) -> String {
        format!("bar-chart-{}", self.uid)
    }

    #[must_use]
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    #[must_use]
    pub fn layout(&self) -> Option<&CartesianLayout> {
        self.layout.as_ref()
    }

    fn render(&mut self) -> ChartResult<()> {
        let config = &self.config;
        let data = config.validate()?;
        let viewport = Viewport::new(config.width, config.height).validate()?;
        let margin = calculate_margin(config.axes, config.margin, config.y_axis_orient_right);
        let area = PlotArea::new(viewport, margin);

        let dates = &self.dates;
        let pattern = config.date_pattern.as_str();
        let parse_date = |value: &str| dates.parse(pattern, value);

        let x = generate_scale(
            ScaleSpec::new(AxisId::X, config.x_type, area.width)
                .with_domain_override(config.x_domain_range.as_ref()),
            data.iter().map(|point| &point.x),
            &parse_date,
        )?;
        // Bars are measured from zero, so zero is always in the y domain.
        let zero = AxisValue::Number(0.0);
        let baseline_value = (config.y_type == ScaleKind::Linear).then_some(&zero);
        let y = generate_scale(
            ScaleSpec::new(AxisId::Y, config.y_type, area.height)
                .with_domain_override(config.y_domain_range.as_ref()),
            data.iter().map(|point| &point.y).chain(baseline_value),
            &parse_date,
        )?;
        let y_scale = y.as_continuous().ok_or_else(|| {
            ChartError::InvalidConfig("bar charts need a continuous y-axis".to_owned())
        })?;
        let baseline = match config.y_type {
            ScaleKind::Linear => y_scale.map(0.0),
            _ => y_scale.range().0,
        };
        let palette = Palette::category20();

        let mut scene = SceneGraph::new("svg");
        let svg = scene.root();
        scene
            .select(svg)
            .attr("width", area.outer_width())
            .attr("height", area.outer_height());
        let root = scene.append(svg, "g")?;
        scene
            .select(root)
            .attr("transform", translate(margin.left, margin.top));

        if config.axes {
            CartesianAxes {
                grid: config.grid,
                vertical_grid: false,
                x_type: config.x_type,
                y_type: config.y_type,
                x_ticks: config.x_ticks,
                y_ticks: config.y_ticks,
                time_format: config.tick_time_display_format.as_deref(),
                labels: &config.axis_labels,
                y_axis_orient_right: config.y_axis_orient_right,
            }
            .draw(&mut scene, root, area, &x, &y)?;
        }

        let (bar_offset, bar_width) = match &x {
            Scale::Ordinal(bands) => (0.0, bands.band_width()),
            Scale::Continuous(_) => (-config.bar_width / 2.0, config.bar_width),
        };

        let bars = scene.append(root, "g")?;
        scene.select(bars).attr("class", "barChart");
        let join = scene.join(bars, "rect", data.len())?;
        for (node, index) in scene.enter(bars, "rect", &join.enter)? {
            let point = &data[index];
            let left = map_value(&x, &point.x, &parse_date)? + bar_offset;
            let top = map_value(&y, &point.y, &parse_date)?;
            let selection = scene
                .select(node)
                .datum(&Datum::Point(point.clone()))
                .attr("class", "bar")
                .attr("x", left)
                .attr("y", top.min(baseline))
                .attr("width", bar_width)
                .attr("height", (baseline - top).abs())
                .on_all(&self.handlers);
            let fill = match (&point.color, config.color_bars) {
                (Some(color), _) => Some(color.as_str()),
                (None, true) => Some(palette.color(index)),
                (None, false) => None,
            };
            if let Some(fill) = fill {
                selection.style("fill", fill);
            }
        }

        debug!(
            uid = self.uid,
            bars = data.len(),
            bar_width,
            "bar chart render pass"
        );
        self.scene = scene;
        self.layout = Some(CartesianLayout { area, x, y });
        Ok(())
    }
}

impl ChartComponent for BarChart {
    type Config = BarChartConfig;

    fn config(&self) -> &BarChartConfig {
        &self.config
    }

    fn mount(&mut self, _now_ms: f64) -> ChartResult<()> {
        self.render()
    }

    fn update(&mut self, config: BarChartConfig, _now_ms: f64) -> ChartResult<()> {
        config.validate()?;
        self.config = config;
        self.render()
    }

    fn animation_frame(&mut self, _now_ms: f64) -> ChartResult<FrameOutcome> {
        Ok(FrameOutcome::Sampled {
            applied: 0,
            remaining: 0,
        })
    }

    fn output(&self) -> ChartOutput {
        let config = &self.config;
        let rules = compose_styles(
            &config.style,
            Some(axis_styles(config.grid, false, config.y_axis_orient_right)),
        );
        let class_name = self.class_name();
        ChartOutput {
            style: StyleBlock::new(format!(".{class_name}"), rules),
            class_name,
            tree: self.scene.snapshot(),
        }
    }

    fn dispatch(&self, node: NodeId, event: &ChartEvent) -> ChartResult<bool> {
        if self.layout.is_none() {
            return Err(ChartError::InvalidData(
                "bar chart has not been mounted".to_owned(),
            ));
        }
        self.scene.dispatch(node, event)
    }
}
