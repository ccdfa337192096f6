use std::rc::Rc;

use tracing::debug;

use crate::core::path::translate;
use crate::core::{
    AxisId, DataPoint, DateParserCache, PlotArea, Scale, ScaleSpec, Viewport,
    calculate_margin, generate_scale, line_path, map_value,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{ChartEvent, Datum, EventHandlers};
use crate::render::{ChartOutput, NodeId, SceneGraph, StyleBlock};
use crate::transition::FrameOutcome;

use super::axis::CartesianAxes;
use super::component::{ChartComponent, next_chart_uid};
use super::config::LineChartConfig;
use super::palette::{DEFAULT_LINE_COLORS, Palette};
use super::styles::{axis_styles, compose_styles};

/// Geometry resolved by the last render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct CartesianLayout {
    pub area: PlotArea,
    pub x: Scale,
    pub y: Scale,
}

/// Static multi-series line chart.
///
/// Every render pass rebuilds the scene from scratch; lines are redrawn, not
/// tweened.
#[derive(Debug)]
pub struct LineChart {
    uid: u64,
    config: LineChartConfig,
    handlers: EventHandlers,
    dates: Rc<DateParserCache>,
    scene: SceneGraph,
    layout: Option<CartesianLayout>,
}

impl LineChart {
    /// Fails with [`ChartError::MissingData`] when the config has no dataset.
    pub fn new(config: LineChartConfig) -> ChartResult<Self> {
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

    /// Shares one parser cache between several charts.
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
        format!("line-chart-{}", self.uid)
    }

    #[must_use]
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    #[must_use]
    pub fn layout(&self) -> Option<&CartesianLayout> {
        self.layout.as_ref()
    }

    #[must_use]
    pub fn date_parser_cache(&self) -> &DateParserCache {
        &self.dates
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
            data.iter().flatten().map(|point| &point.x),
            &parse_date,
        )?;
        let y = generate_scale(
            ScaleSpec::new(AxisId::Y, config.y_type, area.height)
                .with_domain_override(config.y_domain_range.as_ref()),
            data.iter().flatten().map(|point| &point.y),
            &parse_date,
        )?;
        let colors = Palette::with_overrides(&config.line_colors, &DEFAULT_LINE_COLORS);

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
                vertical_grid: config.vertical_grid,
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

        let position = |point: &DataPoint| -> ChartResult<(f64, f64)> {
            Ok((
                map_value(&x, &point.x, &parse_date)?,
                map_value(&y, &point.y, &parse_date)?,
            ))
        };

        let lines = scene.append(root, "g")?;
        scene.select(lines).attr("class", "lineChart");
        let join = scene.join(lines, "path", data.len())?;
        for (node, index) in scene.enter(lines, "path", &join.enter)? {
            let series = &data[index];
            let points = series
                .iter()
                .map(&position)
                .collect::<ChartResult<Vec<_>>>()?;
            let selection = scene
                .select(node)
                .attr("class", "line")
                .style("stroke", colors.color(index))
                .datum(&Datum::Series(series.clone()));
            if let Some(path) = line_path(&points, config.interpolate) {
                selection.attr("d", path);
            }
        }

        if config.data_points {
            let group = scene.append(root, "g")?;
            scene.select(group).attr("class", "dataPoints");
            for (series_index, series) in data.iter().enumerate() {
                for point in series {
                    let (cx, cy) = position(point)?;
                    let stroke = point
                        .color
                        .as_deref()
                        .unwrap_or_else(|| colors.color(series_index));
                    scene
                        .select(group)
                        .append("circle")
                        .datum(&Datum::Point(point.clone()))
                        .attr("class", "data-point")
                        .style("stroke-width", "2px")
                        .style("stroke", stroke)
                        .style("fill", "white")
                        .attr("cx", cx)
                        .attr("cy", cy)
                        .on_all(&self.handlers);
                }
            }
        }

        debug!(
            uid = self.uid,
            series = data.len(),
            width = area.width,
            height = area.height,
            "line chart render pass"
        );
        self.scene = scene;
        self.layout = Some(CartesianLayout { area, x, y });
        Ok(())
    }
}

impl ChartComponent for LineChart {
    type Config = LineChartConfig;

    fn config(&self) -> &LineChartConfig {
        &self.config
    }

    fn mount(&mut self, _now_ms: f64) -> ChartResult<()> {
        self.render()
    }

    fn update(&mut self, config: LineChartConfig, _now_ms: f64) -> ChartResult<()> {
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
            Some(axis_styles(
                config.grid,
                config.vertical_grid,
                config.y_axis_orient_right,
            )),
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
                "line chart has not been mounted".to_owned(),
            ));
        }
        self.scene.dispatch(node, event)
    }
}
