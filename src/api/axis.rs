use crate::core::path::{fmt_num, translate};
use crate::core::{PlotArea, Scale, ScaleKind};
use crate::error::ChartResult;
use crate::render::{NodeId, SceneGraph};

use super::config::AxisLabels;

const DEFAULT_TICK_COUNT: usize = 10;
const OUTER_TICK_SIZE: f64 = 6.0;
const GRID_TICK_PADDING: f64 = 10.0;
const PLAIN_TICK_PADDING: f64 = 16.0;

/// Side of the plot an axis is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrient {
    Bottom,
    Left,
    Right,
}

impl AxisOrient {
    fn sign(self) -> f64 {
        match self {
            Self::Bottom | Self::Right => 1.0,
            Self::Left => -1.0,
        }
    }
}

/// One axis drawing request.
#[derive(Debug, Clone, Copy)]
pub struct AxisSpec<'a> {
    pub orient: AxisOrient,
    pub scale: &'a Scale,
    pub inner_tick_size: f64,
    pub outer_tick_size: f64,
    pub tick_padding: f64,
    pub ticks: Option<usize>,
    pub time_format: Option<&'a str>,
}

impl<'a> AxisSpec<'a> {
    /// Grid lines span `grid_length` across the plot; without a grid ticks
    /// have no length and labels sit further out.
    #[must_use]
    pub fn new(orient: AxisOrient, scale: &'a Scale, grid_length: Option<f64>) -> Self {
        let (inner_tick_size, tick_padding) = match grid_length {
            Some(length) => (-length, GRID_TICK_PADDING),
            None => (0.0, PLAIN_TICK_PADDING),
        };
        Self {
            orient,
            scale,
            inner_tick_size,
            outer_tick_size: OUTER_TICK_SIZE,
            tick_padding,
            ticks: None,
            time_format: None,
        }
    }

    #[must_use]
    pub fn with_ticks(mut self, ticks: Option<usize>) -> Self {
        self.ticks = ticks.filter(|count| *count > 0);
        self
    }

    #[must_use]
    pub fn with_time_format(mut self, time_format: Option<&'a str>) -> Self {
        self.time_format = time_format;
        self
    }

    /// Tick positions and labels along the scale.
    #[must_use]
    pub fn tick_marks(&self) -> Vec<(f64, String)> {
        match self.scale {
            Scale::Continuous(scale) => {
                let count = self.ticks.unwrap_or(DEFAULT_TICK_COUNT);
                let time_format = if scale.kind() == ScaleKind::Time {
                    self.time_format
                } else {
                    None
                };
                scale
                    .ticks(count)
                    .into_iter()
                    .map(|value| (scale.map(value), scale.format_tick(value, count, time_format)))
                    .collect()
            }
            Scale::Ordinal(scale) => {
                let half_band = scale.band_width() / 2.0;
                scale
                    .domain()
                    .filter_map(|category| {
                        scale
                            .map(category)
                            .map(|start| (start + half_band, category.to_owned()))
                    })
                    .collect()
            }
        }
    }
}

/// Draws tick groups and the domain path of one axis into `group`.
pub fn draw_axis(scene: &mut SceneGraph, group: NodeId, spec: &AxisSpec<'_>) -> ChartResult<()> {
    let sign = spec.orient.sign();
    let label_offset = sign * (spec.inner_tick_size.max(0.0) + spec.tick_padding);
    let tick_length = sign * spec.inner_tick_size;

    for (position, label) in spec.tick_marks() {
        let tick = scene.append(group, "g")?;
        let line = scene.append(tick, "line")?;
        let text = scene.append(tick, "text")?;
        match spec.orient {
            AxisOrient::Bottom => {
                scene
                    .select(tick)
                    .attr("class", "tick")
                    .attr("transform", translate(position, 0.0))
                    .style("opacity", "1");
                scene.select(line).attr("y2", tick_length).attr("x2", 0.0);
                scene
                    .select(text)
                    .attr("y", label_offset)
                    .attr("x", 0.0)
                    .attr("dy", ".71em")
                    .style("text-anchor", "middle")
                    .text(&label);
            }
            AxisOrient::Left | AxisOrient::Right => {
                let anchor = if spec.orient == AxisOrient::Left {
                    "end"
                } else {
                    "start"
                };
                scene
                    .select(tick)
                    .attr("class", "tick")
                    .attr("transform", translate(0.0, position))
                    .style("opacity", "1");
                scene.select(line).attr("x2", tick_length).attr("y2", 0.0);
                scene
                    .select(text)
                    .attr("x", label_offset)
                    .attr("y", 0.0)
                    .attr("dy", ".32em")
                    .style("text-anchor", anchor)
                    .text(&label);
            }
        }
    }

    let (low, high) = spec.scale.range_extent();
    let outer = fmt_num(sign * spec.outer_tick_size);
    let domain = match spec.orient {
        AxisOrient::Bottom => format!("M{},{outer}V0H{}V{outer}", fmt_num(low), fmt_num(high)),
        AxisOrient::Left | AxisOrient::Right => {
            format!("M{outer},{}H0V{}H{outer}", fmt_num(low), fmt_num(high))
        }
    };
    scene
        .select(group)
        .append("path")
        .attr("class", "domain")
        .attr("d", domain);
    Ok(())
}

/// Axis-related options shared by the cartesian charts.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CartesianAxes<'a> {
    pub grid: bool,
    pub vertical_grid: bool,
    pub x_type: ScaleKind,
    pub y_type: ScaleKind,
    pub x_ticks: Option<usize>,
    pub y_ticks: Option<usize>,
    pub time_format: Option<&'a str>,
    pub labels: &'a AxisLabels,
    pub y_axis_orient_right: bool,
}

impl CartesianAxes<'_> {
    /// Appends the x and y axis groups, with their labels, under `root`.
    pub fn draw(&self, scene: &mut SceneGraph, root: NodeId, area: PlotArea, x: &Scale, y: &Scale) -> ChartResult<()> {
        self.draw_x(scene, root, area, x)?;
        self.draw_y(scene, root, area, y)
    }

    fn draw_x(&self, scene: &mut SceneGraph, root: NodeId, area: PlotArea, x: &Scale) -> ChartResult<()> {
        let grid_length = (self.grid && self.vertical_grid).then_some(area.height);
        let time_format = (self.x_type == ScaleKind::Time).then_some(self.time_format).flatten();
        let spec = AxisSpec::new(AxisOrient::Bottom, x, grid_length)
            .with_ticks(self.x_ticks)
            .with_time_format(time_format);

        let group = scene.append(root, "g")?;
        scene
            .select(group)
            .attr("class", "x axis")
            .attr("transform", translate(0.0, area.height));
        draw_axis(scene, group, &spec)?;

        if !self.labels.x.is_empty() {
            let right = self.y_axis_orient_right;
            let margin = area.margin;
            scene
                .select(group)
                .append("text")
                .attr("class", "label")
                .attr("x", if right { 0.0 } else { area.width })
                .attr("y", margin.bottom - margin.top)
                .attr("dx", if right { "0em" } else { "-.175em" })
                .attr("dy", "-.175em")
                .style("dominant-baseline", "ideographic")
                .style("text-anchor", if right { "start" } else { "end" })
                .text(&self.labels.x);
        }
        Ok(())
    }

    fn draw_y(&self, scene: &mut SceneGraph, root: NodeId, area: PlotArea, y: &Scale) -> ChartResult<()> {
        let right = self.y_axis_orient_right;
        let orient = if right {
            AxisOrient::Right
        } else {
            AxisOrient::Left
        };
        let grid_length = self.grid.then_some(area.width);
        let time_format = (self.y_type == ScaleKind::Time).then_some(self.time_format).flatten();
        let spec = AxisSpec::new(orient, y, grid_length)
            .with_ticks(self.y_ticks)
            .with_time_format(time_format);

        let group = scene.append(root, "g")?;
        let offset = if right { area.width } else { 0.0 };
        scene
            .select(group)
            .attr("class", "y axis")
            .attr("transform", translate(offset, 0.0));
        draw_axis(scene, group, &spec)?;

        if !self.labels.y.is_empty() {
            let margin = area.margin;
            scene
                .select(group)
                .append("text")
                .attr("class", "label")
                .attr("transform", "rotate(-90)")
                .attr("x", 0.0)
                .attr("y", margin.right - margin.left)
                .attr("dx", 0.0)
                .attr("dy", if right { "-.175em" } else { "1em" })
                .style("dominant-baseline", "ideographic")
                .style("text-anchor", "end")
                .text(&self.labels.y);
        }
        Ok(())
    }
}
