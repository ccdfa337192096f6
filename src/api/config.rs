use serde::{Deserialize, Serialize};

use crate::core::{
    AxisValue, DEFAULT_DATE_PATTERN, DataPoint, LineInterpolation, MarginOverride, PieSlice,
    ScaleKind, Series, Viewport,
};
use crate::error::{ChartError, ChartResult};
use crate::render::StyleRules;

/// Text drawn next to each axis; empty strings draw nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisLabels {
    #[serde(default)]
    pub x: String,
    #[serde(default)]
    pub y: String,
}

/// How slices of consecutive pie renders are paired up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinStrategy {
    /// The i-th slice continues the previous i-th slice.
    #[default]
    Positional,
    /// Slices continue the previous slice with the same key.
    Keyed,
}

/// Line chart options.
///
/// Serialized with camelCase names so host applications can keep their
/// existing JSON props. `data` is optional only at the serde layer; a chart
/// cannot be built without it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineChartConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Series>>,
    #[serde(default = "default_line_width")]
    pub width: u32,
    #[serde(default = "default_line_height")]
    pub height: u32,
    #[serde(default)]
    pub x_type: ScaleKind,
    #[serde(default)]
    pub y_type: ScaleKind,
    #[serde(default = "default_date_pattern")]
    pub date_pattern: String,
    #[serde(default)]
    pub interpolate: LineInterpolation,
    #[serde(default, skip_serializing_if = "StyleRules::is_empty")]
    pub style: StyleRules,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<MarginOverride>,
    #[serde(default)]
    pub axes: bool,
    #[serde(default)]
    pub grid: bool,
    #[serde(default)]
    pub vertical_grid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_domain_range: Option<[AxisValue; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_domain_range: Option<[AxisValue; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_time_display_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_ticks: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_ticks: Option<usize>,
    #[serde(default)]
    pub data_points: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line_colors: Vec<String>,
    #[serde(default)]
    pub axis_labels: AxisLabels,
    #[serde(default)]
    pub y_axis_orient_right: bool,
}

impl Default for LineChartConfig {
    fn default() -> Self {
        Self {
            data: None,
            width: default_line_width(),
            height: default_line_height(),
            x_type: ScaleKind::Linear,
            y_type: ScaleKind::Linear,
            date_pattern: default_date_pattern(),
            interpolate: LineInterpolation::Linear,
            style: StyleRules::new(),
            margin: None,
            axes: false,
            grid: false,
            vertical_grid: false,
            x_domain_range: None,
            y_domain_range: None,
            tick_time_display_format: None,
            x_ticks: None,
            y_ticks: None,
            data_points: false,
            line_colors: Vec::new(),
            axis_labels: AxisLabels::default(),
            y_axis_orient_right: false,
        }
    }
}

impl LineChartConfig {
    #[must_use]
    pub fn new(data: Vec<Series>) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_types(mut self, x_type: ScaleKind, y_type: ScaleKind) -> Self {
        self.x_type = x_type;
        self.y_type = y_type;
        self
    }

    #[must_use]
    pub fn with_date_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.date_pattern = pattern.into();
        self
    }

    #[must_use]
    pub fn with_interpolate(mut self, interpolate: LineInterpolation) -> Self {
        self.interpolate = interpolate;
        self
    }

    #[must_use]
    pub fn with_axes(mut self, axes: bool) -> Self {
        self.axes = axes;
        self
    }

    #[must_use]
    pub fn with_grid(mut self, grid: bool, vertical_grid: bool) -> Self {
        self.grid = grid;
        self.vertical_grid = vertical_grid;
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: MarginOverride) -> Self {
        self.margin = Some(margin);
        self
    }

    #[must_use]
    pub fn with_x_domain_range(mut self, start: impl Into<AxisValue>, end: impl Into<AxisValue>) -> Self {
        self.x_domain_range = Some([start.into(), end.into()]);
        self
    }

    #[must_use]
    pub fn with_y_domain_range(mut self, start: impl Into<AxisValue>, end: impl Into<AxisValue>) -> Self {
        self.y_domain_range = Some([start.into(), end.into()]);
        self
    }

    #[must_use]
    pub fn with_ticks(mut self, x_ticks: Option<usize>, y_ticks: Option<usize>) -> Self {
        self.x_ticks = x_ticks;
        self.y_ticks = y_ticks;
        self
    }

    #[must_use]
    pub fn with_tick_time_display_format(mut self, format: impl Into<String>) -> Self {
        self.tick_time_display_format = Some(format.into());
        self
    }

    #[must_use]
    pub fn with_data_points(mut self, data_points: bool) -> Self {
        self.data_points = data_points;
        self
    }

    #[must_use]
    pub fn with_line_colors(mut self, colors: Vec<String>) -> Self {
        self.line_colors = colors;
        self
    }

    #[must_use]
    pub fn with_axis_labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.axis_labels = AxisLabels {
            x: x.into(),
            y: y.into(),
        };
        self
    }

    #[must_use]
    pub fn with_y_axis_orient_right(mut self, right: bool) -> Self {
        self.y_axis_orient_right = right;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: StyleRules) -> Self {
        self.style = style;
        self
    }

    /// Checks every option and returns the dataset.
    pub fn validate(&self) -> ChartResult<&[Series]> {
        let data = self.data.as_deref().ok_or(ChartError::MissingData)?;
        Viewport::new(self.width, self.height).validate()?;
        if let Some(margin) = self.margin {
            margin.validate()?;
        }
        validate_date_pattern(&self.date_pattern)?;
        if self.y_type == ScaleKind::Ordinal {
            return Err(ChartError::InvalidConfig(
                "line charts need a continuous y-axis".to_owned(),
            ));
        }
        Ok(data)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        to_json_pretty(self)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        from_json_str(input)
    }
}

/// Pie chart options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieChartConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<PieSlice>>,
    #[serde(default = "default_pie_size")]
    pub size: u32,
    #[serde(default)]
    pub inner_hole_size: f64,
    #[serde(default = "default_pie_padding")]
    pub padding: f64,
    #[serde(default)]
    pub labels: bool,
    #[serde(default, skip_serializing_if = "StyleRules::is_empty")]
    pub styles: StyleRules,
    #[serde(default)]
    pub join: JoinStrategy,
}

impl Default for PieChartConfig {
    fn default() -> Self {
        Self {
            data: None,
            size: default_pie_size(),
            inner_hole_size: 0.0,
            padding: default_pie_padding(),
            labels: false,
            styles: StyleRules::new(),
            join: JoinStrategy::Positional,
        }
    }
}

impl PieChartConfig {
    #[must_use]
    pub fn new(data: Vec<PieSlice>) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: Vec<PieSlice>) -> Self {
        self.data = Some(data);
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn with_inner_hole_size(mut self, inner_hole_size: f64) -> Self {
        self.inner_hole_size = inner_hole_size;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_labels(mut self, labels: bool) -> Self {
        self.labels = labels;
        self
    }

    #[must_use]
    pub fn with_styles(mut self, styles: StyleRules) -> Self {
        self.styles = styles;
        self
    }

    #[must_use]
    pub fn with_join(mut self, join: JoinStrategy) -> Self {
        self.join = join;
        self
    }

    pub fn validate(&self) -> ChartResult<&[PieSlice]> {
        let data = self.data.as_deref().ok_or(ChartError::MissingData)?;
        Viewport::square(self.size).validate()?;
        if !self.inner_hole_size.is_finite() || self.inner_hole_size < 0.0 {
            return Err(ChartError::InvalidConfig(
                "innerHoleSize must be finite and >= 0".to_owned(),
            ));
        }
        if !self.padding.is_finite() {
            return Err(ChartError::InvalidConfig(
                "padding must be finite".to_owned(),
            ));
        }
        for slice in data {
            slice.validate()?;
        }
        Ok(data)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        to_json_pretty(self)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        from_json_str(input)
    }
}

/// Bar chart options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChartConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<DataPoint>>,
    #[serde(default = "default_bar_width_px")]
    pub width: u32,
    #[serde(default = "default_bar_height_px")]
    pub height: u32,
    #[serde(default = "default_bar_x_type")]
    pub x_type: ScaleKind,
    #[serde(default)]
    pub y_type: ScaleKind,
    #[serde(default = "default_date_pattern")]
    pub date_pattern: String,
    #[serde(default, skip_serializing_if = "StyleRules::is_empty")]
    pub style: StyleRules,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<MarginOverride>,
    #[serde(default)]
    pub axes: bool,
    #[serde(default)]
    pub grid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_domain_range: Option<[AxisValue; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_domain_range: Option<[AxisValue; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_time_display_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_ticks: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_ticks: Option<usize>,
    /// Bar width for linear and time x-axes; ordinal axes use the band width.
    #[serde(default = "default_bar_width")]
    pub bar_width: f64,
    #[serde(default)]
    pub color_bars: bool,
    #[serde(default)]
    pub axis_labels: AxisLabels,
    #[serde(default)]
    pub y_axis_orient_right: bool,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            data: None,
            width: default_bar_width_px(),
            height: default_bar_height_px(),
            x_type: default_bar_x_type(),
            y_type: ScaleKind::Linear,
            date_pattern: default_date_pattern(),
            style: StyleRules::new(),
            margin: None,
            axes: false,
            grid: false,
            x_domain_range: None,
            y_domain_range: None,
            tick_time_display_format: None,
            x_ticks: None,
            y_ticks: None,
            bar_width: default_bar_width(),
            color_bars: false,
            axis_labels: AxisLabels::default(),
            y_axis_orient_right: false,
        }
    }
}

impl BarChartConfig {
    #[must_use]
    pub fn new(data: Vec<DataPoint>) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_types(mut self, x_type: ScaleKind, y_type: ScaleKind) -> Self {
        self.x_type = x_type;
        self.y_type = y_type;
        self
    }

    #[must_use]
    pub fn with_axes(mut self, axes: bool) -> Self {
        self.axes = axes;
        self
    }

    #[must_use]
    pub fn with_grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: MarginOverride) -> Self {
        self.margin = Some(margin);
        self
    }

    #[must_use]
    pub fn with_y_domain_range(mut self, start: impl Into<AxisValue>, end: impl Into<AxisValue>) -> Self {
        self.y_domain_range = Some([start.into(), end.into()]);
        self
    }

    #[must_use]
    pub fn with_bar_width(mut self, bar_width: f64) -> Self {
        self.bar_width = bar_width;
        self
    }

    #[must_use]
    pub fn with_color_bars(mut self, color_bars: bool) -> Self {
        self.color_bars = color_bars;
        self
    }

    #[must_use]
    pub fn with_axis_labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.axis_labels = AxisLabels {
            x: x.into(),
            y: y.into(),
        };
        self
    }

    pub fn validate(&self) -> ChartResult<&[DataPoint]> {
        let data = self.data.as_deref().ok_or(ChartError::MissingData)?;
        Viewport::new(self.width, self.height).validate()?;
        if let Some(margin) = self.margin {
            margin.validate()?;
        }
        validate_date_pattern(&self.date_pattern)?;
        if self.y_type == ScaleKind::Ordinal {
            return Err(ChartError::InvalidConfig(
                "bar charts need a continuous y-axis".to_owned(),
            ));
        }
        if !self.bar_width.is_finite() || self.bar_width < 0.0 {
            return Err(ChartError::InvalidConfig(
                "barWidth must be finite and >= 0".to_owned(),
            ));
        }
        Ok(data)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        to_json_pretty(self)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        from_json_str(input)
    }
}

fn validate_date_pattern(pattern: &str) -> ChartResult<()> {
    if pattern.is_empty() {
        return Err(ChartError::InvalidConfig(
            "datePattern must not be empty".to_owned(),
        ));
    }
    Ok(())
}

fn to_json_pretty<T: Serialize>(config: &T) -> ChartResult<String> {
    serde_json::to_string_pretty(config)
        .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
}

fn from_json_str<T: serde::de::DeserializeOwned>(input: &str) -> ChartResult<T> {
    serde_json::from_str(input)
        .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
}

fn default_line_width() -> u32 {
    200
}

fn default_line_height() -> u32 {
    150
}

fn default_pie_size() -> u32 {
    400
}

fn default_pie_padding() -> f64 {
    2.0
}

fn default_bar_width_px() -> u32 {
    400
}

fn default_bar_height_px() -> u32 {
    200
}

fn default_bar_width() -> f64 {
    10.0
}

fn default_bar_x_type() -> ScaleKind {
    ScaleKind::Ordinal
}

fn default_date_pattern() -> String {
    DEFAULT_DATE_PATTERN.to_owned()
}
