use serde::{Deserialize, Serialize};

use crate::core::types::Viewport;
use crate::error::{ChartError, ChartResult};

/// Space reserved around the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Room for tick labels with the y-axis on the left.
    pub const AXES: Self = Self::new(20.0, 20.0, 30.0, 50.0);
    /// Room for tick labels with the y-axis on the right.
    pub const AXES_RIGHT: Self = Self::new(20.0, 50.0, 30.0, 20.0);

    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Replaces every field the override specifies.
    #[must_use]
    pub fn with_override(self, spec: MarginOverride) -> Self {
        Self {
            top: spec.top.unwrap_or(self.top),
            right: spec.right.unwrap_or(self.right),
            bottom: spec.bottom.unwrap_or(self.bottom),
            left: spec.left.unwrap_or(self.left),
        }
    }
}

/// Partial margin supplied by the application.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MarginOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
}

impl MarginOverride {
    #[must_use]
    pub fn top(mut self, value: f64) -> Self {
        self.top = Some(value);
        self
    }

    #[must_use]
    pub fn right(mut self, value: f64) -> Self {
        self.right = Some(value);
        self
    }

    #[must_use]
    pub fn bottom(mut self, value: f64) -> Self {
        self.bottom = Some(value);
        self
    }

    #[must_use]
    pub fn left(mut self, value: f64) -> Self {
        self.left = Some(value);
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        for (field, value) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    return Err(ChartError::InvalidConfig(format!(
                        "margin `{field}` must be finite and >= 0"
                    )));
                }
            }
        }
        Ok(self)
    }
}

/// Default margins for the axis configuration, patched by `spec`.
#[must_use]
pub fn calculate_margin(axes: bool, spec: Option<MarginOverride>, y_axis_orient_right: bool) -> Margin {
    let defaults = match (axes, y_axis_orient_right) {
        (false, _) => Margin::ZERO,
        (true, false) => Margin::AXES,
        (true, true) => Margin::AXES_RIGHT,
    };
    spec.map_or(defaults, |spec| defaults.with_override(spec))
}

/// `total - a - b`, floored at zero.
#[must_use]
pub fn reduce(total: f64, a: f64, b: f64) -> f64 {
    (total - a - b).max(0.0)
}

/// Drawable area left once margins are taken out of the requested size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub margin: Margin,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    #[must_use]
    pub fn new(viewport: Viewport, margin: Margin) -> Self {
        Self {
            margin,
            width: reduce(f64::from(viewport.width), margin.left, margin.right),
            height: reduce(f64::from(viewport.height), margin.top, margin.bottom),
        }
    }

    /// Width of the outer `svg` element.
    #[must_use]
    pub fn outer_width(self) -> f64 {
        self.width + self.margin.left + self.margin.right
    }

    /// Height of the outer `svg` element.
    #[must_use]
    pub fn outer_height(self) -> f64 {
        self.height + self.margin.top + self.margin.bottom
    }
}
