use serde::{Deserialize, Serialize};

use crate::core::ArcGeometry;

#[must_use]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Geometry that can be blended component-wise.
pub trait Interpolate: Clone {
    fn interpolate(&self, to: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        lerp(*self, *to, t)
    }
}

impl Interpolate for (f64, f64) {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        (lerp(self.0, to.0, t), lerp(self.1, to.1, t))
    }
}

impl Interpolate for ArcGeometry {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        Self {
            start_angle: lerp(self.start_angle, to.start_angle, t),
            end_angle: lerp(self.end_angle, to.end_angle, t),
            pad_angle: lerp(self.pad_angle, to.pad_angle, t),
        }
    }
}

/// Interpolation between a previous and a target geometry.
///
/// `sample(0.0)` returns `from` and `sample(1.0)` returns `to` bit for bit;
/// parameters outside `[0, 1]` are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tween<G> {
    pub from: G,
    pub to: G,
}

impl<G: Interpolate> Tween<G> {
    #[must_use]
    pub fn new(from: G, to: G) -> Self {
        Self { from, to }
    }

    #[must_use]
    pub fn sample(&self, t: f64) -> G {
        if t.is_nan() || t <= 0.0 {
            self.from.clone()
        } else if t >= 1.0 {
            self.to.clone()
        } else {
            self.from.interpolate(&self.to, t)
        }
    }
}

/// Maps elapsed fraction to interpolation parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    #[default]
    CubicInOut,
}

impl Easing {
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicInOut => {
                let t = t * 2.0;
                if t <= 1.0 {
                    t * t * t / 2.0
                } else {
                    let t = t - 2.0;
                    (t * t * t + 2.0) / 2.0
                }
            }
        }
    }
}
