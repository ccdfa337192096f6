use std::f64::consts::{FRAC_PI_2, PI, TAU};

use serde::{Deserialize, Serialize};

use crate::core::path::PathBuilder;
use crate::core::types::PieSlice;

const FULL_CIRCLE_EPSILON: f64 = 1e-6;

/// Angular extent of one arc, in radians clockwise from twelve o'clock.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ArcGeometry {
    pub start_angle: f64,
    pub end_angle: f64,
    pub pad_angle: f64,
}

impl ArcGeometry {
    #[must_use]
    pub const fn new(start_angle: f64, end_angle: f64) -> Self {
        Self {
            start_angle,
            end_angle,
            pad_angle: 0.0,
        }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.end_angle - self.start_angle
    }
}

/// A slice positioned by the pie layout; this is the datum bound to slice
/// and label nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieArc {
    pub data: PieSlice,
    pub index: usize,
    pub geometry: ArcGeometry,
}

/// Lays slices out in input order over the full circle.
///
/// Angular spans are proportional to slice values. A zero total gives every
/// slice a zero span at angle 0.
#[must_use]
pub fn pie_layout(slices: &[PieSlice]) -> Vec<PieArc> {
    let total: f64 = slices.iter().map(|slice| slice.value).sum();
    let factor = if total > 0.0 { TAU / total } else { 0.0 };

    let mut angle = 0.0;
    slices
        .iter()
        .enumerate()
        .map(|(index, slice)| {
            let start_angle = angle;
            angle += slice.value * factor;
            PieArc {
                data: slice.clone(),
                index,
                geometry: ArcGeometry::new(start_angle, angle),
            }
        })
        .collect()
}

/// Produces SVG path data and centroids for ring segments centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcGenerator {
    inner_radius: f64,
    outer_radius: f64,
}

impl ArcGenerator {
    /// Negative radii are clamped to zero; swapped radii are reordered.
    #[must_use]
    pub fn new(inner_radius: f64, outer_radius: f64) -> Self {
        let inner = inner_radius.max(0.0);
        let outer = outer_radius.max(0.0);
        Self {
            inner_radius: inner.min(outer),
            outer_radius: inner.max(outer),
        }
    }

    #[must_use]
    pub fn inner_radius(self) -> f64 {
        self.inner_radius
    }

    #[must_use]
    pub fn outer_radius(self) -> f64 {
        self.outer_radius
    }

    #[must_use]
    pub fn path(self, arc: ArcGeometry) -> String {
        let r0 = self.inner_radius;
        let r1 = self.outer_radius;
        let a0 = arc.start_angle - FRAC_PI_2;
        let a1 = arc.end_angle - FRAC_PI_2;
        let span = (a1 - a0).abs();
        let clockwise = a0 <= a1;

        let mut path = PathBuilder::new();
        if span >= TAU - FULL_CIRCLE_EPSILON {
            circle_segment(&mut path, r1, clockwise);
            if r0 > 0.0 {
                circle_segment(&mut path, r0, !clockwise);
            }
            path.close();
            return path.finish();
        }

        let large_arc = span > PI;
        path.move_to(r1 * a0.cos(), r1 * a0.sin())
            .arc_to(r1, large_arc, clockwise, r1 * a1.cos(), r1 * a1.sin());
        if r0 > 0.0 {
            path.line_to(r0 * a1.cos(), r0 * a1.sin())
                .arc_to(r0, large_arc, !clockwise, r0 * a0.cos(), r0 * a0.sin());
        } else {
            path.line_to(0.0, 0.0);
        }
        path.close();
        path.finish()
    }

    /// Midpoint of the segment, halfway between the radii and the angles.
    #[must_use]
    pub fn centroid(self, arc: ArcGeometry) -> (f64, f64) {
        let radius = (self.inner_radius + self.outer_radius) / 2.0;
        let angle = (arc.start_angle + arc.end_angle) / 2.0 - FRAC_PI_2;
        (angle.cos() * radius, angle.sin() * radius)
    }
}

fn circle_segment(path: &mut PathBuilder, radius: f64, clockwise: bool) {
    path.move_to(0.0, radius)
        .arc_to(radius, true, clockwise, 0.0, -radius)
        .arc_to(radius, true, clockwise, 0.0, radius);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_arc_path_matches_svg_arc_syntax() {
        let arc = ArcGenerator::new(0.0, 100.0);
        let path = arc.path(ArcGeometry::new(0.0, FRAC_PI_2));
        assert_eq!(path, "M0,-100A100,100 0 0,1 100,0L0,0Z");
    }

    #[test]
    fn full_donut_draws_two_rings() {
        let arc = ArcGenerator::new(50.0, 100.0);
        let path = arc.path(ArcGeometry::new(0.0, TAU));
        assert_eq!(
            path,
            "M0,100A100,100 0 1,1 0,-100A100,100 0 1,1 0,100M0,50A50,50 0 1,0 0,-50A50,50 0 1,0 0,50Z"
        );
    }

    #[test]
    fn negative_inner_radius_is_clamped() {
        let arc = ArcGenerator::new(-2.0, 198.0);
        assert_eq!(arc.inner_radius(), 0.0);
        assert_eq!(arc.outer_radius(), 198.0);
    }
}
