use serde::{Deserialize, Serialize};

use crate::core::path::PathBuilder;

/// How consecutive points of a line are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineInterpolation {
    #[default]
    Linear,
    /// Horizontal run to the midpoint, vertical jump, then the rest of the run.
    Step,
    /// Vertical jump first, then horizontal run.
    StepBefore,
    /// Horizontal run first, then vertical jump.
    StepAfter,
}

/// SVG path data through `points`, or `None` when there is nothing to draw.
#[must_use]
pub fn line_path(points: &[(f64, f64)], interpolation: LineInterpolation) -> Option<String> {
    let (&(x0, y0), rest) = points.split_first()?;

    let mut path = PathBuilder::new();
    path.move_to(x0, y0);
    let mut previous = (x0, y0);
    for &(x, y) in rest {
        match interpolation {
            LineInterpolation::Linear => {
                path.line_to(x, y);
            }
            LineInterpolation::Step => {
                path.horizontal_to((previous.0 + x) / 2.0)
                    .vertical_to(y)
                    .horizontal_to(x);
            }
            LineInterpolation::StepBefore => {
                path.vertical_to(y).horizontal_to(x);
            }
            LineInterpolation::StepAfter => {
                path.horizontal_to(x).vertical_to(y);
            }
        }
        previous = (x, y);
    }
    Some(path.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_path() {
        assert_eq!(line_path(&[], LineInterpolation::Linear), None);
    }

    #[test]
    fn step_modes_emit_axis_aligned_segments() {
        let points = [(0.0, 10.0), (20.0, 0.0)];
        assert_eq!(
            line_path(&points, LineInterpolation::Step).as_deref(),
            Some("M0,10H10V0H20")
        );
        assert_eq!(
            line_path(&points, LineInterpolation::StepBefore).as_deref(),
            Some("M0,10V0H20")
        );
        assert_eq!(
            line_path(&points, LineInterpolation::StepAfter).as_deref(),
            Some("M0,10H20V0")
        );
    }
}
