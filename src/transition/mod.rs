//! Time-based interpolation of node attributes between two geometries.

mod interpolate;
mod scheduler;

pub use interpolate::{Easing, Interpolate, Tween, lerp};
pub use scheduler::{DEFAULT_TRANSITION_DURATION_MS, FrameOutcome, TransitionScheduler};
