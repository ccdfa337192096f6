use std::fmt;

use tracing::{debug, trace, warn};

use crate::error::ChartResult;
use crate::render::{AttrValue, NodeId, SceneGraph};

use super::{Easing, Interpolate, Tween};

pub const DEFAULT_TRANSITION_DURATION_MS: f64 = 750.0;

type AttrTween = Box<dyn Fn(f64) -> AttrValue>;

struct ScheduledTween {
    node: NodeId,
    attribute: String,
    start_ms: f64,
    tween: AttrTween,
}

/// Result of one animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame belonged to a superseded generation and changed nothing.
    Stale { requested: u64, current: u64 },
    Sampled { applied: usize, remaining: usize },
}

impl FrameOutcome {
    /// True once no tween of the current generation is left running.
    #[must_use]
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Sampled { remaining: 0, .. })
    }
}

/// Drives attribute tweens from host animation-frame callbacks.
///
/// Every render pass that animates calls [`Self::begin_generation`] first.
/// Frames are tagged with the generation they were requested for; a frame of
/// an older generation is ignored, so a late callback never writes geometry
/// from a superseded pass.
pub struct TransitionScheduler {
    generation: u64,
    duration_ms: f64,
    easing: Easing,
    active: Vec<ScheduledTween>,
}

impl Default for TransitionScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TransitionScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionScheduler")
            .field("generation", &self.generation)
            .field("duration_ms", &self.duration_ms)
            .field("easing", &self.easing)
            .field("active", &self.active.len())
            .finish()
    }
}

impl TransitionScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            generation: 0,
            duration_ms: DEFAULT_TRANSITION_DURATION_MS,
            easing: Easing::default(),
            active: Vec::new(),
        }
    }

    /// Negative or non-finite durations are treated as zero.
    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = if duration_ms.is_finite() {
            duration_ms.max(0.0)
        } else {
            0.0
        };
        self
    }

    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    #[must_use]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    /// Supersedes every running tween and returns the new generation id.
    pub fn begin_generation(&mut self) -> u64 {
        if !self.active.is_empty() {
            debug!(
                dropped = self.active.len(),
                generation = self.generation,
                "superseding running transitions"
            );
        }
        self.active.clear();
        self.generation += 1;
        self.generation
    }

    /// Schedules `tween` to drive `attribute` of `node`, starting at `start_ms`.
    ///
    /// The closure receives the eased parameter in `[0, 1]`.
    pub fn schedule<F>(&mut self, node: NodeId, attribute: &str, start_ms: f64, tween: F)
    where
        F: Fn(f64) -> AttrValue + 'static,
    {
        self.active.push(ScheduledTween {
            node,
            attribute: attribute.to_owned(),
            start_ms,
            tween: Box::new(tween),
        });
    }

    /// Schedules a geometry tween rendered to an attribute value by `render`.
    pub fn schedule_tween<G, R>(
        &mut self,
        node: NodeId,
        attribute: &str,
        start_ms: f64,
        tween: Tween<G>,
        render: R,
    ) where
        G: Interpolate + 'static,
        R: Fn(&G) -> AttrValue + 'static,
    {
        self.schedule(node, attribute, start_ms, move |t| render(&tween.sample(t)));
    }

    /// Samples every running tween at `now_ms` and writes the values into `scene`.
    ///
    /// Tweens that reached `t == 1` are applied one last time and dropped.
    pub fn frame(&mut self, generation: u64, now_ms: f64, scene: &mut SceneGraph) -> ChartResult<FrameOutcome> {
        if generation != self.generation {
            warn!(
                requested = generation,
                current = self.generation,
                "ignoring frame of superseded transition"
            );
            return Ok(FrameOutcome::Stale {
                requested: generation,
                current: self.generation,
            });
        }

        let duration_ms = self.duration_ms;
        let easing = self.easing;
        let mut applied = 0;
        let mut finished = Vec::new();
        for (index, scheduled) in self.active.iter().enumerate() {
            let elapsed = if duration_ms > 0.0 {
                ((now_ms - scheduled.start_ms) / duration_ms).clamp(0.0, 1.0)
            } else {
                1.0
            };
            let value = (scheduled.tween)(easing.apply(elapsed));
            scene.set_attr(scheduled.node, &scheduled.attribute, value)?;
            applied += 1;
            if elapsed >= 1.0 {
                finished.push(index);
            }
        }
        for index in finished.into_iter().rev() {
            self.active.swap_remove(index);
        }

        trace!(
            generation,
            now_ms,
            applied,
            remaining = self.active.len(),
            "transition frame"
        );
        Ok(FrameOutcome::Sampled {
            applied,
            remaining: self.active.len(),
        })
    }

    /// Jumps every running tween to its target and clears the schedule.
    pub fn finish(&mut self, scene: &mut SceneGraph) -> ChartResult<usize> {
        let mut applied = 0;
        for scheduled in self.active.drain(..) {
            scene.set_attr(scheduled.node, &scheduled.attribute, (scheduled.tween)(1.0))?;
            applied += 1;
        }
        Ok(applied)
    }
}
