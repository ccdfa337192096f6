use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::ChartResult;
use crate::interaction::ChartEvent;
use crate::render::{ChartOutput, NodeId, Renderer};
use crate::transition::FrameOutcome;

static NEXT_CHART_UID: AtomicU64 = AtomicU64::new(1);

/// Process-wide unique id used to scope class names and group ids.
pub(crate) fn next_chart_uid() -> u64 {
    NEXT_CHART_UID.fetch_add(1, Ordering::Relaxed)
}

/// Lifecycle shared by every chart kind.
///
/// A host calls [`Self::mount`] once, [`Self::update`] whenever the props
/// change, and forwards animation-frame callbacks to
/// [`Self::animation_frame`] until it reports that nothing is left running.
pub trait ChartComponent {
    type Config;

    fn config(&self) -> &Self::Config;

    /// First render pass.
    fn mount(&mut self, now_ms: f64) -> ChartResult<()>;

    /// Replaces the configuration and runs a new render pass.
    fn update(&mut self, config: Self::Config, now_ms: f64) -> ChartResult<()>;

    /// Samples running transitions at `now_ms`.
    fn animation_frame(&mut self, now_ms: f64) -> ChartResult<FrameOutcome>;

    /// Frozen tree and scoped styles of the current scene.
    fn output(&self) -> ChartOutput;

    /// Routes a host pointer event to the node it hit.
    fn dispatch(&self, node: NodeId, event: &ChartEvent) -> ChartResult<bool>;

    fn render_to(&self, renderer: &mut dyn Renderer) -> ChartResult<()> {
        renderer.mount(&self.output())
    }
}
