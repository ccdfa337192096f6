mod inert;
mod markup;
mod null_renderer;
mod output;
mod scene;
mod selection;
mod style;

pub use inert::InertNode;
pub use markup::MarkupRenderer;
pub use null_renderer::NullRenderer;
pub use output::{CHART_OUTPUT_JSON_SCHEMA_V1, ChartOutput, ChartOutputJsonContractV1};
pub use scene::{AttrValue, JoinGroups, NodeId, SceneGraph, SceneNode};
pub use selection::Selection;
pub use style::{StyleBlock, StyleDeclarations, StyleRules, merge_rules, rules_from};

use crate::error::ChartResult;

/// Contract implemented by any host that mounts chart output.
///
/// Hosts receive a frozen [`ChartOutput`] so mounting code stays isolated from
/// the scene graph and chart logic.
pub trait Renderer {
    fn mount(&mut self, output: &ChartOutput) -> ChartResult<()>;
}
