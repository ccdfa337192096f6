use crate::error::{ChartError, ChartResult};
use crate::render::{ChartOutput, Renderer};

/// Headless renderer used by tests and hosts that only need the tree.
///
/// It still checks that the mounted tree has an `svg` root so tests catch a
/// malformed render pass before a real host is involved.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub mounts: usize,
    pub last_node_count: usize,
    pub last_interactive_count: usize,
}

impl Renderer for NullRenderer {
    fn mount(&mut self, output: &ChartOutput) -> ChartResult<()> {
        if output.tree.tag != "svg" {
            return Err(ChartError::InvalidData(format!(
                "chart tree root must be `svg`, got `{}`",
                output.tree.tag
            )));
        }
        self.mounts += 1;
        self.last_node_count = output.tree.node_count();
        self.last_interactive_count = output
            .tree
            .find_all(|node| !node.events.is_empty())
            .len();
        Ok(())
    }
}
