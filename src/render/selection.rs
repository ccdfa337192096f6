use tracing::warn;

use crate::interaction::{Datum, EventHandler, EventHandlers, EventKind};

use super::{AttrValue, NodeId, SceneGraph};

/// Chainable view over a group of nodes of one [`SceneGraph`].
///
/// Every operation applies to each node of the group in order and hands the
/// selection back, so drawing code reads as one chain per element kind.
pub struct Selection<'a> {
    scene: &'a mut SceneGraph,
    nodes: Vec<NodeId>,
}

impl<'a> Selection<'a> {
    pub(crate) fn new(scene: &'a mut SceneGraph, nodes: Vec<NodeId>) -> Self {
        Self { scene, nodes }
    }

    /// Appends one `tag` child under every node; the result selects the new children.
    ///
    /// Ids the scene does not know are skipped with a warning.
    pub fn append(self, tag: &str) -> Self {
        let Self { scene, nodes } = self;
        let appended = nodes
            .iter()
            .filter_map(|parent| match scene.append(*parent, tag) {
                Ok(child) => Some(child),
                Err(error) => {
                    warn!(parent = %parent, tag, %error, "append skipped an unknown node");
                    None
                }
            })
            .collect();
        Self {
            scene,
            nodes: appended,
        }
    }

    pub fn attr(self, name: &str, value: impl Into<AttrValue>) -> Self {
        let value = value.into();
        for id in &self.nodes {
            if let Some(node) = self.scene.slot_mut(*id) {
                node.attributes.insert(name.to_owned(), value.clone());
            }
        }
        self
    }

    /// Sets `name` from the node's bound datum and its position in the selection.
    pub fn attr_with<F>(self, name: &str, value: F) -> Self
    where
        F: Fn(Option<&Datum>, usize) -> AttrValue,
    {
        for (index, id) in self.nodes.iter().enumerate() {
            let Some(node) = self.scene.slot(*id) else {
                continue;
            };
            let computed = value(node.datum.as_ref(), index);
            if let Some(node) = self.scene.slot_mut(*id) {
                node.attributes.insert(name.to_owned(), computed);
            }
        }
        self
    }

    pub fn style(self, name: &str, value: &str) -> Self {
        for id in &self.nodes {
            if let Some(node) = self.scene.slot_mut(*id) {
                node.styles.insert(name.to_owned(), value.to_owned());
            }
        }
        self
    }

    pub fn text(self, text: &str) -> Self {
        for id in &self.nodes {
            if let Some(node) = self.scene.slot_mut(*id) {
                node.text = Some(text.to_owned());
            }
        }
        self
    }

    pub fn text_with<F>(self, text: F) -> Self
    where
        F: Fn(Option<&Datum>, usize) -> String,
    {
        for (index, id) in self.nodes.iter().enumerate() {
            let Some(node) = self.scene.slot(*id) else {
                continue;
            };
            let computed = text(node.datum.as_ref(), index);
            if let Some(node) = self.scene.slot_mut(*id) {
                node.text = Some(computed);
            }
        }
        self
    }

    /// Binds the same datum to every node.
    pub fn datum(self, datum: &Datum) -> Self {
        for id in &self.nodes {
            if let Some(node) = self.scene.slot_mut(*id) {
                node.datum = Some(datum.clone());
            }
        }
        self
    }

    /// Binds `data[i]` to the i-th node; surplus nodes or data are left alone.
    pub fn data(self, data: Vec<Datum>) -> Self {
        for (id, datum) in self.nodes.iter().zip(data) {
            if let Some(node) = self.scene.slot_mut(*id) {
                node.datum = Some(datum);
            }
        }
        self
    }

    pub fn on(self, kind: EventKind, handler: &EventHandler) -> Self {
        for id in &self.nodes {
            if let Some(node) = self.scene.slot_mut(*id) {
                node.set_handler(kind, handler.clone());
            }
        }
        self
    }

    /// Registers all four pointer callbacks.
    pub fn on_all(self, handlers: &EventHandlers) -> Self {
        EventKind::ALL
            .into_iter()
            .fold(self, |selection, kind| selection.on(kind, handlers.handler(kind)))
    }

    #[must_use]
    pub fn node(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    #[must_use]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    #[must_use]
    pub fn into_nodes(self) -> Vec<NodeId> {
        self.nodes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
