use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::interaction::EventKind;

use super::{AttrValue, NodeId};

/// Frozen, serializable description of one scene node and its subtree.
///
/// Produced once per render pass by [`super::SceneGraph::snapshot`]; nothing
/// in it refers back to the live graph except `id`, which a host uses to
/// route pointer events through the owning chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InertNode {
    pub id: NodeId,
    pub tag: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, AttrValue>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub styles: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<EventKind>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<InertNode>,
}

impl InertNode {
    pub(crate) fn empty(id: NodeId) -> Self {
        Self {
            id,
            tag: String::new(),
            attributes: IndexMap::new(),
            styles: IndexMap::new(),
            text: None,
            events: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    /// Attribute rendered as markup text.
    #[must_use]
    pub fn attr_text(&self, name: &str) -> Option<String> {
        self.attributes.get(name).map(ToString::to_string)
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.attr_text("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// This node and all of its descendants in document order.
    #[must_use]
    pub fn descendants(&self) -> Vec<&InertNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    #[must_use]
    pub fn find_all<F>(&self, predicate: F) -> Vec<&InertNode>
    where
        F: Fn(&InertNode) -> bool,
    {
        self.descendants()
            .into_iter()
            .filter(|node| predicate(node))
            .collect()
    }

    #[must_use]
    pub fn find_by_class(&self, class: &str) -> Vec<&InertNode> {
        self.find_all(|node| node.has_class(class))
    }

    #[must_use]
    pub fn find_by_tag(&self, tag: &str) -> Vec<&InertNode> {
        self.find_all(|node| node.tag == tag)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.descendants().len()
    }
}
