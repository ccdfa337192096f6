use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::warn;

use crate::core::JoinPlan;
use crate::core::path::fmt_num;
use crate::error::{ChartError, ChartResult};
use crate::interaction::{ChartEvent, Datum, EventHandler, EventKind};

use super::{InertNode, Selection};

/// Handle to a node of one [`SceneGraph`].
///
/// Handles are only meaningful for the graph that issued them; a new render
/// pass builds a new graph and invalidates every previous handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Attribute value stored on a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Number(f64),
    Text(String),
}

impl AttrValue {
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.parse().ok(),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => f.write_str(&fmt_num(*value)),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// One retained drawable node.
pub struct SceneNode {
    pub(super) tag: String,
    pub(super) attributes: IndexMap<String, AttrValue>,
    pub(super) styles: IndexMap<String, String>,
    pub(super) text: Option<String>,
    pub(super) datum: Option<Datum>,
    pub(super) handlers: SmallVec<[(EventKind, EventHandler); 4]>,
    pub(super) children: Vec<NodeId>,
    pub(super) parent: Option<NodeId>,
    pub(super) detached: bool,
}

impl SceneNode {
    fn new(tag: &str, parent: Option<NodeId>) -> Self {
        Self {
            tag: tag.to_owned(),
            attributes: IndexMap::new(),
            styles: IndexMap::new(),
            text: None,
            datum: None,
            handlers: SmallVec::new(),
            children: Vec::new(),
            parent,
            detached: false,
        }
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    #[must_use]
    pub fn attributes(&self) -> &IndexMap<String, AttrValue> {
        &self.attributes
    }

    #[must_use]
    pub fn style(&self, name: &str) -> Option<&str> {
        self.styles.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[must_use]
    pub fn datum(&self) -> Option<&Datum> {
        self.datum.as_ref()
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn handles(&self, kind: EventKind) -> bool {
        self.handlers.iter().any(|(registered, _)| *registered == kind)
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        match self.attributes.get("class") {
            Some(AttrValue::Text(classes)) => classes.split_whitespace().any(|c| c == class),
            _ => false,
        }
    }

    pub(super) fn set_handler(&mut self, kind: EventKind, handler: EventHandler) {
        match self.handlers.iter_mut().find(|(registered, _)| *registered == kind) {
            Some(slot) => slot.1 = handler,
            None => self.handlers.push((kind, handler)),
        }
    }
}

impl fmt::Debug for SceneNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneNode")
            .field("tag", &self.tag)
            .field("attributes", &self.attributes)
            .field("styles", &self.styles)
            .field("text", &self.text)
            .field("datum", &self.datum)
            .field(
                "handlers",
                &self.handlers.iter().map(|(kind, _)| *kind).collect::<Vec<_>>(),
            )
            .field("children", &self.children)
            .field("detached", &self.detached)
            .finish()
    }
}

/// Node groups yielded by a data join, for the caller to populate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinGroups {
    pub plan: JoinPlan,
    /// Existing nodes paired with the new-data index they now represent.
    pub update: Vec<(NodeId, usize)>,
    /// New-data indices that need a node.
    pub enter: Vec<usize>,
    /// Existing nodes with no counterpart in the new data.
    pub exit: Vec<NodeId>,
}

/// Mutable, imperatively built tree of drawable nodes for one render pass.
#[derive(Debug)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    root: NodeId,
    removed: usize,
}

impl SceneGraph {
    #[must_use]
    pub fn new(root_tag: &str) -> Self {
        Self {
            nodes: vec![SceneNode::new(root_tag, None)],
            root: NodeId(0),
            removed: 0,
        }
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> ChartResult<&SceneNode> {
        self.nodes.get(id.0).ok_or(ChartError::UnknownNode(id.0))
    }

    fn node_mut(&mut self, id: NodeId) -> ChartResult<&mut SceneNode> {
        self.nodes.get_mut(id.0).ok_or(ChartError::UnknownNode(id.0))
    }

    pub(super) fn slot(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    pub(super) fn slot_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0)
    }

    /// Appends a new `tag` element as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, tag: &str) -> ChartResult<NodeId> {
        self.node(parent)?;
        let id = NodeId(self.nodes.len());
        self.nodes.push(SceneNode::new(tag, Some(parent)));
        self.node_mut(parent)?.children.push(id);
        Ok(id)
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<AttrValue>) -> ChartResult<()> {
        self.node_mut(id)?
            .attributes
            .insert(name.to_owned(), value.into());
        Ok(())
    }

    pub fn set_style(&mut self, id: NodeId, name: &str, value: impl Into<String>) -> ChartResult<()> {
        self.node_mut(id)?.styles.insert(name.to_owned(), value.into());
        Ok(())
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> ChartResult<()> {
        self.node_mut(id)?.text = Some(text.into());
        Ok(())
    }

    pub fn bind_datum(&mut self, id: NodeId, datum: Datum) -> ChartResult<()> {
        self.node_mut(id)?.datum = Some(datum);
        Ok(())
    }

    /// Registers `handler` for `kind`, replacing any earlier handler of that kind.
    pub fn on(&mut self, id: NodeId, kind: EventKind, handler: EventHandler) -> ChartResult<()> {
        self.node_mut(id)?.set_handler(kind, handler);
        Ok(())
    }

    /// Detaches `id` (and its subtree) from the tree.
    pub fn remove(&mut self, id: NodeId) -> ChartResult<()> {
        if id == self.root {
            return Err(ChartError::InvalidData(
                "the scene root cannot be removed".to_owned(),
            ));
        }
        let parent = self.node(id)?.parent;
        if let Some(parent) = parent {
            self.node_mut(parent)?.children.retain(|child| *child != id);
        }
        let node = self.node_mut(id)?;
        node.parent = None;
        if !node.detached {
            node.detached = true;
            self.removed += 1;
        }
        Ok(())
    }

    /// Number of nodes removed from this graph so far.
    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.removed
    }

    /// Whether `id` is still reachable from the root.
    #[must_use]
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            if node_id == self.root {
                return true;
            }
            current = self.slot(node_id).and_then(|node| node.parent);
        }
        false
    }

    pub fn children_with_tag(&self, parent: NodeId, tag: &str) -> ChartResult<Vec<NodeId>> {
        let node = self.node(parent)?;
        Ok(node
            .children
            .iter()
            .copied()
            .filter(|child| self.slot(*child).is_some_and(|n| n.tag == tag))
            .collect())
    }

    /// Chainable handle over a single node.
    pub fn select(&mut self, id: NodeId) -> Selection<'_> {
        let nodes = if self.slot(id).is_some() {
            vec![id]
        } else {
            Vec::new()
        };
        Selection::new(self, nodes)
    }

    /// Chainable handle over explicit nodes, in the given order.
    pub fn select_nodes(&mut self, nodes: Vec<NodeId>) -> Selection<'_> {
        let nodes = nodes
            .into_iter()
            .filter(|id| self.slot(*id).is_some())
            .collect();
        Selection::new(self, nodes)
    }

    /// Positional data join of the `tag` children of `parent` against
    /// `next_len` new items.
    pub fn join(&mut self, parent: NodeId, tag: &str, next_len: usize) -> ChartResult<JoinGroups> {
        let existing = self.children_with_tag(parent, tag)?.len();
        self.join_with_plan(parent, tag, JoinPlan::positional(existing, next_len))
    }

    /// Data join driven by a precomputed plan, e.g. a keyed one.
    pub fn join_with_plan(&mut self, parent: NodeId, tag: &str, plan: JoinPlan) -> ChartResult<JoinGroups> {
        let existing = self.children_with_tag(parent, tag)?;
        if existing.len() != plan.previous_len() {
            return Err(ChartError::InvalidData(format!(
                "join plan expects {} `{tag}` nodes but {} exist",
                plan.previous_len(),
                existing.len()
            )));
        }

        let update = plan
            .update
            .iter()
            .map(|pair| (existing[pair.previous], pair.next))
            .collect();
        let exit = plan.exit.iter().map(|index| existing[*index]).collect();
        let enter = plan.enter.clone();

        Ok(JoinGroups {
            plan,
            update,
            enter,
            exit,
        })
    }

    /// Appends one `tag` node per entering index.
    pub fn enter(&mut self, parent: NodeId, tag: &str, indices: &[usize]) -> ChartResult<Vec<(NodeId, usize)>> {
        indices
            .iter()
            .map(|index| self.append(parent, tag).map(|id| (id, *index)))
            .collect()
    }

    /// Removes every exiting node immediately.
    pub fn exit(&mut self, nodes: &[NodeId]) -> ChartResult<()> {
        for node in nodes {
            self.remove(*node)?;
        }
        Ok(())
    }

    /// Invokes the `event.kind` handler of `id` with the node's datum.
    ///
    /// Returns `Ok(false)` when the node has no datum or no handler for the
    /// event, or when it has been removed.
    pub fn dispatch(&self, id: NodeId, event: &ChartEvent) -> ChartResult<bool> {
        let node = self.node(id)?;
        if !self.is_attached(id) {
            warn!(node = %id, kind = event.kind.name(), "event dispatched to detached node");
            return Ok(false);
        }
        let Some(datum) = node.datum.as_ref() else {
            return Ok(false);
        };
        let Some((_, handler)) = node.handlers.iter().find(|(kind, _)| *kind == event.kind) else {
            return Ok(false);
        };
        handler(datum, event);
        Ok(true)
    }

    /// Freezes the attached tree into an inert description.
    #[must_use]
    pub fn snapshot(&self) -> InertNode {
        self.freeze(self.root)
    }

    fn freeze(&self, id: NodeId) -> InertNode {
        let Some(node) = self.slot(id) else {
            return InertNode::empty(id);
        };
        InertNode {
            id,
            tag: node.tag.clone(),
            attributes: node.attributes.clone(),
            styles: node.styles.clone(),
            text: node.text.clone(),
            events: node.handlers.iter().map(|(kind, _)| *kind).collect(),
            children: node.children.iter().map(|child| self.freeze(*child)).collect(),
        }
    }
}
