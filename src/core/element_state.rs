use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::join::JoinPlan;

/// Role of a group of rendered elements that share persisted geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderRole {
    Slice,
    Label,
}

/// Per-role geometry of the last render, indexed by element position.
///
/// Index `i` of a role holds the geometry most recently requested for the
/// `i`-th element of that role. It is the starting point of the next
/// transition.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedElementState<G> {
    roles: IndexMap<RenderRole, Vec<G>>,
}

impl<G> Default for PersistedElementState<G> {
    fn default() -> Self {
        Self {
            roles: IndexMap::new(),
        }
    }
}

impl<G: Clone> PersistedElementState<G> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self, role: RenderRole) -> usize {
        self.roles.get(&role).map_or(0, Vec::len)
    }

    #[must_use]
    pub fn is_empty(&self, role: RenderRole) -> bool {
        self.len(role) == 0
    }

    #[must_use]
    pub fn geometries(&self, role: RenderRole) -> &[G] {
        self.roles.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    #[must_use]
    pub fn get(&self, role: RenderRole, index: usize) -> Option<&G> {
        self.roles.get(&role).and_then(|geometries| geometries.get(index))
    }

    /// Applies a reconciliation step and returns the `(from, to)` geometry of
    /// every new element.
    ///
    /// Updates start from the persisted geometry of their previous element;
    /// entering elements start from their own target. Afterwards the role
    /// holds exactly `targets`, so its length equals the new data length.
    pub fn retarget(&mut self, role: RenderRole, plan: &JoinPlan, targets: Vec<G>) -> Vec<(G, G)> {
        let previous = self.roles.shift_remove(&role).unwrap_or_default();
        let transitions = targets
            .iter()
            .enumerate()
            .map(|(next, target)| {
                let from = plan
                    .previous_of(next)
                    .and_then(|index| previous.get(index))
                    .unwrap_or(target);
                (from.clone(), target.clone())
            })
            .collect();

        self.roles.insert(role, targets);
        transitions
    }

    /// Drops every element of `role` at index `len` and beyond.
    pub fn truncate(&mut self, role: RenderRole, len: usize) {
        if let Some(geometries) = self.roles.get_mut(&role) {
            geometries.truncate(len);
        }
    }

    pub fn clear(&mut self, role: RenderRole) {
        self.roles.shift_remove(&role);
    }
}
