//! Enter/update/exit classification of a new dataset against the elements
//! rendered by the previous pass.
//!
//! The default join is positional: element `i` of the new data corresponds to
//! whatever was rendered at index `i` before. Reordering or mid-sequence
//! insertion therefore animates the wrong elements; callers that need stable
//! identity use [`JoinPlan::keyed`] or [`JoinPlan::keyed_by`].

use std::hash::Hash;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Previous element `previous` carries over as new element `next`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinPair {
    pub previous: usize,
    pub next: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JoinCounts {
    pub update: usize,
    pub enter: usize,
    pub exit: usize,
}

/// Result of one reconciliation step.
///
/// `update` is ordered by `next`; `enter` holds new-data indices and `exit`
/// holds previous-element indices, both ascending.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JoinPlan {
    pub update: Vec<JoinPair>,
    pub enter: Vec<usize>,
    pub exit: Vec<usize>,
    previous_len: usize,
    next_len: usize,
}

impl JoinPlan {
    /// Positional join of `previous_len` rendered elements against `next_len` items.
    #[must_use]
    pub fn positional(previous_len: usize, next_len: usize) -> Self {
        let shared = previous_len.min(next_len);
        Self {
            update: (0..shared)
                .map(|index| JoinPair {
                    previous: index,
                    next: index,
                })
                .collect(),
            enter: (shared..next_len).collect(),
            exit: (shared..previous_len).collect(),
            previous_len,
            next_len,
        }
    }

    /// Joins by key equality.
    ///
    /// The first occurrence of a key on either side wins; later duplicates in
    /// the new data enter and later duplicates among previous elements exit.
    #[must_use]
    pub fn keyed<K: Eq + Hash>(previous_keys: &[K], next_keys: &[K]) -> Self {
        let mut previous_by_key: IndexMap<&K, usize> = IndexMap::with_capacity(previous_keys.len());
        let mut exit = Vec::new();
        for (index, key) in previous_keys.iter().enumerate() {
            if previous_by_key.contains_key(key) {
                exit.push(index);
            } else {
                previous_by_key.insert(key, index);
            }
        }

        let mut update = Vec::new();
        let mut enter = Vec::new();
        for (next, key) in next_keys.iter().enumerate() {
            match previous_by_key.swap_remove(key) {
                Some(previous) => update.push(JoinPair { previous, next }),
                None => enter.push(next),
            }
        }

        exit.extend(previous_by_key.into_values());
        exit.sort_unstable();

        Self {
            update,
            enter,
            exit,
            previous_len: previous_keys.len(),
            next_len: next_keys.len(),
        }
    }

    /// Keyed join with keys extracted from the items themselves.
    #[must_use]
    pub fn keyed_by<T, K, F>(previous: &[T], next: &[T], key: F) -> Self
    where
        K: Eq + Hash,
        F: Fn(&T) -> K,
    {
        let previous_keys: Vec<K> = previous.iter().map(&key).collect();
        let next_keys: Vec<K> = next.iter().map(&key).collect();
        Self::keyed(&previous_keys, &next_keys)
    }

    #[must_use]
    pub fn counts(&self) -> JoinCounts {
        JoinCounts {
            update: self.update.len(),
            enter: self.enter.len(),
            exit: self.exit.len(),
        }
    }

    #[must_use]
    pub fn previous_len(&self) -> usize {
        self.previous_len
    }

    #[must_use]
    pub fn next_len(&self) -> usize {
        self.next_len
    }

    /// Previous index that feeds new element `next`, if it is an update.
    #[must_use]
    pub fn previous_of(&self, next: usize) -> Option<usize> {
        self.update
            .iter()
            .find(|pair| pair.next == next)
            .map(|pair| pair.previous)
    }
}
