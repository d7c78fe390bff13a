//! Explored set: one entry per expansion, keyed by the expanded node's path.
//!
//! Entry keys are whole `(path_cost, key)` paths from the root, so two
//! different paths to the same state produce two entries. Dedup only asks
//! whether a key terminates some explored path, which is answered from a
//! separate index of terminal keys.

use std::collections::{BTreeMap, BTreeSet};

use crate::node::CostedKeyV1;

/// Path from the root to an expanded node, as `(path_cost, key)` pairs.
pub type ExploredPathV1<K> = Vec<CostedKeyV1<K>>;

/// Mapping from expanded paths to the children they produced.
#[derive(Debug, Clone)]
pub struct ExploredSetV1<K> {
    entries: BTreeMap<ExploredPathV1<K>, Vec<CostedKeyV1<K>>>,
    terminal_keys: BTreeSet<K>,
}

impl<K: Ord + Clone> ExploredSetV1<K> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            terminal_keys: BTreeSet::new(),
        }
    }

    /// Record an expansion. An identical path replaces its earlier entry.
    pub fn insert(&mut self, path: ExploredPathV1<K>, children: Vec<CostedKeyV1<K>>) {
        if let Some(last) = path.last() {
            self.terminal_keys.insert(last.key.clone());
        }
        self.entries.insert(path, children);
    }

    /// Whether `key` is the terminal key of any explored path.
    #[must_use]
    pub fn contains_terminal(&self, key: &K) -> bool {
        self.terminal_keys.contains(key)
    }

    /// Children recorded for an explored path.
    #[must_use]
    pub fn get(&self, path: &[CostedKeyV1<K>]) -> Option<&[CostedKeyV1<K>]> {
        self.entries.get(path).map(Vec::as_slice)
    }

    /// Entries in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&ExploredPathV1<K>, &Vec<CostedKeyV1<K>>)> {
        self.entries.iter()
    }

    /// Distinct terminal keys (the set of expanded states).
    pub fn terminal_keys(&self) -> impl Iterator<Item = &K> {
        self.terminal_keys.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Ord + Clone> Default for ExploredSetV1<K> {
    fn default() -> Self {
        Self::new()
    }
}
