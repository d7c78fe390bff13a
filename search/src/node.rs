//! Search nodes, the node arena, and path reconstruction.
//!
//! Nodes are created once, by expansion, and never mutated. The parent link
//! is an arena index, so every node's ancestry stays reachable for the
//! lifetime of the model that owns the arena.

use std::cmp::Ordering;

use crate::contract::SearchProblemV1;

/// Arena handle of a search node. Assigned in creation order, root = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

impl NodeId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    #[allow(clippy::cast_possible_truncation)]
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// An immutable search node.
#[derive(Debug, Clone)]
pub struct SearchNodeV1<S, K> {
    /// Arena handle (also the creation order).
    pub node_id: NodeId,
    /// Parent handle (`None` for root).
    pub parent_id: Option<NodeId>,
    /// Full state at this node.
    pub state: S,
    /// `state_key(state)`, computed once at creation.
    pub key: K,
    /// Cumulative path cost from the root.
    pub path_cost: f64,
    /// Tree depth (root = 0).
    pub depth: u32,
}

impl<S, K: Clone> SearchNodeV1<S, K> {
    /// The `(path_cost, key)` pair this node contributes to explored entries.
    #[must_use]
    pub fn costed_key(&self) -> CostedKeyV1<K> {
        CostedKeyV1 {
            path_cost: self.path_cost,
            key: self.key.clone(),
        }
    }
}

/// A state key annotated with the path cost it was reached at.
///
/// Totally ordered by `(path_cost, key)`, with costs compared by
/// [`f64::total_cmp`] so that explored entries can live in ordered maps.
#[derive(Debug, Clone)]
pub struct CostedKeyV1<K> {
    pub path_cost: f64,
    pub key: K,
}

impl<K: Ord> PartialEq for CostedKeyV1<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: Ord> Eq for CostedKeyV1<K> {}

impl<K: Ord> PartialOrd for CostedKeyV1<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for CostedKeyV1<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path_cost
            .total_cmp(&other.path_cost)
            .then_with(|| self.key.cmp(&other.key))
    }
}

/// Append-only node storage addressed by [`NodeId`].
#[derive(Debug, Clone)]
pub struct NodeArenaV1<S, K> {
    nodes: Vec<SearchNodeV1<S, K>>,
}

impl<S, K: Clone> NodeArenaV1<S, K> {
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Allocate a root node (no parent, zero path cost).
    pub fn push_root(&mut self, state: S, key: K) -> NodeId {
        self.push(None, state, key, 0.0, 0)
    }

    /// Allocate a child of `parent` reached with `step_cost`.
    pub fn push_child(&mut self, parent: NodeId, step_cost: f64, state: S, key: K) -> NodeId {
        let (path_cost, depth) = {
            let p = &self[parent];
            (p.path_cost + step_cost, p.depth + 1)
        };
        self.push(Some(parent), state, key, path_cost, depth)
    }

    fn push(
        &mut self,
        parent_id: Option<NodeId>,
        state: S,
        key: K,
        path_cost: f64,
        depth: u32,
    ) -> NodeId {
        let node_id = NodeId(self.nodes.len() as u64);
        self.nodes.push(SearchNodeV1 {
            node_id,
            parent_id,
            state,
            key,
            path_cost,
            depth,
        });
        node_id
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&SearchNodeV1<S, K>> {
        self.nodes.get(id.index())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &SearchNodeV1<S, K>> {
        self.nodes.iter()
    }

    /// Node handles from the root to `id`, inclusive.
    #[must_use]
    pub fn reconstruct_path(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            path.push(node_id);
            current = self.get(node_id).and_then(|n| n.parent_id);
        }
        path.reverse();
        path
    }

    /// `(path_cost, state)` pairs from the root to `id`, ascending by depth.
    #[must_use]
    pub fn path(&self, id: NodeId) -> Vec<(f64, &S)> {
        self.reconstruct_path(id)
            .into_iter()
            .map(|n| {
                let node = &self[n];
                (node.path_cost, &node.state)
            })
            .collect()
    }

    /// `(path_cost, key)` pairs from the root to `id`: the explored-set key.
    #[must_use]
    pub fn path_keys(&self, id: NodeId) -> Vec<CostedKeyV1<K>> {
        self.reconstruct_path(id)
            .into_iter()
            .map(|n| self[n].costed_key())
            .collect()
    }
}

impl<S, K: Clone> Default for NodeArenaV1<S, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, K> std::ops::Index<NodeId> for NodeArenaV1<S, K> {
    type Output = SearchNodeV1<S, K>;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.index()]
    }
}

/// Expand `node`: allocate one child per successor, in `actions` order.
pub fn expand<P: SearchProblemV1>(
    problem: &P,
    arena: &mut NodeArenaV1<P::State, P::Key>,
    node: NodeId,
) -> Vec<NodeId> {
    let successors = problem.actions(&arena[node].state);
    successors
        .into_iter()
        .map(|s| {
            let key = problem.state_key(&s.state);
            arena.push_child(node, s.step_cost, s.state, key)
        })
        .collect()
}
