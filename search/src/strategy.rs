//! Frontier update strategies: tree search and graph search.
//!
//! A strategy receives the node just expanded, the remaining frontier and
//! the freshly expanded children, and computes the next frontier. Graph
//! search keeps at most one frontier entry per state key, always at the
//! lowest known path cost.

use std::collections::BTreeMap;

use crate::contract::SearchProblemV1;
use crate::explored::ExploredSetV1;
use crate::frontier::FrontierV1;
use crate::node::{NodeArenaV1, NodeId};

/// Frontier update policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyV1 {
    /// No dedup: children go in front of the remaining frontier as-is.
    TreeSearch,
    /// Dedup children against their parent, siblings, the explored set and
    /// the frontier.
    GraphSearch,
}

/// What the strategy decided about one expanded child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildOutcomeV1 {
    /// Tree search: added without checks.
    Unfiltered,
    /// Survived every graph-search check and entered the frontier.
    Kept,
    /// Same state as its parent.
    SelfLoop,
    /// A sibling reaches the same state cheaper, or as cheaply and earlier.
    SiblingDominated,
    /// The state terminates an explored path.
    AlreadyExplored,
    /// The frontier already holds the state at an equal or lower cost.
    FrontierDominated,
}

impl ChildOutcomeV1 {
    /// Whether the child entered the frontier.
    #[must_use]
    pub fn entered_frontier(self) -> bool {
        matches!(self, Self::Unfiltered | Self::Kept)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unfiltered => "unfiltered",
            Self::Kept => "kept",
            Self::SelfLoop => "self_loop",
            Self::SiblingDominated => "sibling_dominated",
            Self::AlreadyExplored => "already_explored",
            Self::FrontierDominated => "frontier_dominated",
        }
    }
}

/// Result of one frontier update.
#[derive(Debug, Clone)]
pub struct FrontierUpdateV1 {
    /// The next frontier, head first.
    pub frontier: FrontierV1,
    /// One outcome per expanded child, in expansion order.
    pub outcomes: Vec<ChildOutcomeV1>,
    /// Old frontier entries dropped because a kept child supersedes them.
    pub superseded: Vec<NodeId>,
}

impl StrategyV1 {
    /// Compute the frontier that follows expanding `current`.
    ///
    /// `explored` must already contain the entry for `current`.
    #[must_use]
    pub fn next_frontier<P: SearchProblemV1>(
        self,
        arena: &NodeArenaV1<P::State, P::Key>,
        explored: &ExploredSetV1<P::Key>,
        current: NodeId,
        rest: FrontierV1,
        children: &[NodeId],
    ) -> FrontierUpdateV1 {
        match self {
            Self::TreeSearch => tree_search(rest, children),
            Self::GraphSearch => graph_search::<P>(arena, explored, current, rest, children),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TreeSearch => "tree_search",
            Self::GraphSearch => "graph_search",
        }
    }
}

fn tree_search(mut rest: FrontierV1, children: &[NodeId]) -> FrontierUpdateV1 {
    for &child in children.iter().rev() {
        rest.push_front(child);
    }
    FrontierUpdateV1 {
        frontier: rest,
        outcomes: vec![ChildOutcomeV1::Unfiltered; children.len()],
        superseded: Vec::new(),
    }
}

fn graph_search<P: SearchProblemV1>(
    arena: &NodeArenaV1<P::State, P::Key>,
    explored: &ExploredSetV1<P::Key>,
    current: NodeId,
    rest: FrontierV1,
    children: &[NodeId],
) -> FrontierUpdateV1 {
    let parent_key = &arena[current].key;

    // Cheapest remaining-frontier cost per key.
    let mut frontier_costs: BTreeMap<&P::Key, f64> = BTreeMap::new();
    for &id in &rest {
        let node = &arena[id];
        frontier_costs
            .entry(&node.key)
            .and_modify(|c| *c = c.min(node.path_cost))
            .or_insert(node.path_cost);
    }

    let outcomes: Vec<ChildOutcomeV1> = children
        .iter()
        .enumerate()
        .map(|(i, &id)| {
            let child = &arena[id];
            if child.key == *parent_key {
                return ChildOutcomeV1::SelfLoop;
            }
            let dominated_by_sibling = children.iter().enumerate().any(|(j, &other)| {
                let sibling = &arena[other];
                j != i
                    && sibling.key == child.key
                    && (sibling.path_cost < child.path_cost
                        || (sibling.path_cost == child.path_cost && j < i))
            });
            if dominated_by_sibling {
                return ChildOutcomeV1::SiblingDominated;
            }
            if explored.contains_terminal(&child.key) {
                return ChildOutcomeV1::AlreadyExplored;
            }
            match frontier_costs.get(&child.key) {
                Some(&existing) if child.path_cost >= existing => ChildOutcomeV1::FrontierDominated,
                _ => ChildOutcomeV1::Kept,
            }
        })
        .collect();

    let mut kept_costs: BTreeMap<&P::Key, f64> = BTreeMap::new();
    let mut frontier = FrontierV1::with_capacity(rest.len() + children.len());
    for (&id, outcome) in children.iter().zip(&outcomes) {
        if *outcome == ChildOutcomeV1::Kept {
            let node = &arena[id];
            kept_costs.insert(&node.key, node.path_cost);
            frontier.push_back(id);
        }
    }

    let mut superseded = Vec::new();
    for id in rest {
        let node = &arena[id];
        match kept_costs.get(&node.key) {
            Some(&kept) if kept <= node.path_cost => superseded.push(id),
            _ => frontier.push_back(id),
        }
    }

    FrontierUpdateV1 {
        frontier,
        outcomes,
        superseded,
    }
}
