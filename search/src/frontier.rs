//! Frontier sequence and queue disciplines.
//!
//! The frontier is an ordered sequence with its head at the front. New nodes
//! are placed at the head, so the tail holds the oldest entries. A queue
//! discipline decides which entry the next step expands.

use std::collections::VecDeque;

use crate::contract::SearchProblemV1;
use crate::node::{NodeArenaV1, NodeId};

/// Ordered not-yet-expanded nodes, head first.
pub type FrontierV1 = VecDeque<NodeId>;

/// Key a priority queue minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityKeyV1 {
    /// `g`: uniform-cost search.
    PathCost,
    /// `h`: greedy best-first search.
    Heuristic,
    /// `g + h`: A*.
    PathCostPlusHeuristic,
}

impl PriorityKeyV1 {
    /// Evaluate this key for the node `id`.
    #[must_use]
    pub fn evaluate<P: SearchProblemV1>(
        self,
        problem: &P,
        arena: &NodeArenaV1<P::State, P::Key>,
        id: NodeId,
    ) -> f64 {
        let node = &arena[id];
        match self {
            Self::PathCost => node.path_cost,
            Self::Heuristic => problem.heuristic(&node.state),
            Self::PathCostPlusHeuristic => node.path_cost + problem.heuristic(&node.state),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PathCost => "path_cost",
            Self::Heuristic => "heuristic",
            Self::PathCostPlusHeuristic => "path_cost_plus_heuristic",
        }
    }
}

/// Queue discipline: which frontier entry is popped next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueV1 {
    /// Oldest entry (tail). Breadth-first order.
    Fifo,
    /// Newest entry (head). Depth-first order.
    Lifo,
    /// Minimum key; ties go to the entry nearest the head.
    Priority(PriorityKeyV1),
}

impl QueueV1 {
    /// Remove and return the next node, or `None` if the frontier is empty.
    ///
    /// An empty frontier is not an error: it is how a step detects that the
    /// search space is exhausted.
    pub fn pop<P: SearchProblemV1>(
        self,
        frontier: &mut FrontierV1,
        arena: &NodeArenaV1<P::State, P::Key>,
        problem: &P,
    ) -> Option<NodeId> {
        match self {
            Self::Fifo => frontier.pop_back(),
            Self::Lifo => frontier.pop_front(),
            Self::Priority(key) => {
                let mut best: Option<(usize, f64)> = None;
                for (i, &id) in frontier.iter().enumerate() {
                    let value = key.evaluate(problem, arena, id);
                    match best {
                        Some((_, best_value)) if value.total_cmp(&best_value).is_ge() => {}
                        _ => best = Some((i, value)),
                    }
                }
                best.and_then(|(i, _)| frontier.remove(i))
            }
        }
    }

    /// The key value recorded for `id` when it is popped (`None` for FIFO/LIFO).
    #[must_use]
    pub fn pop_key<P: SearchProblemV1>(
        self,
        arena: &NodeArenaV1<P::State, P::Key>,
        problem: &P,
        id: NodeId,
    ) -> Option<f64> {
        match self {
            Self::Fifo | Self::Lifo => None,
            Self::Priority(key) => Some(key.evaluate(problem, arena, id)),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fifo => "fifo",
            Self::Lifo => "lifo",
            Self::Priority(_) => "priority",
        }
    }
}
