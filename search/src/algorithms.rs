//! Named search algorithms: fixed strategy/queue combinations.
//!
//! | Algorithm       | Strategy     | Queue                    | Goal test     |
//! |-----------------|--------------|--------------------------|---------------|
//! | `breadth_first` | graph search | FIFO                     | on generation |
//! | `depth_first`   | graph search | LIFO                     | on generation |
//! | `uniform_cost`  | graph search | priority(`g`)            | on expansion  |
//! | `greedy`        | graph search | priority(`h`)            | on generation |
//! | `best_first`    | graph search | priority(`g + h`) (A*)   | on expansion  |

use crate::contract::SearchProblemV1;
use crate::frontier::{PriorityKeyV1, QueueV1};
use crate::search::{GoalTestV1, SearchModelV1};
use crate::strategy::StrategyV1;

/// Generic constructor: any strategy with any queue, goal test on generation.
#[must_use]
pub fn init<P: SearchProblemV1>(strategy: StrategyV1, queue: QueueV1, problem: P) -> SearchModelV1<P> {
    SearchModelV1::init(strategy, queue, problem)
}

#[must_use]
pub fn breadth_first<P: SearchProblemV1>(problem: P) -> SearchModelV1<P> {
    AlgorithmV1::BreadthFirst.build(problem)
}

#[must_use]
pub fn depth_first<P: SearchProblemV1>(problem: P) -> SearchModelV1<P> {
    AlgorithmV1::DepthFirst.build(problem)
}

/// Dijkstra: cheapest path cost first.
#[must_use]
pub fn uniform_cost<P: SearchProblemV1>(problem: P) -> SearchModelV1<P> {
    AlgorithmV1::UniformCost.build(problem)
}

/// Smallest heuristic first; path cost is ignored.
#[must_use]
pub fn greedy<P: SearchProblemV1>(problem: P) -> SearchModelV1<P> {
    AlgorithmV1::Greedy.build(problem)
}

/// A*: smallest `path_cost + heuristic` first.
#[must_use]
pub fn best_first<P: SearchProblemV1>(problem: P) -> SearchModelV1<P> {
    AlgorithmV1::BestFirst.build(problem)
}

/// Algorithm selector for callers that pick by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmV1 {
    BreadthFirst,
    DepthFirst,
    UniformCost,
    Greedy,
    BestFirst,
    /// Breadth-first without dedup. Only sensible on tree-shaped spaces.
    TreeBreadthFirst,
}

impl AlgorithmV1 {
    pub const ALL: [Self; 6] = [
        Self::BreadthFirst,
        Self::DepthFirst,
        Self::UniformCost,
        Self::Greedy,
        Self::BestFirst,
        Self::TreeBreadthFirst,
    ];

    #[must_use]
    pub fn strategy(self) -> StrategyV1 {
        match self {
            Self::TreeBreadthFirst => StrategyV1::TreeSearch,
            _ => StrategyV1::GraphSearch,
        }
    }

    #[must_use]
    pub fn queue(self) -> QueueV1 {
        match self {
            Self::BreadthFirst | Self::TreeBreadthFirst => QueueV1::Fifo,
            Self::DepthFirst => QueueV1::Lifo,
            Self::UniformCost => QueueV1::Priority(PriorityKeyV1::PathCost),
            Self::Greedy => QueueV1::Priority(PriorityKeyV1::Heuristic),
            Self::BestFirst => QueueV1::Priority(PriorityKeyV1::PathCostPlusHeuristic),
        }
    }

    #[must_use]
    pub fn goal_test(self) -> GoalTestV1 {
        match self {
            Self::UniformCost | Self::BestFirst => GoalTestV1::OnExpansion,
            _ => GoalTestV1::OnGeneration,
        }
    }

    /// Build the starting model for `problem`.
    #[must_use]
    pub fn build<P: SearchProblemV1>(self, problem: P) -> SearchModelV1<P> {
        SearchModelV1::init(self.strategy(), self.queue(), problem).with_goal_test(self.goal_test())
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BreadthFirst => "breadth_first",
            Self::DepthFirst => "depth_first",
            Self::UniformCost => "uniform_cost",
            Self::Greedy => "greedy",
            Self::BestFirst => "best_first",
            Self::TreeBreadthFirst => "tree_breadth_first",
        }
    }

    /// Inverse of [`AlgorithmV1::as_str`].
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == name)
    }
}
