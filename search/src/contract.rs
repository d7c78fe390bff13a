//! Search problem contract trait.

use std::fmt::Debug;

/// One successor produced by [`SearchProblemV1::actions`].
#[derive(Debug, Clone, PartialEq)]
pub struct SuccessorV1<S> {
    /// Cost of the step from the expanded state to `state`.
    pub step_cost: f64,
    /// The resulting state.
    pub state: S,
}

impl<S> SuccessorV1<S> {
    #[must_use]
    pub fn new(step_cost: f64, state: S) -> Self {
        Self { step_cost, state }
    }
}

/// Trait for problems that can be searched.
///
/// # Contract
///
/// - `actions` must return a finite, deterministically ordered sequence for
///   every reachable state. Expansion order and frontier tie-breaking follow
///   that order.
/// - `step_cost` should be non-negative and `heuristic` admissible for
///   uniform-cost and A* optimality. Neither is checked: violations degrade
///   the result, they do not fail the search.
/// - `state_key` must agree with state equality: two states with equal keys
///   are the same state to the explored set and to every dedup check.
pub trait SearchProblemV1 {
    /// A configuration of the problem.
    type State: Clone + Debug;
    /// Comparable projection of a state used for dedup and the explored set.
    type Key: Ord + Clone + Debug;

    /// The state the frontier is seeded with.
    fn initial_state(&self) -> Self::State;

    /// Enumerate the successors of `state` in deterministic order.
    fn actions(&self, state: &Self::State) -> Vec<SuccessorV1<Self::State>>;

    /// Test whether `state` satisfies the goal.
    fn goal_test(&self, state: &Self::State) -> bool;

    /// Estimated remaining cost from `state` to a goal. Zero by default.
    fn heuristic(&self, _state: &Self::State) -> f64 {
        0.0
    }

    /// Project `state` to its comparable key.
    fn state_key(&self, state: &Self::State) -> Self::Key;
}
