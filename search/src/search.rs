//! Search model and stepping engine.
//!
//! A [`SearchModelV1`] holds everything one search lineage needs: the
//! problem, the strategy and queue policies, the node arena, the frontier,
//! the explored set, the solution and the audit log. Each call to
//! [`SearchModelV1::step`] expands exactly one frontier node. Scheduling
//! steps (one per frame, N per tick, or a loop to completion) is the
//! caller's business; the caller cancels by no longer stepping.
//!
//! # Step
//!
//! ```text
//! pop(frontier) ── empty ──→ solution = Failure (if Pending)
//!      │
//!      ▼
//! expand → first goal child? → solution = Solution (if Pending)
//!      → explored += path(node) ↦ children
//!      → frontier = strategy(explored, node, rest, children)
//!      → max_path_cost = max(max_path_cost, children)
//!      → frontier empty? → solution = Failure (if Pending)
//! ```
//!
//! Failure is declared as soon as an expansion leaves the frontier empty,
//! so a problem whose root has no successors fails in one step. A pop on an
//! empty frontier also fails, and counts as an empty pop.
//!
//! Finding a solution does not freeze the model: later steps keep
//! expanding, and the first solution stays recorded.
//!
//! # Goal timing
//!
//! [`GoalTestV1::OnGeneration`] (the default) tests children as they are
//! generated, as drawn above. [`GoalTestV1::OnExpansion`] tests the popped
//! node instead, which is what makes the first solution of a cost-ordered
//! queue a cheapest one; the uniform-cost and A* constructors select it.

use std::sync::Arc;

use crate::contract::SearchProblemV1;
use crate::error::SearchError;
use crate::explored::ExploredSetV1;
use crate::frontier::{FrontierV1, QueueV1};
use crate::graph::{ChildRecordV1, ExpandEventV1, SearchStatsV1, TerminationReasonV1};
use crate::node::{expand, NodeArenaV1, NodeId, SearchNodeV1};
use crate::policy::SearchPolicyV1;
use crate::strategy::StrategyV1;

/// Search outcome as seen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionV1 {
    /// Not concluded yet.
    Pending,
    /// A goal node was found.
    Solution(NodeId),
    /// The frontier ran out before any goal was found.
    Failure,
}

impl SolutionV1 {
    #[must_use]
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    /// The goal node, if solved.
    #[must_use]
    pub fn node(self) -> Option<NodeId> {
        match self {
            Self::Solution(id) => Some(id),
            Self::Pending | Self::Failure => None,
        }
    }
}

/// When the goal test is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalTestV1 {
    /// Test each child right after expansion; the first goal child wins.
    OnGeneration,
    /// Test the popped node before expanding it.
    OnExpansion,
}

impl GoalTestV1 {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OnGeneration => "on_generation",
            Self::OnExpansion => "on_expansion",
        }
    }
}

/// What a single in-place step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcomeV1 {
    /// A node was popped and expanded.
    Expanded {
        node: NodeId,
        /// Number of children generated.
        children: usize,
        /// Number of children that entered the frontier.
        kept: usize,
        /// Goal found by this step (first goal child, or the popped node
        /// under [`GoalTestV1::OnExpansion`]), whether or not already solved.
        goal: Option<NodeId>,
    },
    /// The frontier was empty.
    FrontierEmpty,
}

/// A search in progress.
pub struct SearchModelV1<P: SearchProblemV1> {
    strategy: StrategyV1,
    queue: QueueV1,
    goal_test: GoalTestV1,
    problem: Arc<P>,
    nodes: NodeArenaV1<P::State, P::Key>,
    explored: ExploredSetV1<P::Key>,
    frontier: FrontierV1,
    solution: SolutionV1,
    max_path_cost: f64,
    steps_taken: u64,
    stats: SearchStatsV1,
    events: Vec<ExpandEventV1>,
    record_events: bool,
}

impl<P: SearchProblemV1> Clone for SearchModelV1<P> {
    fn clone(&self) -> Self {
        Self {
            strategy: self.strategy,
            queue: self.queue,
            goal_test: self.goal_test,
            problem: Arc::clone(&self.problem),
            nodes: self.nodes.clone(),
            explored: self.explored.clone(),
            frontier: self.frontier.clone(),
            solution: self.solution,
            max_path_cost: self.max_path_cost,
            steps_taken: self.steps_taken,
            stats: self.stats.clone(),
            events: self.events.clone(),
            record_events: self.record_events,
        }
    }
}

impl<P: SearchProblemV1> std::fmt::Debug for SearchModelV1<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchModelV1")
            .field("strategy", &self.strategy)
            .field("queue", &self.queue)
            .field("goal_test", &self.goal_test)
            .field("nodes", &self.nodes.len())
            .field("frontier", &self.frontier)
            .field("explored", &self.explored.len())
            .field("solution", &self.solution)
            .field("max_path_cost", &self.max_path_cost)
            .field("steps_taken", &self.steps_taken)
            .finish_non_exhaustive()
    }
}

impl<P: SearchProblemV1> SearchModelV1<P> {
    /// Build the starting model: the root alone on the frontier, nothing
    /// explored, solution pending, max path cost zero.
    #[must_use]
    pub fn init(strategy: StrategyV1, queue: QueueV1, problem: P) -> Self {
        Self::init_shared(strategy, queue, Arc::new(problem))
    }

    /// [`SearchModelV1::init`] for a problem shared with other models.
    #[must_use]
    pub fn init_shared(strategy: StrategyV1, queue: QueueV1, problem: Arc<P>) -> Self {
        let mut nodes = NodeArenaV1::new();
        let state = problem.initial_state();
        let key = problem.state_key(&state);
        let root = nodes.push_root(state, key);
        let mut frontier = FrontierV1::new();
        frontier.push_back(root);
        Self {
            strategy,
            queue,
            goal_test: GoalTestV1::OnGeneration,
            problem,
            nodes,
            explored: ExploredSetV1::new(),
            frontier,
            solution: SolutionV1::Pending,
            max_path_cost: 0.0,
            steps_taken: 0,
            stats: SearchStatsV1 {
                frontier_high_water: 1,
                ..SearchStatsV1::default()
            },
            events: Vec::new(),
            record_events: true,
        }
    }

    /// Select when the goal test runs. Meant to be called before stepping.
    #[must_use]
    pub fn with_goal_test(mut self, goal_test: GoalTestV1) -> Self {
        self.goal_test = goal_test;
        self
    }

    /// Expand one frontier node.
    pub fn step(&mut self) -> StepOutcomeV1 {
        self.steps_taken += 1;

        let Some(current) = self
            .queue
            .pop(&mut self.frontier, &self.nodes, self.problem.as_ref())
        else {
            self.stats.empty_pops += 1;
            if self.solution.is_pending() {
                self.solution = SolutionV1::Failure;
            }
            return StepOutcomeV1::FrontierEmpty;
        };
        let pop_key = self
            .queue
            .pop_key(&self.nodes, self.problem.as_ref(), current);

        let rest = std::mem::take(&mut self.frontier);
        let children = expand(self.problem.as_ref(), &mut self.nodes, current);

        let goal = match self.goal_test {
            GoalTestV1::OnGeneration => children
                .iter()
                .copied()
                .find(|&c| self.problem.goal_test(&self.nodes[c].state)),
            GoalTestV1::OnExpansion => Some(current)
                .filter(|&c| self.problem.goal_test(&self.nodes[c].state)),
        };
        if let (Some(goal_id), SolutionV1::Pending) = (goal, self.solution) {
            self.solution = SolutionV1::Solution(goal_id);
        }

        let path = self.nodes.path_keys(current);
        let child_keys = children
            .iter()
            .map(|&c| self.nodes[c].costed_key())
            .collect();
        self.explored.insert(path, child_keys);

        let update =
            self.strategy
                .next_frontier::<P>(&self.nodes, &self.explored, current, rest, &children);
        self.frontier = update.frontier;

        for &c in &children {
            self.max_path_cost = self.max_path_cost.max(self.nodes[c].path_cost);
        }
        if self.frontier.is_empty() && self.solution.is_pending() {
            self.solution = SolutionV1::Failure;
        }

        let kept = update
            .outcomes
            .iter()
            .filter(|o| o.entered_frontier())
            .count();
        self.stats.total_expansions += 1;
        self.stats.total_children_generated += children.len() as u64;
        self.stats.total_duplicates_suppressed += (children.len() - kept) as u64;
        self.stats.frontier_high_water = self
            .stats
            .frontier_high_water
            .max(self.frontier.len() as u64);

        if self.record_events {
            self.events.push(ExpandEventV1 {
                expansion_order: self.stats.total_expansions - 1,
                node_id: current,
                pop_key,
                children: children
                    .iter()
                    .zip(&update.outcomes)
                    .map(|(&node_id, &outcome)| ChildRecordV1 { node_id, outcome })
                    .collect(),
                superseded: update.superseded,
                goal,
                frontier_len: self.frontier.len() as u64,
            });
        }

        StepOutcomeV1::Expanded {
            node: current,
            children: children.len(),
            kept,
            goal,
        }
    }

    /// Apply [`SearchModelV1::step`] exactly `n` times, whatever the outcome.
    pub fn next_n(&mut self, n: u64) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Step until the model is solved or failed.
    ///
    /// Returns the goal node, or `None` on failure. Returns immediately if
    /// the model has already concluded.
    ///
    /// Liveness: on an infinite state space with no reachable goal this
    /// never returns. Use [`SearchModelV1::run_with_policy`] for a bound.
    pub fn next_until_goal(&mut self) -> Option<NodeId> {
        loop {
            match self.solution {
                SolutionV1::Solution(id) => return Some(id),
                SolutionV1::Failure => return None,
                SolutionV1::Pending => {
                    self.step();
                }
            }
        }
    }

    /// Step until concluded or until `policy.max_steps` steps were taken by
    /// this call.
    ///
    /// `policy.record_events` holds only for this call; the model's own
    /// recording flag is restored before returning.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if the policy fails validation.
    /// No step is taken in that case.
    pub fn run_with_policy(
        &mut self,
        policy: &SearchPolicyV1,
    ) -> Result<TerminationReasonV1, SearchError> {
        policy.validate()?;
        let previous = std::mem::replace(&mut self.record_events, policy.record_events);
        let reason = self.run_bounded(policy.max_steps);
        self.record_events = previous;
        Ok(reason)
    }

    fn run_bounded(&mut self, max_steps: u64) -> TerminationReasonV1 {
        let mut steps = 0u64;
        loop {
            match self.solution {
                SolutionV1::Solution(node_id) => {
                    return TerminationReasonV1::GoalReached { node_id }
                }
                SolutionV1::Failure => return TerminationReasonV1::FrontierExhausted,
                SolutionV1::Pending if steps >= max_steps => {
                    return TerminationReasonV1::StepBudgetExceeded { steps };
                }
                SolutionV1::Pending => {
                    self.step();
                    steps += 1;
                }
            }
        }
    }

    /// Turn the per-expansion audit log on or off for subsequent steps.
    pub fn set_record_events(&mut self, record: bool) {
        self.record_events = record;
    }

    #[must_use]
    pub fn strategy(&self) -> StrategyV1 {
        self.strategy
    }

    #[must_use]
    pub fn queue(&self) -> QueueV1 {
        self.queue
    }

    #[must_use]
    pub fn goal_test(&self) -> GoalTestV1 {
        self.goal_test
    }

    #[must_use]
    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// Not-yet-expanded nodes, head first.
    #[must_use]
    pub fn frontier(&self) -> &FrontierV1 {
        &self.frontier
    }

    #[must_use]
    pub fn explored(&self) -> &ExploredSetV1<P::Key> {
        &self.explored
    }

    #[must_use]
    pub fn solution(&self) -> SolutionV1 {
        self.solution
    }

    /// Largest path cost of any node produced so far.
    #[must_use]
    pub fn max_path_cost(&self) -> f64 {
        self.max_path_cost
    }

    /// Number of `step` calls made, including ones on an empty frontier.
    #[must_use]
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    #[must_use]
    pub fn stats(&self) -> &SearchStatsV1 {
        &self.stats
    }

    #[must_use]
    pub fn events(&self) -> &[ExpandEventV1] {
        &self.events
    }

    #[must_use]
    pub fn nodes(&self) -> &NodeArenaV1<P::State, P::Key> {
        &self.nodes
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&SearchNodeV1<P::State, P::Key>> {
        self.nodes.get(id)
    }

    /// `(path_cost, state)` from the root to `id`.
    #[must_use]
    pub fn path(&self, id: NodeId) -> Vec<(f64, &P::State)> {
        self.nodes.path(id)
    }

    /// Path of the solution node, if solved.
    #[must_use]
    pub fn solution_path(&self) -> Option<Vec<(f64, &P::State)>> {
        self.solution.node().map(|id| self.nodes.path(id))
    }

    /// States currently on the frontier, head first.
    pub fn frontier_states(&self) -> impl Iterator<Item = &P::State> {
        self.frontier.iter().map(|&id| &self.nodes[id].state)
    }
}

/// Value-style [`SearchModelV1::step`]: consume a model, return its successor.
#[must_use]
pub fn step<P: SearchProblemV1>(mut model: SearchModelV1<P>) -> SearchModelV1<P> {
    model.step();
    model
}

/// Value-style [`SearchModelV1::next_n`].
#[must_use]
pub fn next_n<P: SearchProblemV1>(n: u64, mut model: SearchModelV1<P>) -> SearchModelV1<P> {
    model.next_n(n);
    model
}

/// Value-style [`SearchModelV1::next_until_goal`].
#[must_use]
pub fn next_until_goal<P: SearchProblemV1>(
    mut model: SearchModelV1<P>,
) -> (Option<NodeId>, SearchModelV1<P>) {
    let goal = model.next_until_goal();
    (goal, model)
}
