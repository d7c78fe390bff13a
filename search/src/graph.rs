//! `SearchGraphV1`: introspection snapshot and expansion audit log.
//!
//! The model appends one [`ExpandEventV1`] per expansion. A
//! [`SearchGraphV1`] is a derived, serializable view of a model at one point
//! in time: every node ever created, the expansion log, the frontier and the
//! aggregate counters. Its canonical JSON bytes are bit-exact (costs are
//! written as IEEE-754 bit patterns), so equal models hash equal.

use crate::contract::SearchProblemV1;
use crate::digest::{
    canonical_hash, canonical_json_bytes, cost_bits_hex, ContentHash, DOMAIN_SEARCH_GRAPH,
};
use crate::error::SearchError;
use crate::frontier::QueueV1;
use crate::node::NodeId;
use crate::search::{SearchModelV1, SolutionV1};
use crate::strategy::ChildOutcomeV1;

/// One expanded child and what the strategy did with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildRecordV1 {
    pub node_id: NodeId,
    pub outcome: ChildOutcomeV1,
}

/// A single frontier-pop + expansion event.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandEventV1 {
    /// Total order of expansions (0-based).
    pub expansion_order: u64,
    /// The node expanded.
    pub node_id: NodeId,
    /// Priority key at pop time (`None` for FIFO/LIFO).
    pub pop_key: Option<f64>,
    /// Children in expansion order with their outcomes.
    pub children: Vec<ChildRecordV1>,
    /// Frontier entries replaced by cheaper children.
    pub superseded: Vec<NodeId>,
    /// Goal found by this expansion.
    pub goal: Option<NodeId>,
    /// Frontier size after the update.
    pub frontier_len: u64,
}

/// Aggregate counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStatsV1 {
    pub total_expansions: u64,
    pub total_children_generated: u64,
    /// Children that did not enter the frontier.
    pub total_duplicates_suppressed: u64,
    /// Steps that found the frontier empty.
    pub empty_pops: u64,
    pub frontier_high_water: u64,
}

/// Why a bounded run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReasonV1 {
    /// The model holds a solution.
    GoalReached { node_id: NodeId },
    /// The frontier emptied without a goal.
    FrontierExhausted,
    /// The step budget ran out while still pending.
    StepBudgetExceeded { steps: u64 },
}

impl TerminationReasonV1 {
    #[must_use]
    pub fn to_json(self) -> serde_json::Value {
        match self {
            Self::GoalReached { node_id } => {
                serde_json::json!({"node_id": node_id.as_u64(), "type": "goal_reached"})
            }
            Self::FrontierExhausted => serde_json::json!({"type": "frontier_exhausted"}),
            Self::StepBudgetExceeded { steps } => {
                serde_json::json!({"steps": steps, "type": "step_budget_exceeded"})
            }
        }
    }
}

/// Derived node summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchGraphNodeSummaryV1 {
    pub node_id: NodeId,
    pub parent_id: Option<NodeId>,
    pub depth: u32,
    pub path_cost: f64,
    /// `Debug` rendering of the node's state key.
    pub state_key: String,
    /// First expansion of this node, if expanded.
    pub expansion_order: Option<u64>,
    pub on_frontier: bool,
    pub is_solution: bool,
}

/// Snapshot metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchGraphMetadata {
    pub strategy: &'static str,
    pub queue: QueueV1,
    pub goal_test: &'static str,
    pub solution: SolutionV1,
    pub steps_taken: u64,
    pub max_path_cost: f64,
    pub explored_entries: u64,
    pub stats: SearchStatsV1,
}

/// Serializable snapshot of a model.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchGraphV1 {
    pub expansions: Vec<ExpandEventV1>,
    /// Sorted by `node_id` ascending.
    pub node_summaries: Vec<SearchGraphNodeSummaryV1>,
    /// Frontier ids, head first.
    pub frontier: Vec<NodeId>,
    pub metadata: SearchGraphMetadata,
}

impl SearchGraphV1 {
    /// Snapshot `model`.
    #[must_use]
    pub fn from_model<P: SearchProblemV1>(model: &SearchModelV1<P>) -> Self {
        let mut expansion_order: Vec<Option<u64>> = vec![None; model.nodes().len()];
        for event in model.events() {
            let slot = &mut expansion_order[index_of(event.node_id)];
            if slot.is_none() {
                *slot = Some(event.expansion_order);
            }
        }
        let mut on_frontier = vec![false; model.nodes().len()];
        for &id in model.frontier() {
            on_frontier[index_of(id)] = true;
        }
        let solution_id = model.solution().node();

        let node_summaries = model
            .nodes()
            .iter()
            .map(|n| SearchGraphNodeSummaryV1 {
                node_id: n.node_id,
                parent_id: n.parent_id,
                depth: n.depth,
                path_cost: n.path_cost,
                state_key: format!("{:?}", n.key),
                expansion_order: expansion_order[index_of(n.node_id)],
                on_frontier: on_frontier[index_of(n.node_id)],
                is_solution: solution_id == Some(n.node_id),
            })
            .collect();

        Self {
            expansions: model.events().to_vec(),
            node_summaries,
            frontier: model.frontier().iter().copied().collect(),
            metadata: SearchGraphMetadata {
                strategy: model.strategy().as_str(),
                queue: model.queue(),
                goal_test: model.goal_test().as_str(),
                solution: model.solution(),
                steps_taken: model.steps_taken(),
                max_path_cost: model.max_path_cost(),
                explored_entries: model.explored().len() as u64,
                stats: model.stats().clone(),
            },
        }
    }

    /// Serialize to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::GraphSerialization`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, SearchError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// `canonical_hash(DOMAIN_SEARCH_GRAPH, canonical JSON bytes)`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::GraphSerialization`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, SearchError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(DOMAIN_SEARCH_GRAPH, &bytes))
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "expansions": self.expansions.iter().map(expand_event_to_json).collect::<Vec<_>>(),
            "frontier": self.frontier.iter().map(|id| id.as_u64()).collect::<Vec<_>>(),
            "metadata": metadata_to_json(&self.metadata),
            "node_summaries": self.node_summaries.iter().map(node_summary_to_json).collect::<Vec<_>>(),
        })
    }
}

#[allow(clippy::cast_possible_truncation)]
fn index_of(id: NodeId) -> usize {
    id.as_u64() as usize
}

fn expand_event_to_json(e: &ExpandEventV1) -> serde_json::Value {
    serde_json::json!({
        "children": e.children.iter().map(|c| serde_json::json!({
            "node_id": c.node_id.as_u64(),
            "outcome": c.outcome.as_str(),
        })).collect::<Vec<_>>(),
        "expansion_order": e.expansion_order,
        "frontier_len": e.frontier_len,
        "goal": e.goal.map(NodeId::as_u64),
        "node_id": e.node_id.as_u64(),
        "pop_key": e.pop_key.map(cost_bits_hex),
        "superseded": e.superseded.iter().map(|id| id.as_u64()).collect::<Vec<_>>(),
    })
}

fn node_summary_to_json(n: &SearchGraphNodeSummaryV1) -> serde_json::Value {
    serde_json::json!({
        "depth": n.depth,
        "expansion_order": n.expansion_order,
        "is_solution": n.is_solution,
        "node_id": n.node_id.as_u64(),
        "on_frontier": n.on_frontier,
        "parent_id": n.parent_id.map(NodeId::as_u64),
        "path_cost": cost_bits_hex(n.path_cost),
        "state_key": n.state_key,
    })
}

fn queue_to_json(q: QueueV1) -> serde_json::Value {
    match q {
        QueueV1::Fifo | QueueV1::Lifo => serde_json::json!({"type": q.as_str()}),
        QueueV1::Priority(key) => serde_json::json!({"key": key.as_str(), "type": q.as_str()}),
    }
}

fn solution_to_json(s: SolutionV1) -> serde_json::Value {
    match s {
        SolutionV1::Pending => serde_json::json!({"type": "pending"}),
        SolutionV1::Solution(id) => serde_json::json!({"node_id": id.as_u64(), "type": "solution"}),
        SolutionV1::Failure => serde_json::json!({"type": "failure"}),
    }
}

fn stats_to_json(s: &SearchStatsV1) -> serde_json::Value {
    serde_json::json!({
        "empty_pops": s.empty_pops,
        "frontier_high_water": s.frontier_high_water,
        "total_children_generated": s.total_children_generated,
        "total_duplicates_suppressed": s.total_duplicates_suppressed,
        "total_expansions": s.total_expansions,
    })
}

fn metadata_to_json(m: &SearchGraphMetadata) -> serde_json::Value {
    serde_json::json!({
        "explored_entries": m.explored_entries,
        "goal_test": m.goal_test,
        "max_path_cost": cost_bits_hex(m.max_path_cost),
        "queue": queue_to_json(m.queue),
        "solution": solution_to_json(m.solution),
        "stats": stats_to_json(&m.stats),
        "steps_taken": m.steps_taken,
        "strategy": m.strategy,
    })
}
