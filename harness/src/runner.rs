//! Harness runner: drive a world through a named algorithm and report.
//!
//! # Pipeline
//!
//! ```text
//! policy.validate() → algorithm.build(world) → run_with_policy()
//!   → SearchGraphV1::from_model() → canonical bytes + graph digest
//!   → RunReportV1 (report JSON + report digest)
//! ```
//!
//! The report digest covers the canonical report JSON, which binds the
//! graph digest; the graph bytes themselves travel alongside the report.

use wayfinder_search::algorithms::AlgorithmV1;
use wayfinder_search::digest::{canonical_hash, canonical_json_bytes, cost_bits_hex, ContentHash};
use wayfinder_search::error::SearchError;
use wayfinder_search::graph::{SearchGraphV1, SearchStatsV1, TerminationReasonV1};
use wayfinder_search::node::NodeId;
use wayfinder_search::policy::SearchPolicyV1;
use wayfinder_search::search::SearchModelV1;

use crate::contract::WorldHarnessV1;

/// Domain prefix for run report digests.
pub const DOMAIN_RUN_REPORT: &[u8] = b"WAYFINDER::RUN_REPORT::V1\0";

/// Report schema tag written into `run_report.json`.
pub const RUN_REPORT_SCHEMA: &str = "run_report.v1";

/// Error during a harness run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// The search layer refused the run (invalid policy).
    Search(SearchError),
    /// Canonical JSON serialization failed.
    CanonFailed { detail: String },
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Search(e) => write!(f, "search error: {e}"),
            Self::CanonFailed { detail } => write!(f, "canonical JSON error: {detail}"),
        }
    }
}

impl std::error::Error for RunError {}

impl From<SearchError> for RunError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::GraphSerialization { detail } => Self::CanonFailed { detail },
            other @ SearchError::InvalidPolicy { .. } => Self::Search(other),
        }
    }
}

/// What to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub algorithm: AlgorithmV1,
    pub policy: SearchPolicyV1,
}

impl RunConfig {
    /// `algorithm` under the default policy.
    #[must_use]
    pub fn new(algorithm: AlgorithmV1) -> Self {
        Self {
            algorithm,
            policy: SearchPolicyV1::default(),
        }
    }
}

/// One node on the reported solution path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathStepV1 {
    pub node_id: NodeId,
    pub path_cost: f64,
    /// World rendering of the state.
    pub state: serde_json::Value,
}

/// Outcome of one harness run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReportV1 {
    pub world_id: String,
    pub algorithm: AlgorithmV1,
    pub max_steps: u64,
    pub termination: TerminationReasonV1,
    /// Root-to-goal path, if a goal was reached.
    pub solution_path: Option<Vec<PathStepV1>>,
    pub steps_taken: u64,
    pub max_path_cost: f64,
    pub stats: SearchStatsV1,
    /// Canonical JSON of the model's [`SearchGraphV1`].
    pub graph_bytes: Vec<u8>,
    /// `canonical_hash(DOMAIN_SEARCH_GRAPH, graph_bytes)`.
    pub graph_digest: ContentHash,
}

impl RunReportV1 {
    /// Cost of the solution path, if any.
    #[must_use]
    pub fn solution_cost(&self) -> Option<f64> {
        self.solution_path
            .as_ref()
            .and_then(|p| p.last())
            .map(|s| s.path_cost)
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let solution_path = self.solution_path.as_ref().map(|path| {
            path.iter()
                .map(|s| {
                    serde_json::json!({
                        "node_id": s.node_id.as_u64(),
                        "path_cost": cost_bits_hex(s.path_cost),
                        "state": s.state,
                    })
                })
                .collect::<Vec<_>>()
        });
        serde_json::json!({
            "algorithm": self.algorithm.as_str(),
            "graph_digest": self.graph_digest.as_str(),
            "max_path_cost": cost_bits_hex(self.max_path_cost),
            "max_steps": self.max_steps,
            "schema_version": RUN_REPORT_SCHEMA,
            "solution_path": solution_path,
            "stats": {
                "empty_pops": self.stats.empty_pops,
                "frontier_high_water": self.stats.frontier_high_water,
                "total_children_generated": self.stats.total_children_generated,
                "total_duplicates_suppressed": self.stats.total_duplicates_suppressed,
                "total_expansions": self.stats.total_expansions,
            },
            "steps_taken": self.steps_taken,
            "termination": self.termination.to_json(),
            "world_id": self.world_id,
        })
    }

    /// Canonical `run_report.json` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::CanonFailed`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, RunError> {
        Ok(canonical_json_bytes(&self.to_json_value())?)
    }

    /// `canonical_hash(DOMAIN_RUN_REPORT, run_report.json bytes)`.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::CanonFailed`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, RunError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(DOMAIN_RUN_REPORT, &bytes))
    }
}

/// Run `world` under `config` until goal, exhaustion or budget.
///
/// # Errors
///
/// Returns [`RunError::Search`] if the policy is invalid (no step is taken)
/// and [`RunError::CanonFailed`] if the report cannot be serialized.
pub fn run<W: WorldHarnessV1>(world: W, config: &RunConfig) -> Result<RunReportV1, RunError> {
    let (report, _model) = run_model(world, config)?;
    Ok(report)
}

/// [`run`], also handing back the final model for inspection.
///
/// # Errors
///
/// Same as [`run`].
pub fn run_model<W: WorldHarnessV1>(
    world: W,
    config: &RunConfig,
) -> Result<(RunReportV1, SearchModelV1<W>), RunError> {
    config.policy.validate()?;
    let mut model = config.algorithm.build(world);
    let termination = model.run_with_policy(&config.policy)?;
    let report = build_report(&model, config, termination)?;
    Ok((report, model))
}

/// Package a model the caller stepped by hand.
///
/// # Errors
///
/// Returns [`RunError::CanonFailed`] if the graph cannot be serialized.
pub fn build_report<W: WorldHarnessV1>(
    model: &SearchModelV1<W>,
    config: &RunConfig,
    termination: TerminationReasonV1,
) -> Result<RunReportV1, RunError> {
    let world = model.problem();
    let solution_path = model.solution().node().map(|goal| {
        model
            .nodes()
            .reconstruct_path(goal)
            .into_iter()
            .map(|id| {
                let node = &model.nodes()[id];
                PathStepV1 {
                    node_id: id,
                    path_cost: node.path_cost,
                    state: world.render_state(&node.state),
                }
            })
            .collect()
    });

    let graph = SearchGraphV1::from_model(model);
    let graph_bytes = graph.to_canonical_json_bytes()?;
    let graph_digest = graph.digest()?;

    Ok(RunReportV1 {
        world_id: world.world_id().to_string(),
        algorithm: config.algorithm,
        max_steps: config.policy.max_steps,
        termination,
        solution_path,
        steps_taken: model.steps_taken(),
        max_path_cost: model.max_path_cost(),
        stats: model.stats().clone(),
        graph_bytes,
        graph_digest,
    })
}
