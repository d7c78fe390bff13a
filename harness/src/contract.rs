//! World harness contract: what a world adds on top of a search problem.
//!
//! Worlds provide states, successors, goals and heuristics through
//! [`SearchProblemV1`]. They may NOT implement stepping, budgeting, hashing
//! or persistence; those are engine and runner concerns.

use wayfinder_search::contract::SearchProblemV1;

/// Typed failure for world construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldHarnessError {
    /// The world description is malformed (bad tiles, bad board size).
    InvalidWorld { detail: String },
    /// A route references a location that was never declared.
    UnknownLocation { name: String },
}

impl std::fmt::Display for WorldHarnessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidWorld { detail } => write!(f, "invalid world: {detail}"),
            Self::UnknownLocation { name } => write!(f, "unknown location: {name}"),
        }
    }
}

impl std::error::Error for WorldHarnessError {}

/// The contract a world must implement to be run by the harness runner.
pub trait WorldHarnessV1: SearchProblemV1 {
    /// Unique world identifier (e.g., `"sliding_puzzle_3x3"`).
    fn world_id(&self) -> &str;

    /// JSON rendering of a state for run reports.
    ///
    /// Must be deterministic and must not contain floats; the rendering is
    /// part of the report digest.
    fn render_state(&self, state: &Self::State) -> serde_json::Value;
}
