//! Typed search errors.
//!
//! `SearchError` represents pre-flight and export failures only. Search
//! outcomes (goal reached, frontier exhausted, step budget spent) are values:
//! see [`crate::search::SolutionV1`] and [`crate::graph::TerminationReasonV1`].

/// Typed failure for policy validation and graph export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A policy that cannot drive a run.
    InvalidPolicy { detail: String },
    /// The search graph could not be serialized.
    GraphSerialization { detail: String },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
            Self::GraphSerialization { detail } => {
                write!(f, "search graph serialization failed: {detail}")
            }
        }
    }
}

impl std::error::Error for SearchError {}
