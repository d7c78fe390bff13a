//! Wayfinder Harness: worlds and run orchestration for the search engine.
//!
//! The harness drives a world through a named algorithm under a step budget
//! and packages the outcome as a self-describing run report, optionally
//! persisted as a report directory.
//!
//! The harness does NOT implement search logic; it delegates to
//! `wayfinder_search`. Worlds provide problem data only; the harness owns
//! orchestration and persistence.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod report_dir;
pub mod runner;
pub mod worlds;
