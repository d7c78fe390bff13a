//! Wayfinder Search: incremental, introspectable state-space search.
//!
//! One stepping engine drives breadth-first, depth-first, uniform-cost,
//! greedy and A* search. Each `step` expands a single frontier node, so a
//! caller can animate, budget, pause or abandon a search at any point and
//! read the frontier, explored set and solution in between.
//!
//! # Crate dependency graph
//!
//! ```text
//! wayfinder_search  ←  wayfinder_harness
//! (engine, graph)      (worlds, runner, report dirs)
//! ```
//!
//! # Key types
//!
//! - [`SearchProblemV1`]: the problem contract (initial state, actions,
//!   goal test, heuristic, state key)
//! - [`SearchModelV1`]: a search in progress and the stepping API
//! - [`QueueV1`]: FIFO, LIFO or priority frontier discipline
//! - [`StrategyV1`]: tree search or graph search frontier update
//! - [`SearchGraphV1`]: serializable snapshot with expansion audit log
//! - [`AlgorithmV1`]: the named strategy/queue combinations
//!
//! [`SearchProblemV1`]: contract::SearchProblemV1
//! [`SearchModelV1`]: search::SearchModelV1
//! [`QueueV1`]: frontier::QueueV1
//! [`StrategyV1`]: strategy::StrategyV1
//! [`SearchGraphV1`]: graph::SearchGraphV1
//! [`AlgorithmV1`]: algorithms::AlgorithmV1

#![forbid(unsafe_code)]

pub mod algorithms;
pub mod contract;
pub mod digest;
pub mod error;
pub mod explored;
pub mod frontier;
pub mod graph;
pub mod node;
pub mod policy;
pub mod search;
pub mod strategy;
