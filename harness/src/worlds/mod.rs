//! World implementations for the harness runner.

pub mod dead_end;
pub mod n_queens;
pub mod route_map;
pub mod sliding_puzzle;
