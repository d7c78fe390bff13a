//! Shared helpers for wayfinder benchmark suites.

use wayfinder_harness::worlds::sliding_puzzle::SlidingPuzzle;
use wayfinder_search::algorithms::init;
use wayfinder_search::contract::{SearchProblemV1, SuccessorV1};
use wayfinder_search::frontier::QueueV1;
use wayfinder_search::search::SearchModelV1;
use wayfinder_search::strategy::StrategyV1;

/// 8-puzzle starts with their optimal solution length.
pub const EIGHT_PUZZLE_INSTANCES: &[(&str, [u8; 9], u32)] = &[
    ("depth_2", [1, 4, 2, 3, 0, 5, 6, 7, 8], 2),
    ("depth_7", [3, 0, 1, 6, 5, 2, 7, 4, 8], 7),
    ("depth_12", [7, 3, 2, 1, 6, 5, 0, 4, 8], 12),
    ("depth_16", [6, 1, 5, 2, 8, 3, 0, 7, 4], 16),
];

/// Root with `width` leaf children. Child `i` costs `i + 1` and has
/// heuristic `width - i`, so the priority disciplines scan the whole
/// frontier and pick opposite ends.
pub struct Fan {
    pub width: u32,
}

impl SearchProblemV1 for Fan {
    type State = u32;
    type Key = u32;

    fn initial_state(&self) -> u32 {
        0
    }

    fn actions(&self, state: &u32) -> Vec<SuccessorV1<u32>> {
        if *state != 0 {
            return Vec::new();
        }
        (1..=self.width)
            .map(|i| SuccessorV1::new(f64::from(i), i))
            .collect()
    }

    fn goal_test(&self, _state: &u32) -> bool {
        false
    }

    fn heuristic(&self, state: &u32) -> f64 {
        f64::from(self.width.saturating_sub(*state))
    }

    fn state_key(&self, state: &u32) -> u32 {
        *state
    }
}

/// A model whose frontier holds exactly `width` nodes.
#[must_use]
pub fn fan_model(width: u32, queue: QueueV1) -> SearchModelV1<Fan> {
    let mut model = init(StrategyV1::GraphSearch, queue, Fan { width });
    model.step();
    model
}

/// Build a benchmark puzzle.
///
/// # Panics
///
/// Panics if `tiles` is not a permutation of `0..9`. Benchmark setup
/// failures are fatal.
#[must_use]
pub fn eight_puzzle(tiles: [u8; 9]) -> SlidingPuzzle {
    SlidingPuzzle::eight(tiles).expect("valid 8-puzzle")
}
