//! `SlidingPuzzle`: the N×N sliding tile puzzle.
//!
//! Tiles are stored row-major with `0` as the blank. A move slides the
//! blank up, down, left or right (in that order), swapping it with the
//! neighbouring tile. Every move costs 1. The goal is `[0, 1, …, N²-1]`.
//!
//! Heuristic: sum of Manhattan distances of the non-blank tiles to their
//! goal cells. Admissible, since each move shifts one tile by one cell.

use wayfinder_search::contract::{SearchProblemV1, SuccessorV1};

use crate::contract::{WorldHarnessError, WorldHarnessV1};

/// Smallest and largest supported board sides.
const MIN_SIDE: usize = 2;
const MAX_SIDE: usize = 15;

pub struct SlidingPuzzle {
    side: usize,
    start: Vec<u8>,
    world_id: String,
}

impl SlidingPuzzle {
    /// Build a puzzle with `side`×`side` cells starting from `tiles`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldHarnessError::InvalidWorld`] if `side` is out of range
    /// or `tiles` is not a permutation of `0..side²`.
    pub fn new(side: usize, tiles: Vec<u8>) -> Result<Self, WorldHarnessError> {
        if !(MIN_SIDE..=MAX_SIDE).contains(&side) {
            return Err(WorldHarnessError::InvalidWorld {
                detail: format!("side {side} outside {MIN_SIDE}..={MAX_SIDE}"),
            });
        }
        let cells = side * side;
        if tiles.len() != cells {
            return Err(WorldHarnessError::InvalidWorld {
                detail: format!("expected {cells} tiles, got {}", tiles.len()),
            });
        }
        let mut seen = vec![false; cells];
        for &t in &tiles {
            let t = usize::from(t);
            if t >= cells || seen[t] {
                return Err(WorldHarnessError::InvalidWorld {
                    detail: format!("tiles are not a permutation of 0..{cells}"),
                });
            }
            seen[t] = true;
        }
        Ok(Self {
            side,
            start: tiles,
            world_id: format!("sliding_puzzle_{side}x{side}"),
        })
    }

    /// The 3×3 puzzle.
    ///
    /// # Errors
    ///
    /// Same as [`SlidingPuzzle::new`].
    pub fn eight(tiles: [u8; 9]) -> Result<Self, WorldHarnessError> {
        Self::new(3, tiles.to_vec())
    }

    #[must_use]
    pub fn side(&self) -> usize {
        self.side
    }

    /// The solved board, `[0, 1, …, N²-1]`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn goal_tiles(&self) -> Vec<u8> {
        (0..self.side * self.side).map(|t| t as u8).collect()
    }

    fn blank(tiles: &[u8]) -> usize {
        tiles.iter().position(|&t| t == 0).unwrap_or(0)
    }

    fn slide(tiles: &[u8], from: usize, to: usize) -> Vec<u8> {
        let mut next = tiles.to_vec();
        next.swap(from, to);
        next
    }
}

impl SearchProblemV1 for SlidingPuzzle {
    type State = Vec<u8>;
    type Key = Vec<u8>;

    fn initial_state(&self) -> Vec<u8> {
        self.start.clone()
    }

    fn actions(&self, state: &Vec<u8>) -> Vec<SuccessorV1<Vec<u8>>> {
        let n = self.side;
        let blank = Self::blank(state);
        let (row, col) = (blank / n, blank % n);
        let mut out = Vec::with_capacity(4);
        if row > 0 {
            out.push(SuccessorV1::new(1.0, Self::slide(state, blank, blank - n)));
        }
        if row + 1 < n {
            out.push(SuccessorV1::new(1.0, Self::slide(state, blank, blank + n)));
        }
        if col > 0 {
            out.push(SuccessorV1::new(1.0, Self::slide(state, blank, blank - 1)));
        }
        if col + 1 < n {
            out.push(SuccessorV1::new(1.0, Self::slide(state, blank, blank + 1)));
        }
        out
    }

    fn goal_test(&self, state: &Vec<u8>) -> bool {
        state.iter().enumerate().all(|(i, &t)| usize::from(t) == i)
    }

    #[allow(clippy::cast_precision_loss)]
    fn heuristic(&self, state: &Vec<u8>) -> f64 {
        let n = self.side;
        let total: usize = state
            .iter()
            .enumerate()
            .filter(|&(_, &t)| t != 0)
            .map(|(i, &t)| {
                let t = usize::from(t);
                (i / n).abs_diff(t / n) + (i % n).abs_diff(t % n)
            })
            .sum();
        total as f64
    }

    fn state_key(&self, state: &Vec<u8>) -> Vec<u8> {
        state.clone()
    }
}

impl WorldHarnessV1 for SlidingPuzzle {
    fn world_id(&self) -> &str {
        &self.world_id
    }

    fn render_state(&self, state: &Vec<u8>) -> serde_json::Value {
        serde_json::json!(state)
    }
}
