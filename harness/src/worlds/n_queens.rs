//! `NQueens`: place N non-attacking queens, one column at a time.
//!
//! A state lists the row of the queen in each filled column, left to right.
//! Successors place a queen in the next column on every row not attacked by
//! an earlier queen, in ascending row order. Each placement costs 1; the
//! heuristic is the number of queens still to place.

use wayfinder_search::contract::{SearchProblemV1, SuccessorV1};

use crate::contract::{WorldHarnessError, WorldHarnessV1};

const MAX_QUEENS: usize = 32;

pub struct NQueens {
    n: usize,
    world_id: String,
}

impl NQueens {
    /// # Errors
    ///
    /// Returns [`WorldHarnessError::InvalidWorld`] if `n` is 0 or larger
    /// than 32.
    pub fn new(n: usize) -> Result<Self, WorldHarnessError> {
        if n == 0 || n > MAX_QUEENS {
            return Err(WorldHarnessError::InvalidWorld {
                detail: format!("board size {n} outside 1..={MAX_QUEENS}"),
            });
        }
        Ok(Self {
            n,
            world_id: format!("n_queens_{n}"),
        })
    }

    fn attacked(placed: &[u8], row: usize) -> bool {
        let col = placed.len();
        placed.iter().enumerate().any(|(c, &r)| {
            let r = usize::from(r);
            r == row || col - c == r.abs_diff(row)
        })
    }
}

impl SearchProblemV1 for NQueens {
    type State = Vec<u8>;
    type Key = Vec<u8>;

    fn initial_state(&self) -> Vec<u8> {
        Vec::new()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn actions(&self, state: &Vec<u8>) -> Vec<SuccessorV1<Vec<u8>>> {
        if state.len() >= self.n {
            return Vec::new();
        }
        (0..self.n)
            .filter(|&row| !Self::attacked(state, row))
            .map(|row| {
                let mut next = state.clone();
                next.push(row as u8);
                SuccessorV1::new(1.0, next)
            })
            .collect()
    }

    fn goal_test(&self, state: &Vec<u8>) -> bool {
        state.len() == self.n
    }

    #[allow(clippy::cast_precision_loss)]
    fn heuristic(&self, state: &Vec<u8>) -> f64 {
        self.n.saturating_sub(state.len()) as f64
    }

    fn state_key(&self, state: &Vec<u8>) -> Vec<u8> {
        state.clone()
    }
}

impl WorldHarnessV1 for NQueens {
    fn world_id(&self) -> &str {
        &self.world_id
    }

    fn render_state(&self, state: &Vec<u8>) -> serde_json::Value {
        serde_json::json!(state)
    }
}
