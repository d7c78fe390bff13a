//! `DeadEnd`: a single state with no moves and no goal.
//!
//! Every search over it fails after exactly one step.

use wayfinder_search::contract::{SearchProblemV1, SuccessorV1};

use crate::contract::WorldHarnessV1;

pub struct DeadEnd;

impl SearchProblemV1 for DeadEnd {
    type State = ();
    type Key = ();

    fn initial_state(&self) {}

    fn actions(&self, _state: &()) -> Vec<SuccessorV1<()>> {
        Vec::new()
    }

    fn goal_test(&self, _state: &()) -> bool {
        false
    }

    fn state_key(&self, _state: &()) {}
}

impl WorldHarnessV1 for DeadEnd {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "dead_end"
    }

    fn render_state(&self, _state: &()) -> serde_json::Value {
        serde_json::Value::Null
    }
}
