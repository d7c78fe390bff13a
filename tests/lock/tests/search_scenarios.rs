//! Scenario lock tests: fixed worlds with known answers, plus stepping
//! semantics (goal-test timing, post-solution stepping, failure persistence,
//! tree-search duplicates, step budgets).

use wayfinder_harness::runner::{run, RunConfig};
use wayfinder_harness::worlds::dead_end::DeadEnd;
use wayfinder_harness::worlds::n_queens::NQueens;
use wayfinder_harness::worlds::route_map::RouteMap;
use wayfinder_harness::worlds::sliding_puzzle::SlidingPuzzle;
use wayfinder_search::algorithms::{
    best_first, breadth_first, depth_first, greedy, init, uniform_cost, AlgorithmV1,
};
use wayfinder_search::contract::{SearchProblemV1, SuccessorV1};
use wayfinder_search::frontier::{PriorityKeyV1, QueueV1};
use wayfinder_search::graph::TerminationReasonV1;
use wayfinder_search::node::NodeId;
use wayfinder_search::policy::SearchPolicyV1;
use wayfinder_search::search::{
    next_n, next_until_goal, step, GoalTestV1, SolutionV1, StepOutcomeV1,
};
use wayfinder_search::strategy::{ChildOutcomeV1, StrategyV1};

// ---------------------------------------------------------------------------
// 8-puzzle under breadth-first search
// ---------------------------------------------------------------------------

#[test]
fn eight_puzzle_breadth_first_two_move_path() {
    let puzzle = SlidingPuzzle::eight([1, 4, 2, 3, 0, 5, 6, 7, 8]).unwrap();
    let mut model = breadth_first(puzzle);
    let goal = model.next_until_goal().expect("two moves from solved");

    let path: Vec<(f64, Vec<u8>)> = model
        .path(goal)
        .into_iter()
        .map(|(c, s)| (c, s.clone()))
        .collect();
    assert_eq!(
        path,
        vec![
            (0.0, vec![1, 4, 2, 3, 0, 5, 6, 7, 8]),
            (1.0, vec![1, 0, 2, 3, 4, 5, 6, 7, 8]),
            (2.0, vec![0, 1, 2, 3, 4, 5, 6, 7, 8]),
        ]
    );
    assert_eq!(model.solution_path().map(|p| p.len()), Some(3));
}

#[test]
fn eight_puzzle_all_algorithms_reach_the_goal() {
    for algorithm in AlgorithmV1::ALL {
        let puzzle = SlidingPuzzle::eight([1, 4, 2, 3, 0, 5, 6, 7, 8]).unwrap();
        let mut model = algorithm.build(puzzle);
        let policy = SearchPolicyV1 {
            max_steps: 5_000,
            record_events: false,
        };
        let reason = model.run_with_policy(&policy).unwrap();
        assert!(
            matches!(reason, TerminationReasonV1::GoalReached { .. }),
            "{}: {reason:?}",
            algorithm.as_str()
        );
    }
}

// ---------------------------------------------------------------------------
// Empty problem
// ---------------------------------------------------------------------------

#[test]
fn empty_problem_fails_after_exactly_one_step() {
    for algorithm in AlgorithmV1::ALL {
        let model = algorithm.build(DeadEnd);
        let after_one = step(model);
        assert_eq!(
            after_one.solution(),
            SolutionV1::Failure,
            "{}",
            algorithm.as_str()
        );
        assert!(after_one.frontier().is_empty());
        assert_eq!(after_one.steps_taken(), 1);

        let mut model = algorithm.build(DeadEnd);
        assert_eq!(model.next_until_goal(), None);
        assert_eq!(model.steps_taken(), 1);
    }
}

#[test]
fn empty_problem_step_outcomes() {
    let mut model = depth_first(DeadEnd);
    assert!(matches!(
        model.step(),
        StepOutcomeV1::Expanded {
            children: 0,
            kept: 0,
            goal: None,
            ..
        }
    ));
    assert_eq!(model.solution(), SolutionV1::Failure);

    assert_eq!(model.step(), StepOutcomeV1::FrontierEmpty);
    assert_eq!(model.solution(), SolutionV1::Failure);
    assert_eq!(model.stats().empty_pops, 1);
}

// ---------------------------------------------------------------------------
// Goal-test timing of the named constructors
// ---------------------------------------------------------------------------

/// Directed weighted graph over `u8` vertices with one goal vertex.
struct Arcs {
    start: u8,
    goal: u8,
    arcs: &'static [(u8, u8, f64)],
}

impl SearchProblemV1 for Arcs {
    type State = u8;
    type Key = u8;

    fn initial_state(&self) -> u8 {
        self.start
    }

    fn actions(&self, state: &u8) -> Vec<SuccessorV1<u8>> {
        self.arcs
            .iter()
            .filter(|(from, _, _)| from == state)
            .map(|&(_, to, cost)| SuccessorV1::new(cost, to))
            .collect()
    }

    fn goal_test(&self, state: &u8) -> bool {
        *state == self.goal
    }

    fn state_key(&self, state: &u8) -> u8 {
        *state
    }
}

const DIAMOND: &[(u8, u8, f64)] = &[(0, 1, 1.0), (0, 2, 4.0), (1, 3, 5.0), (2, 3, 1.0)];

#[test]
fn root_goal_is_found_only_by_expansion_time_testing() {
    let root_goal = || Arcs {
        start: 3,
        goal: 3,
        arcs: &[],
    };

    let mut ucs = uniform_cost(root_goal());
    assert_eq!(ucs.goal_test(), GoalTestV1::OnExpansion);
    ucs.step();
    assert_eq!(ucs.solution(), SolutionV1::Solution(NodeId::new(0)));

    let astar = step(best_first(root_goal()));
    assert_eq!(astar.solution(), SolutionV1::Solution(NodeId::new(0)));
    assert_eq!(astar.path(NodeId::new(0)), vec![(0.0, &3)]);

    for algorithm in [
        AlgorithmV1::BreadthFirst,
        AlgorithmV1::DepthFirst,
        AlgorithmV1::Greedy,
    ] {
        let model = step(algorithm.build(root_goal()));
        assert_eq!(model.goal_test(), GoalTestV1::OnGeneration);
        assert_eq!(
            model.solution(),
            SolutionV1::Failure,
            "{} never tests the root",
            algorithm.as_str()
        );
    }
}

#[test]
fn uniform_cost_reports_a_generated_goal_only_when_popped() {
    let diamond = || Arcs {
        start: 0,
        goal: 3,
        arcs: DIAMOND,
    };

    // Step 2 expands 1 and generates 3 at cost 6; it stays pending.
    let model = next_n(2, uniform_cost(diamond()));
    assert_eq!(model.solution(), SolutionV1::Pending);
    assert!(model.frontier_states().any(|&s| s == 3));

    // 2 is expanded next and supersedes 3 at cost 5, which is then popped.
    let (goal, model) = next_until_goal(uniform_cost(diamond()));
    let goal = goal.expect("diamond is solvable");
    assert_eq!(model.node(goal).map(|n| n.path_cost), Some(5.0));
    assert_eq!(model.steps_taken(), 4);

    // The same graph under generation-time testing stops at the first 3 seen.
    let (goal, model) = next_until_goal(init(
        StrategyV1::GraphSearch,
        QueueV1::Priority(PriorityKeyV1::PathCost),
        diamond(),
    ));
    let goal = goal.expect("diamond is solvable");
    assert_eq!(model.node(goal).map(|n| n.path_cost), Some(6.0));
    assert_eq!(model.steps_taken(), 2);
}

// ---------------------------------------------------------------------------
// Weighted routes under uniform-cost search
// ---------------------------------------------------------------------------

#[test]
fn small_route_graph_uniform_cost_finds_shortest_sum() {
    // Direct road is longer than the detour through b and c.
    let map = RouteMap::new(
        &[
            ("a", "d", 10.0),
            ("a", "b", 2.0),
            ("b", "c", 3.0),
            ("c", "d", 1.0),
            ("b", "d", 7.0),
        ],
        "a",
        "d",
    )
    .unwrap();
    let mut model = uniform_cost(map.clone());
    let goal = model.next_until_goal().expect("d is reachable");
    assert_eq!(model.nodes()[goal].path_cost, 6.0);

    let names: Vec<&str> = model
        .path(goal)
        .into_iter()
        .filter_map(|(_, &s)| map.name(s))
        .collect();
    assert_eq!(names, vec!["a", "b", "c", "d"]);
}

#[test]
fn romania_optimal_algorithms_agree_on_418() {
    for model in [uniform_cost(RouteMap::romania()), best_first(RouteMap::romania())] {
        let (goal, model) = next_until_goal(model);
        let goal = goal.expect("Bucharest is reachable");
        assert_eq!(model.nodes()[goal].path_cost, 418.0);
    }
}

#[test]
fn romania_a_star_expands_fewer_nodes_than_uniform_cost() {
    let (_, ucs) = next_until_goal(uniform_cost(RouteMap::romania()));
    let (_, astar) = next_until_goal(best_first(RouteMap::romania()));
    assert!(astar.stats().total_expansions < ucs.stats().total_expansions);
}

#[test]
fn romania_greedy_is_fast_but_not_optimal() {
    let (goal, model) = next_until_goal(greedy(RouteMap::romania()));
    let goal = goal.expect("Bucharest is reachable");
    assert_eq!(model.nodes()[goal].path_cost, 450.0);
    assert_eq!(model.steps_taken(), 3);
}

#[test]
fn harness_run_reports_route_cost() {
    let map = RouteMap::romania().with_trip("Timisoara", "Pitesti").unwrap();
    let report = run(map, &RunConfig::new(AlgorithmV1::UniformCost)).unwrap();
    // Timisoara-Arad-Sibiu-Rimnicu Vilcea-Pitesti.
    assert_eq!(report.solution_cost(), Some(118.0 + 140.0 + 80.0 + 97.0));
}

// ---------------------------------------------------------------------------
// N-queens under depth-first search
// ---------------------------------------------------------------------------

#[test]
fn depth_first_places_eight_queens() {
    let mut model = depth_first(NQueens::new(8).unwrap());
    let goal = model.next_until_goal().expect("8 queens has solutions");
    let board = &model.nodes()[goal].state;
    assert_eq!(board.len(), 8);
    for (c1, &r1) in board.iter().enumerate() {
        for (c2, &r2) in board.iter().enumerate().skip(c1 + 1) {
            assert_ne!(r1, r2);
            assert_ne!(c2 - c1, usize::from(r1.abs_diff(r2)));
        }
    }
}

#[test]
fn three_queens_has_no_solution() {
    let mut model = breadth_first(NQueens::new(3).unwrap());
    assert_eq!(model.next_until_goal(), None);
    assert_eq!(model.solution(), SolutionV1::Failure);
}

// ---------------------------------------------------------------------------
// Post-solution stepping
// ---------------------------------------------------------------------------

#[test]
fn stepping_after_a_solution_keeps_the_first_solution() {
    let mut model = breadth_first(RouteMap::romania());
    let first = model.next_until_goal().expect("reachable");
    let steps = model.steps_taken();

    model.next_n(50);
    assert_eq!(model.solution(), SolutionV1::Solution(first));
    assert_eq!(model.steps_taken(), steps + 50);
    assert!(
        model.stats().total_expansions > steps,
        "the engine keeps expanding after a solution"
    );
}

// ---------------------------------------------------------------------------
// Failure persistence
// ---------------------------------------------------------------------------

#[test]
fn failure_persists_under_further_steps() {
    let model = next_n(10, breadth_first(NQueens::new(2).unwrap()));
    assert_eq!(model.solution(), SolutionV1::Failure);
    let model = next_n(10, model);
    assert_eq!(model.solution(), SolutionV1::Failure);
    assert!(model.frontier().is_empty());
    assert!(!model.explored().is_empty());
}

// ---------------------------------------------------------------------------
// Tree search tolerates duplicates
// ---------------------------------------------------------------------------

/// Two parallel edges from 0 to 1 and a back edge from 1 to 0.
struct Parallel;

impl SearchProblemV1 for Parallel {
    type State = u8;
    type Key = u8;

    fn initial_state(&self) -> u8 {
        0
    }

    fn actions(&self, state: &u8) -> Vec<SuccessorV1<u8>> {
        match state {
            0 => vec![SuccessorV1::new(1.0, 1), SuccessorV1::new(2.0, 1)],
            _ => vec![SuccessorV1::new(1.0, 0)],
        }
    }

    fn goal_test(&self, _state: &u8) -> bool {
        false
    }

    fn state_key(&self, state: &u8) -> u8 {
        *state
    }
}

#[test]
fn tree_search_keeps_duplicate_keys() {
    let mut model = init(StrategyV1::TreeSearch, QueueV1::Fifo, Parallel);
    model.step();
    let keys: Vec<u8> = model.frontier_states().copied().collect();
    assert_eq!(keys, vec![1, 1]);
    assert!(model.events()[0]
        .children
        .iter()
        .all(|c| c.outcome == ChildOutcomeV1::Unfiltered));

    // The back edge re-enters the root state.
    model.step();
    assert!(model.frontier_states().any(|&s| s == 0));
}

#[test]
fn graph_search_collapses_the_same_duplicates() {
    let mut model = init(StrategyV1::GraphSearch, QueueV1::Fifo, Parallel);
    model.step();
    let keys: Vec<u8> = model.frontier_states().copied().collect();
    assert_eq!(keys, vec![1]);
    let outcomes: Vec<ChildOutcomeV1> = model.events()[0].children.iter().map(|c| c.outcome).collect();
    assert_eq!(
        outcomes,
        vec![ChildOutcomeV1::Kept, ChildOutcomeV1::SiblingDominated]
    );

    model.step();
    assert_eq!(
        model.events()[1].children[0].outcome,
        ChildOutcomeV1::AlreadyExplored
    );
    assert!(model.frontier().is_empty());
}

// ---------------------------------------------------------------------------
// Step budget
// ---------------------------------------------------------------------------

#[test]
fn step_budget_stops_a_pending_search() {
    let mut model = init(StrategyV1::TreeSearch, QueueV1::Fifo, Parallel);
    let policy = SearchPolicyV1 {
        max_steps: 25,
        record_events: true,
    };
    let reason = model.run_with_policy(&policy).unwrap();
    assert_eq!(reason, TerminationReasonV1::StepBudgetExceeded { steps: 25 });
    assert_eq!(model.events().len(), 25);
    assert_eq!(model.solution(), SolutionV1::Pending);

    // A second bounded run continues from where the first stopped.
    let reason = model.run_with_policy(&policy).unwrap();
    assert_eq!(reason, TerminationReasonV1::StepBudgetExceeded { steps: 25 });
    assert_eq!(model.steps_taken(), 50);
}

#[test]
fn harness_reports_budget_exhaustion() {
    let config = RunConfig {
        algorithm: AlgorithmV1::BreadthFirst,
        policy: SearchPolicyV1 {
            max_steps: 3,
            record_events: true,
        },
    };
    let report = run(SlidingPuzzle::eight([3, 0, 1, 6, 5, 2, 7, 4, 8]).unwrap(), &config).unwrap();
    assert_eq!(
        report.termination,
        TerminationReasonV1::StepBudgetExceeded { steps: 3 }
    );
    assert!(report.solution_path.is_none());
}
