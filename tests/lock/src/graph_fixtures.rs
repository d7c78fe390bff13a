//! Seeded random weighted digraphs and a reference shortest-path oracle.
//!
//! Weights are small integers stored as `f64`, so every path cost is exact
//! and costs can be compared with `==`. The heuristic is half the true
//! distance to the goal (rounded down), which is admissible and consistent.

use std::collections::BTreeSet;

use wayfinder_search::contract::{SearchProblemV1, SuccessorV1};

/// 64-bit linear congruential generator (Knuth's MMIX constants).
#[derive(Debug, Clone)]
pub struct Lcg(u64);

impl Lcg {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self(seed ^ 0x9E37_79B9_7F4A_7C15)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }

    /// Uniform-ish value in `0..bound`. `bound` must be non-zero.
    pub fn below(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound
    }
}

/// Directed graph over `0..vertices`, searched from 0.
#[derive(Debug, Clone)]
pub struct RandomGraph {
    edges: Vec<Vec<(u32, f64)>>,
    goal: Option<u32>,
    heuristic: Vec<f64>,
}

impl RandomGraph {
    /// `vertices` vertices, each with `out_degree` random out-edges of
    /// weight 1..=9. The goal is the last vertex. Self-loops and parallel
    /// edges are allowed.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn generate(seed: u64, vertices: u32, out_degree: u32) -> Self {
        let mut rng = Lcg::new(seed);
        let edges: Vec<Vec<(u32, f64)>> = (0..vertices)
            .map(|_| {
                (0..out_degree)
                    .map(|_| {
                        let to = rng.below(u64::from(vertices)) as u32;
                        let weight = (rng.below(9) + 1) as f64;
                        (to, weight)
                    })
                    .collect()
            })
            .collect();
        let goal = vertices.checked_sub(1);
        let mut graph = Self {
            edges,
            goal,
            heuristic: vec![0.0; vertices as usize],
        };
        if let Some(g) = goal {
            let to_goal = graph.reversed().distances_from(g);
            graph.heuristic = to_goal
                .into_iter()
                .map(|d| d.map_or(0.0, |d| (d / 2.0).floor()))
                .collect();
        }
        graph
    }

    /// Same graph, but no vertex is a goal.
    #[must_use]
    pub fn without_goal(mut self) -> Self {
        self.goal = None;
        self.heuristic.iter_mut().for_each(|h| *h = 0.0);
        self
    }

    #[must_use]
    pub fn goal(&self) -> Option<u32> {
        self.goal
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.edges.len()
    }

    /// Shortest distance from 0 to the goal, if reachable.
    #[must_use]
    pub fn reference_cost(&self) -> Option<f64> {
        let goal = self.goal?;
        self.distances_from(0)[goal as usize]
    }

    /// Dijkstra over the edge lists.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn distances_from(&self, source: u32) -> Vec<Option<f64>> {
        let mut dist: Vec<Option<f64>> = vec![None; self.edges.len()];
        let mut done = vec![false; self.edges.len()];
        if (source as usize) >= self.edges.len() {
            return dist;
        }
        dist[source as usize] = Some(0.0);
        loop {
            let next = (0..self.edges.len())
                .filter(|&v| !done[v])
                .filter_map(|v| dist[v].map(|d| (d, v)))
                .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
            let Some((d, v)) = next else {
                return dist;
            };
            done[v] = true;
            for &(to, w) in &self.edges[v] {
                let candidate = d + w;
                let slot = &mut dist[to as usize];
                match *slot {
                    Some(old) if old <= candidate => {}
                    _ => *slot = Some(candidate),
                }
            }
        }
    }

    /// States reachable from 0.
    #[must_use]
    pub fn reachable(&self) -> BTreeSet<u32> {
        self.distances_from(0)
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_some())
            .map(|(v, _)| u32::try_from(v).unwrap_or(u32::MAX))
            .collect()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn reversed(&self) -> Self {
        let mut edges = vec![Vec::new(); self.edges.len()];
        for (from, out) in self.edges.iter().enumerate() {
            for &(to, w) in out {
                edges[to as usize].push((from as u32, w));
            }
        }
        Self {
            edges,
            goal: None,
            heuristic: vec![0.0; self.edges.len()],
        }
    }
}

impl SearchProblemV1 for RandomGraph {
    type State = u32;
    type Key = u32;

    fn initial_state(&self) -> u32 {
        0
    }

    fn actions(&self, state: &u32) -> Vec<SuccessorV1<u32>> {
        self.edges
            .get(*state as usize)
            .map(|out| out.iter().map(|&(to, w)| SuccessorV1::new(w, to)).collect())
            .unwrap_or_default()
    }

    fn goal_test(&self, state: &u32) -> bool {
        self.goal == Some(*state)
    }

    fn heuristic(&self, state: &u32) -> f64 {
        self.heuristic.get(*state as usize).copied().unwrap_or(0.0)
    }

    fn state_key(&self, state: &u32) -> u32 {
        *state
    }
}
