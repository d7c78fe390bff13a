//! `RouteMap`: shortest route over a weighted undirected road map.
//!
//! Locations are named; states are location indices in declaration order.
//! A road `(a, b, d)` lets the traveller go from `a` to `b` and back at cost
//! `d`. Successors of a location follow road insertion order.
//!
//! An optional heuristic table gives a straight-line distance to the
//! destination per location; unlisted locations get 0.

use std::collections::BTreeMap;

use wayfinder_search::contract::{SearchProblemV1, SuccessorV1};

use crate::contract::{WorldHarnessError, WorldHarnessV1};

#[derive(Debug, Clone)]
pub struct RouteMap {
    names: Vec<String>,
    index: BTreeMap<String, usize>,
    roads: Vec<Vec<(usize, f64)>>,
    heuristic: Vec<f64>,
    origin: usize,
    destination: usize,
}

impl RouteMap {
    /// Build a map from `roads`, travelling from `origin` to `destination`.
    ///
    /// Locations are declared by first appearance in `roads`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldHarnessError::UnknownLocation`] if `origin` or
    /// `destination` is not on any road, and
    /// [`WorldHarnessError::InvalidWorld`] for a negative or non-finite
    /// road length.
    pub fn new(
        roads: &[(&str, &str, f64)],
        origin: &str,
        destination: &str,
    ) -> Result<Self, WorldHarnessError> {
        let mut map = Self::empty();
        for &(a, b, d) in roads {
            if !d.is_finite() || d < 0.0 {
                return Err(WorldHarnessError::InvalidWorld {
                    detail: format!("road {a}-{b} has length {d}"),
                });
            }
            let ia = map.declare(a);
            let ib = map.declare(b);
            map.roads[ia].push((ib, d));
            map.roads[ib].push((ia, d));
        }
        map.origin = map.lookup(origin)?;
        map.destination = map.lookup(destination)?;
        Ok(map)
    }

    /// Attach a straight-line distance table.
    ///
    /// # Errors
    ///
    /// Returns [`WorldHarnessError::UnknownLocation`] for a name not on the map.
    pub fn with_heuristic(mut self, table: &[(&str, f64)]) -> Result<Self, WorldHarnessError> {
        for &(name, h) in table {
            let i = self.lookup(name)?;
            self.heuristic[i] = h;
        }
        Ok(self)
    }

    /// Same roads, different trip.
    ///
    /// # Errors
    ///
    /// Returns [`WorldHarnessError::UnknownLocation`] for a name not on the map.
    pub fn with_trip(mut self, origin: &str, destination: &str) -> Result<Self, WorldHarnessError> {
        self.origin = self.lookup(origin)?;
        self.destination = self.lookup(destination)?;
        Ok(self)
    }

    /// The Romania road map, from Arad to Bucharest, with straight-line
    /// distances to Bucharest. The shortest route is 418.
    #[must_use]
    pub fn romania() -> Self {
        let mut map = Self::empty();
        for &(a, b, d) in ROMANIA_ROADS {
            let ia = map.declare(a);
            let ib = map.declare(b);
            map.roads[ia].push((ib, d));
            map.roads[ib].push((ia, d));
        }
        for &(name, h) in ROMANIA_STRAIGHT_LINE {
            let i = map.declare(name);
            map.heuristic[i] = h;
        }
        map.origin = map.declare("Arad");
        map.destination = map.declare("Bucharest");
        map
    }

    /// Location name for a state.
    #[must_use]
    pub fn name(&self, location: usize) -> Option<&str> {
        self.names.get(location).map(String::as_str)
    }

    /// State for a location name.
    #[must_use]
    pub fn location(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    #[must_use]
    pub fn location_count(&self) -> usize {
        self.names.len()
    }

    fn empty() -> Self {
        Self {
            names: Vec::new(),
            index: BTreeMap::new(),
            roads: Vec::new(),
            heuristic: Vec::new(),
            origin: 0,
            destination: 0,
        }
    }

    fn declare(&mut self, name: &str) -> usize {
        if let Some(&i) = self.index.get(name) {
            return i;
        }
        let i = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), i);
        self.roads.push(Vec::new());
        self.heuristic.push(0.0);
        i
    }

    fn lookup(&self, name: &str) -> Result<usize, WorldHarnessError> {
        self.location(name)
            .ok_or_else(|| WorldHarnessError::UnknownLocation { name: name.into() })
    }
}

impl SearchProblemV1 for RouteMap {
    type State = usize;
    type Key = usize;

    fn initial_state(&self) -> usize {
        self.origin
    }

    fn actions(&self, state: &usize) -> Vec<SuccessorV1<usize>> {
        self.roads
            .get(*state)
            .map(|out| out.iter().map(|&(to, d)| SuccessorV1::new(d, to)).collect())
            .unwrap_or_default()
    }

    fn goal_test(&self, state: &usize) -> bool {
        *state == self.destination
    }

    fn heuristic(&self, state: &usize) -> f64 {
        self.heuristic.get(*state).copied().unwrap_or(0.0)
    }

    fn state_key(&self, state: &usize) -> usize {
        *state
    }
}

impl WorldHarnessV1 for RouteMap {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "route_map"
    }

    fn render_state(&self, state: &usize) -> serde_json::Value {
        serde_json::json!(self.name(*state))
    }
}

const ROMANIA_ROADS: &[(&str, &str, f64)] = &[
    ("Arad", "Zerind", 75.0),
    ("Arad", "Sibiu", 140.0),
    ("Arad", "Timisoara", 118.0),
    ("Zerind", "Oradea", 71.0),
    ("Oradea", "Sibiu", 151.0),
    ("Timisoara", "Lugoj", 111.0),
    ("Lugoj", "Mehadia", 70.0),
    ("Mehadia", "Drobeta", 75.0),
    ("Drobeta", "Craiova", 120.0),
    ("Craiova", "Rimnicu Vilcea", 146.0),
    ("Craiova", "Pitesti", 138.0),
    ("Sibiu", "Fagaras", 99.0),
    ("Sibiu", "Rimnicu Vilcea", 80.0),
    ("Rimnicu Vilcea", "Pitesti", 97.0),
    ("Fagaras", "Bucharest", 211.0),
    ("Pitesti", "Bucharest", 101.0),
    ("Bucharest", "Giurgiu", 90.0),
    ("Bucharest", "Urziceni", 85.0),
    ("Urziceni", "Hirsova", 98.0),
    ("Hirsova", "Eforie", 86.0),
    ("Urziceni", "Vaslui", 142.0),
    ("Vaslui", "Iasi", 92.0),
    ("Iasi", "Neamt", 87.0),
];

const ROMANIA_STRAIGHT_LINE: &[(&str, f64)] = &[
    ("Arad", 366.0),
    ("Bucharest", 0.0),
    ("Craiova", 160.0),
    ("Drobeta", 242.0),
    ("Eforie", 161.0),
    ("Fagaras", 176.0),
    ("Giurgiu", 77.0),
    ("Hirsova", 151.0),
    ("Iasi", 226.0),
    ("Lugoj", 244.0),
    ("Mehadia", 241.0),
    ("Neamt", 234.0),
    ("Oradea", 380.0),
    ("Pitesti", 100.0),
    ("Rimnicu Vilcea", 193.0),
    ("Sibiu", 253.0),
    ("Timisoara", 329.0),
    ("Urziceni", 80.0),
    ("Vaslui", 199.0),
    ("Zerind", 374.0),
];
