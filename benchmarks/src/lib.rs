//! Shared regimes for the A* benchmark suites.

use astar_search::policy::{DedupPolicyV1, SearchPolicyV1};
use astar_search::search::{search, SearchResult};
use astar_worlds::grid_walk::{GridState, GridWalk, Step};
use astar_worlds::route_graph::{MoveTo, RouteGraph, RouteState};

/// A route graph workload: graph, start node, and policy.
pub struct RouteRegime {
    pub name: &'static str,
    pub graph: RouteGraph,
    pub start: RouteState,
    pub policy: SearchPolicyV1,
}

impl RouteRegime {
    /// Run the regime once.
    ///
    /// # Panics
    ///
    /// Panics if the policy is rejected before search; the regimes are built
    /// so that never happens.
    #[must_use]
    pub fn run(&self) -> SearchResult<MoveTo> {
        search(&self.graph, &self.start, &self.policy).expect("regime policy is valid")
    }
}

/// Layered graph: `start` → `width` nodes per layer × `depth` layers → `goal`.
///
/// Every node links to every node of the next layer with cost
/// `1 + (i + j) % 3`. The heuristic counts the remaining edges, which is
/// admissible because every edge costs at least 1.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn lattice_graph(width: usize, depth: usize) -> RouteGraph {
    let name = |layer: usize, i: usize| format!("L{layer}_{i}");
    let mut graph = RouteGraph::new("lattice", "goal").with_node("start", (depth + 1) as f64);
    for i in 0..width {
        graph = graph.with_edge("start", &name(0, i), 1.0);
    }
    for layer in 0..depth {
        for i in 0..width {
            graph = graph.with_node(&name(layer, i), (depth - layer) as f64);
            if layer + 1 == depth {
                graph = graph.with_edge(&name(layer, i), "goal", 1.0);
                continue;
            }
            for j in 0..width {
                let cost = 1.0 + ((i + j) % 3) as f64;
                graph = graph.with_edge(&name(layer, i), &name(layer + 1, j), cost);
            }
        }
    }
    graph
}

fn dedup_policy() -> SearchPolicyV1 {
    SearchPolicyV1 {
        dedup: DedupPolicyV1::BestKnownCost,
        ..SearchPolicyV1::default()
    }
}

/// Route graph regimes, from trivial to fringe-heavy.
#[must_use]
pub fn route_regimes() -> Vec<RouteRegime> {
    vec![
        RouteRegime {
            name: "demo",
            graph: RouteGraph::demo(),
            start: RouteState::at("S"),
            policy: SearchPolicyV1::default(),
        },
        RouteRegime {
            name: "demo_dedup",
            graph: RouteGraph::demo(),
            start: RouteState::at("S"),
            policy: dedup_policy(),
        },
        RouteRegime {
            name: "lattice_6x5",
            graph: lattice_graph(6, 5),
            start: RouteState::at("start"),
            policy: SearchPolicyV1::default(),
        },
        RouteRegime {
            name: "lattice_12x10_dedup",
            graph: lattice_graph(12, 10),
            start: RouteState::at("start"),
            policy: dedup_policy(),
        },
        RouteRegime {
            name: "lattice_budget_limited",
            graph: lattice_graph(12, 10),
            start: RouteState::at("start"),
            policy: SearchPolicyV1::with_max_expansions(50),
        },
    ]
}

/// A grid walk workload.
pub struct GridRegime {
    pub name: &'static str,
    pub world: GridWalk,
    pub start: GridState,
    pub policy: SearchPolicyV1,
}

impl GridRegime {
    /// Run the regime once.
    ///
    /// # Panics
    ///
    /// Panics if the policy is rejected before search.
    #[must_use]
    pub fn run(&self) -> SearchResult<Step> {
        search(&self.world, &self.start, &self.policy).expect("regime policy is valid")
    }
}

/// Grid walk regimes at increasing distance from the goal.
#[must_use]
pub fn grid_regimes() -> Vec<GridRegime> {
    vec![
        GridRegime {
            name: "grid8_short",
            world: GridWalk::eight_way(),
            start: GridState::new((3.0, 4.0), (3.0, 6.0)),
            policy: SearchPolicyV1::default(),
        },
        GridRegime {
            name: "grid8_far_dedup",
            world: GridWalk::eight_way(),
            start: GridState::new((0.0, 0.0), (4.0, 3.0)),
            policy: dedup_policy(),
        },
        GridRegime {
            name: "grid4_far_dedup",
            world: GridWalk::four_way(),
            start: GridState::new((0.0, 0.0), (5.0, 3.0)),
            policy: dedup_policy(),
        },
    ]
}
