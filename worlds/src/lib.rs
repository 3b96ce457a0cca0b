//! A* Worlds: concrete problems for the `astar_search` engine.
//!
//! Each world implements [`astar_search::contract::SearchProblemV1`] and
//! provides domain data only; the engine owns the search.
//!
//! - [`route_graph::RouteGraph`]: named-node weighted digraph with per-node heuristics
//! - [`grid_walk::GridWalk`]: unit steps on a continuous plane toward a goal point

#![forbid(unsafe_code)]

pub mod grid_walk;
pub mod route_graph;
