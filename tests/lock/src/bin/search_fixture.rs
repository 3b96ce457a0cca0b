//! Binary that runs the demo route graph and the grid walk scenario and
//! prints deterministic output lines for cross-process verification.
//!
//! Usage: `search_fixture`
//!
//! Output: key=value lines (see source for format).

use astar_search::search::AStarSearch;
use astar_worlds::grid_walk::{GridState, GridWalk};
use astar_worlds::route_graph::{RouteGraph, RouteState};

fn main() {
    let mut graph_engine = AStarSearch::new(RouteGraph::demo());
    let graph = graph_engine
        .find_path_to_goal(&RouteState::at("S"))
        .expect("demo graph search rejected");
    let route: Vec<&str> = graph
        .path()
        .map(|p| p.iter().map(|m| m.node.as_str()).collect())
        .unwrap_or_default();
    let cost = graph.solution.as_ref().map_or(-1.0, |s| s.cost);

    println!("graph_termination={}", graph.termination_reason().as_str());
    println!("graph_path={}", route.join(","));
    println!("graph_cost={cost}");
    println!("graph_expansions={}", graph_engine.expansion_count());
    println!(
        "graph_report_digest={}",
        graph.report.digest().expect("graph report not canonical")
    );

    let mut grid_engine = AStarSearch::new(GridWalk::eight_way());
    let grid = grid_engine
        .find_path_to_goal(&GridState::new((3.0, 4.0), (3.0, 6.0)))
        .expect("grid search rejected");

    println!("grid_termination={}", grid.termination_reason().as_str());
    println!("grid_path_len={}", grid.path().map_or(0, |p| p.len()));
    println!("grid_expansions={}", grid_engine.expansion_count());
    println!(
        "grid_report_digest={}",
        grid.report.digest().expect("grid report not canonical")
    );
}
