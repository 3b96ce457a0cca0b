//! Report determinism: identical canonical bytes and digests across runs,
//! and stable report contents for the demo route graph.

use astar_search::policy::{DedupPolicyV1, SearchPolicyV1};
use astar_search::search::search;
use astar_worlds::grid_walk::{GridState, GridWalk};
use astar_worlds::route_graph::{RouteGraph, RouteState};
use lock_tests::{node_name, random_graph, HeuristicMode, RandomGraphShape};

#[test]
fn route_graph_report_bytes_are_stable_n10() {
    let graph = RouteGraph::demo();
    let start = RouteState::at("S");
    let policy = SearchPolicyV1::default();

    let first = search(&graph, &start, &policy).unwrap();
    let first_bytes = first.report.to_canonical_json_bytes().unwrap();
    let first_digest = first.report.digest().unwrap();

    for _ in 1..10 {
        let other = search(&graph, &start, &policy).unwrap();
        assert_eq!(
            first_bytes,
            other.report.to_canonical_json_bytes().unwrap(),
            "SearchReportV1 bytes differ across runs"
        );
        assert_eq!(first_digest, other.report.digest().unwrap());
    }
    assert_eq!(first_digest.algorithm(), "sha256");
}

#[test]
fn grid_walk_report_bytes_are_stable() {
    let world = GridWalk::eight_way();
    let start = GridState::new((3.0, 4.0), (3.0, 6.0));
    let a = search(&world, &start, &SearchPolicyV1::default()).unwrap();
    let b = search(&world, &start, &SearchPolicyV1::default()).unwrap();
    assert_eq!(
        a.report.to_canonical_json_bytes().unwrap(),
        b.report.to_canonical_json_bytes().unwrap()
    );
}

#[test]
fn random_graph_reports_are_stable_with_dedup() {
    let shape = RandomGraphShape {
        nodes: 12,
        edge_probability: 0.25,
        max_cost: 6,
        acyclic: false,
        heuristic: HeuristicMode::Jittered,
    };
    let policy = SearchPolicyV1 {
        dedup: DedupPolicyV1::BestKnownCost,
        ..SearchPolicyV1::default()
    };
    for seed in 0..10 {
        let start = RouteState::at(&node_name(0));
        let a = search(&random_graph(seed, &shape), &start, &policy).unwrap();
        let b = search(&random_graph(seed, &shape), &start, &policy).unwrap();
        assert_eq!(a.report.digest().unwrap(), b.report.digest().unwrap(), "seed={seed}");
    }
}

#[test]
fn report_json_shape_for_demo_graph() {
    let result = search(&RouteGraph::demo(), &RouteState::at("S"), &SearchPolicyV1::default())
        .unwrap();
    let json: serde_json::Value =
        serde_json::from_slice(&result.report.to_canonical_json_bytes().unwrap()).unwrap();

    let metadata = &json["metadata"];
    assert_eq!(metadata["problem_id"], "route_graph_demo");
    assert_eq!(metadata["dedup"], "none");
    assert_eq!(metadata["total_expansions"], 7);
    assert_eq!(metadata["termination_reason"]["type"], "goal_reached");
    assert_eq!(metadata["termination_reason"]["path_len"], 3);
    assert!(metadata["root_state_fingerprint"]
        .as_str()
        .is_some_and(|fp| fp.len() == 64));

    let expansions = json["expansions"].as_array().unwrap();
    assert_eq!(expansions.len(), 7);
    assert_eq!(expansions[0]["outcome"]["type"], "expanded");
    assert_eq!(expansions[0]["outcome"]["successors"], 2);
    assert_eq!(expansions[6]["outcome"]["type"], "goal");
    let orders: Vec<u64> = expansions
        .iter()
        .map(|e| e["expansion_order"].as_u64().unwrap())
        .collect();
    assert_eq!(orders, (1..=7).collect::<Vec<_>>());
}

#[test]
fn dedup_mode_changes_the_digest() {
    let graph = RouteGraph::demo();
    let start = RouteState::at("S");
    let plain = search(&graph, &start, &SearchPolicyV1::default()).unwrap();
    let dedup = search(
        &graph,
        &start,
        &SearchPolicyV1 {
            dedup: DedupPolicyV1::BestKnownCost,
            ..SearchPolicyV1::default()
        },
    )
    .unwrap();
    assert_ne!(plain.report.digest().unwrap(), dedup.report.digest().unwrap());
}
