//! Admissible-heuristic optimality on seeded random graphs, checked against
//! Bellman-Ford reference costs.

use astar_search::policy::{DedupPolicyV1, SearchPolicyV1};
use astar_search::report::TerminationReasonV1;
use astar_search::search::search;
use astar_worlds::route_graph::{RouteGraph, RouteState};
use lock_tests::{exact_costs_to_goal, node_name, random_graph, HeuristicMode, RandomGraphShape};

const SEEDS: u64 = 40;

fn check_optimal(graph: &RouteGraph, policy: &SearchPolicyV1, label: &str) {
    let start = RouteState::at(&node_name(0));
    let exact = exact_costs_to_goal(graph);
    let result = search(graph, &start, policy).unwrap();

    match exact.get(&start.node) {
        Some(&expected) => {
            let solution = result
                .solution
                .as_ref()
                .unwrap_or_else(|| panic!("{label}: goal reachable but not found"));
            assert!(
                (solution.cost - expected).abs() < 1e-9,
                "{label}: cost {} != optimal {expected}",
                solution.cost
            );
            let walked = graph.path_cost(&start.node, solution.path.iter());
            assert_eq!(walked, Some(solution.cost), "{label}: path does not replay");
        }
        None => {
            assert!(result.solution.is_none(), "{label}: found a path to an unreachable goal");
            assert_eq!(
                result.report.metadata.termination_reason,
                TerminationReasonV1::FringeExhausted,
                "{label}"
            );
        }
    }
}

#[test]
fn acyclic_graphs_without_dedup() {
    for mode in [
        HeuristicMode::Scaled(0.0),
        HeuristicMode::Scaled(0.5),
        HeuristicMode::Scaled(1.0),
        HeuristicMode::Jittered,
    ] {
        let shape = RandomGraphShape {
            nodes: 8,
            edge_probability: 0.35,
            max_cost: 9,
            acyclic: true,
            heuristic: mode,
        };
        for seed in 0..SEEDS {
            let graph = random_graph(seed, &shape);
            check_optimal(
                &graph,
                &SearchPolicyV1::default(),
                &format!("dag seed={seed} mode={mode:?}"),
            );
        }
    }
}

#[test]
fn cyclic_graphs_with_dedup() {
    let policy = SearchPolicyV1 {
        dedup: DedupPolicyV1::BestKnownCost,
        ..SearchPolicyV1::default()
    };
    for mode in [HeuristicMode::Scaled(0.0), HeuristicMode::Jittered] {
        let shape = RandomGraphShape {
            nodes: 10,
            edge_probability: 0.3,
            max_cost: 9,
            acyclic: false,
            heuristic: mode,
        };
        for seed in 0..SEEDS {
            let graph = random_graph(seed, &shape);
            check_optimal(&graph, &policy, &format!("cyclic seed={seed} mode={mode:?}"));
        }
    }
}

#[test]
fn dedup_agrees_with_plain_search() {
    let shape = RandomGraphShape {
        nodes: 8,
        edge_probability: 0.35,
        max_cost: 9,
        acyclic: true,
        heuristic: HeuristicMode::Scaled(1.0),
    };
    let dedup = SearchPolicyV1 {
        dedup: DedupPolicyV1::BestKnownCost,
        ..SearchPolicyV1::default()
    };
    for seed in 0..SEEDS {
        let graph = random_graph(seed, &shape);
        let start = RouteState::at(&node_name(0));
        let plain = search(&graph, &start, &SearchPolicyV1::default()).unwrap();
        let deduped = search(&graph, &start, &dedup).unwrap();

        assert_eq!(plain.is_goal_reached(), deduped.is_goal_reached(), "seed={seed}");
        if let (Some(a), Some(b)) = (&plain.solution, &deduped.solution) {
            assert!((a.cost - b.cost).abs() < 1e-9, "seed={seed}");
        }
    }
}

#[test]
fn dedup_on_demo_graph_skips_repeat_expansion() {
    let graph = RouteGraph::demo();
    let policy = SearchPolicyV1 {
        dedup: DedupPolicyV1::BestKnownCost,
        ..SearchPolicyV1::default()
    };
    let result = search(&graph, &RouteState::at("S"), &policy).unwrap();

    let solution = result.solution.as_ref().unwrap();
    assert!((solution.cost - 7.0).abs() < f64::EPSILON);
    assert_eq!(result.report.metadata.total_expansions, 6);
    // A→B (3 > 1) and C→G (12 > 7) are suppressed.
    assert_eq!(result.report.metadata.total_duplicates_suppressed, 2);
}
