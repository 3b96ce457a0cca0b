//! Fringe ordering under random workloads: lowest estimated total cost
//! first, insertion order among ties, and path independence across
//! branches.

use astar_search::frontier::Fringe;
use astar_search::node::FringeElement;
use astar_search::path::ActionPath;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn pops_in_cost_then_insertion_order() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..50 {
        let mut fringe: Fringe<u32, u8> = Fringe::new();
        let count = rng.random_range(1..200u32);
        for label in 0..count {
            // Few distinct costs, so ties are common.
            let cost = f64::from(rng.random_range(0..8u32));
            fringe.insert(FringeElement::new(label, ActionPath::new(), cost, cost));
        }

        let mut last: Option<(f64, u32)> = None;
        while let Some(element) = fringe.pop_min() {
            if let Some((cost, label)) = last {
                assert!(element.est_total_cost >= cost);
                if (element.est_total_cost - cost).abs() < f64::EPSILON {
                    assert!(element.state > label, "ties must pop in insertion order");
                }
            }
            last = Some((element.est_total_cost, element.state));
        }
        assert_eq!(fringe.high_water(), u64::from(count));
    }
}

#[test]
fn interleaved_pops_never_skip_a_cheaper_element() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut fringe: Fringe<u32, u8> = Fringe::new();
    let mut live: Vec<f64> = Vec::new();
    for label in 0..2_000u32 {
        if rng.random_bool(0.6) || fringe.is_empty() {
            let cost = rng.random_range(0.0..100.0);
            fringe.insert(FringeElement::new(label, ActionPath::new(), 0.0, cost));
            live.push(cost);
        } else {
            let popped = fringe.pop_min().unwrap();
            let min = live.iter().copied().fold(f64::INFINITY, f64::min);
            assert!((popped.est_total_cost - min).abs() < f64::EPSILON);
            let pos = live
                .iter()
                .position(|c| (c - popped.est_total_cost).abs() < f64::EPSILON)
                .unwrap();
            live.swap_remove(pos);
        }
        assert_eq!(fringe.len(), live.len());
    }
}

#[test]
fn branch_paths_are_independent() {
    let root: ActionPath<char> = "abc".chars().collect();
    let left = root.appended('x');
    let mut right = root.appended('y');
    right.append('z');

    assert_eq!(root.as_slice(), ['a', 'b', 'c']);
    assert_eq!(left.as_slice(), ['a', 'b', 'c', 'x']);
    assert_eq!(right.as_slice(), ['a', 'b', 'c', 'y', 'z']);
    assert_eq!(left.release(), 4);
    assert_eq!(root.len(), 3);
}
