//! The fringe (open list) and the optional best-known-cost index.
//!
//! The fringe itself performs no duplicate detection: a state may appear
//! several times with different costs. Deduplication, when enabled by policy,
//! is layered on top through [`BestKnownCosts`], keyed by state fingerprints.
//! `BTreeMap` (not `HashMap`) keeps iteration deterministic.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use crate::node::{FringeElement, FringeKey};

/// A fringe entry wrapping an element with its ordering key.
///
/// `BinaryHeap` is a max-heap, so we use `Reverse<FringeKey>` to get
/// min-heap behavior (lowest `est_total_cost` first).
#[derive(Debug)]
struct FringeEntry<S, A> {
    key: Reverse<FringeKey>,
    element: FringeElement<S, A>,
}

impl<S, A> PartialEq for FringeEntry<S, A> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<S, A> Eq for FringeEntry<S, A> {}

impl<S, A> PartialOrd for FringeEntry<S, A> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<S, A> Ord for FringeEntry<S, A> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// Priority open list ordered by estimated total cost.
///
/// Maintains:
/// - A `BinaryHeap` for O(log n) insert and pop-min
/// - A monotonically increasing insertion sequence, so elements with equal
///   estimated total cost pop in the order they were inserted
/// - The high-water mark of the fringe size
pub struct Fringe<S, A> {
    heap: BinaryHeap<FringeEntry<S, A>>,
    next_sequence: u64,
    high_water: u64,
}

impl<S, A> Fringe<S, A> {
    /// Create a new empty fringe.
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_sequence: 0,
            high_water: 0,
        }
    }

    /// Insert an element. Returns the insertion sequence assigned to it.
    pub fn insert(&mut self, element: FringeElement<S, A>) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(FringeEntry {
            key: Reverse(FringeKey {
                est_total_cost: element.est_total_cost,
                sequence,
            }),
            element,
        });
        let size = self.heap.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
        sequence
    }

    /// Remove and return the element with the lowest estimated total cost.
    #[must_use]
    pub fn pop_min(&mut self) -> Option<FringeElement<S, A>> {
        self.pop_min_keyed().map(|(_, element)| element)
    }

    /// Like [`Fringe::pop_min`], also returning the element's ordering key.
    #[must_use]
    pub fn pop_min_keyed(&mut self) -> Option<(FringeKey, FringeElement<S, A>)> {
        self.heap.pop().map(|e| (e.key.0, e.element))
    }

    /// The ordering key of the element [`Fringe::pop_min`] would return next.
    #[must_use]
    pub fn peek_key(&self) -> Option<FringeKey> {
        self.heap.peek().map(|e| e.key.0)
    }

    /// Current fringe size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the fringe is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// High-water mark of fringe size.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    /// Release every remaining element (state and path). Returns how many.
    pub fn drain(&mut self) -> usize {
        let released = self.heap.len();
        self.heap.clear();
        released
    }
}

impl<S, A> Default for Fringe<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Best cost-so-far seen per state fingerprint (hex digest).
///
/// Used only under `DedupPolicyV1::BestKnownCost`.
#[derive(Debug, Default)]
pub struct BestKnownCosts {
    costs: BTreeMap<String, f64>,
}

impl BestKnownCosts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `cost` for `fingerprint_hex` if it improves on the best known.
    ///
    /// Returns `false` (nothing recorded) when an equal or cheaper cost is
    /// already known, meaning the caller should suppress the new entry.
    pub fn offer(&mut self, fingerprint_hex: &str, cost: f64) -> bool {
        match self.costs.get_mut(fingerprint_hex) {
            Some(best) if *best <= cost => false,
            Some(best) => {
                *best = cost;
                true
            }
            None => {
                self.costs.insert(fingerprint_hex.to_string(), cost);
                true
            }
        }
    }

    /// Whether an element reaching `fingerprint_hex` at `cost` has been
    /// superseded by a cheaper route.
    #[must_use]
    pub fn is_stale(&self, fingerprint_hex: &str, cost: f64) -> bool {
        self.costs
            .get(fingerprint_hex)
            .is_some_and(|best| *best < cost)
    }

    /// Best known cost for a fingerprint.
    #[must_use]
    pub fn get(&self, fingerprint_hex: &str) -> Option<f64> {
        self.costs.get(fingerprint_hex).copied()
    }

    /// Number of distinct fingerprints recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }
}
