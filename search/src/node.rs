//! Successor records, fringe elements, and the fringe ordering key.

use crate::path::ActionPath;

/// One applicable move out of a state, as reported by the problem.
///
/// `cost` is the incremental cost of `action` alone; the engine accumulates
/// it into the cost-so-far of the new fringe element.
#[derive(Debug, Clone, PartialEq)]
pub struct Successor<S, A> {
    /// The state reached by applying `action`.
    pub state: S,
    /// The action that produced `state`.
    pub action: A,
    /// Incremental cost of `action` (must be finite and non-negative).
    pub cost: f64,
}

impl<S, A> Successor<S, A> {
    #[must_use]
    pub fn new(state: S, action: A, cost: f64) -> Self {
        Self {
            state,
            action,
            cost,
        }
    }
}

/// A pending search node: a state plus the path and cost that reached it.
#[derive(Debug, Clone)]
pub struct FringeElement<S, A> {
    /// Exclusively owned copy of the state.
    pub state: S,
    /// Exclusively owned path from the root to `state`.
    pub path: ActionPath<A>,
    /// Accumulated cost from the root (`g`).
    pub cost_so_far: f64,
    /// `cost_so_far + estimate(state)` (`f`); the fringe ordering key.
    pub est_total_cost: f64,
}

impl<S, A> FringeElement<S, A> {
    /// The seed element: zero cost, zero estimate, empty path.
    ///
    /// The heuristic is not evaluated for the seed because it is the only
    /// fringe member and is popped unconditionally.
    #[must_use]
    pub fn seed(state: S) -> Self {
        Self {
            state,
            path: ActionPath::new(),
            cost_so_far: 0.0,
            est_total_cost: 0.0,
        }
    }

    #[must_use]
    pub fn new(state: S, path: ActionPath<A>, cost_so_far: f64, est_total_cost: f64) -> Self {
        Self {
            state,
            path,
            cost_so_far,
            est_total_cost,
        }
    }
}

/// The fringe ordering key: `(est_total_cost, sequence)`.
///
/// Lower estimated total cost first. Ties go to the lower `sequence`, i.e.
/// the element inserted first. Costs compare with [`f64::total_cmp`] so the
/// order is total even though the engine rejects NaN before insertion.
#[derive(Debug, Clone, Copy)]
pub struct FringeKey {
    pub est_total_cost: f64,
    pub sequence: u64,
}

impl PartialEq for FringeKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for FringeKey {}

impl PartialOrd for FringeKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FringeKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.est_total_cost
            .total_cmp(&other.est_total_cost)
            .then(self.sequence.cmp(&other.sequence))
    }
}
