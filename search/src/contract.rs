//! Search problem contract trait.

use crate::node::Successor;

/// Trait for problems the A* engine can search.
///
/// The engine never inspects `State` or `Action` payloads. It duplicates them
/// with `Clone` whenever a copy must outlive the current expansion step and
/// releases them by dropping.
///
/// # Contract
///
/// - `successors` must enumerate every action applicable in `state` and
///   derive each resulting state through [`SearchProblemV1::transition`]
///   (the [`SearchProblemV1::successor`] helper does this). An empty vector
///   means the state has no successors.
/// - `transition` is pure: same `(state, action)` → same resulting state,
///   and it must not mutate its input.
/// - Step costs must be finite and non-negative.
/// - `estimate_cost_to_goal` must be finite, non-negative, and never exceed
///   the true minimal remaining cost (admissibility). The default of `0.0`
///   degrades A* to uniform-cost search.
/// - Enumeration must be deterministic: same state → same successors in the
///   same order.
pub trait SearchProblemV1 {
    /// One point in the search space.
    type State: Clone;
    /// One applicable transition out of a state.
    type Action: Clone;

    /// Identifier echoed into the search report.
    fn problem_id(&self) -> &str;

    /// Enumerate all successors of `state`.
    fn successors(&self, state: &Self::State) -> Vec<Successor<Self::State, Self::Action>>;

    /// Compute the state reached by applying `action` in `state`.
    fn transition(&self, state: &Self::State, action: &Self::Action) -> Self::State;

    /// Test whether `state` satisfies the goal.
    fn is_goal(&self, state: &Self::State) -> bool;

    /// Admissible estimate of the remaining cost from `state` to a goal.
    fn estimate_cost_to_goal(&self, _state: &Self::State) -> f64 {
        0.0
    }

    /// Identity bytes used to fingerprint `state` for deduplication.
    ///
    /// Two states with equal identity bytes are treated as the same search
    /// position. `None` opts the problem out of deduplication.
    fn state_identity(&self, _state: &Self::State) -> Option<Vec<u8>> {
        None
    }

    /// Build a successor record by applying `action` through `transition`.
    fn successor(
        &self,
        state: &Self::State,
        action: Self::Action,
        cost: f64,
    ) -> Successor<Self::State, Self::Action> {
        let next = self.transition(state, &action);
        Successor::new(next, action, cost)
    }
}
