//! Search policy types.

use crate::contract::SearchProblemV1;
use crate::error::SearchError;

/// Search budget and dedup configuration.
///
/// Zero means "unlimited" for both budgets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPolicyV1 {
    /// Hard cap on pop-and-expand cycles.
    pub max_expansions: u64,
    /// Fringe size bound; exceeding it terminates with `ResourceExhausted`.
    pub max_fringe_len: u64,
    /// Visited-state handling (default: `None`, no deduplication).
    pub dedup: DedupPolicyV1,
}

impl SearchPolicyV1 {
    /// Policy with only an expansion cap set.
    #[must_use]
    pub fn with_max_expansions(max_expansions: u64) -> Self {
        Self {
            max_expansions,
            ..Self::default()
        }
    }

    /// Validate that `problem` can honor this policy starting from `root`.
    ///
    /// Calls `state_identity` directly, outside any panic guard.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnsupportedPolicyMode`] if
    /// [`DedupPolicyV1::BestKnownCost`] is selected but the problem provides
    /// no identity bytes for the root state.
    pub fn validate_for<P: SearchProblemV1>(
        &self,
        problem: &P,
        root: &P::State,
    ) -> Result<(), SearchError> {
        self.validate_identity(problem.problem_id(), problem.state_identity(root).is_some())
    }

    /// Validate against an already computed answer to "does the root state
    /// have identity bytes?". The engine uses this so the identity callback
    /// only ever runs under its panic guard.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnsupportedPolicyMode`] if
    /// [`DedupPolicyV1::BestKnownCost`] is selected and `root_has_identity`
    /// is `false`.
    pub fn validate_identity(
        &self,
        problem_id: &str,
        root_has_identity: bool,
    ) -> Result<(), SearchError> {
        if self.dedup == DedupPolicyV1::BestKnownCost && !root_has_identity {
            return Err(SearchError::UnsupportedPolicyMode {
                detail: format!(
                    "DedupPolicyV1::BestKnownCost requires state identity bytes, \
                     but problem '{problem_id}' provides none"
                ),
            });
        }
        Ok(())
    }
}

/// How previously reached states are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupPolicyV1 {
    /// No visited-state tracking: a state may be expanded more than once.
    #[default]
    None,
    /// Track the best cost-so-far per state fingerprint. Successors that do
    /// not improve on it are suppressed; popped elements superseded by a
    /// cheaper route are discarded without expansion.
    BestKnownCost,
}

impl DedupPolicyV1 {
    /// Stable name used in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::BestKnownCost => "best_known_cost",
        }
    }
}
