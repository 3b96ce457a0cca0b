//! `SearchReportV1`: expansion-event log and termination record.
//!
//! The ordered list of `ExpandEventV1` entries records every fringe pop in
//! the order it happened. The metadata block carries the policy echo, the
//! aggregate counters, and why the search stopped.

use crate::canon::{canonical_json_bytes, CanonError};
use crate::hash::{canonical_hash, ContentHash, DOMAIN_SEARCH_REPORT};
use crate::policy::DedupPolicyV1;

/// The complete search audit trail.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReportV1 {
    /// Ordered expansion events, one per fringe pop.
    pub expansions: Vec<ExpandEventV1>,
    /// Aggregate metadata.
    pub metadata: SearchReportMetadata,
}

/// A single fringe-pop event.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandEventV1 {
    /// 1-based value of the expansion counter when this pop happened.
    pub expansion_order: u64,
    /// Fringe insertion sequence of the popped element.
    pub sequence: u64,
    pub cost_so_far: f64,
    pub est_total_cost: f64,
    /// Number of actions on the popped element's path.
    pub path_len: u64,
    /// Hex fingerprint of the popped state (only when the problem provides
    /// identity bytes).
    pub state_fingerprint: Option<String>,
    pub outcome: ExpandOutcomeV1,
}

/// What happened to a popped element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandOutcomeV1 {
    /// The element's state satisfied the goal test.
    Goal,
    /// Successors were generated.
    Expanded {
        /// Successors returned by the problem.
        successors: u64,
        /// Successors inserted into the fringe.
        inserted: u64,
        /// Successors suppressed by deduplication.
        suppressed: u64,
    },
    /// Discarded because a cheaper route to the same state was already found.
    Stale,
    /// Expansion stopped by a contract violation, a panic, or the fringe bound.
    Aborted,
}

/// Aggregate metadata for a search run.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReportMetadata {
    pub problem_id: String,
    pub root_state_fingerprint: Option<String>,

    // Policy echo
    pub max_expansions: u64,
    pub max_fringe_len: u64,
    pub dedup: DedupPolicyV1,

    // Counters
    pub total_expansions: u64,
    pub total_successors_generated: u64,
    pub total_duplicates_suppressed: u64,
    pub total_stale_discarded: u64,
    pub fringe_high_water: u64,
    /// Elements still on the fringe at termination (released in bulk).
    pub fringe_released: u64,
    pub termination_reason: TerminationReasonV1,
}

/// Why the search terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReasonV1 {
    /// A goal state was popped.
    GoalReached { expansion_order: u64, path_len: u64 },
    /// Fringe emptied without reaching a goal: no path exists.
    FringeExhausted,
    /// `max_expansions` was hit before a goal was popped.
    ExpansionBudgetExceeded { cap: u64 },
    /// The fringe grew past `max_fringe_len`.
    ResourceExhausted { max_fringe_len: u64 },
    /// The problem returned malformed output.
    ProblemContractViolation { violation: ContractViolationV1 },
    /// A panic was caught in a problem callback.
    InternalPanic { stage: PanicStageV1 },
}

impl TerminationReasonV1 {
    /// Stable snake-case tag used in reports.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GoalReached { .. } => "goal_reached",
            Self::FringeExhausted => "fringe_exhausted",
            Self::ExpansionBudgetExceeded { .. } => "expansion_budget_exceeded",
            Self::ResourceExhausted { .. } => "resource_exhausted",
            Self::ProblemContractViolation { .. } => "problem_contract_violation",
            Self::InternalPanic { .. } => "internal_panic",
        }
    }
}

/// Malformed callback output. Offending values are kept as their `Debug`
/// rendering so the reason stays `Eq`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractViolationV1 {
    NegativeStepCost { value: String },
    NonFiniteStepCost { value: String },
    NegativeEstimate { value: String },
    NonFiniteEstimate { value: String },
    /// Finite step costs (or cost plus estimate) summed to a non-finite total.
    NonFiniteAccumulatedCost { value: String },
}

impl ContractViolationV1 {
    /// Check a successor's step cost.
    #[must_use]
    pub fn check_step_cost(cost: f64) -> Option<Self> {
        if !cost.is_finite() {
            Some(Self::NonFiniteStepCost {
                value: format!("{cost:?}"),
            })
        } else if cost < 0.0 {
            Some(Self::NegativeStepCost {
                value: format!("{cost:?}"),
            })
        } else {
            None
        }
    }

    /// Check a heuristic estimate.
    #[must_use]
    pub fn check_estimate(estimate: f64) -> Option<Self> {
        if !estimate.is_finite() {
            Some(Self::NonFiniteEstimate {
                value: format!("{estimate:?}"),
            })
        } else if estimate < 0.0 {
            Some(Self::NegativeEstimate {
                value: format!("{estimate:?}"),
            })
        } else {
            None
        }
    }

    /// Check an accumulated cost (`cost_so_far` or `est_total_cost`).
    #[must_use]
    pub fn check_accumulated_cost(total: f64) -> Option<Self> {
        if total.is_finite() {
            None
        } else {
            Some(Self::NonFiniteAccumulatedCost {
                value: format!("{total:?}"),
            })
        }
    }

    fn kind_str(&self) -> &'static str {
        match self {
            Self::NegativeStepCost { .. } => "negative_step_cost",
            Self::NonFiniteStepCost { .. } => "non_finite_step_cost",
            Self::NegativeEstimate { .. } => "negative_estimate",
            Self::NonFiniteEstimate { .. } => "non_finite_estimate",
            Self::NonFiniteAccumulatedCost { .. } => "non_finite_accumulated_cost",
        }
    }

    fn value(&self) -> &str {
        match self {
            Self::NegativeStepCost { value }
            | Self::NonFiniteStepCost { value }
            | Self::NegativeEstimate { value }
            | Self::NonFiniteEstimate { value }
            | Self::NonFiniteAccumulatedCost { value } => value,
        }
    }
}

/// Stage at which a panic was caught.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanicStageV1 {
    /// `SearchProblemV1::successors()` (or a `transition()` it called) panicked.
    Successors,
    /// `SearchProblemV1::is_goal()` panicked.
    IsGoal,
    /// `SearchProblemV1::estimate_cost_to_goal()` panicked.
    EstimateCost,
    /// `SearchProblemV1::state_identity()` panicked.
    StateIdentity,
}

impl PanicStageV1 {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Successors => "successors",
            Self::IsGoal => "is_goal",
            Self::EstimateCost => "estimate_cost",
            Self::StateIdentity => "state_identity",
        }
    }
}

// ---------------------------------------------------------------------------
// Canonical JSON serialization
// ---------------------------------------------------------------------------

impl SearchReportV1 {
    /// Serialize the report to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if a recorded cost is not finite.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Content digest of the canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(DOMAIN_SEARCH_REPORT, &bytes))
    }

    /// Convert to a `serde_json::Value`.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "expansions": self.expansions.iter().map(expand_event_to_json).collect::<Vec<_>>(),
            "metadata": metadata_to_json(&self.metadata),
        })
    }
}

fn expand_event_to_json(e: &ExpandEventV1) -> serde_json::Value {
    serde_json::json!({
        "cost_so_far": e.cost_so_far,
        "est_total_cost": e.est_total_cost,
        "expansion_order": e.expansion_order,
        "outcome": outcome_to_json(e.outcome),
        "path_len": e.path_len,
        "sequence": e.sequence,
        "state_fingerprint": e.state_fingerprint,
    })
}

fn outcome_to_json(o: ExpandOutcomeV1) -> serde_json::Value {
    match o {
        ExpandOutcomeV1::Goal => serde_json::json!({"type": "goal"}),
        ExpandOutcomeV1::Expanded {
            successors,
            inserted,
            suppressed,
        } => serde_json::json!({
            "inserted": inserted,
            "successors": successors,
            "suppressed": suppressed,
            "type": "expanded",
        }),
        ExpandOutcomeV1::Stale => serde_json::json!({"type": "stale"}),
        ExpandOutcomeV1::Aborted => serde_json::json!({"type": "aborted"}),
    }
}

fn metadata_to_json(m: &SearchReportMetadata) -> serde_json::Value {
    serde_json::json!({
        "dedup": m.dedup.as_str(),
        "fringe_high_water": m.fringe_high_water,
        "fringe_released": m.fringe_released,
        "max_expansions": m.max_expansions,
        "max_fringe_len": m.max_fringe_len,
        "problem_id": m.problem_id,
        "root_state_fingerprint": m.root_state_fingerprint,
        "termination_reason": termination_reason_to_json(&m.termination_reason),
        "total_duplicates_suppressed": m.total_duplicates_suppressed,
        "total_expansions": m.total_expansions,
        "total_stale_discarded": m.total_stale_discarded,
        "total_successors_generated": m.total_successors_generated,
    })
}

fn termination_reason_to_json(r: &TerminationReasonV1) -> serde_json::Value {
    let tag = r.as_str();
    match r {
        TerminationReasonV1::GoalReached {
            expansion_order,
            path_len,
        } => serde_json::json!({
            "expansion_order": expansion_order,
            "path_len": path_len,
            "type": tag,
        }),
        TerminationReasonV1::FringeExhausted => serde_json::json!({"type": tag}),
        TerminationReasonV1::ExpansionBudgetExceeded { cap } => {
            serde_json::json!({"cap": cap, "type": tag})
        }
        TerminationReasonV1::ResourceExhausted { max_fringe_len } => {
            serde_json::json!({"max_fringe_len": max_fringe_len, "type": tag})
        }
        TerminationReasonV1::ProblemContractViolation { violation } => serde_json::json!({
            "kind": violation.kind_str(),
            "type": tag,
            "value": violation.value(),
        }),
        TerminationReasonV1::InternalPanic { stage } => {
            serde_json::json!({"stage": stage.as_str(), "type": tag})
        }
    }
}
