//! Search entry point and expansion loop.
//!
//! Phases: INITIALIZE (clone the root onto a fresh fringe) → EXPAND (pop the
//! cheapest element, goal-test it, insert its successors) → TERMINATE (drain
//! and release whatever is left on the fringe).

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::contract::SearchProblemV1;
use crate::error::SearchError;
use crate::frontier::{BestKnownCosts, Fringe};
use crate::hash::{canonical_hash, DOMAIN_SEARCH_STATE};
use crate::node::{FringeElement, Successor};
use crate::path::ActionPath;
use crate::policy::{DedupPolicyV1, SearchPolicyV1};
use crate::report::{
    ContractViolationV1, ExpandEventV1, ExpandOutcomeV1, PanicStageV1, SearchReportMetadata,
    SearchReportV1, TerminationReasonV1,
};

/// A goal path together with its accumulated cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<A> {
    /// Actions from the initial state to the goal (empty if the initial state
    /// already was a goal).
    pub path: ActionPath<A>,
    /// Sum of the step costs along `path`.
    pub cost: f64,
}

/// Result of a search execution.
///
/// Always contains a complete `SearchReportV1` regardless of how the search
/// terminated. Check [`SearchResult::is_goal_reached`] or inspect
/// `report.metadata.termination_reason` to determine the outcome.
#[derive(Debug, Clone)]
pub struct SearchResult<A> {
    /// The goal path (if found). Ownership passes to the caller.
    pub solution: Option<Solution<A>>,
    /// The complete audit trail.
    pub report: SearchReportV1,
}

impl<A> SearchResult<A> {
    /// Returns `true` if the search terminated because a goal was reached.
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        matches!(
            self.report.metadata.termination_reason,
            TerminationReasonV1::GoalReached { .. }
        )
    }

    #[must_use]
    pub fn termination_reason(&self) -> &TerminationReasonV1 {
        &self.report.metadata.termination_reason
    }

    /// Number of pop-and-expand cycles performed.
    #[must_use]
    pub fn expansion_count(&self) -> u64 {
        self.report.metadata.total_expansions
    }

    /// The goal path, or `None` if no path was found.
    #[must_use]
    pub fn path(&self) -> Option<&ActionPath<A>> {
        self.solution.as_ref().map(|s| &s.path)
    }

    /// Consume the result and take the goal path.
    #[must_use]
    pub fn into_path(self) -> Option<ActionPath<A>> {
        self.solution.map(|s| s.path)
    }
}

/// A configured A* engine bound to one problem.
///
/// The expansion counter and cap live on the engine: the counter is reset at
/// the start of every [`AStarSearch::find_path_to_goal`] call and left at the
/// number of cycles that call performed.
pub struct AStarSearch<P> {
    problem: P,
    policy: SearchPolicyV1,
    expansion_count: u64,
}

impl<P: SearchProblemV1> AStarSearch<P> {
    /// Construct an engine with an unlimited expansion budget.
    #[must_use]
    pub fn new(problem: P) -> Self {
        Self::with_policy(problem, SearchPolicyV1::default())
    }

    #[must_use]
    pub fn with_policy(problem: P, policy: SearchPolicyV1) -> Self {
        Self {
            problem,
            policy,
            expansion_count: 0,
        }
    }

    /// Set the expansion cap (`0` = unlimited).
    pub fn set_max_expansions(&mut self, max_expansions: u64) {
        self.policy.max_expansions = max_expansions;
    }

    #[must_use]
    pub fn max_expansions(&self) -> u64 {
        self.policy.max_expansions
    }

    /// Cycles performed by the most recent search.
    #[must_use]
    pub fn expansion_count(&self) -> u64 {
        self.expansion_count
    }

    /// Overwrite the expansion counter.
    pub fn set_expansion_count(&mut self, expansion_count: u64) {
        self.expansion_count = expansion_count;
    }

    pub fn set_policy(&mut self, policy: SearchPolicyV1) {
        self.policy = policy;
    }

    #[must_use]
    pub fn policy(&self) -> &SearchPolicyV1 {
        &self.policy
    }

    #[must_use]
    pub fn problem(&self) -> &P {
        &self.problem
    }

    #[must_use]
    pub fn into_problem(self) -> P {
        self.problem
    }

    /// Run one full search from `initial_state`.
    ///
    /// The initial state is cloned; the caller keeps ownership of its copy.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnsupportedPolicyMode`] only for pre-flight
    /// policy validation failures.
    pub fn find_path_to_goal(
        &mut self,
        initial_state: &P::State,
    ) -> Result<SearchResult<P::Action>, SearchError> {
        self.expansion_count = 0;
        let result = search(&self.problem, initial_state, &self.policy)?;
        self.expansion_count = result.expansion_count();
        Ok(result)
    }
}

/// Run A* from `initial_state`.
///
/// All runtime terminations (goal reached, fringe exhausted, budget or
/// resource exhaustion, contract violations, caught panics) return
/// `Ok(SearchResult)` with the report preserved.
///
/// # Errors
///
/// Returns [`SearchError::UnsupportedPolicyMode`] only for pre-flight policy
/// validation failures. No report is produced in this case because no
/// expansions were taken.
#[allow(clippy::too_many_lines)]
pub fn search<P: SearchProblemV1>(
    problem: &P,
    initial_state: &P::State,
    policy: &SearchPolicyV1,
) -> Result<SearchResult<P::Action>, SearchError> {
    let dedup = policy.dedup == DedupPolicyV1::BestKnownCost;
    let mut fringe: Fringe<P::State, P::Action> = Fringe::new();
    let mut best_known = BestKnownCosts::new();
    let mut expansions: Vec<ExpandEventV1> = Vec::new();
    let mut expansion_count: u64 = 0;
    let mut total_successors_generated: u64 = 0;
    let mut total_duplicates_suppressed: u64 = 0;
    let mut total_stale_discarded: u64 = 0;
    let mut solution = None;

    let root_fp = match guarded(PanicStageV1::StateIdentity, || {
        state_fingerprint(problem, initial_state)
    }) {
        Ok(fp) => fp,
        Err(stage) => {
            tracing::warn!(stage = stage.as_str(), "problem callback panicked on the root state");
            let metadata = SearchReportMetadata {
                problem_id: problem.problem_id().to_string(),
                root_state_fingerprint: None,
                max_expansions: policy.max_expansions,
                max_fringe_len: policy.max_fringe_len,
                dedup: policy.dedup,
                total_expansions: 0,
                total_successors_generated: 0,
                total_duplicates_suppressed: 0,
                total_stale_discarded: 0,
                fringe_high_water: 0,
                fringe_released: 0,
                termination_reason: TerminationReasonV1::InternalPanic { stage },
            };
            return Ok(SearchResult {
                solution: None,
                report: SearchReportV1 {
                    expansions,
                    metadata,
                },
            });
        }
    };

    policy.validate_identity(problem.problem_id(), root_fp.is_some())?;

    if dedup {
        if let Some(fp) = &root_fp {
            best_known.offer(fp, 0.0);
        }
    }
    fringe.insert(FringeElement::seed(initial_state.clone()));

    let termination_reason = loop {
        if fringe.is_empty() {
            break TerminationReasonV1::FringeExhausted;
        }
        if policy.max_expansions != 0 && expansion_count >= policy.max_expansions {
            break TerminationReasonV1::ExpansionBudgetExceeded {
                cap: policy.max_expansions,
            };
        }

        expansion_count += 1;
        let Some((key, current)) = fringe.pop_min_keyed() else {
            break TerminationReasonV1::FringeExhausted;
        };

        let mut event = ExpandEventV1 {
            expansion_order: expansion_count,
            sequence: key.sequence,
            cost_so_far: current.cost_so_far,
            est_total_cost: current.est_total_cost,
            path_len: current.path.len() as u64,
            state_fingerprint: None,
            outcome: ExpandOutcomeV1::Aborted,
        };

        match guarded(PanicStageV1::StateIdentity, || {
            state_fingerprint(problem, &current.state)
        }) {
            Ok(fp) => event.state_fingerprint = fp,
            Err(stage) => {
                expansions.push(event);
                break TerminationReasonV1::InternalPanic { stage };
            }
        }

        if dedup {
            if let Some(fp) = &event.state_fingerprint {
                if best_known.is_stale(fp, current.cost_so_far) {
                    tracing::trace!(expansion = expansion_count, "discarding stale fringe element");
                    total_stale_discarded += 1;
                    event.outcome = ExpandOutcomeV1::Stale;
                    expansions.push(event);
                    continue;
                }
            }
        }

        tracing::debug!(
            expansion = expansion_count,
            cost_so_far = current.cost_so_far,
            est_total_cost = current.est_total_cost,
            path_len = current.path.len(),
            fringe_len = fringe.len(),
            "popped fringe element"
        );

        match guarded(PanicStageV1::IsGoal, || problem.is_goal(&current.state)) {
            Ok(true) => {
                event.outcome = ExpandOutcomeV1::Goal;
                expansions.push(event);
                let path_len = current.path.len() as u64;
                solution = Some(Solution {
                    path: current.path,
                    cost: current.cost_so_far,
                });
                break TerminationReasonV1::GoalReached {
                    expansion_order: expansion_count,
                    path_len,
                };
            }
            Ok(false) => {}
            Err(stage) => {
                expansions.push(event);
                break TerminationReasonV1::InternalPanic { stage };
            }
        }

        let successors = match guarded(PanicStageV1::Successors, || {
            problem.successors(&current.state)
        }) {
            Ok(successors) => successors,
            Err(stage) => {
                expansions.push(event);
                break TerminationReasonV1::InternalPanic { stage };
            }
        };
        let successor_count = successors.len() as u64;
        total_successors_generated += successor_count;

        let mut inserted = 0u64;
        let mut suppressed = 0u64;
        let mut abort = None;

        for Successor {
            state,
            action,
            cost,
        } in successors
        {
            if let Some(violation) = ContractViolationV1::check_step_cost(cost) {
                abort = Some(TerminationReasonV1::ProblemContractViolation { violation });
                break;
            }
            let cost_so_far = current.cost_so_far + cost;
            if let Some(violation) = ContractViolationV1::check_accumulated_cost(cost_so_far) {
                abort = Some(TerminationReasonV1::ProblemContractViolation { violation });
                break;
            }

            if dedup {
                match guarded(PanicStageV1::StateIdentity, || {
                    state_fingerprint(problem, &state)
                }) {
                    Ok(Some(fp)) => {
                        if !best_known.offer(&fp, cost_so_far) {
                            suppressed += 1;
                            continue;
                        }
                    }
                    Ok(None) => {}
                    Err(stage) => {
                        abort = Some(TerminationReasonV1::InternalPanic { stage });
                        break;
                    }
                }
            }

            let estimate = match guarded(PanicStageV1::EstimateCost, || {
                problem.estimate_cost_to_goal(&state)
            }) {
                Ok(estimate) => estimate,
                Err(stage) => {
                    abort = Some(TerminationReasonV1::InternalPanic { stage });
                    break;
                }
            };
            if let Some(violation) = ContractViolationV1::check_estimate(estimate) {
                abort = Some(TerminationReasonV1::ProblemContractViolation { violation });
                break;
            }

            let est_total_cost = cost_so_far + estimate;
            if let Some(violation) = ContractViolationV1::check_accumulated_cost(est_total_cost) {
                abort = Some(TerminationReasonV1::ProblemContractViolation { violation });
                break;
            }

            let path = current.path.appended(action);
            fringe.insert(FringeElement::new(state, path, cost_so_far, est_total_cost));
            inserted += 1;

            if policy.max_fringe_len != 0 && fringe.len() as u64 > policy.max_fringe_len {
                abort = Some(TerminationReasonV1::ResourceExhausted {
                    max_fringe_len: policy.max_fringe_len,
                });
                break;
            }
        }

        total_duplicates_suppressed += suppressed;

        if let Some(reason) = abort {
            tracing::warn!(
                expansion = expansion_count,
                reason = reason.as_str(),
                "expansion aborted"
            );
            expansions.push(event);
            break reason;
        }

        event.outcome = ExpandOutcomeV1::Expanded {
            successors: successor_count,
            inserted,
            suppressed,
        };
        expansions.push(event);
        // `current` (state and path-so-far) is released here.
    };

    let fringe_high_water = fringe.high_water();
    let fringe_released = fringe.drain() as u64;

    tracing::info!(
        problem_id = problem.problem_id(),
        reason = termination_reason.as_str(),
        expansions = expansion_count,
        fringe_high_water,
        fringe_released,
        "search terminated"
    );

    let metadata = SearchReportMetadata {
        problem_id: problem.problem_id().to_string(),
        root_state_fingerprint: root_fp,
        max_expansions: policy.max_expansions,
        max_fringe_len: policy.max_fringe_len,
        dedup: policy.dedup,
        total_expansions: expansion_count,
        total_successors_generated,
        total_duplicates_suppressed,
        total_stale_discarded,
        fringe_high_water,
        fringe_released,
        termination_reason,
    };

    Ok(SearchResult {
        solution,
        report: SearchReportV1 {
            expansions,
            metadata,
        },
    })
}

/// Hex fingerprint of a state's identity bytes, if the problem provides them.
fn state_fingerprint<P: SearchProblemV1>(problem: &P, state: &P::State) -> Option<String> {
    problem
        .state_identity(state)
        .map(|bytes| canonical_hash(DOMAIN_SEARCH_STATE, &bytes).hex_digest().to_string())
}

/// Run a problem callback, mapping a panic to the stage it happened in.
fn guarded<T>(stage: PanicStageV1, f: impl FnOnce() -> T) -> Result<T, PanicStageV1> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|_| stage)
}
