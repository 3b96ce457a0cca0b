//! Typed search errors.
//!
//! `SearchError` represents pre-flight failures only. Runtime terminations
//! (goal not found, budget exhaustion, contract violations, caught panics)
//! are expressed via [`crate::report::TerminationReasonV1`] and always
//! produce a `SearchReportV1`.

/// Typed failure for pre-flight search validation.
///
/// These errors are returned before search execution begins. No report is
/// produced because no expansions were taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A policy option was selected that the problem cannot support.
    UnsupportedPolicyMode { detail: String },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedPolicyMode { detail } => {
                write!(f, "unsupported policy mode: {detail}")
            }
        }
    }
}

impl std::error::Error for SearchError {}
