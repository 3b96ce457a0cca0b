//! A* Search: generic, problem-agnostic best-first search.
//!
//! The engine knows nothing about the states and actions it searches over;
//! problems plug in through [`SearchProblemV1`]. Domain implementations live
//! in `astar_worlds`.
//!
//! # Crate dependency graph
//!
//! ```text
//! astar_search  ←  astar_worlds  ←  lock-tests / benchmarks
//! (engine core)    (demo problems)
//! ```
//!
//! # Key types
//!
//! - [`SearchProblemV1`]: trait for problems that support search
//! - [`ActionPath`]: ordered action sequence, duplicated on every branch
//! - [`Fringe`]: open list ordered by estimated total cost, FIFO on ties
//! - [`AStarSearch`]: engine holding a problem, a policy, and the expansion counter
//! - [`SearchPolicyV1`]: expansion cap, fringe bound, dedup mode
//! - [`SearchReportV1`]: expansion-event log with termination reason
//!
//! [`SearchProblemV1`]: contract::SearchProblemV1
//! [`ActionPath`]: path::ActionPath
//! [`Fringe`]: frontier::Fringe
//! [`AStarSearch`]: search::AStarSearch
//! [`SearchPolicyV1`]: policy::SearchPolicyV1
//! [`SearchReportV1`]: report::SearchReportV1

#![forbid(unsafe_code)]

pub mod canon;
pub mod contract;
pub mod error;
pub mod frontier;
pub mod hash;
pub mod node;
pub mod path;
pub mod policy;
pub mod report;
pub mod search;
