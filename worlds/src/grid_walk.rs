//! `GridWalk`: an agent moving in unit steps on a continuous plane.
//!
//! Each state carries the agent position and the goal position. The agent
//! may step one unit in any of `directions` evenly spaced headings
//! (eight by default: the four axes plus the diagonals), each at cost 1.
//! A state is a goal when the agent is within `GOAL_TOLERANCE` of the goal
//! on both axes.

use std::f64::consts::TAU;

use astar_search::contract::SearchProblemV1;
use astar_search::node::Successor;

/// Per-axis distance at which the agent counts as having arrived.
pub const GOAL_TOLERANCE: f64 = 0.5;

/// Positions are snapped to this resolution for state identity.
const IDENTITY_RESOLUTION: f64 = 1e-6;

/// Agent and goal positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridState {
    pub agent_x: f64,
    pub agent_y: f64,
    pub goal_x: f64,
    pub goal_y: f64,
}

impl GridState {
    #[must_use]
    pub fn new(agent: (f64, f64), goal: (f64, f64)) -> Self {
        Self {
            agent_x: agent.0,
            agent_y: agent.1,
            goal_x: goal.0,
            goal_y: goal.1,
        }
    }

    /// Straight-line distance from the agent to the goal.
    #[must_use]
    pub fn distance_to_goal(&self) -> f64 {
        (self.goal_x - self.agent_x).hypot(self.goal_y - self.agent_y)
    }
}

/// A unit step, expressed as the offset it adds to the agent position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub x_diff: f64,
    pub y_diff: f64,
}

impl Step {
    /// Unit step along `heading` radians (0 = +x, counter-clockwise).
    #[must_use]
    pub fn heading(heading: f64) -> Self {
        let (sin, cos) = heading.sin_cos();
        Self {
            x_diff: cos,
            y_diff: sin,
        }
    }
}

/// Unit-step movement world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridWalk {
    directions: u32,
}

impl GridWalk {
    /// Eight headings: axes and diagonals.
    #[must_use]
    pub fn eight_way() -> Self {
        Self { directions: 8 }
    }

    /// Four headings: right, up, left, down.
    #[must_use]
    pub fn four_way() -> Self {
        Self { directions: 4 }
    }

    /// `directions` evenly spaced headings starting at +x (minimum 1).
    #[must_use]
    pub fn with_directions(directions: u32) -> Self {
        Self {
            directions: directions.max(1),
        }
    }

    #[must_use]
    pub fn directions(&self) -> u32 {
        self.directions
    }

    /// The steps offered from every state, in enumeration order.
    #[must_use]
    pub fn steps(&self) -> Vec<Step> {
        (0..self.directions)
            .map(|i| Step::heading(TAU * f64::from(i) / f64::from(self.directions)))
            .collect()
    }
}

impl Default for GridWalk {
    fn default() -> Self {
        Self::eight_way()
    }
}

impl SearchProblemV1 for GridWalk {
    type State = GridState;
    type Action = Step;

    fn problem_id(&self) -> &str {
        "grid_walk"
    }

    fn successors(&self, state: &GridState) -> Vec<Successor<GridState, Step>> {
        self.steps()
            .into_iter()
            .map(|step| self.successor(state, step, 1.0))
            .collect()
    }

    fn transition(&self, state: &GridState, action: &Step) -> GridState {
        GridState {
            agent_x: state.agent_x + action.x_diff,
            agent_y: state.agent_y + action.y_diff,
            ..*state
        }
    }

    fn is_goal(&self, state: &GridState) -> bool {
        (state.agent_x - state.goal_x).abs() < GOAL_TOLERANCE
            && (state.agent_y - state.goal_y).abs() < GOAL_TOLERANCE
    }

    /// Straight-line distance to the goal point. Every step moves the agent
    /// exactly one unit at cost 1, so this never exceeds the remaining cost
    /// of reaching that point.
    fn estimate_cost_to_goal(&self, state: &GridState) -> f64 {
        state.distance_to_goal()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn state_identity(&self, state: &GridState) -> Option<Vec<u8>> {
        let mut bytes = Vec::with_capacity(32);
        for v in [state.agent_x, state.agent_y, state.goal_x, state.goal_y] {
            let snapped = (v / IDENTITY_RESOLUTION).round() as i64;
            bytes.extend_from_slice(&snapped.to_le_bytes());
        }
        Some(bytes)
    }
}
