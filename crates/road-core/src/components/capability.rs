//! Entity Capabilities
//!
//! The behavior contracts robots and stores expose to the engine. Every
//! variant is one enum arm; the hooks below are the only place variants
//! differ, and the transfer mediator only ever talks to these traits.

use crate::rng::RandomSource;

/// Hooks a robot variant may override
pub trait AgentCapability {
    /// Whether a move of `delta` cells is admissible. May record the rejected
    /// attempt for [`AgentCapability::rejection_message`].
    fn is_movement_allowed(&mut self, delta: i64) -> bool {
        let _ = delta;
        true
    }

    /// How much of a store's `available` balance the robot takes.
    fn collect_amount(&self, available: i64) -> i64 {
        available
    }

    /// Gain credited for collecting `collected` after travelling `distance`.
    fn net_gain(&self, collected: i64, distance: i64) -> i64 {
        collected.saturating_sub(distance.saturating_abs())
    }

    /// Explanation for the last blocked move.
    fn rejection_message(&self) -> Option<String> {
        None
    }

    /// Records the direction of a completed move.
    fn lock_direction(&mut self, delta: i64) {
        let _ = delta;
    }

    /// Clears variant state (direction lock).
    fn reset_state(&mut self) {}
}

/// Hooks a store variant may override
pub trait SiteCapability {
    /// Whether a robot holding `agent_balance` may collect here.
    fn accepts_agent(&self, agent_balance: i64, site_balance: i64) -> bool {
        let _ = (agent_balance, site_balance);
        true
    }

    /// Explanation for a refused robot.
    fn rejection_message(&self, agent_balance: i64, site_balance: i64) -> Option<String> {
        let _ = (agent_balance, site_balance);
        None
    }

    /// Final amount paid out for a nominal `collected` amount.
    fn process_transfer(&self, collected: i64, rng: &mut dyn RandomSource) -> i64 {
        let _ = rng;
        collected
    }

    /// Whether placement ignores the requested cell and picks a random free one.
    fn needs_random_position(&self) -> bool {
        false
    }
}
