//! Transfer Mediation
//!
//! Settles a collection between a robot and a store on the same cell. The
//! mediator sees only the two capability contracts, never concrete types.

use crate::components::{AgentCapability, SiteCapability};
use crate::rng::RandomSource;

/// Result of a single mediation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    /// The store paid out this amount
    Collected(i64),
    /// The store refused the robot
    Rejected(String),
    /// The store was empty
    Nothing,
}

impl TransferOutcome {
    pub fn collected(&self) -> i64 {
        match self {
            TransferOutcome::Collected(amount) => *amount,
            _ => 0,
        }
    }
}

/// Runs admission, request and payout, debiting `site_balance`.
///
/// The balance is debited by the final payout without clamping, so a casino
/// paying more than it holds ends up negative.
pub fn mediate(
    agent: &dyn AgentCapability,
    agent_balance: i64,
    site: &dyn SiteCapability,
    site_balance: &mut i64,
    rng: &mut dyn RandomSource,
) -> TransferOutcome {
    if *site_balance <= 0 {
        return TransferOutcome::Nothing;
    }
    if !site.accepts_agent(agent_balance, *site_balance) {
        let reason = site
            .rejection_message(agent_balance, *site_balance)
            .unwrap_or_else(|| "the store refused the robot".to_string());
        return TransferOutcome::Rejected(reason);
    }

    let requested = agent.collect_amount(*site_balance);
    let paid = site.process_transfer(requested, rng);
    *site_balance = site_balance.saturating_sub(paid);
    TransferOutcome::Collected(paid)
}
