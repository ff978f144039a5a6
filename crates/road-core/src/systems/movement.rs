//! Movement Validation
//!
//! Decides whether a robot move may happen before anything is touched.
//! A move that passes validation always completes.

use tracing::debug;

use crate::components::{AgentCapability, Grid, SiteCapability};
use crate::error::RoadError;

/// A validated move, ready to execute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovePlan {
    pub from: usize,
    pub to: usize,
    pub meters: i64,
    /// Robot balance before the move
    pub balance: i64,
}

impl MovePlan {
    pub fn distance(&self) -> i64 {
        self.meters.abs()
    }
}

/// Checks bounds, occupancy, the robot's direction rules and the
/// destination store's admission rule, in that order.
///
/// Takes the grid mutably only because a blocked neverback robot remembers
/// the attempt for its rejection message.
pub fn validate_move(grid: &mut Grid, from: i64, meters: i64) -> Result<MovePlan, RoadError> {
    let from = grid.index(from)?;
    let length = grid.length();

    let agent = grid
        .agent_mut(from)
        .ok_or(RoadError::NoAgentAtSource { position: from })?;

    if !agent.variant.is_movement_allowed(meters) {
        let reason = agent
            .variant
            .rejection_message()
            .unwrap_or_else(|| format!("robot {} refused to move {} cells", agent.id, meters));
        return Err(RoadError::MovementBlocked { reason });
    }
    let balance = agent.tenges;

    // Saturates so a huge request still lands off the road
    let target = (from as i64).saturating_add(meters);
    if target < 0 || target > length as i64 {
        return Err(RoadError::OutOfBounds {
            from,
            meters,
            target,
        });
    }
    let to = target as usize;

    if grid.agent(to).is_some() {
        return Err(RoadError::CellOccupied {
            position: to,
            occupant: "robot",
        });
    }

    if let Some(site) = grid.site(to).filter(|s| s.is_active()) {
        if !site.variant.accepts_agent(balance, site.tenges) {
            let reason = site
                .variant
                .rejection_message(balance, site.tenges)
                .unwrap_or_else(|| format!("store {} refused the robot", site.id));
            return Err(RoadError::TransferRejected { reason });
        }
    }

    debug!(from, to, meters, "move validated");
    Ok(MovePlan {
        from,
        to,
        meters,
        balance,
    })
}
