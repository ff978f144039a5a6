//! Robot Components
//!
//! The robot record and its variants: normal, tender (takes half) and
//! neverback (keeps moving in one direction).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::capability::AgentCapability;
use crate::error::RoadError;

/// Unique identifier for a robot
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub String);

impl AgentId {
    pub fn from_sequence(sequence: u64) -> Self {
        Self(format!("robot_{:04}", sequence))
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Direction a neverback robot is committed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionLock {
    #[default]
    Unset,
    Positive,
    Negative,
}

impl DirectionLock {
    /// Lock implied by a move of `delta` cells; zero does not lock.
    pub fn from_delta(delta: i64) -> Self {
        match delta.signum() {
            1 => DirectionLock::Positive,
            -1 => DirectionLock::Negative,
            _ => DirectionLock::Unset,
        }
    }

    pub fn permits(self, delta: i64) -> bool {
        match self {
            DirectionLock::Unset => true,
            DirectionLock::Positive => delta > 0,
            DirectionLock::Negative => delta < 0,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            DirectionLock::Positive => "positive",
            DirectionLock::Negative => "negative",
            DirectionLock::Unset => "no",
        }
    }
}

/// Behavioral subtype of a robot
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum AgentVariant {
    /// Takes everything, moves anywhere
    #[default]
    Normal,
    /// Takes half of what a store holds
    Tender,
    /// Never reverses direction once it has moved
    Neverback {
        lock: DirectionLock,
        last_rejected: Option<i64>,
    },
}

impl AgentVariant {
    /// Names accepted by [`AgentVariant::from_str`].
    pub const NAMES: &'static str = "normal, tender, neverback";

    pub fn neverback() -> Self {
        AgentVariant::Neverback {
            lock: DirectionLock::Unset,
            last_rejected: None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AgentVariant::Normal => "normal",
            AgentVariant::Tender => "tender",
            AgentVariant::Neverback { .. } => "neverback",
        }
    }

    /// Current direction lock (always unset for non-directional variants).
    pub fn lock(&self) -> DirectionLock {
        match self {
            AgentVariant::Neverback { lock, .. } => *lock,
            _ => DirectionLock::Unset,
        }
    }
}

impl FromStr for AgentVariant {
    type Err = RoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(AgentVariant::Normal),
            "tender" => Ok(AgentVariant::Tender),
            "neverback" => Ok(AgentVariant::neverback()),
            _ => Err(RoadError::UnknownVariant {
                entity: "robot",
                name: s.to_string(),
                valid: Self::NAMES,
            }),
        }
    }
}

impl AgentCapability for AgentVariant {
    fn is_movement_allowed(&mut self, delta: i64) -> bool {
        match self {
            AgentVariant::Neverback {
                lock,
                last_rejected,
            } => {
                let allowed = lock.permits(delta);
                if !allowed {
                    *last_rejected = Some(delta);
                }
                allowed
            }
            _ => true,
        }
    }

    fn collect_amount(&self, available: i64) -> i64 {
        match self {
            AgentVariant::Tender => available.div_euclid(2),
            _ => available,
        }
    }

    fn rejection_message(&self) -> Option<String> {
        let AgentVariant::Neverback {
            lock,
            last_rejected: Some(attempt),
        } = self
        else {
            return None;
        };
        let attempted = match attempt.signum() {
            1 => "positive",
            -1 => "negative",
            _ => "zero",
        };
        Some(format!(
            "This neverback robot is locked in the {} direction and can only move \
             that way. Attempted: {} ({})",
            lock.describe(),
            attempted,
            attempt
        ))
    }

    fn lock_direction(&mut self, delta: i64) {
        if let AgentVariant::Neverback { lock, .. } = self {
            if *lock == DirectionLock::Unset {
                *lock = DirectionLock::from_delta(delta);
            }
        }
    }

    fn reset_state(&mut self) {
        if let AgentVariant::Neverback {
            lock,
            last_rejected,
        } = self
        {
            *lock = DirectionLock::Unset;
            *last_rejected = None;
        }
    }
}

/// A robot on the road
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    /// Current cell
    pub position: usize,
    /// Accumulated currency
    pub tenges: i64,
    /// Cell the robot was first placed on
    pub origin: Option<usize>,
    pub variant: AgentVariant,
}

impl Agent {
    pub fn new(id: AgentId, variant: AgentVariant, position: usize) -> Self {
        Self {
            id,
            position,
            tenges: 0,
            origin: Some(position),
            variant,
        }
    }

    /// Cell a return sends the robot to.
    pub fn home(&self) -> usize {
        self.origin.unwrap_or(self.position)
    }

    pub fn is_home(&self) -> bool {
        self.home() == self.position
    }

    /// Cells between the robot and its origin.
    pub fn displacement(&self) -> usize {
        self.home().abs_diff(self.position)
    }
}
