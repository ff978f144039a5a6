//! Command Errors
//!
//! Every public command either completes or fails with one of these, leaving
//! the road untouched.

use thiserror::Error;

/// Recoverable failure of a single command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoadError {
    /// Position outside `[0, length]`
    #[error("invalid cell index {position} (road has cells 0..={length})")]
    InvalidIndex { position: i64, length: usize },

    /// Placement or destination conflict
    #[error("cell {position} already holds a {occupant}")]
    CellOccupied {
        position: usize,
        occupant: &'static str,
    },

    /// No free cell left for a store that picks its own cell
    #[error("no free cell available for an autonomous store")]
    NoCapacity,

    /// Unrecognized variant name
    #[error("unknown {entity} type '{name}' (valid types: {valid})")]
    UnknownVariant {
        entity: &'static str,
        name: String,
        valid: &'static str,
    },

    /// Move requested from an empty cell
    #[error("no robot at cell {position}")]
    NoAgentAtSource { position: usize },

    /// Move target outside the road
    #[error("cannot move from {from} by {meters}: target {target} is off the road")]
    OutOfBounds { from: usize, meters: i64, target: i64 },

    /// The robot refused the move
    #[error("movement blocked: {reason}")]
    MovementBlocked { reason: String },

    /// The store refused the robot
    #[error("robot rejected: {reason}")]
    TransferRejected { reason: String },

    /// The simulation was finished and accepts no more commands
    #[error("simulation already finished")]
    Finished,
}

impl RoadError {
    /// Short title used when the error is shown to a user.
    pub fn title(&self) -> &'static str {
        match self {
            RoadError::InvalidIndex { .. } => "Invalid cell",
            RoadError::CellOccupied { .. } => "Cell occupied",
            RoadError::NoCapacity => "No space",
            RoadError::UnknownVariant { .. } => "Invalid type",
            RoadError::NoAgentAtSource { .. } | RoadError::OutOfBounds { .. } => "Movement error",
            RoadError::MovementBlocked { .. } => "Movement blocked",
            RoadError::TransferRejected { .. } => "Robot rejected",
            RoadError::Finished => "Simulation finished",
        }
    }
}
