//! Road Systems
//!
//! Movement validation, transfer mediation, greedy assignment and the
//! contest solver. None of these own state; the engine drives them.

pub mod contest;
pub mod movement;
pub mod optimizer;
pub mod transfer;

pub use contest::{ContestSolver, ReplayOutcome};
pub use movement::{validate_move, MovePlan};
pub use optimizer::{estimate_max_profit, Assignment, GreedyAssignment};
pub use transfer::{mediate, TransferOutcome};
