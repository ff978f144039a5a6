//! Shared notice, schedule and snapshot types for the silk road simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is a dependency for the engine and for anything that renders it.

pub mod notice;
pub mod schedule;
pub mod snapshot;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

// Re-export notice types
pub use notice::{EntityRef, MessageLevel, RoadNotice};

// Re-export schedule types
pub use schedule::{Schedule, ScheduleError, ScheduleEvent, AGENT_EVENT, SITE_EVENT};

// Re-export snapshot types
pub use snapshot::{generate_snapshot_id, AgentSnapshot, CellProfit, RoadSnapshot, SiteSnapshot};
