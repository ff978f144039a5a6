//! Sample data fixtures for testing.
//!
//! This module provides ready-made schedules for other crates to use.
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // road-events = { path = "../road-events", features = ["test-fixtures"] }
//!
//! use road_events::fixtures;
//!
//! let schedule = fixtures::basic_schedule();
//! ```

use crate::Schedule;

/// One robot at 0, then one store at 5 with 100 tenges.
pub const BASIC_ROWS: &str = "[[2],[1,0],[2,5,100]]";

/// A robot, a store between robots, then a trailing robot.
pub const MULTI_DAY_ROWS: &str = "[[3],[1,5],[2,10,100],[1,15]]";

/// Robots and stores interleaved over five days.
pub const COMPLEX_ROWS: &str = "[[5],[1,0],[2,5,100],[1,10],[2,15,150],[1,20]]";

/// A store overwritten by a poorer one, then by a richer one.
pub const OVERWRITE_ROWS: &str = "[[4],[1,0],[2,5,100],[2,5,10],[2,5,200]]";

fn parse(rows: &str) -> Schedule {
    Schedule::from_json(rows)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}\nError: {}", rows, e))
}

/// Returns the two-day schedule from [`BASIC_ROWS`].
pub fn basic_schedule() -> Schedule {
    parse(BASIC_ROWS)
}

/// Returns the three-day schedule from [`MULTI_DAY_ROWS`].
pub fn multi_day_schedule() -> Schedule {
    parse(MULTI_DAY_ROWS)
}

/// Returns the five-day schedule from [`COMPLEX_ROWS`].
pub fn complex_schedule() -> Schedule {
    parse(COMPLEX_ROWS)
}

/// Returns the four-day schedule from [`OVERWRITE_ROWS`].
pub fn overwrite_schedule() -> Schedule {
    parse(OVERWRITE_ROWS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_parse() {
        assert_eq!(basic_schedule().len(), 2);
        assert_eq!(multi_day_schedule().len(), 3);
        assert_eq!(complex_schedule().declared_events, 5);
        assert_eq!(overwrite_schedule().max_position(), 5);
    }
}
