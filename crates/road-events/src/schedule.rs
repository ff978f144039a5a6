//! Day Schedule
//!
//! The scripted list of placements consumed one per day. On disk a schedule
//! is a JSON array of integer rows:
//!
//! ```text
//! [[3], [1, 0], [2, 5, 100], [1, 20]]
//!  ^^^  ^^^^^^  ^^^^^^^^^^^
//!  |    |       store at cell 5 holding 100 tenges
//!  |    robot at cell 0
//!  number of events (days)
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Row type tag for a robot placement
pub const AGENT_EVENT: i64 = 1;
/// Row type tag for a store placement
pub const SITE_EVENT: i64 = 2;

/// Errors raised while reading a schedule
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("schedule has no header row")]
    MissingHeader,
    #[error("header declares a negative event count: {0}")]
    NegativeEventCount(i64),
    #[error("header declares {declared} events but only {found} rows follow")]
    MissingEvents { declared: usize, found: usize },
    #[error("row {row}: expected at least {expected} values, found {found}")]
    ShortRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("row {row}: unknown event type {kind}")]
    UnknownEventType { row: usize, kind: i64 },
    #[error("row {row}: negative position {position}")]
    NegativePosition { row: usize, position: i64 },
    #[error("could not read schedule: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse schedule JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One scripted placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScheduleEvent {
    /// Introduce a normal robot at a cell
    Agent { position: usize },
    /// Introduce a normal store at a cell with an initial balance
    Site { position: usize, balance: i64 },
}

impl ScheduleEvent {
    pub fn position(&self) -> usize {
        match self {
            ScheduleEvent::Agent { position } | ScheduleEvent::Site { position, .. } => *position,
        }
    }
}

/// An ordered list of placement events with a declared day count
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Number of days the header declares (parsing keeps it within `events.len()`)
    pub declared_events: usize,
    pub events: Vec<ScheduleEvent>,
}

impl Schedule {
    /// Parses the row form: header row first, then one row per event.
    pub fn from_rows(rows: &[Vec<i64>]) -> Result<Self, ScheduleError> {
        let header = rows
            .first()
            .filter(|r| !r.is_empty())
            .ok_or(ScheduleError::MissingHeader)?;
        if header[0] < 0 {
            return Err(ScheduleError::NegativeEventCount(header[0]));
        }

        let mut events = Vec::with_capacity(rows.len() - 1);
        for (row, values) in rows.iter().enumerate().skip(1) {
            events.push(parse_row(row, values)?);
        }

        // Every declared day needs its row
        let declared_events = usize::try_from(header[0]).unwrap_or(usize::MAX);
        if declared_events > events.len() {
            return Err(ScheduleError::MissingEvents {
                declared: declared_events,
                found: events.len(),
            });
        }

        Ok(Self {
            declared_events,
            events,
        })
    }

    /// Parses a JSON array of integer rows.
    pub fn from_json(content: &str) -> Result<Self, ScheduleError> {
        let rows: Vec<Vec<i64>> = serde_json::from_str(content)?;
        Self::from_rows(&rows)
    }

    /// Loads a schedule from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ScheduleError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Event applied on a given day (days start at 1).
    pub fn event_for_day(&self, day: usize) -> Option<&ScheduleEvent> {
        day.checked_sub(1).and_then(|i| self.events.get(i))
    }

    /// The first `limit` events (fewer if the schedule is shorter).
    pub fn prefix(&self, limit: usize) -> &[ScheduleEvent] {
        &self.events[..limit.min(self.events.len())]
    }

    /// Largest position any event refers to.
    pub fn max_position(&self) -> usize {
        self.events
            .iter()
            .map(ScheduleEvent::position)
            .max()
            .unwrap_or(0)
    }

    /// Road length needed to hold every event (never below 1).
    pub fn road_length(&self) -> usize {
        self.max_position().max(1)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

fn parse_row(row: usize, values: &[i64]) -> Result<ScheduleEvent, ScheduleError> {
    let short = |expected: usize| ScheduleError::ShortRow {
        row,
        expected,
        found: values.len(),
    };

    let kind = *values.first().ok_or_else(|| short(2))?;
    let position = *values.get(1).ok_or_else(|| short(2))?;
    if position < 0 {
        return Err(ScheduleError::NegativePosition { row, position });
    }
    let position = position as usize;

    match kind {
        AGENT_EVENT => Ok(ScheduleEvent::Agent { position }),
        SITE_EVENT => {
            let balance = *values.get(2).ok_or_else(|| short(3))?;
            Ok(ScheduleEvent::Site { position, balance })
        }
        kind => Err(ScheduleError::UnknownEventType { row, kind }),
    }
}
