//! Render Notices
//!
//! Outbound notifications from the engine to whatever draws the road.
//! The engine never reads anything back from a renderer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

/// A visual object the renderer keeps track of
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum EntityRef {
    /// The road itself (all cells)
    Road,
    /// The profit progress bar
    ProgressBar,
    /// A robot, by id
    Agent(String),
    /// A store, by id
    Site(String),
}

impl EntityRef {
    pub fn agent(id: impl Into<String>) -> Self {
        EntityRef::Agent(id.into())
    }

    pub fn site(id: impl Into<String>) -> Self {
        EntityRef::Site(id.into())
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Road => write!(f, "road"),
            EntityRef::ProgressBar => write!(f, "progress_bar"),
            EntityRef::Agent(id) => write!(f, "{}", id),
            EntityRef::Site(id) => write!(f, "{}", id),
        }
    }
}

/// A single outbound render notice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoadNotice {
    /// Show a message to the user
    Message {
        level: MessageLevel,
        title: String,
        body: String,
    },
    /// Make an object visible
    Show { entity: EntityRef },
    /// Hide an object
    Hide { entity: EntityRef },
    /// Place an object on a logical cell instantly
    Reposition { entity: EntityRef, cell: usize },
    /// Animate an object cell by cell
    Walk {
        entity: EntityRef,
        from: usize,
        to: usize,
    },
    /// Change the color of an object
    Recolor { entity: EntityRef, color: String },
    /// Current profit against the profit ceiling
    Progress { profit: i64, ceiling: i64 },
}

impl RoadNotice {
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        RoadNotice::Message {
            level: MessageLevel::Info,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn warning(title: impl Into<String>, body: impl Into<String>) -> Self {
        RoadNotice::Message {
            level: MessageLevel::Warning,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        RoadNotice::Message {
            level: MessageLevel::Error,
            title: title.into(),
            body: body.into(),
        }
    }

    /// Returns the entity this notice targets, if any.
    pub fn entity(&self) -> Option<&EntityRef> {
        match self {
            RoadNotice::Show { entity }
            | RoadNotice::Hide { entity }
            | RoadNotice::Reposition { entity, .. }
            | RoadNotice::Walk { entity, .. }
            | RoadNotice::Recolor { entity, .. } => Some(entity),
            RoadNotice::Message { .. } | RoadNotice::Progress { .. } => None,
        }
    }

    /// Returns true for user-facing messages.
    pub fn is_message(&self) -> bool {
        matches!(self, RoadNotice::Message { .. })
    }

    /// Parses a notice from a single JSONL line.
    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }

    /// Serializes the notice as a single JSONL line (no trailing newline).
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_tagging() {
        let notice = RoadNotice::Reposition {
            entity: EntityRef::agent("robot_0001"),
            cell: 7,
        };
        let json = notice.to_jsonl().unwrap();
        assert!(json.contains(r#""type":"reposition""#));
        assert!(json.contains(r#""kind":"agent""#));
        assert!(json.contains(r#""id":"robot_0001""#));

        let parsed = RoadNotice::from_jsonl(&json).unwrap();
        assert_eq!(parsed, notice);
    }

    #[test]
    fn test_unit_entity_serialization() {
        let json = serde_json::to_string(&EntityRef::ProgressBar).unwrap();
        assert_eq!(json, r#"{"kind":"progress_bar"}"#);
    }

    #[test]
    fn test_message_helpers() {
        let notice = RoadNotice::error("Error", "bad cell");
        assert!(notice.is_message());
        assert!(notice.entity().is_none());
        match notice {
            RoadNotice::Message { level, .. } => assert_eq!(level, MessageLevel::Error),
            other => panic!("unexpected notice {:?}", other),
        }
    }

    #[test]
    fn test_entity_accessor() {
        let notice = RoadNotice::Hide {
            entity: EntityRef::site("store_0003"),
        };
        assert_eq!(notice.entity(), Some(&EntityRef::site("store_0003")));
        assert_eq!(EntityRef::site("store_0003").to_string(), "store_0003");
    }
}
