// Event reference module
// A previously created roster record the user right-clicked on

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of roster record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    #[default]
    Leave,
    Sickness,
    SessionFree,
    Compensation,
}

impl EventType {
    /// All event types, in the order the "create" submenu lists them.
    pub const ALL: [EventType; 4] = [
        EventType::Leave,
        EventType::Sickness,
        EventType::SessionFree,
        EventType::Compensation,
    ];

    /// Stable identifier, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Leave => "leave",
            EventType::Sickness => "sickness",
            EventType::SessionFree => "session-free",
            EventType::Compensation => "compensation",
        }
    }

    /// Human-readable label for menus and notifications
    pub fn label(&self) -> &'static str {
        match self {
            EventType::Leave => "Leave",
            EventType::Sickness => "Sickness",
            EventType::SessionFree => "Session-free",
            EventType::Compensation => "Compensation hours",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        EventType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == needle)
            .ok_or_else(|| format!("Unknown event type: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventRef {
    pub id: i64,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub owner_username: String,
}

impl EventRef {
    pub fn new(id: i64, event_type: EventType, owner_username: impl Into<String>) -> Self {
        Self {
            id,
            event_type,
            owner_username: owner_username.into(),
        }
    }
}
