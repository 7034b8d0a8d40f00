use crate::domain::user::UserId;
use crate::error::BoardError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Identifier as delivered by the board API, either a string or an integer
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

/// Unique identifier for a ticket (e.g., CAM-1)
///
/// Integer identifiers are normalized to their decimal string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawId")]
pub struct TicketId(String);

impl TicketId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<RawId> for TicketId {
    fn from(raw: RawId) -> Self {
        Self(raw.into())
    }
}

impl From<u32> for TicketId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for TicketId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a ticket
///
/// Deserialization goes through `FromStr`, so payload values are matched
/// case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum TicketStatus {
    Backlog,
    Todo,
    #[serde(rename = "In progress")]
    InProgress,
    Done,
    Canceled,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Backlog => "Backlog",
            Self::Todo => "Todo",
            Self::InProgress => "In progress",
            Self::Done => "Done",
            Self::Canceled => "Canceled",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "backlog" => Ok(Self::Backlog),
            "todo" => Ok(Self::Todo),
            "in progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            "canceled" | "cancelled" => Ok(Self::Canceled),
            _ => Err(format!(
                "Invalid status '{}'. Valid statuses: Backlog, Todo, In progress, Done, Canceled",
                s
            )),
        }
    }
}

impl TryFrom<String> for TicketStatus {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Severity level of a ticket, from 0 (no priority) to 4 (urgent)
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    pub const NONE: Priority = Priority(0);
    pub const LOW: Priority = Priority(1);
    pub const MEDIUM: Priority = Priority(2);
    pub const HIGH: Priority = Priority(3);
    pub const URGENT: Priority = Priority(4);

    pub const MAX_LEVEL: u8 = 4;

    pub fn level(&self) -> u8 {
        self.0
    }

    /// Human-readable name of the level
    pub fn label(&self) -> &'static str {
        match self.0 {
            0 => "No priority",
            1 => "Low",
            2 => "Medium",
            3 => "High",
            _ => "Urgent",
        }
    }
}

impl TryFrom<u8> for Priority {
    type Error = BoardError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        if level <= Self::MAX_LEVEL {
            Ok(Self(level))
        } else {
            Err(BoardError::InvalidPriority(level))
        }
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A ticket as fetched from the board API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag: Vec<String>,
    pub status: TicketStatus,
    pub priority: Priority,
    #[serde(default)]
    pub user_id: Option<UserId>,
}

impl Ticket {
    /// Creates a new unowned `Todo` ticket with no priority
    pub fn new(id: impl Into<TicketId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tag: Vec::new(),
            status: TicketStatus::Todo,
            priority: Priority::NONE,
            user_id: None,
        }
    }

    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_owner(mut self, user_id: impl Into<UserId>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag.push(tag.into());
        self
    }
}
