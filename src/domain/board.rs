use crate::domain::ticket::Ticket;
use crate::domain::user::{User, UserDirectory};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Payload delivered by a board source: `{ "tickets": [...], "users": [...] }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardData {
    #[serde(default)]
    pub tickets: Vec<Ticket>,
    #[serde(default)]
    pub users: Vec<User>,
}

impl BoardData {
    pub fn new(tickets: Vec<Ticket>, users: Vec<User>) -> Self {
        Self { tickets, users }
    }

    /// Decodes a fetch payload.
    ///
    /// Decoding is all or nothing: a single ticket with an unknown status or
    /// a priority above 4 fails the whole payload.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Splits the payload into tickets and a user lookup
    pub fn into_parts(self) -> (Vec<Ticket>, UserDirectory) {
        (self.tickets, UserDirectory::new(self.users))
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty() && self.users.is_empty()
    }
}
