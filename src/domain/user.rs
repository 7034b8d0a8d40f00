use crate::domain::ticket::RawId;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt};

/// Unique identifier for a user (e.g., usr-1)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawId")]
pub struct UserId(String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<RawId> for UserId {
    fn from(raw: RawId) -> Self {
        Self(raw.into())
    }
}

impl From<u32> for UserId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub available: bool,
}

impl User {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            available: false,
        }
    }
}

/// Owner attached to a ticket after lookup
///
/// Serializes as the user record, or `null` when unresolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Owner {
    Resolved(User),
    Unresolved,
}

impl Owner {
    /// Group name used when the owner reference does not resolve
    pub const UNKNOWN_NAME: &'static str = "Unknown User";

    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Resolved(user) => Some(user),
            Self::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// Display name, falling back to "Unknown User"
    pub fn display_name(&self) -> &str {
        match self {
            Self::Resolved(user) => &user.name,
            Self::Unresolved => Self::UNKNOWN_NAME,
        }
    }
}

/// Read-only lookup over the fetched user collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDirectory {
    users: Vec<User>,
    index: HashMap<UserId, usize>,
}

impl UserDirectory {
    /// Builds the lookup; when ids repeat, the first record wins
    pub fn new(users: Vec<User>) -> Self {
        let mut index = HashMap::with_capacity(users.len());
        for (pos, user) in users.iter().enumerate() {
            index.entry(user.id.clone()).or_insert(pos);
        }
        Self { users, index }
    }

    pub fn get(&self, id: &UserId) -> Option<&User> {
        self.index.get(id).map(|&pos| &self.users[pos])
    }

    /// Resolves an owner reference. A missing or unknown id is `Owner::Unresolved`.
    pub fn resolve(&self, id: Option<&UserId>) -> Owner {
        id.and_then(|id| self.get(id))
            .cloned()
            .map(Owner::Resolved)
            .unwrap_or(Owner::Unresolved)
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl From<Vec<User>> for UserDirectory {
    fn from(users: Vec<User>) -> Self {
        Self::new(users)
    }
}
