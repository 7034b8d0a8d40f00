use crate::domain::sorting::{sort_tickets, SortBy};
use crate::domain::ticket::Ticket;
use crate::domain::user::{Owner, UserDirectory};
use crate::error::BoardError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::{fmt, str::FromStr};

/// Ticket field used to partition the board into groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum GroupBy {
    Status,
    Priority,
    Owner,
}

impl GroupBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupBy::Status => "status",
            GroupBy::Priority => "priority",
            GroupBy::Owner => "owner",
        }
    }
}

impl FromStr for GroupBy {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "status" => Ok(GroupBy::Status),
            "priority" => Ok(GroupBy::Priority),
            "owner" | "user" => Ok(GroupBy::Owner),
            _ => Err(BoardError::InvalidGroupBy(s.to_string())),
        }
    }
}

impl TryFrom<String> for GroupBy {
    type Error = BoardError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name of a group.
///
/// Keys are always strings: the status display name, the priority level
/// as a decimal digit, or the owner's name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(String);

impl GroupKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Derives the key of a ticket whose owner has already been resolved
    pub fn for_ticket(ticket: &Ticket, owner: &Owner, group_by: GroupBy) -> Self {
        match group_by {
            GroupBy::Status => Self(ticket.status.to_string()),
            GroupBy::Priority => Self(ticket.priority.to_string()),
            GroupBy::Owner => Self(owner.display_name().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

/// A ticket copy carrying its resolved owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedTicket {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub user: Owner,
}

impl EnrichedTicket {
    pub fn new(ticket: Ticket, user: Owner) -> Self {
        Self { ticket, user }
    }
}

/// Tickets sharing one group key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub key: GroupKey,
    pub tickets: Vec<EnrichedTicket>,
}

impl Group {
    fn new(key: GroupKey) -> Self {
        Self {
            key,
            tickets: Vec::new(),
        }
    }

    /// Number of tickets in the group
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

/// Groups in the order their first ticket was seen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedTickets {
    groups: Vec<Group>,
    index: HashMap<GroupKey, usize>,
}

impl GroupedTickets {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, key: GroupKey, ticket: EnrichedTicket) {
        let pos = match self.index.get(&key) {
            Some(&pos) => pos,
            None => {
                self.groups.push(Group::new(key.clone()));
                self.index.insert(key, self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[pos].tickets.push(ticket);
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn get(&self, key: &str) -> Option<&Group> {
        self.index
            .get(&GroupKey::from(key))
            .map(|&pos| &self.groups[pos])
    }

    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.groups.iter().map(|g| &g.key)
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of tickets across all groups
    pub fn ticket_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    /// Orders every group independently; groups themselves keep their order
    pub fn sorted(mut self, sort_by: Option<SortBy>) -> Self {
        for group in &mut self.groups {
            sort_tickets(&mut group.tickets, sort_by);
        }
        self
    }
}

impl Serialize for GroupedTickets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.key, &group.tickets)?;
        }
        map.end()
    }
}

/// Partitions tickets into groups keyed by `group_by`.
///
/// Each ticket is copied, enriched with its resolved owner, and appended to
/// its group in source order. Unresolved owners are not an error; under
/// `GroupBy::Owner` they land in the "Unknown User" group.
pub fn group_tickets(
    tickets: &[Ticket],
    users: &UserDirectory,
    group_by: GroupBy,
) -> GroupedTickets {
    let mut grouped = GroupedTickets::new();

    for ticket in tickets {
        let owner = users.resolve(ticket.user_id.as_ref());
        let key = GroupKey::for_ticket(ticket, &owner, group_by);
        grouped.push(key, EnrichedTicket::new(ticket.clone(), owner));
    }

    grouped
}
