use crate::domain::grouping::EnrichedTicket;
use crate::error::BoardError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Criteria available for ordering tickets within a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum SortBy {
    /// Highest severity first
    Priority,
    /// Ascending title, ignoring case and accents
    Title,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Priority => "priority",
            SortBy::Title => "title",
        }
    }

    /// Parses a selector coming from a UI control.
    ///
    /// Unrecognized selectors yield `None`, which leaves group order untouched.
    pub fn from_selector(selector: &str) -> Option<SortBy> {
        match selector.parse() {
            Ok(sort_by) => Some(sort_by),
            Err(err) => {
                tracing::warn!(selector, error = %err, "keeping source order for unknown sort selector");
                None
            }
        }
    }
}

impl FromStr for SortBy {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "priority" => Ok(SortBy::Priority),
            "title" => Ok(SortBy::Title),
            _ => Err(BoardError::InvalidSortBy(s.to_string())),
        }
    }
}

impl TryFrom<String> for SortBy {
    type Error = BoardError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Sorts one group's tickets in place.
///
/// The sort is stable, so ties keep their relative input order. `None`
/// leaves the slice as it is.
///
/// # Examples
/// ```
/// use boardview_core::domain::grouping::EnrichedTicket;
/// use boardview_core::domain::sorting::{sort_tickets, SortBy};
/// use boardview_core::domain::ticket::{Priority, Ticket};
/// use boardview_core::domain::user::Owner;
///
/// let mut tickets = vec![
///     EnrichedTicket::new(Ticket::new("1", "C").with_priority(Priority::LOW), Owner::Unresolved),
///     EnrichedTicket::new(Ticket::new("2", "A").with_priority(Priority::URGENT), Owner::Unresolved),
/// ];
///
/// sort_tickets(&mut tickets, Some(SortBy::Priority));
/// assert_eq!(tickets[0].ticket.id.as_str(), "2");
/// ```
pub fn sort_tickets(tickets: &mut [EnrichedTicket], sort_by: Option<SortBy>) {
    let Some(sort_by) = sort_by else {
        return;
    };

    tickets.sort_by(|a, b| match sort_by {
        SortBy::Priority => b.ticket.priority.cmp(&a.ticket.priority),
        SortBy::Title => compare_titles(&a.ticket.title, &b.ticket.title),
    });
}

/// Title order: accents and case are ignored first, so "Éclair" sorts
/// between "apple" and "zebra". Titles equal on that key fall back to a
/// lowercase comparison, which puts "elan" before "élan".
fn compare_titles(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| lowercase(a).cmp(lowercase(b)))
}

fn primary_key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn lowercase(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}
