//! # Boardview Core
//!
//! Grouping and sorting engine for a kanban-style ticket board view.
//!
//! Tickets and users fetched from a board API are partitioned into named
//! groups (by status, priority, or owner), enriched with their resolved
//! owner, and ordered within each group. The engine is pure and
//! synchronous; [`BoardView`] holds the current selection and republishes
//! the grouped result whenever the data or the selection changes.

pub mod config;
pub mod domain;
pub mod error;
pub mod source;
pub mod view;

// Re-export commonly used types
pub use config::ViewConfig;
pub use domain::{
    board::BoardData,
    grouping::{group_tickets, EnrichedTicket, Group, GroupBy, GroupKey, GroupedTickets},
    sorting::{sort_tickets, SortBy},
    ticket::{Priority, Ticket, TicketId, TicketStatus},
    user::{Owner, User, UserDirectory, UserId},
};
pub use error::{BoardError, Result};
pub use source::BoardSource;
pub use view::{recompute, BoardView, ViewSelection};
