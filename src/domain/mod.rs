pub mod board;
pub mod grouping;
pub mod sorting;
pub mod ticket;
pub mod user;

pub use board::BoardData;
pub use grouping::{group_tickets, EnrichedTicket, Group, GroupBy, GroupKey, GroupedTickets};
pub use sorting::{sort_tickets, SortBy};
pub use ticket::{Priority, Ticket, TicketId, TicketStatus};
pub use user::{Owner, User, UserDirectory, UserId};
