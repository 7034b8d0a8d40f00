//! Display orchestration for the board.
//!
//! A [`BoardView`] owns the latest fetched tickets and users together with
//! the current grouping and sorting selection. Any change to either
//! recomputes the grouped result from scratch and publishes it as a new
//! `Arc`, so readers only ever hold a complete result.

use crate::{
    config::ViewConfig,
    domain::{group_tickets, BoardData, GroupBy, GroupedTickets, SortBy, Ticket, UserDirectory},
    error::Result,
    source::BoardSource,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

/// Current grouping and sorting choice of a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSelection {
    pub group_by: GroupBy,
    /// `None` keeps tickets in source order
    pub sort_by: Option<SortBy>,
}

impl Default for ViewSelection {
    fn default() -> Self {
        Self {
            group_by: GroupBy::Status,
            sort_by: Some(SortBy::Title),
        }
    }
}

/// Groups then sorts every group. Pure: equal inputs give equal results.
pub fn recompute(
    tickets: &[Ticket],
    users: &UserDirectory,
    selection: ViewSelection,
) -> GroupedTickets {
    group_tickets(tickets, users, selection.group_by).sorted(selection.sort_by)
}

#[derive(Debug)]
pub struct BoardView {
    tickets: Vec<Ticket>,
    users: UserDirectory,
    selection: ViewSelection,
    published: watch::Sender<Arc<GroupedTickets>>,
}

impl BoardView {
    /// Creates an empty view grouped by status and sorted by title
    pub fn new() -> Self {
        Self::with_selection(ViewSelection::default())
    }

    pub fn with_selection(selection: ViewSelection) -> Self {
        let (published, _) = watch::channel(Arc::new(GroupedTickets::new()));
        Self {
            tickets: Vec::new(),
            users: UserDirectory::default(),
            selection,
            published,
        }
    }

    pub fn from_config(config: &ViewConfig) -> Result<Self> {
        Ok(Self::with_selection(config.selection()?))
    }

    /// Latest published result
    pub fn grouped(&self) -> Arc<GroupedTickets> {
        self.published.borrow().clone()
    }

    /// Receiver notified every time a new result is published
    pub fn subscribe(&self) -> watch::Receiver<Arc<GroupedTickets>> {
        self.published.subscribe()
    }

    pub fn selection(&self) -> ViewSelection {
        self.selection
    }

    pub fn group_by(&self) -> GroupBy {
        self.selection.group_by
    }

    pub fn sort_by(&self) -> Option<SortBy> {
        self.selection.sort_by
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    pub fn set_group_by(&mut self, group_by: GroupBy) {
        if self.selection.group_by != group_by {
            self.selection.group_by = group_by;
            self.recompute();
        }
    }

    pub fn set_sort_by(&mut self, sort_by: Option<SortBy>) {
        if self.selection.sort_by != sort_by {
            self.selection.sort_by = sort_by;
            self.recompute();
        }
    }

    /// Applies a group selector from a UI control.
    ///
    /// An unknown selector is returned as an error and leaves the view as it was.
    pub fn set_group_by_selector(&mut self, selector: &str) -> Result<()> {
        let group_by = selector.parse()?;
        self.set_group_by(group_by);
        Ok(())
    }

    /// Applies a sort selector from a UI control. Unknown selectors keep source order.
    pub fn set_sort_by_selector(&mut self, selector: &str) {
        self.set_sort_by(SortBy::from_selector(selector));
    }

    /// Replaces tickets and users with freshly fetched data
    pub fn load(&mut self, data: BoardData) {
        let (tickets, users) = data.into_parts();
        tracing::info!(
            tickets = tickets.len(),
            users = users.len(),
            "loaded board data"
        );
        self.tickets = tickets;
        self.users = users;
        self.recompute();
    }

    /// Fetches from `source` and loads the result.
    ///
    /// On failure the previous data and result stay published.
    pub async fn refresh(&mut self, source: &dyn BoardSource) -> Result<()> {
        match source.fetch().await {
            Ok(data) => {
                self.load(data);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "fetch failed, keeping previous board data");
                Err(err)
            }
        }
    }

    fn recompute(&mut self) {
        let grouped = recompute(&self.tickets, &self.users, self.selection);
        tracing::debug!(
            group_by = %self.selection.group_by,
            sort_by = self.selection.sort_by.map(|s| s.as_str()).unwrap_or("none"),
            groups = grouped.len(),
            tickets = grouped.ticket_count(),
            "recomputed board groups"
        );
        self.published.send_replace(Arc::new(grouped));
    }
}

impl Default for BoardView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Owner, Priority, TicketStatus, User};
    use crate::error::BoardError;
    use async_trait::async_trait;

    fn scenario() -> BoardData {
        BoardData::new(
            vec![
                Ticket::new("1", "B")
                    .with_status(TicketStatus::Todo)
                    .with_priority(Priority::MEDIUM)
                    .with_owner("10"),
                Ticket::new("2", "A")
                    .with_status(TicketStatus::Todo)
                    .with_priority(Priority::HIGH)
                    .with_owner("99"),
            ],
            vec![User::new("10", "Alice")],
        )
    }

    struct FailingSource;

    #[async_trait]
    impl BoardSource for FailingSource {
        async fn fetch(&self) -> Result<BoardData> {
            Err(BoardError::Fetch {
                status: Some(500),
                message: "Failed to fetch data".to_string(),
            })
        }
    }

    struct StaticSource(BoardData);

    #[async_trait]
    impl BoardSource for StaticSource {
        async fn fetch(&self) -> Result<BoardData> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_new_view_is_empty_with_defaults() {
        let view = BoardView::new();

        assert_eq!(view.group_by(), GroupBy::Status);
        assert_eq!(view.sort_by(), Some(SortBy::Title));
        assert!(view.grouped().is_empty());
    }

    #[test]
    fn test_load_groups_and_sorts() {
        let mut view = BoardView::new();
        view.load(scenario());

        let grouped = view.grouped();
        assert_eq!(grouped.len(), 1);

        let todo = grouped.get("Todo").unwrap();
        assert_eq!(todo.tickets[0].ticket.id.as_str(), "2");
        assert_eq!(todo.tickets[0].user, Owner::Unresolved);
        assert_eq!(todo.tickets[1].ticket.id.as_str(), "1");
        assert_eq!(todo.tickets[1].user.display_name(), "Alice");
    }

    #[test]
    fn test_switching_to_owner_grouping_keeps_ticket_count() {
        let mut view = BoardView::new();
        view.load(scenario());

        view.set_group_by(GroupBy::Owner);

        let grouped = view.grouped();
        assert_eq!(grouped.ticket_count(), 2);
        let keys: Vec<&str> = grouped.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["Alice", "Unknown User"]);
    }

    #[test]
    fn test_sort_by_priority() {
        let mut view = BoardView::new();
        view.load(scenario());

        view.set_sort_by(Some(SortBy::Priority));

        let grouped = view.grouped();
        let levels: Vec<u8> = grouped
            .get("Todo")
            .unwrap()
            .tickets
            .iter()
            .map(|t| t.ticket.priority.level())
            .collect();
        assert_eq!(levels, vec![3, 2]);
    }

    #[test]
    fn test_invalid_group_selector_leaves_view_unchanged() {
        let mut view = BoardView::new();
        view.load(scenario());
        let before = view.grouped();

        let err = view.set_group_by_selector("assignee").unwrap_err();

        assert!(matches!(err, BoardError::InvalidGroupBy(_)));
        assert_eq!(view.group_by(), GroupBy::Status);
        assert!(Arc::ptr_eq(&before, &view.grouped()));
    }

    #[test]
    fn test_group_selector_accepts_user_alias() {
        let mut view = BoardView::new();
        view.load(scenario());

        view.set_group_by_selector("user").unwrap();

        assert_eq!(view.group_by(), GroupBy::Owner);
    }

    #[test]
    fn test_unknown_sort_selector_keeps_source_order() {
        let mut view = BoardView::new();
        view.load(scenario());

        view.set_sort_by_selector("created");

        assert_eq!(view.sort_by(), None);
        let grouped = view.grouped();
        let ids: Vec<&str> = grouped
            .get("Todo")
            .unwrap()
            .tickets
            .iter()
            .map(|t| t.ticket.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_recompute_replaces_result_wholesale() {
        let mut view = BoardView::new();
        view.load(scenario());
        let first = view.grouped();

        view.set_group_by(GroupBy::Priority);

        let second = view.grouped();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first.get("Todo").unwrap().len(), 2);
        assert!(second.get("Todo").is_none());
    }

    #[test]
    fn test_subscribers_see_new_results() {
        let mut view = BoardView::new();
        let mut rx = view.subscribe();
        assert!(!rx.has_changed().unwrap());

        view.load(scenario());

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().ticket_count(), 2);
    }

    #[test]
    fn test_from_config() {
        let config = ViewConfig {
            group_by: "priority".to_string(),
            sort_by: "priority".to_string(),
        };
        let view = BoardView::from_config(&config).unwrap();
        assert_eq!(view.group_by(), GroupBy::Priority);

        let config = ViewConfig {
            group_by: "nope".to_string(),
            ..ViewConfig::default()
        };
        assert!(BoardView::from_config(&config).is_err());
    }

    #[test]
    fn test_selection_json_accepts_what_config_accepts() {
        let selection: ViewSelection =
            serde_json::from_str(r#"{"group_by": "Owner", "sort_by": "PRIORITY"}"#).unwrap();
        let config = ViewConfig {
            group_by: "Owner".to_string(),
            sort_by: "PRIORITY".to_string(),
        };

        assert_eq!(selection, config.selection().unwrap());
        let invalid = r#"{"group_by": "nope", "sort_by": null}"#;
        assert!(serde_json::from_str::<ViewSelection>(invalid).is_err());
    }

    #[test]
    fn test_recompute_is_pure() {
        let data = scenario();
        let users = UserDirectory::new(data.users.clone());
        let selection = ViewSelection {
            group_by: GroupBy::Owner,
            sort_by: Some(SortBy::Priority),
        };

        assert_eq!(
            recompute(&data.tickets, &users, selection),
            recompute(&data.tickets, &users, selection)
        );
    }

    #[tokio::test]
    async fn test_refresh_loads_source_data() {
        let mut view = BoardView::new();

        view.refresh(&StaticSource(scenario())).await.unwrap();

        assert_eq!(view.tickets().len(), 2);
        assert_eq!(view.grouped().ticket_count(), 2);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_result() {
        let mut view = BoardView::new();
        view.load(scenario());
        let before = view.grouped();

        let err = view.refresh(&FailingSource).await.unwrap_err();

        assert!(matches!(err, BoardError::Fetch { status: Some(500), .. }));
        assert_eq!(view.tickets().len(), 2);
        assert!(Arc::ptr_eq(&before, &view.grouped()));
    }

    #[tokio::test]
    async fn test_failed_first_refresh_leaves_empty_view() {
        let mut view = BoardView::new();

        assert!(view.refresh(&FailingSource).await.is_err());
        assert!(view.grouped().is_empty());
    }
}
