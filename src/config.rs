use crate::{
    domain::{GroupBy, SortBy},
    error::{BoardError, Result},
    view::ViewSelection,
};
use serde::{Deserialize, Serialize};

/// Initial selector values for a board view, as raw strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub group_by: String,
    pub sort_by: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            group_by: GroupBy::Status.as_str().to_string(),
            sort_by: SortBy::Title.as_str().to_string(),
        }
    }
}

impl ViewConfig {
    pub const GROUP_BY_ENV: &'static str = "BOARD_GROUP_BY";
    pub const SORT_BY_ENV: &'static str = "BOARD_SORT_BY";

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| BoardError::ConfigError(e.to_string()))
    }

    /// Defaults overridden by `BOARD_GROUP_BY` / `BOARD_SORT_BY`
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(group_by) = lookup(Self::GROUP_BY_ENV) {
            self.group_by = group_by;
        }
        if let Some(sort_by) = lookup(Self::SORT_BY_ENV) {
            self.sort_by = sort_by;
        }
        self
    }

    /// Validates the selectors.
    ///
    /// An unknown group selector is rejected. An unknown sort selector
    /// means source order.
    pub fn selection(&self) -> Result<ViewSelection> {
        Ok(ViewSelection {
            group_by: self.group_by.parse()?,
            sort_by: SortBy::from_selector(&self.sort_by),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_selection() {
        let selection = ViewConfig::default().selection().unwrap();

        assert_eq!(selection.group_by, GroupBy::Status);
        assert_eq!(selection.sort_by, Some(SortBy::Title));
    }

    #[test]
    fn test_from_json_with_partial_fields() {
        let config = ViewConfig::from_json(r#"{"group_by": "user"}"#).unwrap();

        assert_eq!(config.sort_by, "title");
        assert_eq!(config.selection().unwrap().group_by, GroupBy::Owner);
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        let err = ViewConfig::from_json(r#"{"group_by": 3}"#).unwrap_err();
        assert!(matches!(err, BoardError::ConfigError(_)));
    }

    #[test]
    fn test_invalid_group_by_fails() {
        let config = ViewConfig {
            group_by: "assignee".to_string(),
            ..ViewConfig::default()
        };

        assert!(matches!(
            config.selection(),
            Err(BoardError::InvalidGroupBy(_))
        ));
    }

    #[test]
    fn test_invalid_sort_by_falls_back_to_source_order() {
        let config = ViewConfig {
            sort_by: "created".to_string(),
            ..ViewConfig::default()
        };

        assert_eq!(config.selection().unwrap().sort_by, None);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            (ViewConfig::GROUP_BY_ENV, "priority"),
            (ViewConfig::SORT_BY_ENV, "priority"),
        ]
        .into_iter()
        .collect();

        let config = ViewConfig::default().with_overrides(|key| vars.get(key).map(|v| v.to_string()));
        let selection = config.selection().unwrap();

        assert_eq!(selection.group_by, GroupBy::Priority);
        assert_eq!(selection.sort_by, Some(SortBy::Priority));
    }

    #[test]
    fn test_no_overrides_keeps_defaults() {
        let config = ViewConfig::default().with_overrides(|_| None);
        assert_eq!(config, ViewConfig::default());
    }
}
