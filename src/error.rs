use thiserror::Error;

pub type Result<T> = std::result::Result<T, BoardError>;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Invalid group selector '{0}'. Valid selectors: status, priority, owner")]
    InvalidGroupBy(String),

    #[error("Invalid sort selector '{0}'. Valid selectors: priority, title")]
    InvalidSortBy(String),

    #[error("Invalid priority {0}, expected a level between 0 and 4")]
    InvalidPriority(u8),

    #[error("Fetch failed{}: {message}", .status.map(|s| format!(" with status {s}")).unwrap_or_default())]
    Fetch {
        status: Option<u16>,
        message: String,
    },

    #[error("Board source not found: {0}")]
    SourceNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

#[cfg(feature = "http-source")]
impl From<reqwest::Error> for BoardError {
    fn from(err: reqwest::Error) -> Self {
        Self::Fetch {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}
