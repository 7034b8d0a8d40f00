use crate::{domain::BoardData, error::Result};
use async_trait::async_trait;

#[cfg(feature = "file-source")]
pub mod file_source;

#[cfg(feature = "http-source")]
pub mod http_source;

/// Where the board view gets its tickets and users from
#[async_trait]
pub trait BoardSource: Send + Sync {
    /// Fetches the full ticket and user collections
    async fn fetch(&self) -> Result<BoardData>;
}
