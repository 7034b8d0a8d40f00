use crate::{
    domain::BoardData,
    error::{BoardError, Result},
    source::BoardSource,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Reads a saved fetch payload from a JSON file
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl BoardSource for FileSource {
    async fn fetch(&self) -> Result<BoardData> {
        if !self.path.exists() {
            return Err(BoardError::SourceNotFound(self.path.display().to_string()));
        }

        let contents = fs::read_to_string(&self.path).await?;
        let data = BoardData::from_json(&contents)?;

        tracing::debug!(
            path = %self.path.display(),
            tickets = data.tickets.len(),
            users = data.users.len(),
            "loaded board snapshot"
        );
        Ok(data)
    }
}
