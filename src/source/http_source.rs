use crate::{
    domain::BoardData,
    error::{BoardError, Result},
    source::BoardSource,
};
use async_trait::async_trait;
use reqwest::Client;

/// Endpoint serving the ticket board assignment payload
pub const DEFAULT_API_URL: &str = "https://api.quicksell.co/v1/internal/frontend-assignment";

/// Fetches the board payload over HTTP
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[async_trait]
impl BoardSource for HttpSource {
    async fn fetch(&self) -> Result<BoardData> {
        let response = self.client.get(self.url.as_str()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BoardError::Fetch {
                status: Some(status.as_u16()),
                message: format!("Failed to fetch data from {}", self.url),
            });
        }

        let data: BoardData = response.json().await?;
        tracing::debug!(
            url = %self.url,
            tickets = data.tickets.len(),
            users = data.users.len(),
            "fetched board data"
        );
        Ok(data)
    }
}
