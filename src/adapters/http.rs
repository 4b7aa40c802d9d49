use crate::core::{PageSource, PhotoFetcher};
use crate::utils::error::{Result, ScrapeError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::path::Path;
use std::time::Duration;

const USER_AGENT: &str = concat!("player-stats-scraper/", env!("CARGO_PKG_VERSION"));

/// Shared client for page and photo requests. No timeout unless configured.
pub fn build_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Fetches the stats page over plain HTTP. Pages that render their table
/// client-side come back without player cells; use `WebDriverPageSource`
/// or a saved snapshot through `FilePageSource` for those.
pub struct HttpPageSource {
    client: Client,
    url: String,
}

impl HttpPageSource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self) -> Result<String> {
        tracing::debug!("Requesting page: {}", self.url);
        let response = self.client.get(&self.url).send().await?;
        tracing::debug!("Page response status: {}", response.status());
        Ok(response.error_for_status()?.text().await?)
    }
}

pub struct HttpPhotoFetcher {
    client: Client,
}

impl HttpPhotoFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PhotoFetcher for HttpPhotoFetcher {
    async fn download(&self, url: &str, dest: &Path) -> Result<()> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ScrapeError::PhotoNotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ScrapeError::PhotoFetchError {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(dest, &bytes).await?;
        Ok(())
    }
}
