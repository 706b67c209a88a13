//! Plain HTTP page fetching for pages that need no browser.

use crate::error::{Result, ScrapeError};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

/// Something that can return the body of a page.
pub trait PageFetcher {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// [`PageFetcher`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "info", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Fetch(format!("{url} returned {status}")));
        }
        let body = response.text().await?;
        debug!(bytes = body.len(), "Fetched page");
        Ok(body)
    }
}
