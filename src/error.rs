//! Error types for the Mars scraper.
//!
//! Only [`ScrapeError::Launch`] ever escapes [`crate::scrape::scrape_all`];
//! every other variant is caught by the extractor that produced it and turned
//! into a missing field.

use thiserror::Error;

/// Errors raised by the browser, fetch, and configuration layers.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Browser launch failed: {0}")]
    Launch(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Interaction failed: {0}")]
    Interaction(String),

    #[error("Failed to read page source: {0}")]
    PageSource(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ScrapeError>;
