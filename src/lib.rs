//! # Mars Scrape
//!
//! Collects a snapshot of public facts about Mars into a single
//! [`MarsData`] record:
//!
//! - the latest NASA Mars news headline and teaser
//! - the JPL featured space image
//! - the space-facts.com fact sheet, rendered as an HTML table
//! - the USGS full-resolution image for each hemisphere
//!
//! ## Usage
//!
//! ```no_run
//! # async fn run() -> Result<(), mars_scrape::ScrapeError> {
//! let record = mars_scrape::scrape_all().await?;
//! println!("{}", record.facts.as_str());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! One browser session is opened and threaded through the scrapers in a fixed
//! order: news, featured image, facts (plain HTTP), hemispheres. Each scraper
//! swallows its own failures, so the record is always returned; only failing
//! to launch the browser is an error.

pub mod browser;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod outputs;
pub mod scrape;
pub mod scrapers;
pub mod tables;
pub mod utils;

#[cfg(test)]
mod testing;

pub use browser::{BrowserSession, ChromeSession, Locator, ScopedSession};
pub use config::ScrapeConfig;
pub use error::ScrapeError;
pub use fetch::{HttpFetcher, PageFetcher};
pub use models::{Facts, Hemisphere, MarsData};
pub use scrape::{scrape_all, scrape_all_with, scrape_with};
