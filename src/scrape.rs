//! Runs every scraper in order and assembles the [`MarsData`] record.

use crate::browser::{BrowserSession, ChromeSession, ScopedSession};
use crate::config::ScrapeConfig;
use crate::error::Result;
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::models::MarsData;
use crate::scrapers::{facts, featured_image, hemispheres, news};
use chrono::Utc;
use tracing::{info, instrument};

/// Scrape everything with the default configuration.
pub async fn scrape_all() -> Result<MarsData> {
    scrape_all_with(&ScrapeConfig::default()).await
}

/// Launch Chrome and scrape everything.
///
/// Fails only if the HTTP client or the browser cannot be created; problems
/// with individual pages show up as missing fields in the record instead.
pub async fn scrape_all_with(config: &ScrapeConfig) -> Result<MarsData> {
    let fetcher = HttpFetcher::new()?;
    let session = ChromeSession::launch(&config.browser).await?;
    Ok(scrape_with(session, &fetcher, config).await)
}

/// Scrape everything using an already-open session.
///
/// Takes ownership of `session` and quits it before returning, including if a
/// scraper panics.
#[instrument(level = "info", skip_all)]
pub async fn scrape_with<S, F>(session: S, fetcher: &F, config: &ScrapeConfig) -> MarsData
where
    S: BrowserSession,
    F: PageFetcher,
{
    let mut session = ScopedSession::new(session);
    let started = std::time::Instant::now();

    let (news_title, news_paragraph) = news::mars_news(&mut *session, &config.news).await;
    let featured_image =
        featured_image::featured_image(&mut *session, &config.featured_image).await;
    let facts = facts::mars_facts(fetcher, &config.facts).await;
    let last_modified = Utc::now();
    let hemisphere = hemispheres::hemispheres(&mut *session, &config.hemispheres).await;

    session.close();

    let record = MarsData {
        news_title,
        news_paragraph,
        featured_image,
        facts,
        last_modified,
        hemisphere,
    };
    info!(
        elapsed = ?started.elapsed(),
        has_news = record.news_title.is_some(),
        has_featured_image = record.featured_image.is_some(),
        has_facts = !record.facts.is_error(),
        hemispheres = record.hemisphere.len(),
        "Scrape complete"
    );
    record
}
