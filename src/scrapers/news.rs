//! NASA Mars news scraper.
//!
//! Reads the headline and teaser of the newest item on the
//! [Mars news listing](https://mars.nasa.gov/news/). The list is rendered by
//! JavaScript, hence the browser session.

use crate::browser::{BrowserSession, Locator};
use crate::config::NewsConfig;
use crate::utils::{element_text, selector, truncate_for_log};
use scraper::Html;
use tracing::{debug, info, instrument, warn};

/// Scrape the latest news title and teaser paragraph.
///
/// Returns `(None, None)` when the page fails to load or its markup no longer
/// has a slide with both a title and a teaser.
#[instrument(level = "info", skip_all, fields(url = %config.url))]
pub async fn mars_news<S: BrowserSession>(
    session: &mut S,
    config: &NewsConfig,
) -> (Option<String>, Option<String>) {
    if let Err(e) = session.visit(&config.url).await {
        warn!(error = %e, "Could not load news page");
        return (None, None);
    }

    let slide = Locator::Css(config.slide_selector.clone());
    if !session.wait_for(&slide, config.wait()).await {
        debug!("News list did not render within the wait; parsing anyway");
    }

    let html = match session.html().await {
        Ok(html) => html,
        Err(e) => {
            warn!(error = %e, "Could not read news page");
            return (None, None);
        }
    };

    match parse_news(&html, config) {
        Some((title, teaser)) => {
            info!(%title, "Scraped latest news");
            (Some(title), Some(teaser))
        }
        None => {
            warn!("News page has no slide with a title and teaser");
            debug!(html = %truncate_for_log(&html, 500), "Unmatched news markup");
            (None, None)
        }
    }
}

/// Title and teaser of the first slide in `html`.
pub fn parse_news(html: &str, config: &NewsConfig) -> Option<(String, String)> {
    let document = Html::parse_document(html);
    let slide = document.select(&selector(&config.slide_selector)?).next()?;

    let title = slide
        .select(&selector(&config.title_selector)?)
        .next()
        .and_then(element_text)?;
    let teaser = slide
        .select(&selector(&config.teaser_selector)?)
        .next()
        .and_then(element_text)?;

    Some((title, teaser))
}
