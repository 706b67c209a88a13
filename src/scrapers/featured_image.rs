//! JPL featured space image scraper.
//!
//! The full-size image is only reachable through the gallery UI: open the
//! full image, then the "more info" lightbox, then read the large image's
//! `src`. Both controls come from configuration because they differ between
//! versions of the site.

use crate::browser::BrowserSession;
use crate::config::FeaturedImageConfig;
use crate::utils::{resolve_url, selector, truncate_for_log};
use scraper::Html;
use tracing::{debug, info, instrument, warn};

/// Scrape the absolute URL of the featured image.
///
/// Any break in the chain (page load, either click, the image element) yields
/// `None`.
#[instrument(level = "info", skip_all, fields(url = %config.url))]
pub async fn featured_image<S: BrowserSession>(
    session: &mut S,
    config: &FeaturedImageConfig,
) -> Option<String> {
    if let Err(e) = session.visit(&config.url).await {
        warn!(error = %e, "Could not load image gallery");
        return None;
    }

    if let Some(full_image) = &config.full_image {
        if let Err(e) = session.click(full_image).await {
            warn!(error = %e, "Could not open full image");
            return None;
        }
    }

    if let Some(more_info) = &config.more_info {
        session.wait_for(more_info, config.wait()).await;
        if let Err(e) = session.click(more_info).await {
            warn!(error = %e, "Could not open image details");
            return None;
        }
    }

    let html = match session.html().await {
        Ok(html) => html,
        Err(e) => {
            warn!(error = %e, "Could not read image details");
            return None;
        }
    };

    let url = parse_featured_image(&html, config);
    match &url {
        Some(url) => info!(%url, "Scraped featured image"),
        None => {
            warn!(selector = %config.image_selector, "Featured image element not found");
            debug!(html = %truncate_for_log(&html, 500), "Unmatched image markup");
        }
    }
    url
}

/// Absolute URL of the large image in `html`.
///
/// Relative `src` values are resolved against `config.base_url`; absolute ones
/// are returned unchanged.
pub fn parse_featured_image(html: &str, config: &FeaturedImageConfig) -> Option<String> {
    let document = Html::parse_document(html);
    let src = document
        .select(&selector(&config.image_selector)?)
        .next()?
        .value()
        .attr("src")?;
    resolve_url(&config.base_url, src)
}
