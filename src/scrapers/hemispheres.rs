//! USGS astrogeology hemisphere scraper.
//!
//! The search results list one item per hemisphere; the full-resolution image
//! link lives on each item's detail page, so every item costs one extra
//! navigation of the shared session.

use crate::browser::{BrowserSession, Locator};
use crate::config::HemisphereConfig;
use crate::models::Hemisphere;
use crate::utils::{element_text, resolve_url, selector, truncate_for_log};
use scraper::Html;
use tracing::{debug, info, instrument, warn};

/// Scrape every hemisphere's title and full-resolution image URL.
///
/// Output order follows the results page. Items whose detail page cannot be
/// loaded or has no image link are skipped; the result is never an error.
#[instrument(level = "info", skip_all, fields(url = %config.url))]
pub async fn hemispheres<S: BrowserSession>(
    session: &mut S,
    config: &HemisphereConfig,
) -> Vec<Hemisphere> {
    if let Err(e) = session.visit(&config.url).await {
        warn!(error = %e, "Could not load hemisphere results");
        return Vec::new();
    }

    let item = Locator::Css(config.item_selector.clone());
    if !session.wait_for(&item, config.wait()).await {
        debug!("Results did not render within the wait; parsing anyway");
    }

    let results = match session.html().await {
        Ok(html) => html,
        Err(e) => {
            warn!(error = %e, "Could not read hemisphere results");
            return Vec::new();
        }
    };

    let items = parse_hemisphere_items(&results, config);
    info!(count = items.len(), "Found hemisphere results");
    if items.is_empty() {
        debug!(html = %truncate_for_log(&results, 500), "No result items matched");
    }

    let mut hemispheres = Vec::with_capacity(items.len());
    for (title, detail_url) in items {
        match hemisphere_image(session, &detail_url, config).await {
            Some(image) => {
                debug!(%title, %image, "Scraped hemisphere");
                hemispheres.push(Hemisphere { title, image });
            }
            None => warn!(%title, %detail_url, "Skipping hemisphere without an image link"),
        }
    }

    info!(count = hemispheres.len(), "Scraped hemispheres");
    hemispheres
}

/// Visit one detail page and pull its image link.
async fn hemisphere_image<S: BrowserSession>(
    session: &mut S,
    detail_url: &str,
    config: &HemisphereConfig,
) -> Option<String> {
    if let Err(e) = session.visit(detail_url).await {
        warn!(error = %e, "Could not load hemisphere detail page");
        return None;
    }
    match session.html().await {
        Ok(html) => {
            let image = parse_hemisphere_image(&html, detail_url, config);
            if image.is_none() {
                debug!(html = %truncate_for_log(&html, 500), "No download link on detail page");
            }
            image
        }
        Err(e) => {
            warn!(error = %e, "Could not read hemisphere detail page");
            None
        }
    }
}

/// `(title, absolute detail URL)` for each result item, in document order.
///
/// Items without a heading or a link are dropped.
pub fn parse_hemisphere_items(html: &str, config: &HemisphereConfig) -> Vec<(String, String)> {
    let (Some(item_sel), Some(title_sel), Some(link_sel)) = (
        selector(&config.item_selector),
        selector(&config.title_selector),
        selector(&config.link_selector),
    ) else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    document
        .select(&item_sel)
        .filter_map(|item| {
            let title = item.select(&title_sel).next().and_then(element_text)?;
            let href = item.select(&link_sel).next()?.value().attr("href")?;
            let link = resolve_url(&config.base_url, href)?;
            Some((title, link))
        })
        .collect()
}

/// First download link on a detail page, resolved against that page.
pub fn parse_hemisphere_image(
    html: &str,
    detail_url: &str,
    config: &HemisphereConfig,
) -> Option<String> {
    let document = Html::parse_document(html);
    let href = document
        .select(&selector(&config.image_selector)?)
        .next()?
        .value()
        .attr("href")?;
    resolve_url(detail_url, href)
}
