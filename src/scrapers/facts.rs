//! Mars facts table scraper.
//!
//! The facts page is static, so this is a plain HTTP fetch rather than a
//! browser visit. The first table on the page is relabelled and rendered back
//! to markup for direct embedding.

use crate::config::FactsConfig;
use crate::fetch::PageFetcher;
use crate::models::Facts;
use crate::tables;
use tracing::{info, instrument, warn};

/// Fetch the facts page and render its first table.
///
/// Returns [`Facts::Error`] when the fetch fails or the page has no usable
/// two-column table.
#[instrument(level = "info", skip_all, fields(url = %config.url))]
pub async fn mars_facts<F: PageFetcher>(fetcher: &F, config: &FactsConfig) -> Facts {
    let html = match fetcher.fetch(&config.url).await {
        Ok(html) => html,
        Err(e) => {
            warn!(error = %e, "Could not fetch facts page");
            return Facts::Error;
        }
    };

    let facts = render_facts(&html, config);
    match &facts {
        Facts::Table(markup) => info!(bytes = markup.len(), "Rendered facts table"),
        Facts::Error => warn!("Facts page has no two-column table"),
    }
    facts
}

/// Render the first table of `html` with the configured column labels.
pub fn render_facts(html: &str, config: &FactsConfig) -> Facts {
    tables::first_table(html)
        .and_then(|table| table.with_columns(&config.columns[..]))
        .map(|table| Facts::Table(table.to_html(&config.table_classes)))
        .unwrap_or(Facts::Error)
}
