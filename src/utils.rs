//! Helpers shared by the extractors and the output layer.
//!
//! - Text cleanup for scraped elements
//! - URL resolution against a site's base URL
//! - Selector compilation from configuration strings
//! - String truncation for logging
//! - File system validation for the output path

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Selector};
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument, warn};
use url::Url;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// Collapse runs of whitespace and trim the ends.
///
/// Scraped markup is indented arbitrarily; the text a reader sees is what the
/// record should hold.
pub fn clean_text(raw: &str) -> String {
    WHITESPACE.replace_all(raw, " ").trim().to_string()
}

/// Visible text of an element, cleaned. `None` when the element has no text.
pub fn element_text(element: ElementRef<'_>) -> Option<String> {
    let text = clean_text(&element.text().join(" "));
    (!text.is_empty()).then_some(text)
}

/// Compile a CSS selector taken from configuration.
///
/// An invalid selector is a configuration mistake for one field, so it is
/// logged and treated like an element that was not found.
pub fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            warn!(selector = css, error = %e, "Invalid CSS selector in configuration");
            None
        }
    }
}

/// Resolve `href` against `base`.
///
/// Absolute links are returned exactly as written. Relative links are joined
/// to `base`, so both `/images/a.jpg` and `images/a.jpg` work.
pub fn resolve_url(base: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    if Url::parse(href).is_ok() {
        return Some(href.to_string());
    }
    match Url::parse(base).and_then(|base| base.join(href)) {
        Ok(resolved) => Some(resolved.to_string()),
        Err(e) => {
            warn!(base, href, error = %e, "Could not resolve relative URL");
            None
        }
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` bytes (backing off to a character
/// boundary) with `"…(+N bytes)"` appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

/// Ensure the directory that will hold `file` exists and is writable.
///
/// Creates the directory if needed, then writes and removes a probe file.
#[instrument(level = "info", skip_all, fields(path = %file.display()))]
pub async fn ensure_writable_parent(file: &Path) -> std::io::Result<()> {
    let dir = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).await?;

    let probe = dir.join("..__probe_write__");
    fs::write(&probe, b"").await?;
    let _ = fs::remove_file(&probe).await;
    info!(dir = %dir.display(), "Output directory is writable");
    Ok(())
}
