//! Target URLs, selectors, and wait bounds for each scraped site.
//!
//! The target sites change their markup often, so nothing about *where* data
//! lives is hard-coded in the extractors. Every section carries defaults that
//! match the live sites; a YAML file can override any subset of them:
//!
//! ```yaml
//! browser:
//!   headless: false
//! featured_image:
//!   url: https://spaceimages-mars.com
//!   base_url: https://spaceimages-mars.com/
//!   full_image: { css: "button.fancybox" }
//!   more_info: null
//!   image_selector: img.fancybox-image
//! ```

use crate::browser::Locator;
use crate::error::Result;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};

/// Complete scraper configuration, one section per extractor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub browser: BrowserConfig,
    pub news: NewsConfig,
    pub featured_image: FeaturedImageConfig,
    pub facts: FactsConfig,
    pub hemispheres: HemisphereConfig,
}

impl ScrapeConfig {
    /// Load a configuration from a YAML file. Missing keys keep their defaults.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        let config = Self::from_yaml(&raw)?;
        info!("Loaded scraper configuration");
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }
}

/// Browser launch options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run Chrome without a visible window
    pub headless: bool,
    /// Explicit Chrome/Chromium binary; auto-detected when `None`
    pub chrome_path: Option<String>,
    pub width: u32,
    pub height: u32,
    /// Upper bound on a single interaction lookup, in milliseconds
    pub element_timeout_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            chrome_path: None,
            width: 1920,
            height: 1080,
            element_timeout_ms: 2_000,
        }
    }
}

impl BrowserConfig {
    pub fn element_timeout(&self) -> Duration {
        Duration::from_millis(self.element_timeout_ms)
    }
}

/// NASA Mars news listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    pub url: String,
    /// Best-effort wait for the list to render, in milliseconds
    pub wait_ms: u64,
    pub slide_selector: String,
    pub title_selector: String,
    pub teaser_selector: String,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            url: "https://mars.nasa.gov/news/".to_string(),
            wait_ms: 1_000,
            slide_selector: "ul.item_list li.slide".to_string(),
            title_selector: "div.content_title".to_string(),
            teaser_selector: "div.article_teaser_body".to_string(),
        }
    }
}

impl NewsConfig {
    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.wait_ms)
    }
}

/// JPL featured space image.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeaturedImageConfig {
    pub url: String,
    /// Prefix for relative image paths
    pub base_url: String,
    /// Control that opens the full-size image
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub full_image: Option<Locator>,
    /// Control that opens the lightbox detail view
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub more_info: Option<Locator>,
    pub wait_ms: u64,
    pub image_selector: String,
}

impl Default for FeaturedImageConfig {
    fn default() -> Self {
        Self {
            url: "https://www.jpl.nasa.gov/spaceimages/?search=&category=Mars".to_string(),
            base_url: "https://www.jpl.nasa.gov".to_string(),
            full_image: Some(Locator::Css("#full_image".to_string())),
            more_info: Some(Locator::LinkText("more info".to_string())),
            wait_ms: 1_000,
            image_selector: "figure.lede a img".to_string(),
        }
    }
}

impl FeaturedImageConfig {
    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.wait_ms)
    }
}

/// Space-facts table page.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FactsConfig {
    pub url: String,
    /// Labels applied to the two table columns
    pub columns: [String; 2],
    /// Class attribute attached to the rendered table
    pub table_classes: String,
}

impl Default for FactsConfig {
    fn default() -> Self {
        Self {
            url: "http://space-facts.com/mars/".to_string(),
            columns: ["Description".to_string(), "Mars".to_string()],
            table_classes: "table table-striped".to_string(),
        }
    }
}

/// USGS astrogeology hemisphere search.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HemisphereConfig {
    pub url: String,
    /// Base for resolving relative detail-page links
    pub base_url: String,
    pub wait_ms: u64,
    pub item_selector: String,
    pub title_selector: String,
    pub link_selector: String,
    /// First match on the detail page is the full-resolution image
    pub image_selector: String,
}

impl Default for HemisphereConfig {
    fn default() -> Self {
        Self {
            url: "https://astrogeology.usgs.gov/search/results?q=hemisphere+enhanced&k1=target&v1=Mars"
                .to_string(),
            base_url: "https://astrogeology.usgs.gov".to_string(),
            wait_ms: 1_000,
            item_selector: "div.item".to_string(),
            title_selector: "h3".to_string(),
            link_selector: "a[href]".to_string(),
            image_selector: "div.downloads ul li a[href]".to_string(),
        }
    }
}

impl HemisphereConfig {
    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.wait_ms)
    }
}
