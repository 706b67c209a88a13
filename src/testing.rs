//! Test doubles and HTML fixtures shaped like the live target pages.

use crate::browser::{BrowserSession, Locator};
use crate::config::ScrapeConfig;
use crate::error::{Result, ScrapeError};
use crate::fetch::PageFetcher;
use scraper::{Html, Selector};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

/// A browser that serves canned pages.
///
/// `visit` loads a page by URL; `click` moves to another canned page when a
/// transition is registered for the current page and locator, and fails like
/// a missing element otherwise.
#[derive(Default)]
pub struct FixtureBrowser {
    pages: HashMap<String, String>,
    clicks: HashMap<(String, Locator), String>,
    current: Option<String>,
    visits: Rc<RefCell<Vec<String>>>,
    quits: Rc<Cell<usize>>,
}

impl FixtureBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, key: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(key.into(), html.into());
        self
    }

    pub fn with_click(
        mut self,
        from: impl Into<String>,
        locator: &Locator,
        to: impl Into<String>,
    ) -> Self {
        self.clicks.insert((from.into(), locator.clone()), to.into());
        self
    }

    pub fn quit_counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.quits)
    }

    pub fn visit_log(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.visits)
    }

    fn current_html(&self) -> Option<&str> {
        self.current
            .as_ref()
            .and_then(|key| self.pages.get(key))
            .map(String::as_str)
    }
}

impl BrowserSession for FixtureBrowser {
    async fn visit(&mut self, url: &str) -> Result<()> {
        self.visits.borrow_mut().push(url.to_string());
        if !self.pages.contains_key(url) {
            return Err(ScrapeError::Navigation(format!("{url}: net::ERR_NAME_NOT_RESOLVED")));
        }
        self.current = Some(url.to_string());
        Ok(())
    }

    async fn wait_for(&mut self, locator: &Locator, _timeout: Duration) -> bool {
        let Some(html) = self.current_html() else {
            return false;
        };
        match locator {
            Locator::Css(css) => Selector::parse(css)
                .map(|selector| Html::parse_document(html).select(&selector).next().is_some())
                .unwrap_or(false),
            Locator::LinkText(text) => html.contains(text.as_str()),
        }
    }

    async fn html(&mut self) -> Result<String> {
        self.current_html()
            .map(str::to_string)
            .ok_or_else(|| ScrapeError::PageSource("no page loaded".to_string()))
    }

    async fn click(&mut self, locator: &Locator) -> Result<()> {
        let from = self.current.clone().unwrap_or_default();
        match self.clicks.get(&(from, locator.clone())) {
            Some(to) => {
                self.current = Some(to.clone());
                Ok(())
            }
            None => Err(ScrapeError::ElementNotFound(locator.to_string())),
        }
    }

    fn quit(&mut self) {
        self.quits.set(self.quits.get() + 1);
    }
}

/// A fetcher that returns one canned response for every URL.
pub struct StaticFetcher {
    body: Option<String>,
    calls: Cell<usize>,
}

impl StaticFetcher {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            calls: Cell::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            body: None,
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl PageFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.calls.set(self.calls.get() + 1);
        self.body
            .clone()
            .ok_or_else(|| ScrapeError::Fetch(format!("{url} returned 503 Service Unavailable")))
    }
}

pub const NEWS_HTML: &str = r#"
<html><body>
  <div class="grid_layout">
    <ul class="item_list">
      <li class="slide">
        <div class="list_date">May 6, 2025</div>
        <div class="content_title"><a href="/news/8716/">
          NASA's Perseverance Rover Cores Its First Rock
        </a></div>
        <div class="article_teaser_body">The rover collected a sample
          from Jezero Crater for a future return to Earth.</div>
      </li>
      <li class="slide">
        <div class="content_title"><a href="/news/8715/">Older Story</a></div>
        <div class="article_teaser_body">Should never be picked.</div>
      </li>
    </ul>
  </div>
</body></html>
"#;

pub const NEWS_TITLE: &str = "NASA's Perseverance Rover Cores Its First Rock";
pub const NEWS_TEASER: &str =
    "The rover collected a sample from Jezero Crater for a future return to Earth.";

pub const NEWS_NO_TEASER_HTML: &str = r#"
<html><body>
  <ul class="item_list">
    <li class="slide">
      <div class="content_title"><a href="/news/8716/">Teaser went missing</a></div>
    </li>
  </ul>
</body></html>
"#;

pub const GALLERY_HTML: &str = r#"
<html><body>
  <article class="carousel_item">
    <a class="button fancybox" id="full_image" data-fancybox-href="/spaceimages/images/mediumsize/PIA16883_ip.jpg">FULL IMAGE</a>
  </article>
</body></html>
"#;

pub const FULL_IMAGE_HTML: &str = r#"
<html><body>
  <div class="fancybox-wrap">
    <img class="fancybox-image" src="/spaceimages/images/mediumsize/PIA16883_ip.jpg">
    <div class="addthis_toolbox"><a href="/spaceimages/details.php?id=PIA16883">more info</a></div>
  </div>
</body></html>
"#;

pub const LIGHTBOX_RELATIVE_HTML: &str = r#"
<html><body>
  <figure class="lede">
    <a href="/spaceimages/images/largesize/PIA16883_hires.jpg">
      <img alt="Mars rock" src="/spaceimages/images/largesize/PIA16883_hires.jpg" class="main_image">
    </a>
  </figure>
</body></html>
"#;

pub const LIGHTBOX_ABSOLUTE_HTML: &str = r##"
<html><body>
  <figure class="lede">
    <a href="#"><img src="https://photojournal.jpl.nasa.gov/jpeg/PIA16883.jpg"></a>
  </figure>
</body></html>
"##;

pub const LIGHTBOX_NO_IMAGE_HTML: &str = r#"
<html><body>
  <figure class="lede"><figcaption>Image unavailable</figcaption></figure>
</body></html>
"#;

pub const FEATURED_IMAGE_URL: &str =
    "https://www.jpl.nasa.gov/spaceimages/images/largesize/PIA16883_hires.jpg";

pub const FACTS_HTML: &str = r#"
<html><body>
  <table id="tablepress-p-mars" class="tablepress tablepress-id-p-mars">
    <tbody>
      <tr class="row-1 odd"><td class="column-1"><strong>Equatorial Diameter:</strong></td><td class="column-2">6,792 km</td></tr>
      <tr class="row-2 even"><td class="column-1"><strong>Moons:</strong></td><td class="column-2">2 (Phobos &amp; Deimos)</td></tr>
    </tbody>
  </table>
</body></html>
"#;

pub const HEMISPHERES: [(&str, &str); 4] = [
    ("Cerberus Hemisphere Enhanced", "cerberus_enhanced"),
    ("Schiaparelli Hemisphere Enhanced", "schiaparelli_enhanced"),
    ("Syrtis Major Hemisphere Enhanced", "syrtis_major_enhanced"),
    ("Valles Marineris Hemisphere Enhanced", "valles_marineris_enhanced"),
];

/// Results page listing every entry of [`HEMISPHERES`] in order.
pub fn hemisphere_results_html() -> String {
    let items: String = HEMISPHERES
        .iter()
        .map(|(title, slug)| {
            format!(
                r#"<div class="item">
  <a href="/search/map/Mars/Viking/{slug}" class="product-item"><img class="thumb" src="/cache/{slug}_thumb.png"></a>
  <div class="description">
    <a href="/search/map/Mars/Viking/{slug}" class="product-item"><h3>{title}</h3></a>
    <span class="subtitle">image/tiff 21 MB</span>
  </div>
</div>
"#
            )
        })
        .collect();
    format!(r#"<html><body><div class="collapsible results">{items}</div></body></html>"#)
}

pub fn hemisphere_detail_url(slug: &str) -> String {
    format!("https://astrogeology.usgs.gov/search/map/Mars/Viking/{slug}")
}

pub fn hemisphere_image_url(slug: &str) -> String {
    format!("https://astropedia.astrogeology.usgs.gov/download/Mars/Viking/{slug}.tif/full.jpg")
}

/// Detail page whose download list links to [`hemisphere_image_url`].
pub fn hemisphere_detail_html(slug: &str) -> String {
    format!(
        r#"<html><body>
  <ul class="nav"><li><a href="/search">Search</a></li></ul>
  <div class="downloads">
    <h3>Download</h3>
    <ul>
      <li><a target="_blank" href="{}">Sample</a> (jpg) 1024px wide</li>
      <li><a target="_blank" href="https://astropedia.astrogeology.usgs.gov/download/Mars/Viking/{slug}.tif">Original</a> (tif)</li>
    </ul>
  </div>
</body></html>"#,
        hemisphere_image_url(slug)
    )
}

/// A browser serving every target page the default configuration visits.
pub fn mars_site(config: &ScrapeConfig) -> FixtureBrowser {
    mars_site_with_news(config, NEWS_HTML)
}

pub fn mars_site_with_news(config: &ScrapeConfig, news_html: &str) -> FixtureBrowser {
    let featured = &config.featured_image;
    let full = format!("{}#full", featured.url);
    let lightbox = format!("{}#lightbox", featured.url);

    let mut browser = FixtureBrowser::new()
        .with_page(&config.news.url, news_html)
        .with_page(&featured.url, GALLERY_HTML)
        .with_page(&full, FULL_IMAGE_HTML)
        .with_page(&lightbox, LIGHTBOX_RELATIVE_HTML)
        .with_page(&config.hemispheres.url, hemisphere_results_html());
    if let (Some(open_full), Some(more_info)) = (&featured.full_image, &featured.more_info) {
        browser = browser
            .with_click(&featured.url, open_full, &full)
            .with_click(&full, more_info, &lightbox);
    }
    for (_, slug) in HEMISPHERES {
        browser = browser.with_page(hemisphere_detail_url(slug), hemisphere_detail_html(slug));
    }
    browser
}
