//! Browser automation for the scrapers.
//!
//! Extractors talk to the browser only through [`BrowserSession`], so tests
//! can drive them with canned pages. [`ChromeSession`] is the production
//! implementation on top of `headless_chrome`.
//!
//! `headless_chrome` is a blocking API; every call is moved onto tokio's
//! blocking pool and awaited before the next one starts, so a scrape remains
//! strictly sequential.

use crate::config::BrowserConfig;
use crate::error::{Result, ScrapeError};
use headless_chrome::{Browser, LaunchOptions, Tab};
use itertools::Itertools;
use serde::Deserialize;
use std::ffi::OsStr;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// How to find an element on the current page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locator {
    /// A CSS selector
    Css(String),
    /// An `<a>` whose visible text contains this string
    LinkText(String),
}

impl Locator {
    /// XPath equivalent of a link-text locator.
    fn link_xpath(text: &str) -> String {
        format!("//a[contains(normalize-space(.), {})]", Self::xpath_literal(text))
    }

    /// Quote `text` as an XPath 1.0 string expression.
    ///
    /// XPath 1.0 has no escape inside a literal, so text holding both quote
    /// kinds is spliced together with `concat()`.
    fn xpath_literal(text: &str) -> String {
        if !text.contains('\'') {
            return format!("'{text}'");
        }
        if !text.contains('"') {
            return format!("\"{text}\"");
        }
        let parts = text.split('\'').map(|part| format!("'{part}'")).join(", \"'\", ");
        format!("concat({parts})")
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(selector) => write!(f, "css={selector}"),
            Locator::LinkText(text) => write!(f, "link_text={text}"),
        }
    }
}

/// A live browser the extractors can drive.
///
/// Implementations hold a single page; `visit` replaces its content and
/// `click` may change it in place.
pub trait BrowserSession {
    /// Navigate to `url` and wait for the load to finish.
    async fn visit(&mut self, url: &str) -> Result<()>;

    /// Poll until `locator` matches or `timeout` elapses.
    ///
    /// Returns whether the element appeared. Expiry is not an error.
    async fn wait_for(&mut self, locator: &Locator, timeout: Duration) -> bool;

    /// Serialized DOM of the current page.
    async fn html(&mut self) -> Result<String>;

    /// Click the first element matching `locator`.
    async fn click(&mut self, locator: &Locator) -> Result<()>;

    /// Shut the browser down. Called once, by [`ScopedSession`].
    fn quit(&mut self);
}

/// Owns a session and quits it exactly once, on every exit path.
///
/// [`ScopedSession::close`] quits explicitly; otherwise `Drop` does it, which
/// covers early returns and panics inside an extractor.
pub struct ScopedSession<S: BrowserSession> {
    inner: Option<S>,
}

impl<S: BrowserSession> ScopedSession<S> {
    pub fn new(session: S) -> Self {
        Self {
            inner: Some(session),
        }
    }

    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(mut session) = self.inner.take() {
            info!("Closing browser session");
            session.quit();
        }
    }
}

impl<S: BrowserSession> Deref for ScopedSession<S> {
    type Target = S;

    fn deref(&self) -> &S {
        // `inner` is only emptied by `close`, which consumes `self`.
        self.inner.as_ref().expect("session already released")
    }
}

impl<S: BrowserSession> DerefMut for ScopedSession<S> {
    fn deref_mut(&mut self) -> &mut S {
        self.inner.as_mut().expect("session already released")
    }
}

impl<S: BrowserSession> Drop for ScopedSession<S> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Chrome driven over the DevTools protocol.
pub struct ChromeSession {
    browser: Option<Browser>,
    tab: Arc<Tab>,
    element_timeout: Duration,
}

impl ChromeSession {
    /// Launch Chrome and open the tab every extractor will share.
    ///
    /// This is the only fatal step of a scrape: without a browser there is
    /// nothing to fall back to.
    #[instrument(level = "info", skip_all, fields(headless = config.headless))]
    pub async fn launch(config: &BrowserConfig) -> Result<Self> {
        let config = config.clone();
        tokio::task::spawn_blocking(move || Self::launch_blocking(&config))
            .await
            .map_err(|e| ScrapeError::Launch(format!("launch task failed: {e}")))?
    }

    fn launch_blocking(config: &BrowserConfig) -> Result<Self> {
        let args = [
            format!("--window-size={},{}", config.width, config.height),
            "--disable-dev-shm-usage".to_string(),
            "--disable-gpu".to_string(),
        ];
        let os_args: Vec<&OsStr> = args.iter().map(OsStr::new).collect();

        let options = LaunchOptions::default_builder()
            .headless(config.headless)
            .sandbox(false)
            .path(config.chrome_path.as_ref().map(PathBuf::from))
            .args(os_args)
            .build()
            .map_err(|e| ScrapeError::Launch(format!("invalid launch options: {e}")))?;

        let browser = Browser::new(options)
            .map_err(|e| ScrapeError::Launch(format!("failed to start chrome: {e}")))?;
        let tab = browser
            .new_tab()
            .map_err(|e| ScrapeError::Launch(format!("failed to open tab: {e}")))?;

        info!("Browser session created");
        Ok(Self {
            browser: Some(browser),
            tab,
            element_timeout: config.element_timeout(),
        })
    }

    /// Run a blocking call against the tab on the blocking pool.
    async fn with_tab<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Tab) -> Result<T> + Send + 'static,
    {
        let tab = Arc::clone(&self.tab);
        tokio::task::spawn_blocking(move || f(tab.as_ref()))
            .await
            .map_err(|e| ScrapeError::Interaction(format!("browser task failed: {e}")))?
    }
}

impl BrowserSession for ChromeSession {
    #[instrument(level = "info", skip(self))]
    async fn visit(&mut self, url: &str) -> Result<()> {
        let url = url.to_string();
        self.with_tab(move |tab| {
            tab.navigate_to(&url)
                .and_then(|tab| tab.wait_until_navigated())
                .map_err(|e| ScrapeError::Navigation(format!("{url}: {e}")))?;
            Ok(())
        })
        .await
    }

    #[instrument(level = "debug", skip(self, locator), fields(%locator))]
    async fn wait_for(&mut self, locator: &Locator, timeout: Duration) -> bool {
        let locator = locator.clone();
        let found = self
            .with_tab(move |tab| {
                let found = match &locator {
                    Locator::Css(selector) => tab
                        .wait_for_element_with_custom_timeout(selector, timeout)
                        .is_ok(),
                    Locator::LinkText(text) => tab
                        .wait_for_xpath_with_custom_timeout(&Locator::link_xpath(text), timeout)
                        .is_ok(),
                };
                Ok(found)
            })
            .await
            .unwrap_or(false);
        debug!(found, "Best-effort wait finished");
        found
    }

    async fn html(&mut self) -> Result<String> {
        self.with_tab(|tab| {
            tab.get_content()
                .map_err(|e| ScrapeError::PageSource(e.to_string()))
        })
        .await
    }

    #[instrument(level = "info", skip(self, locator), fields(%locator))]
    async fn click(&mut self, locator: &Locator) -> Result<()> {
        let locator = locator.clone();
        let timeout = self.element_timeout;
        self.with_tab(move |tab| {
            let element = match &locator {
                Locator::Css(selector) => tab.wait_for_element_with_custom_timeout(selector, timeout),
                Locator::LinkText(text) => {
                    tab.wait_for_xpath_with_custom_timeout(&Locator::link_xpath(text), timeout)
                }
            }
            .map_err(|e| ScrapeError::ElementNotFound(format!("{locator}: {e}")))?;

            element
                .click()
                .map_err(|e| ScrapeError::Interaction(format!("click {locator}: {e}")))?;
            Ok(())
        })
        .await
    }

    fn quit(&mut self) {
        match self.browser.take() {
            // Dropping the handle kills the Chrome process it spawned.
            Some(browser) => drop(browser),
            None => warn!("quit called on a closed browser session"),
        }
    }
}
