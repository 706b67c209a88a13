//! Data models for the scraped Mars record.
//!
//! Field names are the JSON contract downstream consumers render from, so the
//! struct fields are named exactly like the keys and must not be renamed.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// The aggregate result of one scrape.
///
/// Every field is attempted independently; a missing value means that one
/// extraction failed, not the scrape as a whole.
#[derive(Debug, Clone, Serialize)]
pub struct MarsData {
    /// Headline of the most recent news item.
    pub news_title: Option<String>,
    /// Teaser text of the most recent news item.
    pub news_paragraph: Option<String>,
    /// Absolute URL of the featured full-size image.
    pub featured_image: Option<String>,
    /// Rendered facts table, or the error sentinel.
    pub facts: Facts,
    /// When the record was assembled.
    pub last_modified: DateTime<Utc>,
    /// One entry per hemisphere, in results-page order.
    pub hemisphere: Vec<Hemisphere>,
}

/// A hemisphere title and its full-resolution image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hemisphere {
    pub title: String,
    pub image: String,
}

/// Outcome of the facts-table extraction.
///
/// Consumers drop this field straight into a page, so failure is a printable
/// placeholder rather than `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Facts {
    /// An HTML `<table>` fragment.
    Table(String),
    /// Fetching or parsing the table failed.
    Error,
}

impl Facts {
    /// The sentinel written in place of a table.
    pub const ERROR_SENTINEL: &'static str = "Error";

    pub fn as_str(&self) -> &str {
        match self {
            Facts::Table(html) => html,
            Facts::Error => Self::ERROR_SENTINEL,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Facts::Error)
    }
}

impl Serialize for Facts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
