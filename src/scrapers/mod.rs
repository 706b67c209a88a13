//! One extractor per field of the Mars record.
//!
//! Each scraper follows the same shape: load the page, best-effort wait for
//! rendering, read the markup, then hand it to a pure `parse_*` function that
//! can be tested against saved fixtures.
//!
//! | Field | Module | Source | Transport |
//! |-------|--------|--------|-----------|
//! | `news_title`, `news_paragraph` | [`news`] | NASA Mars news | browser |
//! | `featured_image` | [`featured_image`] | JPL space images | browser, two clicks |
//! | `facts` | [`facts`] | space-facts.com | HTTP |
//! | `hemisphere` | [`hemispheres`] | USGS astrogeology | browser, one visit per item |
//!
//! Failures never propagate: a scraper that cannot find its data logs a
//! warning and returns `None`, an empty list, or [`crate::models::Facts::Error`].

pub mod facts;
pub mod featured_image;
pub mod hemispheres;
pub mod news;
