//! Output of the scraped record.
//!
//! The binary always prints the record as JSON on stdout; [`json`] also
//! writes it to a file when `--output` is given.

pub mod json;
