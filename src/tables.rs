//! Minimal HTML table extraction and rendering.
//!
//! Pulls the first `<table>` out of a page as rows of cell text, lets the
//! caller relabel its columns, and renders it back to a styled fragment. The
//! first column becomes a row header, so no synthetic index column is
//! emitted.

use crate::utils::clean_text;
use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::fmt::Write;

static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").expect("static selector"));
static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("static selector"));
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("th, td").expect("static selector"));

/// A rectangular table of cell text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Parse the first `<table>` in `html`.
///
/// Rows inside `<thead>`, and leading rows made only of `<th>` cells, become
/// the column labels; everything else is data.
/// Returns `None` when the page has no table, the table has no data rows, or
/// its rows do not all have the same number of cells.
pub fn first_table(html: &str) -> Option<Table> {
    let document = Html::parse_document(html);
    let table = document.select(&TABLE).next()?;

    let mut columns = Vec::new();
    let mut rows = Vec::new();
    for row in table.select(&ROW) {
        // Rows of nested tables belong to those tables.
        if owning_table(row) != Some(table) {
            continue;
        }
        let cells: Vec<ElementRef<'_>> = row
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|cell| CELL.matches(cell))
            .collect();
        if cells.is_empty() {
            continue;
        }
        // Leading rows of only `<th>` cells are headers even outside `<thead>`.
        let header_only = rows.is_empty() && cells.iter().all(|cell| cell.value().name() == "th");
        let cells: Vec<String> = cells
            .into_iter()
            .map(|cell| clean_text(&cell.text().join(" ")))
            .collect();
        if in_thead(row) || header_only {
            columns = cells;
        } else {
            rows.push(cells);
        }
    }

    let width = rows.first()?.len();
    if rows.iter().any(|row| row.len() != width) {
        return None;
    }
    if columns.len() != width {
        columns = (0..width).map(|i| i.to_string()).collect();
    }
    Some(Table { columns, rows })
}

fn owning_table(row: ElementRef<'_>) -> Option<ElementRef<'_>> {
    row.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "table")
}

fn in_thead(row: ElementRef<'_>) -> bool {
    row.ancestors()
        .filter_map(ElementRef::wrap)
        .take_while(|el| el.value().name() != "table")
        .any(|el| el.value().name() == "thead")
}

impl Table {
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Replace the column labels. `None` if the count does not match.
    pub fn with_columns<S: AsRef<str>>(mut self, labels: &[S]) -> Option<Self> {
        if labels.len() != self.width() {
            return None;
        }
        self.columns = labels.iter().map(|l| l.as_ref().to_string()).collect();
        Some(self)
    }

    /// Render as an HTML fragment carrying `classes` on the `<table>`.
    ///
    /// The first cell of every row is rendered as `<th>` so it reads as the
    /// row label.
    pub fn to_html(&self, classes: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "<table border=\"1\" class=\"{}\">",
            html_escape::encode_double_quoted_attribute(classes)
        );
        out.push_str("  <thead>\n    <tr style=\"text-align: right;\">\n");
        for label in &self.columns {
            let _ = writeln!(out, "      <th>{}</th>", html_escape::encode_text(label));
        }
        out.push_str("    </tr>\n  </thead>\n  <tbody>\n");
        for row in &self.rows {
            out.push_str("    <tr>\n");
            for (i, cell) in row.iter().enumerate() {
                let tag = if i == 0 { "th" } else { "td" };
                let _ = writeln!(out, "      <{tag}>{}</{tag}>", html_escape::encode_text(cell));
            }
            out.push_str("    </tr>\n");
        }
        out.push_str("  </tbody>\n</table>");
        out
    }
}
