//! Read configuration: which pages, and which lines on each page.

use super::Selector;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A line selector pinned to one page.
///
/// Overrides take precedence over both the page selector and the global line
/// selector. Once any override is present, only the pages named by overrides
/// are read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageOverride {
    /// Page index (zero-based)
    pub page_index: i64,

    /// Lines to read on that page
    #[serde(default)]
    pub line_selector: Selector,
}

impl PageOverride {
    /// Create a new page override.
    pub fn new(page_index: i64, line_selector: Selector) -> Self {
        Self {
            page_index,
            line_selector,
        }
    }
}

/// Configuration for a selective read.
///
/// The engine never mutates a `ReadConfig`; one value can be shared between
/// any number of reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadConfig {
    /// Pages (or sheets, or slides) to read; empty reads every page
    #[serde(default)]
    pub page_selector: Selector,

    /// Lines to read on every selected page; empty reads every line
    #[serde(default)]
    pub line_selector: Selector,

    /// Per-page line selectors, highest precedence
    #[serde(default)]
    pub page_overrides: Vec<PageOverride>,

    /// Sheet names to read (spreadsheets only)
    #[serde(default)]
    pub sheet_names: Vec<String>,
}

impl ReadConfig {
    /// Create a configuration that reads everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Other(format!("Invalid read config: {}", e)))
    }

    /// Replace the discrete page indices.
    pub fn with_pages<I: IntoIterator<Item = i64>>(mut self, pages: I) -> Self {
        self.page_selector.indices = pages.into_iter().collect();
        self
    }

    /// Add an inclusive page range.
    pub fn with_page_range(mut self, start: i64, end: i64) -> Self {
        self.page_selector.ranges.push((start, end));
        self
    }

    /// Replace the page selector.
    pub fn with_page_selector(mut self, selector: Selector) -> Self {
        self.page_selector = selector;
        self
    }

    /// Replace the discrete line indices applied to every page.
    pub fn with_lines<I: IntoIterator<Item = i64>>(mut self, lines: I) -> Self {
        self.line_selector.indices = lines.into_iter().collect();
        self
    }

    /// Add an inclusive line range applied to every page.
    pub fn with_line_range(mut self, start: i64, end: i64) -> Self {
        self.line_selector.ranges.push((start, end));
        self
    }

    /// Replace the global line selector.
    pub fn with_line_selector(mut self, selector: Selector) -> Self {
        self.line_selector = selector;
        self
    }

    /// Restrict a spreadsheet read to the named sheets.
    pub fn with_sheet_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sheet_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Pin a line selector to one page.
    pub fn add_page_override(mut self, page_index: i64, line_selector: Selector) -> Self {
        self.page_overrides
            .push(PageOverride::new(page_index, line_selector));
        self
    }

    /// Pin discrete lines to one page.
    pub fn add_page_lines<I: IntoIterator<Item = i64>>(self, page_index: i64, lines: I) -> Self {
        self.add_page_override(page_index, Selector::from_indices(lines))
    }

    /// Pin an inclusive line range to one page.
    pub fn add_page_line_range(self, page_index: i64, start: i64, end: i64) -> Self {
        self.add_page_override(page_index, Selector::from_range(start, end))
    }

    /// Whether any per-page override is configured.
    pub fn has_overrides(&self) -> bool {
        !self.page_overrides.is_empty()
    }

    /// Whether this configuration reads everything.
    pub fn is_unconstrained(&self) -> bool {
        self.page_selector.is_empty()
            && self.line_selector.is_empty()
            && self.page_overrides.is_empty()
            && self.sheet_names.is_empty()
    }
}
