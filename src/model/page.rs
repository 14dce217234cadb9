//! Page-level types.

use serde::{Deserialize, Serialize};

/// Retained content of one page, sheet or slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    /// Page index (zero-based)
    pub page_number: usize,

    /// Page name (sheet name for spreadsheets)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_name: Option<String>,

    /// Retained lines, in document order
    pub lines: Vec<String>,

    /// Number of retained lines
    pub line_count: usize,
}

impl PageContent {
    /// Create page content from its retained lines.
    pub fn new(page_number: usize, page_name: Option<String>, lines: Vec<String>) -> Self {
        let line_count = lines.len();
        Self {
            page_number,
            page_name,
            lines,
            line_count,
        }
    }

    /// Check if no line was retained.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Retained lines joined with line feeds.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}
