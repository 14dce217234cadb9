//! Statistics over a read result.

use crate::model::DocumentResult;
use serde::{Deserialize, Serialize};

/// Statistics collected from a read result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Pages (sheets, slides) in the document
    pub total_pages: usize,

    /// Pages retained by the selection
    pub pages_read: usize,

    /// Retained lines
    pub line_count: usize,

    /// Retained lines that are empty or whitespace only
    pub blank_line_count: usize,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: usize,

    /// Character count (excluding whitespace)
    pub char_count: usize,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics from a read result.
    pub fn from_result(result: &DocumentResult) -> Self {
        let mut stats = Self {
            total_pages: result.total_pages,
            pages_read: result.pages.len(),
            ..Self::default()
        };

        for line in result.pages.iter().flat_map(|p| p.lines.iter()) {
            stats.count_line(line);
        }
        stats
    }

    /// Add one line to the counts.
    pub fn count_line(&mut self, line: &str) {
        self.line_count += 1;
        if line.trim().is_empty() {
            self.blank_line_count += 1;
        }
        self.word_count += line.split_whitespace().count();
        self.char_count += line.chars().filter(|c| !c.is_whitespace()).count();
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.total_pages += other.total_pages;
        self.pages_read += other.pages_read;
        self.line_count += other.line_count;
        self.blank_line_count += other.blank_line_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}
