//! Document-level types.

use super::PageContent;
use crate::render::{CleanupOptions, CleanupPreset, TextCleaner};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Document metadata as string key/value pairs (title, creator, size, ...).
pub type Metadata = BTreeMap<String, String>;

/// Structured result of a selective read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentResult {
    /// Source path, when read from a file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,

    /// Retained pages, in ascending page order
    pub pages: Vec<PageContent>,

    /// Number of pages (sheets, slides) in the document
    pub total_pages: usize,

    /// Sum of retained lines over all pages
    pub total_lines: usize,

    /// All retained pages concatenated with page markers
    pub content: String,

    /// Document metadata
    pub metadata: Metadata,
}

impl DocumentResult {
    /// Get a retained page by its page index.
    pub fn page(&self, page_number: usize) -> Option<&PageContent> {
        self.pages.iter().find(|p| p.page_number == page_number)
    }

    /// Number of retained pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Check if nothing was retained.
    pub fn is_empty(&self) -> bool {
        self.total_lines == 0
    }

    /// Convert into the flat whole-document view.
    pub fn into_document(self) -> Document {
        Document {
            file_path: self.file_path,
            content: self.content,
            metadata: self.metadata,
        }
    }
}

/// A document's full text and metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Source path, when read from a file
    pub file_path: Option<String>,

    /// Full text content
    pub content: String,

    /// Document metadata
    pub metadata: Metadata,
}

impl Document {
    /// Clean the content with the standard preset.
    pub fn clean_content(&mut self) {
        self.clean_content_with_preset(CleanupPreset::Standard);
    }

    /// Clean the content with the minimal preset.
    pub fn clean_content_minimal(&mut self) {
        self.clean_content_with_preset(CleanupPreset::Minimal);
    }

    /// Clean the content with the aggressive preset.
    pub fn clean_content_aggressive(&mut self) {
        self.clean_content_with_preset(CleanupPreset::Aggressive);
    }

    /// Clean the content with a preset.
    pub fn clean_content_with_preset(&mut self, preset: CleanupPreset) {
        self.clean_content_with(&CleanupOptions::from_preset(preset));
    }

    /// Clean the content with custom options.
    pub fn clean_content_with(&mut self, options: &CleanupOptions) {
        self.content = TextCleaner::new(options.clone()).clean(&self.content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> DocumentResult {
        DocumentResult {
            file_path: Some("deck.pptx".to_string()),
            pages: vec![
                PageContent::new(0, None, vec!["Title".to_string()]),
                PageContent::new(2, None, Vec::new()),
            ],
            total_pages: 3,
            total_lines: 1,
            content: "=== Slide 1 ===\nTitle\n\n=== Slide 3 ===\n".to_string(),
            metadata: Metadata::from([("slide_count".to_string(), "3".to_string())]),
        }
    }

    #[test]
    fn test_document_result_page_lookup() {
        let result = sample_result();
        assert_eq!(result.page_count(), 2);
        assert!(result.page(0).is_some());
        assert!(result.page(1).is_none());
        assert!(result.page(2).unwrap().is_empty());
        assert!(!result.is_empty());
    }

    #[test]
    fn test_into_document() {
        let doc = sample_result().into_document();
        assert_eq!(doc.file_path.as_deref(), Some("deck.pptx"));
        assert!(doc.content.starts_with("=== Slide 1 ==="));
        assert_eq!(doc.metadata["slide_count"], "3");
    }

    #[test]
    fn test_document_clean_content() {
        let mut doc = Document {
            content: "\n\n  Hello    world  \n\n\n\nBye\n".to_string(),
            ..Default::default()
        };
        doc.clean_content();
        assert_eq!(doc.content, "Hello world\n\nBye");

        doc.clean_content_aggressive();
        assert_eq!(doc.content, "Hello world\nBye");
    }
}
