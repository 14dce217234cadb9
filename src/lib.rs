//! # doclines
//!
//! Selective text extraction from PDF, office and text documents.
//!
//! This library reads PDF, word-processor, spreadsheet, slide-deck and
//! plain-text documents as pages of text lines, lets the caller pick exactly which
//! pages (sheets, slides) and which lines on each page to keep, and cleans
//! the result for downstream use such as feeding a language model.
//!
//! ## Quick Start
//!
//! ```no_run
//! use doclines::{read_document_with_config, ReadConfig};
//!
//! fn main() -> doclines::Result<()> {
//!     // First two slides, first five lines of each
//!     let config = ReadConfig::new().with_page_range(0, 1).with_line_range(0, 4);
//!     let result = read_document_with_config("deck.pptx", &config)?;
//!
//!     for page in &result.pages {
//!         println!("slide {}: {} lines", page.page_number + 1, page.line_count);
//!     }
//!     println!("{}", result.content);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Page and line selection**: indices, inclusive ranges and per-page
//!   overrides, clamped to the document instead of failing
//! - **Formats**: PDF, TXT, Markdown, CSV, RTF, DOCX, XLSX/XLSM/XLS/ODS, PPTX
//! - **Pluggable readers**: implement [`DocumentReader`] and register it
//! - **Cleanup**: whitespace, blank-line and control-character cleanup for
//!   LLM-ready text, idempotent by construction

pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod render;
pub mod select;

// Re-export commonly used types
pub use convert::{extract, DocumentReader, PageLayout, PageSource, ReaderRegistry};
pub use detect::{detect_format_from_bytes, detect_format_from_path, DocumentFormat};
pub use error::{Error, Result};
pub use model::{Document, DocumentResult, Metadata, PageContent};
pub use render::{
    clean_text, clean_text_aggressive, clean_text_minimal, CleanupOptions, CleanupPreset,
    ExtractionStats, JsonFormat, TextCleaner,
};
pub use select::{PageOverride, ReadConfig, Selector};

use std::path::Path;

/// Read a whole document.
///
/// # Example
///
/// ```no_run
/// use doclines::read_document;
///
/// let doc = read_document("notes.docx").unwrap();
/// println!("{}", doc.content);
/// ```
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<Document> {
    ReaderRegistry::with_defaults().read_document(path.as_ref())
}

/// Read selected pages and lines of a document.
///
/// # Example
///
/// ```no_run
/// use doclines::{read_document_with_config, ReadConfig};
///
/// let config = ReadConfig::new()
///     .with_sheet_names(["Summary"])
///     .with_line_range(0, 9);
/// let result = read_document_with_config("report.xlsx", &config).unwrap();
/// println!("{} lines", result.total_lines);
/// ```
pub fn read_document_with_config<P: AsRef<Path>>(
    path: P,
    config: &ReadConfig,
) -> Result<DocumentResult> {
    ReaderRegistry::with_defaults().read_with_config(path.as_ref(), config)
}

/// Read a whole document and clean it with the standard preset.
pub fn read_document_with_clean<P: AsRef<Path>>(path: P) -> Result<Document> {
    let mut doc = read_document(path)?;
    doc.clean_content();
    Ok(doc)
}

/// Read a whole document and clean it with custom options.
///
/// # Example
///
/// ```no_run
/// use doclines::{read_document_with_cleanup, CleanupOptions};
///
/// let options = CleanupOptions::standard().with_max_blank_lines(2);
/// let doc = read_document_with_cleanup("notes.rtf", &options).unwrap();
/// ```
pub fn read_document_with_cleanup<P: AsRef<Path>>(
    path: P,
    options: &CleanupOptions,
) -> Result<Document> {
    let mut doc = read_document(path)?;
    doc.clean_content_with(options);
    Ok(doc)
}

/// Read selected pages and lines of an in-memory document.
///
/// `ext` picks the reader (e.g., `"docx"`).
pub fn read_bytes_with_config(
    bytes: Vec<u8>,
    ext: &str,
    config: &ReadConfig,
) -> Result<DocumentResult> {
    ReaderRegistry::with_defaults().read_bytes_with_config(bytes, ext, config)
}

/// Extensions handled by the built-in readers, sorted.
pub fn supported_formats() -> Vec<String> {
    ReaderRegistry::with_defaults()
        .supported_extensions()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Check whether an extension (with or without the leading dot) is supported.
pub fn is_format_supported(ext: &str) -> bool {
    let ext = ext.strip_prefix('.').unwrap_or(ext);
    ReaderRegistry::with_defaults().supports(ext)
}

/// Builder for selective reads.
///
/// # Example
///
/// ```no_run
/// use doclines::{CleanupPreset, Doclines};
///
/// let text = Doclines::new()
///     .with_pages([0, 2])
///     .with_line_range(0, 19)
///     .with_cleanup(CleanupPreset::Aggressive)
///     .read("deck.pptx")?
///     .to_text();
/// # Ok::<(), doclines::Error>(())
/// ```
pub struct Doclines {
    registry: ReaderRegistry,
    config: ReadConfig,
    cleanup: Option<CleanupOptions>,
}

impl Doclines {
    /// Create a new builder with the built-in readers.
    pub fn new() -> Self {
        Self {
            registry: ReaderRegistry::with_defaults(),
            config: ReadConfig::default(),
            cleanup: None,
        }
    }

    /// Use a custom reader registry.
    pub fn with_registry(mut self, registry: ReaderRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the whole read configuration.
    pub fn with_config(mut self, config: ReadConfig) -> Self {
        self.config = config;
        self
    }

    /// Select pages by index.
    pub fn with_pages<I: IntoIterator<Item = i64>>(mut self, pages: I) -> Self {
        self.config = self.config.with_pages(pages);
        self
    }

    /// Select an inclusive page range.
    pub fn with_page_range(mut self, start: i64, end: i64) -> Self {
        self.config = self.config.with_page_range(start, end);
        self
    }

    /// Select lines by index on every page.
    pub fn with_lines<I: IntoIterator<Item = i64>>(mut self, lines: I) -> Self {
        self.config = self.config.with_lines(lines);
        self
    }

    /// Select an inclusive line range on every page.
    pub fn with_line_range(mut self, start: i64, end: i64) -> Self {
        self.config = self.config.with_line_range(start, end);
        self
    }

    /// Select lines on one page only.
    pub fn with_page_lines<I: IntoIterator<Item = i64>>(mut self, page: i64, lines: I) -> Self {
        self.config = self.config.add_page_lines(page, lines);
        self
    }

    /// Select sheets by name.
    pub fn with_sheet_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config = self.config.with_sheet_names(names);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.cleanup = Some(CleanupOptions::from_preset(preset));
        self
    }

    /// Set custom cleanup options.
    pub fn with_cleanup_options(mut self, options: CleanupOptions) -> Self {
        self.cleanup = Some(options);
        self
    }

    /// Read a file.
    pub fn read<P: AsRef<Path>>(self, path: P) -> Result<DoclinesResult> {
        let result = self.registry.read_with_config(path.as_ref(), &self.config)?;
        Ok(DoclinesResult {
            result,
            cleanup: self.cleanup,
        })
    }

    /// Read an in-memory document; `ext` picks the reader.
    pub fn read_bytes(self, bytes: Vec<u8>, ext: &str) -> Result<DoclinesResult> {
        let result = self
            .registry
            .read_bytes_with_config(bytes, ext, &self.config)?;
        Ok(DoclinesResult {
            result,
            cleanup: self.cleanup,
        })
    }
}

impl Default for Doclines {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a [`Doclines`] read.
pub struct DoclinesResult {
    result: DocumentResult,
    cleanup: Option<CleanupOptions>,
}

impl DoclinesResult {
    /// Content as plain text, cleaned if cleanup was configured.
    pub fn to_text(&self) -> String {
        render::to_text(&self.result, self.cleanup.as_ref())
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.result, format)
    }

    /// Statistics over the retained lines.
    pub fn stats(&self) -> ExtractionStats {
        ExtractionStats::from_result(&self.result)
    }

    /// Get the read result.
    pub fn result(&self) -> &DocumentResult {
        &self.result
    }

    /// Take the read result.
    pub fn into_result(self) -> DocumentResult {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doclines_builder() {
        let builder = Doclines::new()
            .with_pages([0, 2])
            .with_line_range(0, 4)
            .with_cleanup(CleanupPreset::Aggressive);

        assert_eq!(builder.config.page_selector.indices, vec![0, 2]);
        assert_eq!(builder.config.line_selector.ranges, vec![(0, 4)]);
        assert_eq!(builder.cleanup, Some(CleanupOptions::aggressive()));
    }

    #[test]
    fn test_doclines_builder_default() {
        let builder = Doclines::default();
        assert!(builder.config.is_unconstrained());
        assert!(builder.cleanup.is_none());
    }

    #[test]
    fn test_doclines_page_lines_and_sheets() {
        let builder = Doclines::new()
            .with_page_lines(1, [3])
            .with_sheet_names(["Data"]);
        assert_eq!(builder.config.page_overrides.len(), 1);
        assert_eq!(builder.config.sheet_names, vec!["Data"]);
    }

    #[test]
    fn test_read_bytes_text() {
        let result = Doclines::new()
            .with_lines([1])
            .with_cleanup(CleanupPreset::Standard)
            .read_bytes(b"first\n  second   line  \nthird".to_vec(), "txt")
            .unwrap();

        assert_eq!(result.to_text(), "second line");
        assert_eq!(result.result().total_lines, 1);
        assert_eq!(result.stats().word_count, 2);
        assert_eq!(result.result().metadata["format"], "text");
    }

    #[test]
    fn test_read_bytes_unsupported() {
        let result = read_bytes_with_config(Vec::new(), "epub", &ReadConfig::default());
        assert!(result.unwrap_err().is_unsupported_format());
    }

    #[test]
    fn test_supported_formats() {
        let formats = supported_formats();
        assert!(formats.contains(&"docx".to_string()));
        assert!(formats.contains(&"markdown".to_string()));
        assert!(formats.contains(&"pdf".to_string()));
        assert!(!formats.contains(&"epub".to_string()));
    }

    #[test]
    fn test_is_format_supported() {
        assert!(is_format_supported("csv"));
        assert!(is_format_supported(".PPTX"));
        assert!(is_format_supported(".pdf"));
        assert!(!is_format_supported(".epub"));
    }

    #[test]
    fn test_read_document_missing_file() {
        let result = read_document("/nonexistent/missing.docx");
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }

    #[test]
    fn test_clean_text_presets() {
        let text = "  a  \n\n\n\n  b  ";
        assert_eq!(clean_text(text), "a\n\nb");
        assert_eq!(clean_text_minimal(text), "a\n\n\n\nb");
        assert_eq!(clean_text_aggressive(text), "a\nb");
    }
}
