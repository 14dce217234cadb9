//! Document readers with a plugin architecture for multiple formats.
//!
//! A [`DocumentReader`] opens bytes or a file into a [`PageSource`]: an
//! ordered sequence of pages, each an optional name plus text lines. The
//! selection engine in [`extract`] depends only on that trait, so new
//! formats plug in by registering a reader with a [`ReaderRegistry`].
//!
//! # Example
//!
//! ```no_run
//! use doclines::convert::ReaderRegistry;
//! use doclines::ReadConfig;
//! use std::path::Path;
//!
//! fn main() -> doclines::Result<()> {
//!     let registry = ReaderRegistry::with_defaults();
//!     let config = ReadConfig::new().with_pages([0]).with_line_range(0, 9);
//!
//!     let result = registry.read_with_config(Path::new("report.xlsx"), &config)?;
//!     println!("{}", result.content);
//!     Ok(())
//! }
//! ```

mod delimited;
mod docx;
mod ooxml;
mod pdf;
mod pptx;
mod rtf;
mod spreadsheet;
mod text;

pub use delimited::CsvReader;
pub use docx::DocxReader;
pub use pdf::PdfReader;
pub use pptx::PptxReader;
pub use rtf::RtfReader;
pub use spreadsheet::SpreadsheetReader;
pub use text::{MarkdownReader, TextReader};

pub use crate::render::PageLayout;

use crate::detect::detect_format_from_bytes;
use crate::error::{Error, Result};
use crate::model::{Document, DocumentResult, Metadata};
use crate::render::ResultAssembler;
use crate::select::{
    resolve_page_filters, resolve_single_page_filter, restrict_to_names, ReadConfig,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// An opened document, read page by page.
pub trait PageSource {
    /// How pages are presented in assembled content.
    fn layout(&self) -> PageLayout;

    /// Number of pages (sheets, slides).
    fn page_count(&self) -> usize;

    /// Name of a page, if the format names its pages.
    fn page_name(&self, index: usize) -> Option<String>;

    /// Decode the lines of one page, in document order.
    fn read_page(&mut self, index: usize) -> Result<Vec<String>>;

    /// Document metadata.
    fn metadata(&self) -> Metadata;
}

/// Trait for document readers.
///
/// Implement this trait to add support for a new document format.
pub trait DocumentReader: Send + Sync {
    /// Get the name of this reader.
    fn name(&self) -> &str;

    /// Get the supported file extensions for this reader.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["docx"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Open a document from its bytes.
    fn open_bytes(&self, bytes: Vec<u8>) -> Result<Box<dyn PageSource>>;

    /// Open a document from a file.
    fn open(&self, path: &Path) -> Result<Box<dyn PageSource>> {
        let bytes = std::fs::read(path)?;
        self.open_bytes(bytes)
    }

    /// Check if this reader supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Page source for formats with exactly one logical page.
#[derive(Debug, Clone, Default)]
pub struct SinglePageSource {
    lines: Vec<String>,
    metadata: Metadata,
}

impl SinglePageSource {
    /// Create a single-page source from decoded lines.
    pub fn new(lines: Vec<String>, metadata: Metadata) -> Self {
        Self { lines, metadata }
    }
}

impl PageSource for SinglePageSource {
    fn layout(&self) -> PageLayout {
        PageLayout::Single
    }

    fn page_count(&self) -> usize {
        1
    }

    fn page_name(&self, _index: usize) -> Option<String> {
        None
    }

    fn read_page(&mut self, index: usize) -> Result<Vec<String>> {
        if index != 0 {
            return Err(Error::PageDecode {
                page: index,
                reason: "document has a single page".to_string(),
            });
        }
        Ok(self.lines.clone())
    }

    fn metadata(&self) -> Metadata {
        self.metadata.clone()
    }
}

/// Run a selective read over an opened document.
///
/// Pages are read in ascending index order. A page that fails to decode is
/// skipped with a warning and the read continues.
pub fn extract(source: &mut dyn PageSource, config: &ReadConfig) -> DocumentResult {
    let total_pages = source.page_count();
    let layout = source.layout();
    let mut assembler = ResultAssembler::new(layout, total_pages);

    if !layout.is_paged() {
        let filter = resolve_single_page_filter(config);
        match source.read_page(0) {
            Ok(lines) => assembler.push_page(0, source.page_name(0), filter.apply(lines)),
            Err(e) => log::warn!("Skipping page 0: {}", e),
        }
        return assembler.finish(source.metadata());
    }

    let mut filters = resolve_page_filters(config, total_pages);
    restrict_to_names(&mut filters, config, |index| source.page_name(index));

    for (&page, filter) in &filters {
        match source.read_page(page) {
            Ok(lines) => assembler.push_page(page, source.page_name(page), filter.apply(lines)),
            Err(e) => log::warn!("Skipping page {}: {}", page, e),
        }
    }

    log::debug!("read {} of {} pages", assembler.page_count(), total_pages);
    assembler.finish(source.metadata())
}

/// Registry for document readers.
///
/// The registry maps file extensions and names to readers and dispatches
/// reads. It holds no global state; build one and share it.
pub struct ReaderRegistry {
    readers: HashMap<String, Arc<dyn DocumentReader>>,
    by_name: HashMap<String, Arc<dyn DocumentReader>>,
}

impl ReaderRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            readers: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with every built-in reader.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(TextReader::new()));
        registry.register(Arc::new(MarkdownReader::new()));
        registry.register(Arc::new(CsvReader::new()));
        registry.register(Arc::new(RtfReader::new()));
        registry.register(Arc::new(PdfReader::new()));
        registry.register(Arc::new(DocxReader::new()));
        registry.register(Arc::new(SpreadsheetReader::new()));
        registry.register(Arc::new(PptxReader::new()));
        registry
    }

    /// Register a reader.
    ///
    /// The reader will be registered for all its supported extensions,
    /// replacing any reader previously registered for them.
    pub fn register(&mut self, reader: Arc<dyn DocumentReader>) {
        for ext in reader.supported_extensions() {
            self.readers.insert(ext.to_lowercase(), reader.clone());
        }
        self.by_name.insert(reader.name().to_lowercase(), reader);
    }

    /// Get a reader by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentReader>> {
        self.readers.get(&ext.to_lowercase()).cloned()
    }

    /// Get a reader by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentReader>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.readers.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.readers.keys().map(|s| s.as_str()).collect();
        extensions.sort_unstable();
        extensions
    }

    /// Open a file with the reader for its extension.
    ///
    /// Files without an extension are sniffed by content.
    pub fn open(&self, path: &Path) -> Result<Box<dyn PageSource>> {
        let (reader, source) = self.open_with_reader(path)?;
        log::debug!("opened {} with {} reader", path.display(), reader.name());
        Ok(source)
    }

    /// Selectively read a file.
    pub fn read_with_config(&self, path: &Path, config: &ReadConfig) -> Result<DocumentResult> {
        let (reader, mut source) = self.open_with_reader(path)?;
        log::debug!("reading {} with {} reader", path.display(), reader.name());

        let mut result = extract(source.as_mut(), config);
        result.file_path = Some(path.display().to_string());
        result
            .metadata
            .insert("format".to_string(), reader.name().to_string());
        add_file_metadata(&mut result.metadata, path)?;
        Ok(result)
    }

    /// Selectively read a document from bytes, dispatching on `ext`.
    pub fn read_bytes_with_config(
        &self,
        bytes: Vec<u8>,
        ext: &str,
        config: &ReadConfig,
    ) -> Result<DocumentResult> {
        let reader = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedFormat(ext.to_string()))?;

        let mut source = reader.open_bytes(bytes)?;
        let mut result = extract(source.as_mut(), config);
        result
            .metadata
            .insert("format".to_string(), reader.name().to_string());
        Ok(result)
    }

    /// Read a whole file as one document.
    pub fn read_document(&self, path: &Path) -> Result<Document> {
        self.read_with_config(path, &ReadConfig::default())
            .map(DocumentResult::into_document)
    }

    fn open_with_reader(
        &self,
        path: &Path,
    ) -> Result<(Arc<dyn DocumentReader>, Box<dyn PageSource>)> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => {
                let reader = self
                    .get_by_extension(ext)
                    .ok_or_else(|| Error::UnsupportedFormat(ext.to_string()))?;
                let source = reader.open(path)?;
                Ok((reader, source))
            }
            None => {
                let bytes = std::fs::read(path)?;
                let format = detect_format_from_bytes(&bytes)?;
                log::debug!("detected {} for {}", format, path.display());
                let reader = self
                    .get_by_extension(format.extension())
                    .ok_or_else(|| Error::UnsupportedFormat(format.extension().to_string()))?;
                let source = reader.open_bytes(bytes)?;
                Ok((reader, source))
            }
        }
    }
}

impl Default for ReaderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Add file size and modification time.
///
/// A `modified` value already taken from document properties is kept.
fn add_file_metadata(metadata: &mut Metadata, path: &Path) -> Result<()> {
    let file_meta = std::fs::metadata(path)?;
    metadata.insert("size".to_string(), file_meta.len().to_string());

    if let Ok(modified) = file_meta.modified() {
        let modified: DateTime<Utc> = modified.into();
        metadata
            .entry("modified".to_string())
            .or_insert_with(|| modified.to_rfc3339());
    }
    Ok(())
}
