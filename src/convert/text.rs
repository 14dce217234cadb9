//! Plain text and Markdown readers.

use super::{DocumentReader, PageSource, SinglePageSource};
use crate::error::Result;
use crate::model::Metadata;

const UTF8_BOM: &str = "\u{FEFF}";

/// Decode bytes as UTF-8 (lossy) and split into lines.
///
/// A leading byte-order mark is dropped; `\r\n` endings are accepted.
pub(crate) fn decode_lines(bytes: &[u8]) -> Vec<String> {
    let text = String::from_utf8_lossy(bytes);
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(&text);
    text.lines().map(str::to_string).collect()
}

fn open_lines(bytes: &[u8]) -> Box<dyn PageSource> {
    let lines = decode_lines(bytes);
    let mut metadata = Metadata::new();
    metadata.insert("line_count".to_string(), lines.len().to_string());
    Box::new(SinglePageSource::new(lines, metadata))
}

/// Plain text reader.
#[derive(Debug, Clone, Default)]
pub struct TextReader {
    _private: (),
}

impl TextReader {
    /// Create a new plain text reader.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentReader for TextReader {
    fn name(&self) -> &str {
        "text"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["txt", "text"]
    }

    fn open_bytes(&self, bytes: Vec<u8>) -> Result<Box<dyn PageSource>> {
        Ok(open_lines(&bytes))
    }
}

/// Markdown reader.
///
/// Markdown is read verbatim, markup included.
#[derive(Debug, Clone, Default)]
pub struct MarkdownReader {
    _private: (),
}

impl MarkdownReader {
    /// Create a new Markdown reader.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentReader for MarkdownReader {
    fn name(&self) -> &str {
        "markdown"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn open_bytes(&self, bytes: Vec<u8>) -> Result<Box<dyn PageSource>> {
        Ok(open_lines(&bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_lines() {
        let lines = decode_lines(b"\xEF\xBB\xBFfirst\r\nsecond\n\nfourth\n");
        assert_eq!(lines, vec!["first", "second", "", "fourth"]);
    }

    #[test]
    fn test_decode_invalid_utf8_is_lossy() {
        let lines = decode_lines(b"ok\n\xFF\xFE bad");
        assert_eq!(lines[0], "ok");
        assert!(lines[1].ends_with(" bad"));
    }

    #[test]
    fn test_text_reader_source() {
        let reader = TextReader::new();
        let mut source = reader.open_bytes(b"a\nb\nc".to_vec()).unwrap();
        assert_eq!(source.page_count(), 1);
        assert_eq!(source.read_page(0).unwrap(), vec!["a", "b", "c"]);
        assert_eq!(source.metadata()["line_count"], "3");
    }

    #[test]
    fn test_markdown_keeps_markup() {
        let reader = MarkdownReader::new();
        assert!(reader.supports_extension("MD"));
        let mut source = reader.open_bytes(b"# Title\n\n- item".to_vec()).unwrap();
        assert_eq!(source.read_page(0).unwrap(), vec!["# Title", "", "- item"]);
    }
}
