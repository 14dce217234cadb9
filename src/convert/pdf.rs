//! PDF reader.
//!
//! One page per PDF page, in page-tree order. A page's text is taken from
//! its content stream and split into lines on `\n`. Pages are extracted on
//! demand, so a page with an undecodable stream only costs that page.

use super::{DocumentReader, PageLayout, PageSource};
use crate::error::{Error, Result};
use crate::model::Metadata;
use lopdf::{Dictionary, Document, Object};

/// Info dictionary entries and the metadata keys they map to.
const INFO_FIELDS: &[(&[u8], &str)] = &[
    (b"Title", "title"),
    (b"Author", "author"),
    (b"Subject", "subject"),
    (b"Creator", "creator"),
    (b"Producer", "producer"),
    (b"CreationDate", "creation_date"),
    (b"ModDate", "modification_date"),
];

/// Split extracted page text into lines.
///
/// The newline that closes the last text object does not start a new line.
fn page_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.strip_suffix('\n')
        .unwrap_or(text)
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

/// Decode a PDF text string: UTF-16BE with a byte order mark, else UTF-8,
/// else Latin-1.
fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

fn info_string(info: &Dictionary, key: &[u8]) -> Option<String> {
    match info.get(key).ok()? {
        Object::String(bytes, _) => Some(decode_text_string(bytes)),
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}

/// Document info dictionary fields, blank values omitted.
fn info_metadata(doc: &Document) -> Metadata {
    let mut metadata = Metadata::new();

    let info = match doc.trailer.get(b"Info") {
        Ok(Object::Reference(id)) => doc.get_dictionary(*id).ok(),
        Ok(Object::Dictionary(dict)) => Some(dict),
        _ => None,
    };
    let Some(info) = info else {
        log::debug!("PDF has no info dictionary");
        return metadata;
    };

    for (key, name) in INFO_FIELDS {
        if let Some(value) = info_string(info, key) {
            let value = value.trim();
            if !value.is_empty() {
                metadata.insert(name.to_string(), value.to_string());
            }
        }
    }
    metadata
}

/// Opened PDF document.
pub struct PdfSource {
    doc: Document,
    /// One-based page numbers, in order
    pages: Vec<u32>,
    metadata: Metadata,
}

impl PageSource for PdfSource {
    fn layout(&self) -> PageLayout {
        PageLayout::Pages
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_name(&self, _index: usize) -> Option<String> {
        None
    }

    fn read_page(&mut self, index: usize) -> Result<Vec<String>> {
        let number = *self.pages.get(index).ok_or_else(|| Error::PageDecode {
            page: index,
            reason: "no such page".to_string(),
        })?;

        self.doc
            .extract_text(&[number])
            .map(|text| page_lines(&text))
            .map_err(|e| Error::PageDecode {
                page: index,
                reason: e.to_string(),
            })
    }

    fn metadata(&self) -> Metadata {
        self.metadata.clone()
    }
}

/// PDF reader.
#[derive(Debug, Clone, Default)]
pub struct PdfReader {
    _private: (),
}

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentReader for PdfReader {
    fn name(&self) -> &str {
        "pdf"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn open_bytes(&self, bytes: Vec<u8>) -> Result<Box<dyn PageSource>> {
        let doc = Document::load_mem(&bytes)?;
        if doc.is_encrypted() {
            log::warn!("PDF is encrypted; page text may be unreadable");
        }

        let pages: Vec<u32> = doc.get_pages().into_keys().collect();

        let mut metadata = info_metadata(&doc);
        metadata.insert("version".to_string(), doc.version.to_string());
        metadata.insert("pages".to_string(), pages.len().to_string());

        Ok(Box::new(PdfSource {
            doc,
            pages,
            metadata,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_lines() {
        assert_eq!(page_lines("Total\r\n\nDue 30 days\n"), vec!["Total", "", "Due 30 days"]);
        assert_eq!(page_lines("no newline"), vec!["no newline"]);
        assert_eq!(page_lines("\n"), vec![""]);
        assert!(page_lines("").is_empty());
    }

    #[test]
    fn test_decode_text_string() {
        assert_eq!(decode_text_string(b"Plain title"), "Plain title");
        assert_eq!(
            decode_text_string(&[0xFE, 0xFF, 0x00, 0x52, 0x00, 0xE9, 0x00, 0x73]),
            "Rés"
        );
        assert_eq!(decode_text_string(&[0x43, 0x61, 0x66, 0xE9]), "Café");
    }

    #[test]
    fn test_info_string_kinds() {
        let mut info = Dictionary::new();
        info.set("Title", Object::string_literal("Annual Report"));
        info.set("Creator", Object::Name(b"Writer".to_vec()));
        info.set("Pages", Object::Integer(3));

        assert_eq!(info_string(&info, b"Title").as_deref(), Some("Annual Report"));
        assert_eq!(info_string(&info, b"Creator").as_deref(), Some("Writer"));
        assert_eq!(info_string(&info, b"Pages"), None);
        assert_eq!(info_string(&info, b"Author"), None);
    }

    #[test]
    fn test_open_rejects_non_pdf() {
        let reader = PdfReader::new();
        assert!(matches!(
            reader.open_bytes(b"not a pdf at all".to_vec()),
            Err(Error::Pdf(_))
        ));
    }
}
