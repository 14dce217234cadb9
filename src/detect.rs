//! Document format detection.
//!
//! Formats are normally chosen by file extension. When a path has no usable
//! extension, the content is sniffed instead: PDF, RTF and OLE signatures, the
//! part names inside a ZIP container, and finally a UTF-8 check for plain
//! text.

use crate::error::{Error, Result};
use std::io::{Cursor, Read};
use std::path::Path;
use zip::ZipArchive;

/// Known document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// Portable Document Format
    Pdf,
    /// Plain text
    Text,
    /// Markdown
    Markdown,
    /// Comma-separated values
    Csv,
    /// Rich Text Format
    Rtf,
    /// Word (OOXML)
    Docx,
    /// Excel (OOXML)
    Xlsx,
    /// Excel 97-2003 (OLE)
    Xls,
    /// OpenDocument spreadsheet
    Ods,
    /// PowerPoint (OOXML)
    Pptx,
}

impl DocumentFormat {
    /// Map a file extension (without the dot, any case) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" | "text" => Some(Self::Text),
            "md" | "markdown" => Some(Self::Markdown),
            "csv" => Some(Self::Csv),
            "rtf" => Some(Self::Rtf),
            "docx" => Some(Self::Docx),
            "xlsx" | "xlsm" => Some(Self::Xlsx),
            "xls" => Some(Self::Xls),
            "ods" => Some(Self::Ods),
            "pptx" => Some(Self::Pptx),
            _ => None,
        }
    }

    /// Canonical extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Text => "txt",
            Self::Markdown => "md",
            Self::Csv => "csv",
            Self::Rtf => "rtf",
            Self::Docx => "docx",
            Self::Xlsx => "xlsx",
            Self::Xls => "xls",
            Self::Ods => "ods",
            Self::Pptx => "pptx",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Pdf => "PDF",
            Self::Text => "Plain text",
            Self::Markdown => "Markdown",
            Self::Csv => "CSV",
            Self::Rtf => "RTF",
            Self::Docx => "DOCX",
            Self::Xlsx => "XLSX",
            Self::Xls => "XLS",
            Self::Ods => "ODS",
            Self::Pptx => "PPTX",
        };
        f.write_str(name)
    }
}

const PDF_MAGIC: &[u8] = b"%PDF-";
const RTF_MAGIC: &[u8] = b"{\\rtf";
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = b"\xD0\xCF\x11\xE0\xA1\xB1\x1A\xE1";
const ODS_MIMETYPE: &str = "application/vnd.oasis.opendocument.spreadsheet";

/// Bytes inspected by the plain-text check
const TEXT_SNIFF_LEN: usize = 8192;

/// Detect the format of a file from its content.
///
/// # Example
/// ```no_run
/// use doclines::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("report").unwrap();
/// println!("Detected: {}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<DocumentFormat> {
    let data = std::fs::read(path)?;
    detect_format_from_bytes(&data)
}

/// Detect the format of a document from its bytes.
///
/// ZIP containers need the whole buffer, since part names live in the
/// central directory at the end of the archive.
///
/// # Returns
/// * `Ok(DocumentFormat)` for a recognized format
/// * `Err(Error::EmptyDocument)` for empty input
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<DocumentFormat> {
    if data.is_empty() {
        return Err(Error::EmptyDocument);
    }

    if data.starts_with(PDF_MAGIC) {
        return Ok(DocumentFormat::Pdf);
    }

    if data.starts_with(RTF_MAGIC) {
        return Ok(DocumentFormat::Rtf);
    }

    if data.starts_with(OLE_MAGIC) {
        return Ok(DocumentFormat::Xls);
    }

    if data.starts_with(ZIP_MAGIC) {
        return detect_zip_format(data);
    }

    if looks_like_text(data) {
        return Ok(DocumentFormat::Text);
    }

    Err(Error::UnknownFormat)
}

fn detect_zip_format(data: &[u8]) -> Result<DocumentFormat> {
    let mut archive = ZipArchive::new(Cursor::new(data))?;

    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    let has_part = |name: &str| names.iter().any(|n| n == name);

    if has_part("word/document.xml") {
        return Ok(DocumentFormat::Docx);
    }
    if has_part("xl/workbook.xml") {
        return Ok(DocumentFormat::Xlsx);
    }
    if has_part("ppt/presentation.xml") {
        return Ok(DocumentFormat::Pptx);
    }

    if let Ok(mut entry) = archive.by_name("mimetype") {
        let mut mimetype = String::new();
        if entry.read_to_string(&mut mimetype).is_ok() && mimetype.trim() == ODS_MIMETYPE {
            return Ok(DocumentFormat::Ods);
        }
    }

    Err(Error::UnknownFormat)
}

/// UTF-8 without NUL bytes in the leading window.
fn looks_like_text(data: &[u8]) -> bool {
    let window = &data[..data.len().min(TEXT_SNIFF_LEN)];
    if window.contains(&0) {
        return false;
    }
    match std::str::from_utf8(window) {
        Ok(_) => true,
        // A multi-byte character cut by the window edge is still text
        Err(e) => e.error_len().is_none() && window.len() - e.valid_up_to() < 4,
    }
}

/// Check if a file extension maps to a known format.
pub fn is_known_extension(ext: &str) -> bool {
    DocumentFormat::from_extension(ext).is_some()
}
