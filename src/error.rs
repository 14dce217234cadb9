//! Error types for doclines.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for doclines operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading documents.
///
/// Page selection, line filtering and text cleanup never fail; every variant
/// here comes from a format reader or from the surrounding file I/O.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input file does not exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// No reader is registered for this extension.
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// The content could not be recognized as any known format.
    #[error("Unknown file format")]
    UnknownFormat,

    /// Error opening or reading a ZIP container.
    #[error("Archive error: {0}")]
    Archive(String),

    /// Error parsing an XML part.
    #[error("XML parsing error: {0}")]
    Xml(String),

    /// Error reading a spreadsheet workbook.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// Error parsing a PDF file.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Error reading CSV records.
    #[error("CSV error: {0}")]
    Csv(String),

    /// A required part is missing from the container.
    #[error("Missing required part: {0}")]
    MissingPart(String),

    /// The document has no readable content.
    #[error("Document is empty")]
    EmptyDocument,

    /// A single page failed to decode.
    #[error("Failed to decode page {page}: {reason}")]
    PageDecode {
        /// Zero-based page index
        page: usize,
        /// Underlying failure
        reason: String,
    },

    /// A selector string could not be parsed.
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// Error during rendering (text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Check whether this error means the input file does not exist.
    pub fn is_file_not_found(&self) -> bool {
        match self {
            Error::FileNotFound(_) => true,
            Error::Io(e) => e.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }

    /// Check whether this error means the format is not supported.
    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, Error::UnsupportedFormat(_) | Error::UnknownFormat)
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            zip::result::ZipError::FileNotFound => Error::MissingPart(err.to_string()),
            _ => Error::Archive(err.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<calamine::Error> for Error {
    fn from(err: calamine::Error) -> Self {
        match err {
            calamine::Error::Io(e) => Error::Io(e),
            _ => Error::Spreadsheet(err.to_string()),
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Error::Pdf(err.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err.to_string())
    }
}
