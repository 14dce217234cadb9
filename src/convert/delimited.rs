//! CSV reader.
//!
//! Every record becomes one line, `Row N: a | b | c`, with `N` counted from 1.

use super::{DocumentReader, PageSource, SinglePageSource};
use crate::error::Result;
use crate::model::Metadata;

/// CSV reader.
#[derive(Debug, Clone)]
pub struct CsvReader {
    delimiter: u8,
}

impl CsvReader {
    /// Create a new comma-separated reader.
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    fn read_records(&self, bytes: &[u8]) -> Result<Vec<Vec<String>>> {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .has_headers(false)
            .from_reader(bytes);

        let mut records = Vec::new();
        for record in reader.records() {
            let record = record?;
            records.push(record.iter().map(str::to_string).collect());
        }
        Ok(records)
    }
}

impl Default for CsvReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Format one record as a numbered line.
pub(crate) fn format_row(row_number: usize, cells: &[String]) -> String {
    format!("Row {}: {}", row_number, cells.join(" | "))
}

impl DocumentReader for CsvReader {
    fn name(&self) -> &str {
        "csv"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["csv"]
    }

    fn open_bytes(&self, bytes: Vec<u8>) -> Result<Box<dyn PageSource>> {
        let records = self.read_records(&bytes)?;

        let mut metadata = Metadata::new();
        metadata.insert("rows".to_string(), records.len().to_string());
        if let Some(first) = records.first() {
            metadata.insert("columns".to_string(), first.len().to_string());
        }

        let lines = records
            .iter()
            .enumerate()
            .map(|(i, record)| format_row(i + 1, record))
            .collect();

        Ok(Box::new(SinglePageSource::new(lines, metadata)))
    }
}
