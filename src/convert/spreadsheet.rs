//! Spreadsheet reader (XLSX, XLSM, XLS, ODS).
//!
//! One named page per sheet. Every non-empty row becomes one line,
//! `Row N: a | b`, where `N` is the 1-based row number in the sheet.

use super::delimited::format_row;
use super::ooxml::core_properties;
use super::{DocumentReader, PageLayout, PageSource};
use crate::error::{Error, Result};
use crate::model::Metadata;
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use std::io::Cursor;
use zip::ZipArchive;

/// Render one cell as text.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Error(e) => format!("#ERR:{:?}", e),
        other => other.to_string(),
    }
}

/// Lines for one worksheet range.
fn range_lines(range: &Range<Data>) -> Vec<String> {
    let first_row = range.start().map_or(0, |(row, _)| row as usize);

    range
        .rows()
        .enumerate()
        .filter_map(|(offset, row)| {
            let mut cells: Vec<String> = row.iter().map(cell_text).collect();
            while cells.last().is_some_and(|c| c.is_empty()) {
                cells.pop();
            }
            if cells.is_empty() {
                return None;
            }
            Some(format_row(first_row + offset + 1, &cells))
        })
        .collect()
}

/// Opened workbook.
pub struct SpreadsheetSource {
    workbook: Sheets<Cursor<Vec<u8>>>,
    sheet_names: Vec<String>,
    metadata: Metadata,
}

impl PageSource for SpreadsheetSource {
    fn layout(&self) -> PageLayout {
        PageLayout::Sheets
    }

    fn page_count(&self) -> usize {
        self.sheet_names.len()
    }

    fn page_name(&self, index: usize) -> Option<String> {
        self.sheet_names.get(index).cloned()
    }

    fn read_page(&mut self, index: usize) -> Result<Vec<String>> {
        let name = self.sheet_names.get(index).ok_or_else(|| Error::PageDecode {
            page: index,
            reason: "no such sheet".to_string(),
        })?;

        let range = self
            .workbook
            .worksheet_range(name)
            .map_err(|e| Error::PageDecode {
                page: index,
                reason: e.to_string(),
            })?;
        Ok(range_lines(&range))
    }

    fn metadata(&self) -> Metadata {
        self.metadata.clone()
    }
}

/// Spreadsheet reader.
#[derive(Debug, Clone, Default)]
pub struct SpreadsheetReader {
    _private: (),
}

impl SpreadsheetReader {
    /// Create a new spreadsheet reader.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentReader for SpreadsheetReader {
    fn name(&self) -> &str {
        "spreadsheet"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["xlsx", "xlsm", "xls", "ods"]
    }

    fn open_bytes(&self, bytes: Vec<u8>) -> Result<Box<dyn PageSource>> {
        // OOXML workbooks carry core properties; other formats have none here
        let mut metadata = match ZipArchive::new(Cursor::new(bytes.as_slice())) {
            Ok(mut archive) => core_properties(&mut archive),
            Err(_) => Metadata::new(),
        };

        let workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
        let sheet_names = workbook.sheet_names();

        metadata.insert("sheets".to_string(), sheet_names.join(", "));
        metadata.insert("sheet_count".to_string(), sheet_names.len().to_string());

        Ok(Box::new(SpreadsheetSource {
            workbook,
            sheet_names,
            metadata,
        }))
    }
}
