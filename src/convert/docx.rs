//! DOCX reader.
//!
//! Body paragraphs and table rows become lines in document order. A table
//! row is one line with its cells joined by ` | `; a line break inside a
//! body paragraph starts a new line.

use super::ooxml::{core_properties, open_archive, read_part};
use super::{DocumentReader, PageSource, SinglePageSource};
use crate::error::Result;
use quick_xml::events::Event;
use quick_xml::Reader;

const DOCUMENT_PART: &str = "word/document.xml";

/// Streaming state for `word/document.xml`.
#[derive(Default)]
struct BodyCollector {
    lines: Vec<String>,
    paragraph: String,
    in_text: bool,
    /// Open table cells, innermost last
    cells: Vec<String>,
    /// Open table rows, innermost last
    rows: Vec<Vec<String>>,
    paragraphs: usize,
    tables: usize,
}

impl BodyCollector {
    fn in_table(&self) -> bool {
        !self.cells.is_empty()
    }

    fn start(&mut self, name: &[u8]) {
        match name {
            b"t" => self.in_text = true,
            b"tbl" => {
                if self.rows.is_empty() {
                    self.tables += 1;
                }
            }
            b"tr" => self.rows.push(Vec::new()),
            b"tc" => self.cells.push(String::new()),
            _ => {}
        }
    }

    fn empty(&mut self, name: &[u8]) {
        match name {
            b"tab" => self.paragraph.push('\t'),
            b"br" | b"cr" => {
                if self.in_table() {
                    self.paragraph.push(' ');
                } else {
                    let line = std::mem::take(&mut self.paragraph);
                    self.lines.push(line);
                }
            }
            b"p" => self.end_paragraph(),
            _ => {}
        }
    }

    fn end(&mut self, name: &[u8]) {
        match name {
            b"t" => self.in_text = false,
            b"p" => self.end_paragraph(),
            b"tc" => {
                let cell = self.cells.pop().unwrap_or_default();
                if let Some(row) = self.rows.last_mut() {
                    row.push(cell.trim().to_string());
                }
            }
            b"tr" => {
                let row = self.rows.pop().unwrap_or_default();
                if row.iter().all(|cell| cell.is_empty()) {
                    return;
                }
                let line = row.join(" | ");
                match self.cells.last_mut() {
                    // Nested table: the row belongs to the enclosing cell
                    Some(cell) => {
                        if !cell.is_empty() {
                            cell.push(' ');
                        }
                        cell.push_str(&line);
                    }
                    None => self.lines.push(line),
                }
            }
            _ => {}
        }
    }

    fn end_paragraph(&mut self) {
        let paragraph = std::mem::take(&mut self.paragraph);
        match self.cells.last_mut() {
            Some(cell) => {
                let text = paragraph.trim();
                if !text.is_empty() {
                    if !cell.is_empty() {
                        cell.push(' ');
                    }
                    cell.push_str(text);
                }
            }
            None => {
                self.paragraphs += 1;
                self.lines.push(paragraph);
            }
        }
    }
}

fn parse_document(xml: &str) -> Result<BodyCollector> {
    let mut reader = Reader::from_str(xml);
    let mut collector = BodyCollector::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => collector.start(e.local_name().as_ref()),
            Event::Empty(e) => collector.empty(e.local_name().as_ref()),
            Event::End(e) => collector.end(e.local_name().as_ref()),
            Event::Text(e) if collector.in_text => {
                collector.paragraph.push_str(&e.unescape()?);
            }
            Event::CData(e) if collector.in_text => {
                collector
                    .paragraph
                    .push_str(&String::from_utf8_lossy(&e.into_inner()));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(collector)
}

/// DOCX reader.
#[derive(Debug, Clone, Default)]
pub struct DocxReader {
    _private: (),
}

impl DocxReader {
    /// Create a new DOCX reader.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentReader for DocxReader {
    fn name(&self) -> &str {
        "docx"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn open_bytes(&self, bytes: Vec<u8>) -> Result<Box<dyn PageSource>> {
        let mut archive = open_archive(bytes)?;
        let xml = read_part(&mut archive, DOCUMENT_PART)?;
        let body = parse_document(&xml)?;

        let mut metadata = core_properties(&mut archive);
        metadata.insert("paragraph_count".to_string(), body.paragraphs.to_string());
        metadata.insert("table_count".to_string(), body.tables.to_string());

        Ok(Box::new(SinglePageSource::new(body.lines, metadata)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            body
        )
    }

    #[test]
    fn test_paragraph_runs_are_joined() {
        let xml = document(
            r#"<w:p><w:r><w:t>Hello </w:t></w:r><w:r><w:t xml:space="preserve">world</w:t></w:r></w:p><w:p/><w:p><w:r><w:t>Bye</w:t></w:r></w:p>"#,
        );
        let body = parse_document(&xml).unwrap();
        assert_eq!(body.lines, vec!["Hello world", "", "Bye"]);
        assert_eq!(body.paragraphs, 3);
    }

    #[test]
    fn test_tables_in_document_order() {
        let xml = document(
            r#"<w:p><w:r><w:t>Before</w:t></w:r></w:p>
<w:tbl><w:tr><w:tc><w:p><w:r><w:t>A1</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>B1</w:t></w:r></w:p></w:tc></w:tr>
<w:tr><w:tc><w:p/></w:tc><w:tc><w:p/></w:tc></w:tr>
<w:tr><w:tc><w:p><w:r><w:t>A3</w:t></w:r></w:p><w:p><w:r><w:t>more</w:t></w:r></w:p></w:tc><w:tc><w:p/></w:tc></w:tr></w:tbl>
<w:p><w:r><w:t>After</w:t></w:r></w:p>"#,
        );
        let body = parse_document(&xml).unwrap();
        assert_eq!(body.lines, vec!["Before", "A1 | B1", "A3 more | ", "After"]);
        assert_eq!(body.tables, 1);
    }

    #[test]
    fn test_break_and_tab() {
        let xml = document(
            r#"<w:p><w:r><w:t>one</w:t><w:br/><w:t>two</w:t><w:tab/><w:t>three</w:t></w:r></w:p>"#,
        );
        let body = parse_document(&xml).unwrap();
        assert_eq!(body.lines, vec!["one", "two\tthree"]);
    }

    #[test]
    fn test_escaped_text() {
        let xml = document(r#"<w:p><w:r><w:t>a &lt; b &amp; c</w:t></w:r></w:p>"#);
        let body = parse_document(&xml).unwrap();
        assert_eq!(body.lines, vec!["a < b & c"]);
    }
}
