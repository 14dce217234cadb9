//! RTF reader.
//!
//! A single pass over the control-word stream. Destination groups that carry
//! no body text (font and color tables, stylesheets, pictures, `{\*...}`
//! extensions) are skipped; `\par` and `\line` end a line; `\'hh` and `\uN`
//! escapes are decoded. Title, author, subject and keywords from the `\info`
//! group become metadata.

use super::{DocumentReader, PageSource, SinglePageSource};
use crate::error::Result;
use crate::model::Metadata;
use std::iter::Peekable;
use std::str::Chars;

/// Destinations whose content is never body text.
const SKIPPED_DESTINATIONS: &[&str] = &[
    "fonttbl",
    "colortbl",
    "stylesheet",
    "info",
    "pict",
    "object",
    "header",
    "headerl",
    "headerr",
    "headerf",
    "footer",
    "footerl",
    "footerr",
    "footerf",
    "footnote",
    "listtable",
    "listoverridetable",
    "revtbl",
    "rsidtbl",
    "generator",
    "xmlnstbl",
    "fldinst",
    "themedata",
    "colorschememapping",
    "latentstyles",
    "datastore",
];

/// `\info` fields kept as metadata.
const INFO_FIELDS: &[(&str, &str)] = &[
    ("title", "title"),
    ("author", "creator"),
    ("subject", "subject"),
    ("keywords", "keywords"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Destination {
    Body,
    Skip,
    Info(&'static str),
}

/// Decoded RTF body lines plus `\info` metadata.
#[derive(Debug, Default)]
struct RtfText {
    lines: Vec<String>,
    metadata: Metadata,
}

struct Scanner {
    groups: Vec<Destination>,
    current: Destination,
    line: String,
    lines: Vec<String>,
    metadata: Metadata,
    unicode_skip: usize,
    pending_skip: usize,
}

impl Scanner {
    fn new() -> Self {
        Self {
            groups: Vec::new(),
            current: Destination::Body,
            line: String::new(),
            lines: Vec::new(),
            metadata: Metadata::new(),
            unicode_skip: 1,
            pending_skip: 0,
        }
    }

    fn emit(&mut self, c: char) {
        if self.pending_skip > 0 {
            self.pending_skip -= 1;
            return;
        }
        match self.current {
            Destination::Body => self.line.push(c),
            Destination::Info(key) => self.metadata.entry(key.to_string()).or_default().push(c),
            Destination::Skip => {}
        }
    }

    fn end_line(&mut self) {
        if self.current == Destination::Body {
            let line = std::mem::take(&mut self.line);
            self.lines.push(line.trim_end().to_string());
        }
    }

    fn scan(mut self, input: &str) -> RtfText {
        let mut chars = input.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' => {
                    self.groups.push(self.current);
                    self.pending_skip = 0;
                }
                '}' => {
                    self.current = self.groups.pop().unwrap_or(Destination::Body);
                    self.pending_skip = 0;
                }
                '\\' => self.control(&mut chars),
                '\r' | '\n' => {}
                _ => self.emit(c),
            }
        }

        if !self.line.trim().is_empty() {
            self.current = Destination::Body;
            self.end_line();
        }

        let mut metadata = self.metadata;
        metadata.retain(|_, value| {
            *value = value.trim().to_string();
            !value.is_empty()
        });

        RtfText {
            lines: self.lines,
            metadata,
        }
    }

    fn control(&mut self, chars: &mut Peekable<Chars<'_>>) {
        let Some(&next) = chars.peek() else {
            return;
        };

        if next.is_ascii_alphabetic() {
            let (word, param) = read_control_word(chars);
            self.control_word(&word, param);
            return;
        }

        chars.next();
        match next {
            '\\' | '{' | '}' => self.emit(next),
            '\'' => {
                let hex: String = chars.by_ref().take(2).collect();
                if let Ok(byte) = u8::from_str_radix(&hex, 16) {
                    self.emit(decode_cp1252(byte));
                }
            }
            '*' => self.current = Destination::Skip,
            '~' => self.emit('\u{00A0}'),
            '_' => self.emit('-'),
            '\r' | '\n' => self.end_line(),
            _ => {}
        }
    }

    fn control_word(&mut self, word: &str, param: Option<i32>) {
        match word {
            "par" | "line" | "sect" | "page" | "row" => self.end_line(),
            "tab" | "cell" => self.emit('\t'),
            "emdash" => self.emit('\u{2014}'),
            "endash" => self.emit('\u{2013}'),
            "bullet" => self.emit('\u{2022}'),
            "lquote" => self.emit('\u{2018}'),
            "rquote" => self.emit('\u{2019}'),
            "ldblquote" => self.emit('\u{201C}'),
            "rdblquote" => self.emit('\u{201D}'),
            "uc" => self.unicode_skip = param.unwrap_or(1).max(0) as usize,
            "u" => {
                if let Some(code) = param {
                    // Negative values encode code units above 0x7FFF
                    let code = if code < 0 { code + 65536 } else { code };
                    if let Some(c) = char::from_u32(code as u32) {
                        self.emit(c);
                    }
                    self.pending_skip = self.unicode_skip;
                }
            }
            _ => {
                if let Some((_, key)) = INFO_FIELDS.iter().find(|(name, _)| *name == word) {
                    self.current = Destination::Info(*key);
                } else if SKIPPED_DESTINATIONS.contains(&word) {
                    self.current = Destination::Skip;
                }
            }
        }
    }
}

/// Read a control word and its optional numeric parameter.
///
/// A single space after the word is its delimiter and is consumed.
fn read_control_word(chars: &mut Peekable<Chars<'_>>) -> (String, Option<i32>) {
    let mut word = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_alphabetic() {
            break;
        }
        word.push(c);
        chars.next();
    }

    let mut digits = String::new();
    if chars.peek() == Some(&'-') {
        digits.push('-');
        chars.next();
    }
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(c);
        chars.next();
    }

    if chars.peek() == Some(&' ') {
        chars.next();
    }

    (word, digits.parse().ok())
}

/// Decode a Windows-1252 byte.
fn decode_cp1252(byte: u8) -> char {
    match byte {
        0x80 => '\u{20AC}',
        0x85 => '\u{2026}',
        0x91 => '\u{2018}',
        0x92 => '\u{2019}',
        0x93 => '\u{201C}',
        0x94 => '\u{201D}',
        0x95 => '\u{2022}',
        0x96 => '\u{2013}',
        0x97 => '\u{2014}',
        0x99 => '\u{2122}',
        _ => char::from(byte),
    }
}

fn parse_rtf(input: &str) -> RtfText {
    Scanner::new().scan(input)
}

/// RTF reader.
#[derive(Debug, Clone, Default)]
pub struct RtfReader {
    _private: (),
}

impl RtfReader {
    /// Create a new RTF reader.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentReader for RtfReader {
    fn name(&self) -> &str {
        "rtf"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["rtf"]
    }

    fn open_bytes(&self, bytes: Vec<u8>) -> Result<Box<dyn PageSource>> {
        let text = String::from_utf8_lossy(&bytes);
        let RtfText { lines, metadata } = parse_rtf(&text);
        Ok(Box::new(SinglePageSource::new(lines, metadata)))
    }
}
