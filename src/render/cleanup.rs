//! Line-oriented text cleanup for LLM-ready output.
//!
//! The cleaner runs one pass over the text:
//!
//! 1. **Character cleanup** - drop control and invisible characters, then
//!    optionally compose to Unicode NFC
//! 2. **Line breaks** - `\r\n` and lone `\r` become `\n` (always)
//! 3. **Per line** - trim edges, collapse runs of spaces/tabs, bound runs of
//!    blank lines
//! 4. **Boundary trim** - drop leading and trailing blank lines
//!
//! Cleaning is idempotent: cleaning already-cleaned text with the same
//! options returns it unchanged.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static INLINE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Minimal cleanup: whitespace only, blank lines unlimited
    Minimal,
    /// Standard cleanup: NFC + whitespace + at most one blank line in a row
    #[default]
    Standard,
    /// Aggressive cleanup: no blank lines at all
    Aggressive,
}

/// Options for text cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Trim leading and trailing whitespace on every line
    pub trim_line_edges: bool,

    /// Replace runs of spaces and tabs inside a line with one space
    pub collapse_inline_whitespace: bool,

    /// Remove control, invisible-format and private-use characters
    pub strip_control_chars: bool,

    /// Compose to Unicode NFC
    pub normalize_unicode: bool,

    /// Maximum consecutive blank lines between content
    /// (negative = unlimited, 0 = none)
    pub max_consecutive_blank_lines: i32,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
            CleanupPreset::Aggressive => Self::aggressive(),
        }
    }

    /// Options that change nothing but line breaks and boundary blank lines.
    pub fn none() -> Self {
        Self {
            trim_line_edges: false,
            collapse_inline_whitespace: false,
            strip_control_chars: false,
            normalize_unicode: false,
            max_consecutive_blank_lines: -1,
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            trim_line_edges: true,
            collapse_inline_whitespace: true,
            strip_control_chars: true,
            normalize_unicode: false,
            max_consecutive_blank_lines: -1,
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            trim_line_edges: true,
            collapse_inline_whitespace: true,
            strip_control_chars: true,
            normalize_unicode: true,
            max_consecutive_blank_lines: 1,
        }
    }

    /// Aggressive cleanup options.
    pub fn aggressive() -> Self {
        Self {
            max_consecutive_blank_lines: 0,
            ..Self::standard()
        }
    }

    /// Set the blank-line limit.
    pub fn with_max_blank_lines(mut self, max: i32) -> Self {
        self.max_consecutive_blank_lines = max;
        self
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Text cleaner.
#[derive(Debug, Clone, Default)]
pub struct TextCleaner {
    options: CleanupOptions,
}

impl TextCleaner {
    /// Create a new cleaner with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self { options }
    }

    /// Create a cleaner from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// The options this cleaner applies.
    pub fn options(&self) -> &CleanupOptions {
        &self.options
    }

    /// Clean a block of text.
    pub fn clean(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let mut text = if self.options.strip_control_chars {
            strip_control_chars(text)
        } else {
            text.to_string()
        };

        // NFC must run after stripping so a removed character can never leave
        // a newly composable pair behind
        if self.options.normalize_unicode {
            text = text.nfc().collect();
        }

        let text = normalize_line_breaks(&text);

        let max_blank = self.options.max_consecutive_blank_lines;
        let mut kept: Vec<String> = Vec::new();
        let mut blank_run = 0usize;

        for line in text.split('\n') {
            let mut line = if self.options.trim_line_edges {
                line.trim().to_string()
            } else {
                line.to_string()
            };

            if self.options.collapse_inline_whitespace && !line.is_empty() {
                line = INLINE_WHITESPACE.replace_all(&line, " ").into_owned();
            }

            if line.is_empty() {
                blank_run += 1;
                let keep = match max_blank {
                    0 => false,
                    n if n < 0 => true,
                    n => blank_run <= n as usize,
                };
                if !keep {
                    continue;
                }
            } else {
                blank_run = 0;
            }

            kept.push(line);
        }

        trim_blank_lines(&kept).join("\n")
    }
}

/// Remove characters that are neither printable nor `\n`, `\t`, `\r`.
fn strip_control_chars(text: &str) -> String {
    text.chars()
        .filter(|&c| matches!(c, '\n' | '\t' | '\r') || is_printable(c))
        .collect()
}

fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    !(c.is_control() || c.is_whitespace() || is_invisible_format(c) || is_private_use(c))
}

fn is_invisible_format(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}'
            | '\u{0600}'..='\u{0605}'
            | '\u{061C}'
            | '\u{06DD}'
            | '\u{070F}'
            | '\u{180E}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206F}'
            | '\u{FEFF}'
            | '\u{FFF9}'..='\u{FFFB}'
            | '\u{110BD}'
            | '\u{E0001}'
            | '\u{E0020}'..='\u{E007F}'
    )
}

fn is_private_use(c: char) -> bool {
    let code = c as u32;
    (0xE000..=0xF8FF).contains(&code)
        || (0xF0000..=0xFFFFD).contains(&code)
        || (0x100000..=0x10FFFD).contains(&code)
}

/// Replace `\r\n` and lone `\r` with `\n`.
fn normalize_line_breaks(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn trim_blank_lines(lines: &[String]) -> &[String] {
    let start = lines
        .iter()
        .position(|l| !l.is_empty())
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(start, |i| i + 1);
    &lines[start..end]
}

/// Clean text with the standard preset.
///
/// The standard preset composes to NFC, so decomposed input such as
/// `e` + U+0301 comes back as the single character `é`. Use
/// [`clean_text_minimal`] to keep the input's normalization form.
///
/// ```
/// assert_eq!(doclines::clean_text("cafe\u{301}  au lait"), "caf\u{e9} au lait");
/// assert_eq!(doclines::clean_text_minimal("cafe\u{301}"), "cafe\u{301}");
/// ```
pub fn clean_text(text: &str) -> String {
    TextCleaner::from_preset(CleanupPreset::Standard).clean(text)
}

/// Clean text with the minimal preset.
pub fn clean_text_minimal(text: &str) -> String {
    TextCleaner::from_preset(CleanupPreset::Minimal).clean(text)
}

/// Clean text with the aggressive preset.
pub fn clean_text_aggressive(text: &str) -> String {
    TextCleaner::from_preset(CleanupPreset::Aggressive).clean(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collapse_only() -> CleanupOptions {
        CleanupOptions {
            collapse_inline_whitespace: true,
            ..CleanupOptions::none()
        }
    }

    #[test]
    fn test_collapse_inline_whitespace() {
        let cleaner = TextCleaner::new(collapse_only());
        assert_eq!(cleaner.clean("Hello    world   test"), "Hello world test");
        assert_eq!(cleaner.clean("a\t \tb"), "a b");
    }

    #[test]
    fn test_blank_line_limit() {
        let cleaner = TextCleaner::new(CleanupOptions::none().with_max_blank_lines(1));
        let text = "Line 1\n\n\n\nLine 2\n\n\n\nLine 3";
        assert_eq!(cleaner.clean(text), "Line 1\n\nLine 2\n\nLine 3");
    }

    #[test]
    fn test_blank_line_limit_two() {
        let cleaner = TextCleaner::new(CleanupOptions::standard().with_max_blank_lines(2));
        let text = "A\n\n\n\n\nB\n\nC";
        assert_eq!(cleaner.clean(text), "A\n\n\nB\n\nC");
    }

    #[test]
    fn test_boundary_blank_lines_removed() {
        for max in [0, 1, 2, 5] {
            let cleaner = TextCleaner::new(CleanupOptions::none().with_max_blank_lines(max));
            assert_eq!(cleaner.clean("\n\n\nLine 1\nLine 2\n\n\n"), "Line 1\nLine 2");
        }
    }

    #[test]
    fn test_unlimited_blank_lines_preserved() {
        let cleaner = TextCleaner::from_preset(CleanupPreset::Minimal);
        let result = cleaner.clean("Line 1\n\n\n\nLine 2\n\n\n\nLine 3");
        assert!(result.contains("\n\n\n"));
        assert_eq!(result, "Line 1\n\n\n\nLine 2\n\n\n\nLine 3");
    }

    #[test]
    fn test_aggressive_removes_all_blank_lines() {
        let result = clean_text_aggressive("Line 1\n\n\n\nLine 2\n\n\n\nLine 3");
        assert_eq!(result, "Line 1\nLine 2\nLine 3");
    }

    #[test]
    fn test_trim_line_edges() {
        assert_eq!(
            clean_text("  Line 1  \n  Line 2  \n  Line 3  "),
            "Line 1\nLine 2\nLine 3"
        );
    }

    #[test]
    fn test_line_break_normalization_always_applies() {
        let cleaner = TextCleaner::new(CleanupOptions::none());
        assert_eq!(
            cleaner.clean("Line 1\r\nLine 2\rLine 3\nLine 4"),
            "Line 1\nLine 2\nLine 3\nLine 4"
        );
    }

    #[test]
    fn test_combined_standard() {
        let input = "\n\n  Line 1   with   spaces  \n\n\n\n  Line 2  \n\n  Line 3  \n\n\n";
        assert_eq!(clean_text(input), "Line 1 with spaces\n\nLine 2\n\nLine 3");
    }

    #[test]
    fn test_empty_and_whitespace_only() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text("   \n\n   \n   "), "");
    }

    #[test]
    fn test_strip_control_chars() {
        let result = clean_text("Hello\u{0}\u{1}\u{2}World\u{3}\u{4}Test");
        assert_eq!(result, "HelloWorldTest");
    }

    #[test]
    fn test_strip_invisible_and_private_use() {
        let cleaner = TextCleaner::new(CleanupOptions {
            strip_control_chars: true,
            ..CleanupOptions::none()
        });
        assert_eq!(cleaner.clean("\u{FEFF}zero\u{200B}width\u{E000}"), "zerowidth");
        assert_eq!(cleaner.clean("tab\tkept"), "tab\tkept");
    }

    #[test]
    fn test_strip_format_characters() {
        let cleaner = TextCleaner::new(CleanupOptions {
            strip_control_chars: true,
            ..CleanupOptions::none()
        });
        // Arabic number signs, Syriac abbreviation mark, Kaithi number sign
        assert_eq!(
            cleaner.clean("\u{0600}1\u{0605}2\u{06DD}3\u{070F}4\u{110BD}5"),
            "12345"
        );
        // Tag characters
        assert_eq!(cleaner.clean("flag\u{E0001}\u{E0067}\u{E0062}\u{E007F}"), "flag");
        assert_eq!(cleaner.clean("\u{0606}\u{E0080}"), "\u{0606}\u{E0080}");
    }

    #[test]
    fn test_control_chars_kept_when_disabled() {
        let cleaner = TextCleaner::new(CleanupOptions::none());
        assert_eq!(cleaner.clean("a\u{1}b"), "a\u{1}b");
    }

    #[test]
    fn test_whitespace_line_is_not_blank_without_trim() {
        let cleaner = TextCleaner::new(collapse_only().with_max_blank_lines(0));
        assert_eq!(cleaner.clean("a\n   \nb"), "a\n \nb");
    }

    #[test]
    fn test_unicode_normalization() {
        let result = clean_text("cafe\u{301}");
        assert_eq!(result, "caf\u{e9}");
    }

    #[test]
    fn test_nfc_after_strip_is_idempotent() {
        let cleaner = TextCleaner::from_preset(CleanupPreset::Standard);
        let once = cleaner.clean("e\u{0}\u{301}");
        assert_eq!(once, "\u{e9}");
        assert_eq!(cleaner.clean(&once), once);
    }

    #[test]
    fn test_idempotent_presets() {
        let input = "\r\n  A \t b  \r\n\r\n\r\n\u{7}C\n\n\n\n D\u{200B}  \n\n";
        for preset in [
            CleanupPreset::Minimal,
            CleanupPreset::Standard,
            CleanupPreset::Aggressive,
        ] {
            let cleaner = TextCleaner::from_preset(preset);
            let once = cleaner.clean(input);
            assert_eq!(cleaner.clean(&once), once, "preset {:?}", preset);
        }
    }
}
