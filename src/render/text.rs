//! Plain text rendering for read results.

use crate::model::DocumentResult;

use super::{CleanupOptions, TextCleaner};

/// Render a result's content as plain text.
///
/// With cleanup options the content goes through the [`TextCleaner`];
/// otherwise it is returned as assembled.
pub fn to_text(result: &DocumentResult, cleanup: Option<&CleanupOptions>) -> String {
    match cleanup {
        Some(options) => TextCleaner::new(options.clone()).clean(&result.content),
        None => result.content.clone(),
    }
}
