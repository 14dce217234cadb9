//! Rendering module: result assembly, text cleanup and output formats.

mod assemble;
mod cleanup;
mod json;
mod stats;
mod text;

pub use assemble::{PageLayout, ResultAssembler};
pub use cleanup::{
    clean_text, clean_text_aggressive, clean_text_minimal, CleanupOptions, CleanupPreset,
    TextCleaner,
};
pub use json::{to_json, JsonFormat};
pub use stats::ExtractionStats;
pub use text::to_text;
