//! Page and line selection.
//!
//! A [`ReadConfig`] says which pages to read and which lines to keep on each
//! of them. [`resolve_page_filters`] turns it into a concrete mapping for a
//! document of known length, and [`apply_line_filter`] applies one page's
//! filter to that page's lines.
//!
//! Everything here is total: malformed input (negative indices, inverted
//! ranges, pages past the end) is absorbed by clamping or exclusion, never
//! reported as an error.

mod config;
mod filter;
mod selector;

pub use config::{PageOverride, ReadConfig};
pub use filter::{
    apply_line_filter, resolve_page_filters, resolve_single_page_filter, restrict_to_names,
    PageFilters, PageLineFilter,
};
pub use selector::{IndexSet, Selector};
