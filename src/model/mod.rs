//! Result model types.
//!
//! These types are what a selective read hands back to the caller: one
//! [`PageContent`] per retained page, gathered into a [`DocumentResult`].

mod document;
mod page;

pub use document::{Document, DocumentResult, Metadata};
pub use page::PageContent;
