//! Resolution of a [`ReadConfig`] into concrete per-page line filters.

use super::{IndexSet, ReadConfig, Selector};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Resolved line filter for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLineFilter {
    keep_all: bool,
    keep: IndexSet,
}

impl PageLineFilter {
    /// A filter that keeps every line.
    pub fn keep_all() -> Self {
        Self {
            keep_all: true,
            keep: IndexSet::default(),
        }
    }

    /// Build a filter from a line selector.
    ///
    /// An empty selector keeps every line. A non-empty selector whose
    /// members are all invalid (negative, inverted) keeps nothing.
    pub fn from_selector(selector: &Selector) -> Self {
        // Keep-all comes only from an undeclared selector, never from a
        // declared one that matches no line on this page.
        if selector.is_empty() {
            return Self::keep_all();
        }
        Self {
            keep_all: false,
            keep: selector.to_index_set(),
        }
    }

    /// Whether this filter keeps every line.
    pub fn is_keep_all(&self) -> bool {
        self.keep_all
    }

    /// Whether the line at `index` is retained.
    pub fn keeps(&self, index: usize) -> bool {
        self.keep_all || self.keep.contains(index)
    }

    /// Apply this filter to a page's lines, preserving their order.
    pub fn apply(&self, lines: Vec<String>) -> Vec<String> {
        apply_line_filter(lines, self)
    }
}

impl Default for PageLineFilter {
    fn default() -> Self {
        Self::keep_all()
    }
}

/// Mapping from page index to its line filter, iterated in page order.
pub type PageFilters = BTreeMap<usize, Arc<PageLineFilter>>;

/// Resolve which pages to read and which lines to keep on each.
///
/// Precedence:
/// 1. Per-page overrides. Only pages named by an in-range override appear in
///    the result; a later override for the same page replaces an earlier one.
/// 2. Otherwise the page selector (empty selects every page), each selected
///    page sharing one filter built from the global line selector.
pub fn resolve_page_filters(config: &ReadConfig, total_pages: usize) -> PageFilters {
    let mut filters = PageFilters::new();

    if config.has_overrides() {
        for page_override in &config.page_overrides {
            let Ok(page) = usize::try_from(page_override.page_index) else {
                continue;
            };
            if page >= total_pages {
                continue;
            }
            filters.insert(
                page,
                Arc::new(PageLineFilter::from_selector(&page_override.line_selector)),
            );
        }

        log::debug!(
            "resolved {} of {} pages from {} overrides",
            filters.len(),
            total_pages,
            config.page_overrides.len()
        );
        return filters;
    }

    let shared = Arc::new(PageLineFilter::from_selector(&config.line_selector));
    for page in config.page_selector.resolve(total_pages) {
        filters.insert(page, Arc::clone(&shared));
    }

    log::debug!("resolved {} of {} pages", filters.len(), total_pages);
    filters
}

/// Resolve the line filter for a document with exactly one logical page.
///
/// The last override for page 0 wins; without one the global line selector
/// applies. The page selector plays no part.
pub fn resolve_single_page_filter(config: &ReadConfig) -> PageLineFilter {
    config
        .page_overrides
        .iter()
        .rev()
        .find(|page_override| page_override.page_index == 0)
        .map(|page_override| PageLineFilter::from_selector(&page_override.line_selector))
        .unwrap_or_else(|| PageLineFilter::from_selector(&config.line_selector))
}

/// Restrict resolved pages to named sub-containers (e.g., sheet names).
///
/// Only applies when the configuration has neither overrides nor a page
/// selector; otherwise the mapping is returned unchanged.
pub fn restrict_to_names<F>(filters: &mut PageFilters, config: &ReadConfig, page_name: F)
where
    F: Fn(usize) -> Option<String>,
{
    if config.sheet_names.is_empty() || config.has_overrides() || !config.page_selector.is_empty()
    {
        return;
    }

    filters.retain(|&page, _| {
        page_name(page)
            .map(|name| config.sheet_names.iter().any(|wanted| *wanted == name))
            .unwrap_or(false)
    });
}

/// Apply a line filter to one page's lines.
///
/// The result never holds more lines than the input and keeps their
/// original relative order.
pub fn apply_line_filter(lines: Vec<String>, filter: &PageLineFilter) -> Vec<String> {
    if filter.keep_all {
        return lines;
    }

    lines
        .into_iter()
        .enumerate()
        .filter(|(index, _)| filter.keep.contains(*index))
        .map(|(_, line)| line)
        .collect()
}
