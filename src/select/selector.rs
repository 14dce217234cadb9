//! Index selectors for pages and lines.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// A combinable selection of zero-based indices.
///
/// Discrete indices and inclusive ranges are unioned. Nothing is validated at
/// construction: negative indices, inverted ranges and values past the end
/// of the document are accepted and simply select nothing at resolution
/// time. A selector with no indices and no ranges is unconstrained and
/// selects everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selector {
    /// Discrete indices (zero-based)
    #[serde(default)]
    pub indices: Vec<i64>,

    /// Inclusive `(start, end)` ranges (zero-based)
    #[serde(default)]
    pub ranges: Vec<(i64, i64)>,
}

impl Selector {
    /// Create an empty (unconstrained) selector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Alias for [`Selector::new`] that reads better at call sites.
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a selector from discrete indices.
    pub fn from_indices<I: IntoIterator<Item = i64>>(indices: I) -> Self {
        Self {
            indices: indices.into_iter().collect(),
            ranges: Vec::new(),
        }
    }

    /// Create a selector from a single inclusive range.
    pub fn from_range(start: i64, end: i64) -> Self {
        Self {
            indices: Vec::new(),
            ranges: vec![(start, end)],
        }
    }

    /// Add a discrete index.
    pub fn with_index(mut self, index: i64) -> Self {
        self.indices.push(index);
        self
    }

    /// Add several discrete indices.
    pub fn with_indices<I: IntoIterator<Item = i64>>(mut self, indices: I) -> Self {
        self.indices.extend(indices);
        self
    }

    /// Add an inclusive range.
    pub fn with_range(mut self, start: i64, end: i64) -> Self {
        self.ranges.push((start, end));
        self
    }

    /// Whether the selector declares nothing (and therefore selects everything).
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty() && self.ranges.is_empty()
    }

    /// Normalize into an [`IndexSet`] without applying an upper bound.
    ///
    /// Negative indices are dropped, range starts are clamped to zero and
    /// ranges that end up inverted are dropped. Range ends are kept as-is, so
    /// `(0, i64::MAX)` costs nothing.
    pub fn to_index_set(&self) -> IndexSet {
        let points = self
            .indices
            .iter()
            .filter_map(|&i| usize::try_from(i).ok())
            .collect();

        let spans = self
            .ranges
            .iter()
            .filter_map(|&(start, end)| {
                let start = start.max(0);
                if end < start {
                    return None;
                }
                let start = usize::try_from(start).ok()?;
                let end = usize::try_from(end).unwrap_or(usize::MAX);
                Some(start..=end)
            })
            .collect();

        IndexSet::from_parts(points, spans)
    }

    /// Resolve to the concrete set of indices in `[0, upper)`.
    ///
    /// An empty selector resolves to the whole range. "All" is decided by
    /// what the selector declares, not by what survives clipping: a selector
    /// whose members all fall outside `[0, upper)` resolves to nothing and
    /// never falls back to the whole range.
    pub fn resolve(&self, upper: usize) -> BTreeSet<usize> {
        if self.is_empty() {
            return (0..upper).collect();
        }
        self.to_index_set().within(upper).collect()
    }

    /// Parse a selector string (e.g., `"3"`, `"0-4"`, `"0,2,5-7"`).
    ///
    /// `"all"` and the empty string give the unconstrained selector.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let mut selector = Selector::new();

        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(selector);
        }

        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            if let Some((start, end)) = part.split_once('-') {
                let start = parse_index(start, part)?;
                let end = parse_index(end, part)?;
                selector.ranges.push((start, end));
            } else {
                selector.indices.push(parse_index(part, part)?);
            }
        }

        Ok(selector)
    }
}

fn parse_index(value: &str, part: &str) -> Result<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidSelector(format!("'{}' is not an index or range", part)))
}

/// A normalized, possibly unbounded set of non-negative indices.
///
/// Ranges are kept as spans rather than expanded, so membership tests stay
/// cheap for ranges that reach far past the real length of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexSet {
    points: BTreeSet<usize>,
    spans: Vec<RangeInclusive<usize>>,
}

impl IndexSet {
    fn from_parts(points: BTreeSet<usize>, mut spans: Vec<RangeInclusive<usize>>) -> Self {
        spans.sort_by_key(|span| *span.start());

        let mut merged: Vec<RangeInclusive<usize>> = Vec::with_capacity(spans.len());
        for span in spans {
            match merged.last_mut() {
                Some(last) if *span.start() <= last.end().saturating_add(1) => {
                    if span.end() > last.end() {
                        *last = *last.start()..=*span.end();
                    }
                }
                _ => merged.push(span),
            }
        }

        let points = points
            .into_iter()
            .filter(|p| !merged.iter().any(|span| span.contains(p)))
            .collect();

        Self {
            points,
            spans: merged,
        }
    }

    /// Check membership.
    pub fn contains(&self, index: usize) -> bool {
        self.points.contains(&index) || self.spans.iter().any(|span| span.contains(&index))
    }

    /// Whether the set selects nothing at all.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.spans.is_empty()
    }

    /// Iterate the members below `upper` in ascending order.
    pub fn within(&self, upper: usize) -> impl Iterator<Item = usize> + '_ {
        let spans = self
            .spans
            .iter()
            .filter(move |span| *span.start() < upper)
            .flat_map(move |span| *span.start()..=(*span.end()).min(upper - 1));
        let points = self.points.range(..upper).copied();

        let mut merged: Vec<usize> = spans.chain(points).collect();
        merged.sort_unstable();
        merged.dedup();
        merged.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selector_selects_everything() {
        let selector = Selector::new();
        assert!(selector.is_empty());
        assert_eq!(selector.resolve(4), BTreeSet::from([0, 1, 2, 3]));
        assert!(selector.resolve(0).is_empty());
    }

    #[test]
    fn test_indices_and_range_resolve_identically() {
        let by_indices = Selector::from_indices([0, 1, 2]);
        let by_range = Selector::from_range(0, 2);
        assert_eq!(by_indices.resolve(10), by_range.resolve(10));
    }

    #[test]
    fn test_resolve_clamps_range_end() {
        let selector = Selector::from_range(0, 10);
        assert_eq!(selector.resolve(3), BTreeSet::from([0, 1, 2]));
    }

    #[test]
    fn test_resolve_clamps_negative_start() {
        let selector = Selector::from_range(-5, 1);
        assert_eq!(selector.resolve(5), BTreeSet::from([0, 1]));
    }

    #[test]
    fn test_resolve_ignores_out_of_bounds_and_negative_indices() {
        let selector = Selector::from_indices([-1, 1, 7]);
        assert_eq!(selector.resolve(3), BTreeSet::from([1]));
    }

    #[test]
    fn test_inverted_range_selects_nothing() {
        let selector = Selector::from_range(5, 2);
        assert!(!selector.is_empty());
        assert!(selector.resolve(10).is_empty());
    }

    #[test]
    fn test_non_empty_selector_out_of_range_selects_nothing() {
        let selector = Selector::from_indices([9]);
        assert!(selector.resolve(3).is_empty());
    }

    #[test]
    fn test_resolve_unions_indices_and_ranges() {
        let selector = Selector::new()
            .with_indices([8, 0])
            .with_range(3, 4)
            .with_range(4, 5);
        let resolved: Vec<_> = selector.resolve(10).into_iter().collect();
        assert_eq!(resolved, vec![0, 3, 4, 5, 8]);
    }

    #[test]
    fn test_index_set_unbounded_range() {
        let set = Selector::from_range(2, i64::MAX).to_index_set();
        assert!(!set.contains(1));
        assert!(set.contains(2));
        assert!(set.contains(1_000_000));
        assert_eq!(set.within(5).collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn test_index_set_merges_spans() {
        let set = Selector::new()
            .with_range(0, 2)
            .with_range(3, 4)
            .with_index(1)
            .to_index_set();
        assert_eq!(set.spans, vec![0..=4]);
        assert!(set.points.is_empty());
    }

    #[test]
    fn test_parse() {
        let all = Selector::parse("all").unwrap();
        assert!(all.is_empty());

        let single = Selector::parse("3").unwrap();
        assert_eq!(single.indices, vec![3]);

        let mixed = Selector::parse("0, 2,5-7").unwrap();
        assert_eq!(mixed.indices, vec![0, 2]);
        assert_eq!(mixed.ranges, vec![(5, 7)]);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = Selector::parse("1,x").unwrap_err();
        assert!(matches!(err, Error::InvalidSelector(_)));
    }
}
