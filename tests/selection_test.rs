//! Integration tests for page and line selection.

use doclines::convert::{extract, PageLayout, PageSource};
use doclines::error::{Error, Result};
use doclines::select::{apply_line_filter, resolve_page_filters, PageLineFilter};
use doclines::{Metadata, ReadConfig, Selector};

/// In-memory paged document.
struct MockSource {
    layout: PageLayout,
    pages: Vec<(Option<&'static str>, Vec<&'static str>)>,
    broken: Vec<usize>,
}

impl MockSource {
    fn pages(pages: Vec<Vec<&'static str>>) -> Self {
        Self {
            layout: PageLayout::Pages,
            pages: pages.into_iter().map(|lines| (None, lines)).collect(),
            broken: Vec::new(),
        }
    }

    fn sheets(sheets: Vec<(&'static str, Vec<&'static str>)>) -> Self {
        Self {
            layout: PageLayout::Sheets,
            pages: sheets
                .into_iter()
                .map(|(name, lines)| (Some(name), lines))
                .collect(),
            broken: Vec::new(),
        }
    }

    fn with_broken(mut self, page: usize) -> Self {
        self.broken.push(page);
        self
    }
}

impl PageSource for MockSource {
    fn layout(&self) -> PageLayout {
        self.layout
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_name(&self, index: usize) -> Option<String> {
        self.pages
            .get(index)
            .and_then(|(name, _)| name.map(str::to_string))
    }

    fn read_page(&mut self, index: usize) -> Result<Vec<String>> {
        if self.broken.contains(&index) {
            return Err(Error::PageDecode {
                page: index,
                reason: "corrupt page".to_string(),
            });
        }
        Ok(self.pages[index].1.iter().map(|s| s.to_string()).collect())
    }

    fn metadata(&self) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.insert("title".to_string(), "Mock".to_string());
        metadata
    }
}

fn three_pages() -> MockSource {
    MockSource::pages(vec![
        vec!["p0 l0", "p0 l1", "p0 l2"],
        vec!["p1 l0", "p1 l1", "p1 l2"],
        vec!["p2 l0", "p2 l1", "p2 l2"],
    ])
}

fn page_numbers(source: &mut MockSource, config: &ReadConfig) -> Vec<usize> {
    extract(source, config)
        .pages
        .iter()
        .map(|p| p.page_number)
        .collect()
}

#[test]
fn test_override_only_reads_named_page() {
    let config = ReadConfig::new().add_page_lines(1, [0]);
    let result = extract(&mut three_pages(), &config);

    assert_eq!(result.page_count(), 1);
    assert_eq!(result.pages[0].page_number, 1);
    assert_eq!(result.pages[0].lines, vec!["p1 l0"]);
    assert_eq!(result.total_pages, 3);
}

#[test]
fn test_page_range_is_clamped() {
    let config = ReadConfig::new().with_page_range(0, 10);
    assert_eq!(page_numbers(&mut three_pages(), &config), vec![0, 1, 2]);
}

#[test]
fn test_range_and_indices_resolve_identically() {
    let by_range = ReadConfig::new().with_page_range(0, 2);
    let by_indices = ReadConfig::new().with_pages([2, 0, 1, 1]);

    assert_eq!(
        resolve_page_filters(&by_range, 5).keys().collect::<Vec<_>>(),
        resolve_page_filters(&by_indices, 5).keys().collect::<Vec<_>>()
    );
    assert_eq!(
        extract(&mut three_pages(), &by_range),
        extract(&mut three_pages(), &by_indices)
    );
}

#[test]
fn test_invalid_selectors_select_nothing() {
    let config = ReadConfig::new()
        .with_page_selector(Selector::new().with_index(-1).with_range(5, 2).with_index(9));
    let result = extract(&mut three_pages(), &config);

    assert!(result.is_empty());
    assert_eq!(result.total_lines, 0);
    assert_eq!(result.content, "");
}

#[test]
fn test_global_lines_apply_to_each_page() {
    let config = ReadConfig::new().with_pages([0, 2]).with_lines([2, 0, 7]);
    let result = extract(&mut three_pages(), &config);

    assert_eq!(result.pages[0].lines, vec!["p0 l0", "p0 l2"]);
    assert_eq!(result.pages[1].lines, vec!["p2 l0", "p2 l2"]);
    assert_eq!(result.total_lines, 4);
}

#[test]
fn test_last_override_wins() {
    let config = ReadConfig::new()
        .add_page_lines(0, [0])
        .add_page_line_range(0, 1, 2);
    let result = extract(&mut three_pages(), &config);

    assert_eq!(result.pages[0].lines, vec!["p0 l1", "p0 l2"]);
}

#[test]
fn test_override_beats_page_and_line_selectors() {
    let config = ReadConfig::new()
        .with_pages([0])
        .with_lines([0])
        .add_page_lines(2, [1]);
    let result = extract(&mut three_pages(), &config);

    assert_eq!(result.page_count(), 1);
    assert_eq!(result.pages[0].page_number, 2);
    assert_eq!(result.pages[0].lines, vec!["p2 l1"]);
}

#[test]
fn test_empty_override_keeps_whole_page() {
    let config = ReadConfig::new().add_page_override(1, Selector::new());
    let result = extract(&mut three_pages(), &config);

    assert_eq!(result.pages[0].lines, vec!["p1 l0", "p1 l1", "p1 l2"]);
}

#[test]
fn test_out_of_range_override_is_ignored() {
    let config = ReadConfig::new().add_page_lines(7, [0]).add_page_lines(-2, [0]);
    let result = extract(&mut three_pages(), &config);

    assert!(result.is_empty());
}

#[test]
fn test_line_selector_past_end_yields_empty_page() {
    let config = ReadConfig::new().with_pages([1]).with_lines([10, 11]);
    let result = extract(&mut three_pages(), &config);

    assert_eq!(result.page_count(), 1);
    assert!(result.pages[0].is_empty());
    assert_eq!(result.content, "=== Page 2 ===\n");
}

#[test]
fn test_broken_page_is_skipped() {
    let mut source = three_pages().with_broken(1);
    let result = extract(&mut source, &ReadConfig::default());

    assert_eq!(
        result.pages.iter().map(|p| p.page_number).collect::<Vec<_>>(),
        vec![0, 2]
    );
    assert_eq!(result.total_pages, 3);
    assert_eq!(result.metadata["title"], "Mock");
}

#[test]
fn test_sheet_names_select_sheets() {
    let mut source = MockSource::sheets(vec![
        ("Summary", vec!["Row 1: total | 10"]),
        ("Data", vec!["Row 1: a | 1", "Row 2: b | 2"]),
        ("Notes", vec!["Row 1: none"]),
    ]);
    let config = ReadConfig::new()
        .with_sheet_names(["Notes", "Data", "Missing"])
        .with_lines([1]);
    let result = extract(&mut source, &config);

    assert_eq!(
        result.content,
        "=== Sheet: Data ===\nRow 2: b | 2\n\n=== Sheet: Notes ===\n"
    );
    assert_eq!(result.pages[0].page_name.as_deref(), Some("Data"));
}

#[test]
fn test_page_selector_takes_precedence_over_sheet_names() {
    let mut source = MockSource::sheets(vec![("A", vec!["a"]), ("B", vec!["b"])]);
    let config = ReadConfig::new().with_pages([0]).with_sheet_names(["B"]);

    assert_eq!(page_numbers(&mut source, &config), vec![0]);
}

#[test]
fn test_apply_line_filter_preserves_order_and_duplicates() {
    let lines: Vec<String> = ["x", "y", "x"].iter().map(|s| s.to_string()).collect();

    let keep_all = PageLineFilter::keep_all();
    assert_eq!(apply_line_filter(lines.clone(), &keep_all), lines);

    let filter = PageLineFilter::from_selector(&Selector::from_indices([2, 0]));
    assert_eq!(apply_line_filter(lines, &filter), vec!["x", "x"]);
}

#[test]
fn test_config_from_json() {
    let config = ReadConfig::from_json(
        r#"{
            "page_selector": {"ranges": [[0, 1]]},
            "line_selector": {"indices": [0]},
            "page_overrides": [{"page_index": 2, "line_selector": {"indices": [2]}}]
        }"#,
    )
    .unwrap();
    let result = extract(&mut three_pages(), &config);

    assert_eq!(result.page_count(), 1);
    assert_eq!(result.pages[0].lines, vec!["p2 l2"]);
}

#[test]
fn test_config_is_reusable() {
    let config = ReadConfig::new().with_pages([0]).with_lines([0]);
    let before = config.clone();

    let first = extract(&mut three_pages(), &config);
    let second = extract(&mut three_pages(), &config);

    assert_eq!(first, second);
    assert_eq!(config, before);
}
