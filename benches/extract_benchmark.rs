//! Benchmarks for selection and cleanup.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic in-memory documents.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use doclines::select::resolve_page_filters;
use doclines::{clean_text, detect_format_from_bytes, read_bytes_with_config, ReadConfig};

/// Creates a CSV document with the given number of rows.
fn create_test_csv(rows: usize) -> Vec<u8> {
    let mut content = String::from("id,name,notes\n");
    for i in 0..rows {
        content.push_str(&format!("{},item {},\"note  with   spaces, {}\"\n", i, i, i));
    }
    content.into_bytes()
}

/// Creates noisy text with the given number of paragraphs.
fn create_noisy_text(paragraphs: usize) -> String {
    let mut text = String::new();
    for i in 0..paragraphs {
        text.push_str(&format!(
            "  Paragraph {}\u{200B} with   uneven\twhitespace and cafe\u{0301}  \r\n\n\n\n",
            i
        ));
    }
    text
}

fn bench_format_detection(c: &mut Criterion) {
    let csv = create_test_csv(100);
    let rtf = b"{\\rtf1\\ansi Hello\\par}".to_vec();

    c.bench_function("detect_text", |b| {
        b.iter(|| detect_format_from_bytes(black_box(&csv)))
    });

    c.bench_function("detect_rtf", |b| {
        b.iter(|| detect_format_from_bytes(black_box(&rtf)))
    });
}

fn bench_filter_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_resolution");

    let by_range = ReadConfig::new().with_page_range(0, i64::MAX).with_line_range(0, 49);
    group.bench_function("wide_range_1000_pages", |b| {
        b.iter(|| resolve_page_filters(black_box(&by_range), 1000))
    });

    let overrides = (0..200).fold(ReadConfig::new(), |config, page| {
        config.add_page_line_range(page, 0, page)
    });
    group.bench_function("200_overrides", |b| {
        b.iter(|| resolve_page_filters(black_box(&overrides), 1000))
    });

    group.finish();
}

fn bench_csv_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("csv_extraction");

    for rows in [100, 1000, 10000] {
        let data = create_test_csv(rows);
        let config = ReadConfig::new().with_line_range(0, 99);

        group.bench_function(format!("{}_rows", rows), |b| {
            b.iter(|| read_bytes_with_config(black_box(data.clone()), "csv", &config))
        });
    }

    group.finish();
}

fn bench_cleanup(c: &mut Criterion) {
    let mut group = c.benchmark_group("cleanup");

    for paragraphs in [10, 1000] {
        let text = create_noisy_text(paragraphs);
        group.bench_function(format!("{}_paragraphs", paragraphs), |b| {
            b.iter(|| clean_text(black_box(&text)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_format_detection,
    bench_filter_resolution,
    bench_csv_extraction,
    bench_cleanup
);
criterion_main!(benches);
