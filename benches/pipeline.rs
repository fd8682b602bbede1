//! Benchmarks for the sanitizer, the export pipeline and the writers.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench pipeline -- sanitize`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use tgexport::channel::ChannelRef;
use tgexport::core::output::{to_json, to_text};
use tgexport::core::{
    DateRange, ExportOptions, ExtractedEntry, OutputConfig, RawMessage, export_history,
    sanitize_text,
};
use tgexport::source::MemorySource;

use chrono::{Duration, TimeZone, Utc};

// =============================================================================
// Test Data Generators
// =============================================================================

fn generate_post(i: usize) -> String {
    match i % 4 {
        0 => format!("Update #{}: release notes at https://example.com/r/{} via @newsbot", i, i),
        1 => format!("Join us on t.me/channel{} and www.example.org/{}\n\n\nThanks!", i, i),
        2 => format!("Plain post number {} with no links at all, just text.", i),
        _ => format!("@a@b@c mention chain {} and mail to user{}@example.com", i, i),
    }
}

/// `count` posts one hour apart, newest first, every fifth without text.
fn generate_history(count: usize) -> Vec<RawMessage> {
    let newest = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let id = i64::try_from(i).unwrap_or(i64::MAX);
            let msg = RawMessage::new(id, newest - Duration::hours(id));
            match i % 5 {
                0 => msg,
                1 => msg.with_caption(generate_post(i)),
                _ => msg.with_body(generate_post(i)),
            }
        })
        .collect()
}

fn generate_entries(count: usize) -> Vec<ExtractedEntry> {
    let newest = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let id = i64::try_from(i).unwrap_or(i64::MAX);
            ExtractedEntry::new(newest - Duration::hours(id), generate_post(i)).with_id(id)
        })
        .collect()
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_sanitize(c: &mut Criterion) {
    let mut group = c.benchmark_group("sanitize");

    for (name, post) in [
        ("links", generate_post(0)),
        ("telegram_links", generate_post(1)),
        ("plain", generate_post(2)),
        ("mention_chain", generate_post(3)),
    ] {
        group.throughput(Throughput::Bytes(post.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &post, |b, post| {
            b.iter(|| black_box(sanitize_text(black_box(post), true)));
        });
    }
    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export_history");
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let channel = ChannelRef::username("bench");

    for size in [100_usize, 1_000, 10_000] {
        let source = MemorySource::new(generate_history(size));
        // Roughly the middle half of the history
        let newest = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let quarter = Duration::hours(i64::try_from(size / 4).unwrap_or(0));
        let range = DateRange::new(newest - quarter * 3, newest - quarter).unwrap();
        let options = ExportOptions::new()
            .with_range(range)
            .with_strip_links(true);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &options, |b, options| {
            b.to_async(&runtime).iter(|| async {
                let result = export_history(&source, &channel, options).await.unwrap();
                black_box(result)
            });
        });
    }
    group.finish();
}

fn bench_writers(c: &mut Criterion) {
    let mut group = c.benchmark_group("writers");
    let config = OutputConfig::new().with_ids();

    for size in [1_000_usize, 10_000] {
        let entries = generate_entries(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("text", size), &entries, |b, entries| {
            b.iter(|| black_box(to_text(black_box(entries), &config)));
        });
        group.bench_with_input(BenchmarkId::new("json", size), &entries, |b, entries| {
            b.iter(|| black_box(to_json(black_box(entries), &config).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sanitize, bench_export, bench_writers);

criterion_main!(benches);
