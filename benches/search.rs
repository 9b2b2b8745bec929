//! Search Performance Benchmarks
//!
//! Run with: cargo bench --bench search
//!
//! Groups:
//! - index_build: full n-gram index construction over the reference dataset
//! - index_lookup: index-routed main queries (cache disabled)
//! - scan_fallback: keywords of 14+ characters served by a full scan
//! - cached: repeated main keyword through the result cache
//! - filters: typed filters over the full collection

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pantry::{Collection, KeywordKind, NgramIndex, QueryState, Searcher};
use std::time::Duration;

// ============================================================================
// Constants and Utilities
// ============================================================================

const RECIPES: &str = include_str!("../data/recipes.json");

fn collection() -> Collection {
    Collection::from_json_str(RECIPES).unwrap()
}

/// Reference dataset repeated with fresh ids
fn scaled_collection(copies: u32) -> Collection {
    let base = collection();
    let mut records = Vec::with_capacity(base.len() * copies as usize);
    for copy in 0..copies {
        for record in base.iter() {
            let mut record = record.clone();
            record.id = (copy * 1000 + record.id.as_u32()).into();
            records.push(record);
        }
    }
    Collection::new(records).unwrap()
}

// ============================================================================
// index_build
// ============================================================================

fn index_build_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");
    group.measurement_time(Duration::from_secs(5));

    for copies in [1u32, 10, 40] {
        let collection = scaled_collection(copies);
        group.throughput(Throughput::Elements(collection.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("records", collection.len()),
            &collection,
            |b, collection| b.iter(|| NgramIndex::build(collection)),
        );
    }

    group.finish();
}

// ============================================================================
// index_lookup / scan_fallback
// ============================================================================

fn query_benchmarks(c: &mut Criterion) {
    let searcher = Searcher::new(collection()).with_cache(false);

    let mut group = c.benchmark_group("index_lookup");
    for keyword in ["tarte", "chocolat", "salade de riz", "coco lait"] {
        let state = QueryState::new().with_main(keyword);
        group.bench_with_input(BenchmarkId::from_parameter(keyword), &state, |b, state| {
            b.iter(|| searcher.search(state))
        });
    }
    group.finish();

    let mut group = c.benchmark_group("scan_fallback");
    for keyword in ["crème pâtissière", "pommes de terre", "gâteau au yaourt vegan"] {
        let state = QueryState::new().with_main(keyword);
        group.bench_with_input(BenchmarkId::from_parameter(keyword), &state, |b, state| {
            b.iter(|| searcher.search(state))
        });
    }
    group.finish();
}

// ============================================================================
// cached
// ============================================================================

fn cached_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached");

    let searcher = Searcher::new(collection());
    let state = QueryState::new().with_main("crème pâtissière");
    searcher.search(&state);

    group.bench_function("scan_keyword_hot", |b| b.iter(|| searcher.search(&state)));
    group.finish();
}

// ============================================================================
// filters
// ============================================================================

fn filter_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("filters");

    let searcher = Searcher::new(scaled_collection(10));
    let state = QueryState::new()
        .with_keyword("sucre", KeywordKind::Ingredient)
        .with_keyword("fouet", KeywordKind::Tool)
        .with_keyword("four", KeywordKind::Appliance);

    group.bench_function("three_filters", |b| b.iter(|| searcher.search(&state)));
    group.finish();
}

// ============================================================================
// Criterion Groups and Main
// ============================================================================

criterion_group!(build_benches, index_build_benchmarks);
criterion_group!(query_benches, query_benchmarks, cached_benchmarks);
criterion_group!(filter_benches, filter_benchmarks);

criterion_main!(build_benches, query_benches, filter_benches);
