//! Search-index benchmarks.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `docindex/parse` | Parse the generated table and build the FST |
//! | `docindex/search` | Prefix queries of different selectivity |
//! | `docindex/scaling` | Prefix query as the table grows from 1k to 100k |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench docindex_bench
//! ```

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ezconf::docindex::{encode_token, with_suffix, Anchor, SearchEntry, SearchIndex};

const SEARCH_DATA: &str = include_str!("../tests/data/search_all_1.js");

fn parse_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("docindex/parse");
    group.throughput(Throughput::Bytes(SEARCH_DATA.len() as u64));
    group.bench_function("all_1", |b| {
        b.iter(|| SearchIndex::parse(black_box(SEARCH_DATA)).unwrap().len())
    });
    group.finish();
}

fn search_bench(c: &mut Criterion) {
    let index = SearchIndex::parse(SEARCH_DATA).unwrap();
    let mut group = c.benchmark_group("docindex/search");
    for query in ["c", "convert<", "create", "zebra"] {
        group.bench_with_input(BenchmarkId::from_parameter(query), &query, |b, q| {
            b.iter(|| index.search(black_box(q)).len())
        });
    }
    group.finish();
}

fn synthetic(n: usize) -> SearchIndex {
    let entries = (0..n)
        .map(|i| {
            let name = format!("symbol{}::item{}", i % 97, i);
            SearchEntry {
                key: with_suffix(&encode_token(&name), i),
                label: name,
                anchors: vec![Anchor {
                    url: format!("../page{i}.html"),
                    flag: 1,
                    scope: String::new(),
                }],
            }
        })
        .collect();
    SearchIndex::from_entries(entries).unwrap()
}

fn scaling_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("docindex/scaling");
    for size in [1_000usize, 10_000, 100_000] {
        let index = synthetic(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("symbol42", size), &index, |b, index| {
            b.iter(|| index.search(black_box("symbol42")).len())
        });
    }
    group.finish();
}

criterion_group!(docindex_benches, parse_bench, search_bench, scaling_bench);
criterion_main!(docindex_benches);
