#![allow(unused)]
extern crate spdxstore;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use spdxstore::{Reference, TypeCatalog, TypedItem};
use std::hint::black_box;

fn create_item() -> TypedItem {
    TypedItem::new(&TypeCatalog::spdx(), "urn:bench", "SPDXRef-Bench", "Package")
        .expect("Failed to create item")
}

/// Benchmark appending references spread over a varying number of owner buckets
fn bench_add_value_to_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_value_to_list");
    for owners in [1usize, 16, 256] {
        let references: Vec<Reference> = (0..1024)
            .map(|i| Reference::new(format!("SPDXRef-{}", i % owners), "File"))
            .collect();

        group.throughput(Throughput::Elements(references.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(owners), &references, |b, refs| {
            b.iter(|| {
                let item = create_item();
                for reference in refs {
                    item.add_value_to_list("hasFile", reference).unwrap();
                }
                black_box(item)
            });
        });
    }
    group.finish();
}

/// Benchmark owner-scoped membership checks against a large collection
fn bench_collection_contains(c: &mut Criterion) {
    let item = create_item();
    for i in 0..4096 {
        item.add_value_to_list("hasFile", Reference::new(format!("SPDXRef-{}", i % 512), "File"))
            .unwrap();
    }
    let present = Reference::new("SPDXRef-7", "File");
    let absent = Reference::new("SPDXRef-7", "Snippet");

    c.bench_function("collection_contains_present", |b| {
        b.iter(|| black_box(item.collection_contains("hasFile", &present).unwrap()));
    });
    c.bench_function("collection_contains_absent", |b| {
        b.iter(|| black_box(item.collection_contains("hasFile", &absent).unwrap()));
    });
}

/// Benchmark the full reachability scan
fn bench_uses_id(c: &mut Criterion) {
    let item = create_item();
    for i in 0..64 {
        item.set_value(&format!("prop{i}"), format!("value{i}")).unwrap();
    }
    for i in 0..1024 {
        item.add_value_to_list("hasFile", Reference::new(format!("SPDXRef-{i}"), "File"))
            .unwrap();
    }

    c.bench_function("uses_id_miss", |b| {
        b.iter(|| black_box(item.uses_id("spdxref-missing")));
    });
}

criterion_group!(
    benches,
    bench_add_value_to_list,
    bench_collection_contains,
    bench_uses_id
);
criterion_main!(benches);
