//! Benchmarks for bulk property transformation
//!
//! Measures dispatch overhead and bulk throughput for property sets of
//! increasing size.
//!
//! Copyright (c) 2025 Proptransform Team
//! Licensed under the Apache-2.0 license

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use proptransform_core::{
    renamed_key, PropertySet, PropertyStore, TransformDispatcher, TransformRegistry,
};
use std::sync::Arc;

fn create_property_set(size: usize) -> PropertySet {
    (0..size)
        .map(|i| (format!("build.module{}.name", i), format!("Module Name {}", i)))
        .collect()
}

fn bench_renamed_key(c: &mut Criterion) {
    c.bench_function("renamed_key", |b| {
        b.iter(|| renamed_key(black_box("result"), black_box("build.module.name")))
    });
}

fn bench_single_dispatch(c: &mut Criterion) {
    let registry = TransformRegistry::shared();
    c.bench_function("single_dispatch_upper", |b| {
        b.iter(|| {
            let mut store = PropertyStore::new();
            TransformDispatcher::new(Arc::clone(&registry))
                .type_id("upper")
                .property("out")
                .value(black_box("hello world"))
                .execute(&mut store)
                .map(|outcome| black_box(outcome.writes.len()))
        })
    });
}

fn bench_bulk_dispatch(c: &mut Criterion) {
    let registry = TransformRegistry::shared();
    let mut group = c.benchmark_group("bulk_dispatch");

    for size in [10usize, 100, 1_000] {
        let set = Arc::new(create_property_set(size));
        group.bench_with_input(BenchmarkId::new("lower", size), &set, |b, set| {
            b.iter(|| {
                let mut store = PropertyStore::new();
                TransformDispatcher::new(Arc::clone(&registry))
                    .type_id("lower")
                    .prefix("result")
                    .property_set(Arc::clone(set) as Arc<dyn proptransform_core::PropertySetSource>)
                    .execute(&mut store)
                    .map(|outcome| black_box(outcome.writes.len()))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_renamed_key, bench_single_dispatch, bench_bulk_dispatch);

criterion_main!(benches);
