//! Benchmarks for path resolution in a DataTree.
//!
//! These benchmarks measure:
//! - Resolving a deep path the first time (every node is created)
//! - Resolving a deep path again (every node is cached)
//! - Looking up children of a wide branch
//! - Removing and destroying a large subtree

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use floem_databind::{DataTree, NodeTypeInfo, TypeHandle, TypeRegistry};

const LEVEL: TypeHandle = TypeHandle::named("Level");
const WIDE: TypeHandle = TypeHandle::named("Wide");
const VALUE: TypeHandle = TypeHandle::named("Value");

// =============================================================================
// Tree creation helpers
// =============================================================================

/// A self-similar type: every `Level` has a `next` level and a `value`.
fn level_registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register_fields(
        LEVEL,
        [
            ("next", NodeTypeInfo::branch(LEVEL)),
            ("value", NodeTypeInfo::leaf(VALUE)),
        ],
    );
    registry
}

/// A type with `width` leaf fields called `f0`, `f1`, ...
fn wide_registry(width: usize) -> TypeRegistry {
    let names: Vec<String> = (0..width).map(|i| format!("f{i}")).collect();
    let mut registry = TypeRegistry::new();
    registry.register_fields(
        WIDE,
        names
            .iter()
            .map(|name| (name.as_str(), NodeTypeInfo::leaf(VALUE))),
    );
    registry
}

fn deep_path(depth: usize) -> String {
    let mut path = "next.".repeat(depth);
    path.push_str("value");
    path
}

// =============================================================================
// Resolution benchmarks
// =============================================================================

fn bench_find_uncached(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_uncached");

    for depth in [5, 20, 50].iter() {
        let path = deep_path(*depth);
        group.bench_with_input(BenchmarkId::new("depth", depth), &path, |b, path| {
            b.iter(|| {
                let mut tree = DataTree::new(NodeTypeInfo::branch(LEVEL), level_registry());
                black_box(tree.find(path).ok().flatten());
            });
        });
    }

    group.finish();
}

fn bench_find_cached(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_cached");

    for depth in [5, 20, 50].iter() {
        let path = deep_path(*depth);
        group.bench_with_input(BenchmarkId::new("depth", depth), &path, |b, path| {
            let mut tree = DataTree::new(NodeTypeInfo::branch(LEVEL), level_registry());
            let _ = tree.find(path);

            b.iter(|| {
                black_box(tree.find(path).ok().flatten());
            });
        });
    }

    group.finish();
}

fn bench_find_wide(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_wide");

    for width in [10, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::new("width", width), width, |b, &width| {
            let mut tree = DataTree::new(NodeTypeInfo::branch(WIDE), wide_registry(width));
            let names: Vec<String> = (0..width).map(|i| format!("f{i}")).collect();
            for name in &names {
                let _ = tree.find(name);
            }
            let last = &names[width - 1];

            b.iter(|| {
                black_box(tree.find(last).ok().flatten());
            });
        });
    }

    group.finish();
}

// =============================================================================
// Teardown benchmarks
// =============================================================================

fn bench_remove_subtree(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_subtree");

    for depth in [5, 20, 50].iter() {
        let path = deep_path(*depth);
        group.bench_with_input(BenchmarkId::new("depth", depth), &path, |b, path| {
            b.iter(|| {
                let mut tree = DataTree::new(NodeTypeInfo::branch(LEVEL), level_registry());
                let _ = tree.find(path);
                black_box(tree.remove("next").ok());
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_find_uncached,
    bench_find_cached,
    bench_find_wide,
    bench_remove_subtree,
);

criterion_main!(benches);
