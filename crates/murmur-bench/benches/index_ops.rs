//! Criterion micro-benchmarks for spatial index operations.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use murmur_bench::init_positions;
use murmur_core::AgentId;
use murmur_space::{BinLattice, SpatialIndex, SpatialList, DEFAULT_BIN_SIZE};

fn filled<I: SpatialIndex>(mut index: I, n: usize) -> I {
    for (i, p) in init_positions(n, 100.0, 7).into_iter().enumerate() {
        index.insert(AgentId(i as u64), p).unwrap();
    }
    index
}

/// Benchmark: rebuild a lattice from 10K positions.
fn bench_rebuild_lattice_10k(c: &mut Criterion) {
    let points = init_positions(10_000, 100.0, 7);
    let mut lattice = BinLattice::with_cell_size(DEFAULT_BIN_SIZE).unwrap();

    c.bench_function("rebuild_lattice_10k", |b| {
        b.iter(|| {
            let mut entries = points.iter().enumerate().map(|(i, &p)| (AgentId(i as u64), p));
            lattice.rebuild(&mut entries).unwrap();
            black_box(lattice.len());
        });
    });
}

/// Benchmark: radius query from every one of 10K agents on a lattice.
fn bench_query_lattice_10k(c: &mut Criterion) {
    let lattice = filled(BinLattice::with_cell_size(DEFAULT_BIN_SIZE).unwrap(), 10_000);
    let points = init_positions(10_000, 100.0, 7);

    c.bench_function("query_lattice_10k", |b| {
        b.iter(|| {
            for (i, &p) in points.iter().enumerate() {
                let n = lattice.query_radius(p, DEFAULT_BIN_SIZE, Some(AgentId(i as u64)));
                black_box(&n);
            }
        });
    });
}

/// Benchmark: the same queries as above on 1K agents, lattice against list.
fn bench_query_lattice_vs_list_1k(c: &mut Criterion) {
    let lattice = filled(BinLattice::with_cell_size(DEFAULT_BIN_SIZE).unwrap(), 1_000);
    let list = filled(SpatialList::default(), 1_000);
    let points = init_positions(1_000, 100.0, 7);

    let mut group = c.benchmark_group("query_1k");
    group.bench_function("lattice", |b| {
        b.iter(|| {
            for &p in &points {
                black_box(lattice.query_radius(p, DEFAULT_BIN_SIZE, None));
            }
        });
    });
    group.bench_function("list", |b| {
        b.iter(|| {
            for &p in &points {
                black_box(list.query_radius(p, DEFAULT_BIN_SIZE, None));
            }
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_rebuild_lattice_10k,
    bench_query_lattice_10k,
    bench_query_lattice_vs_list_1k
);
criterion_main!(benches);
