//! Level construction benchmarks.
//!
//! Measures a single `build_one_level` pass and a full coarsening run down to
//! the floor over grids and chorded rings. Each iteration starts from a fresh
//! clone of the input; cloning and teardown stay outside the timed routine.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};

use kasane_benches::{
    error::BenchSetupError,
    params::LevelBenchParams,
    source::{Topology, generate},
};
use kasane_core::{LocalBiconnectedMerger, MergerError, MultilevelGraph};

/// Seed used for graph generation and candidate selection.
const SEED: u64 = 42;

const TOPOLOGIES: &[Topology] = &[
    Topology::Grid { rows: 32, cols: 32 },
    Topology::Grid { rows: 96, cols: 96 },
    Topology::RingWithChords {
        node_count: 1_000,
        chords: 1_000,
    },
    Topology::RingWithChords {
        node_count: 10_000,
        chords: 20_000,
    },
];

fn fresh_input(
    graph: &MultilevelGraph,
) -> Result<(MultilevelGraph, LocalBiconnectedMerger), MergerError> {
    let merger = LocalBiconnectedMerger::builder().with_rng_seed(SEED).build()?;
    Ok((graph.clone(), merger))
}

fn build_one_level_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("build_one_level");
    group.sample_size(20);

    for &topology in TOPOLOGIES {
        let base = generate(topology, SEED)?;
        let params = LevelBenchParams {
            topology: topology.label(),
            node_count: topology.node_count(),
        };
        // Surface configuration errors before timing starts.
        fresh_input(&base)?;

        group.bench_with_input(BenchmarkId::from_parameter(&params), &base, |b, source| {
            b.iter_batched(
                || fresh_input(source),
                |input| {
                    input.map(|(mut graph, mut merger)| {
                        let _built = merger.build_one_level(&mut graph);
                        graph
                    })
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
    Ok(())
}

fn coarsen_to_floor_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("coarsen_to_floor");
    group.sample_size(10);

    for &topology in TOPOLOGIES {
        let base = generate(topology, SEED)?;
        let params = LevelBenchParams {
            topology: topology.label(),
            node_count: topology.node_count(),
        };
        // Surface configuration errors before timing starts.
        fresh_input(&base)?;

        group.bench_with_input(BenchmarkId::from_parameter(&params), &base, |b, source| {
            b.iter_batched(
                || fresh_input(source),
                |input| {
                    input.map(|(mut graph, mut merger)| {
                        while matches!(merger.build_one_level(&mut graph), Ok(true)) {}
                        graph
                    })
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
    Ok(())
}

fn build_one_level(c: &mut Criterion) {
    if let Err(err) = build_one_level_impl(c) {
        panic!("build_one_level benchmark setup failed: {err}");
    }
}

fn coarsen_to_floor(c: &mut Criterion) {
    if let Err(err) = coarsen_to_floor_impl(c) {
        panic!("coarsen_to_floor benchmark setup failed: {err}");
    }
}

criterion_group!(benches, build_one_level, coarsen_to_floor);
criterion_main!(benches);
