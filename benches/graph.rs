//! Benchmarks for graph construction, compilation and the core algorithms.
//!
//! All benchmarks run on a square grid where every vertex links to its right
//! and lower neighbour, plus a sprinkling of back arrows that close cycles:
//! - Building and compiling graphs
//! - Path finding on builders, snapshots and integer graphs
//! - Traversal, SCC and topological ordering

extern crate digraph;

use criterion::{criterion_group, criterion_main, Criterion};
use digraph::{
    algorithms::{int_strongly_connected_components, int_topological_sort_breaking_cycles},
    path::{find_shortest_int_path, SearchContext},
    prelude::*,
    traversal::int_breadth_first,
};
use std::hint::black_box;

const SIDE: usize = 100;

fn grid_arrows() -> Vec<(usize, usize, f64)> {
    let mut arrows = Vec::new();
    for row in 0..SIDE {
        for col in 0..SIDE {
            let v = row * SIDE + col;
            if col + 1 < SIDE {
                arrows.push((v, v + 1, ((v * 7) % 5 + 1) as f64));
            }
            if row + 1 < SIDE {
                arrows.push((v, v + SIDE, ((v * 3) % 4 + 1) as f64));
            }
            if v % 97 == 0 && v >= SIDE {
                arrows.push((v, v - SIDE, 1.0));
            }
        }
    }
    arrows
}

fn build_object_grid() -> DirectedGraphBuilder<usize, f64> {
    let mut builder = DirectedGraphBuilder::with_capacity(SIDE * SIDE);
    for v in 0..SIDE * SIDE {
        builder.add_vertex(v);
    }
    for (tail, head, cost) in grid_arrows() {
        builder.add_arrow(tail, head, cost).unwrap();
    }
    builder
}

fn build_int_grid() -> IntGraphBuilder<f64> {
    let arrows = grid_arrows();
    let mut builder = IntGraphBuilder::with_capacity(SIDE * SIDE, arrows.len());
    builder.add_vertices(SIDE * SIDE);
    for (tail, head, cost) in arrows {
        builder.add_arrow(VertexId::new(tail), VertexId::new(head), cost).unwrap();
    }
    builder
}

/// Benchmark building an object graph from scratch.
fn bench_build_object_graph(c: &mut Criterion) {
    c.bench_function("build_object_grid", |b| {
        b.iter(|| black_box(build_object_grid()));
    });
}

/// Benchmark compiling a builder into a CSR snapshot.
fn bench_compile(c: &mut Criterion) {
    let builder = build_object_grid();
    c.bench_function("compile_object_grid", |b| {
        b.iter(|| black_box(ImmutableDirectedGraph::from(black_box(&builder))));
    });
}

/// Benchmark corner-to-corner shortest path on the builder.
fn bench_shortest_path_builder(c: &mut Criterion) {
    let builder = build_object_grid();
    let goal = SIDE * SIDE - 1;
    c.bench_function("shortest_path_builder", |b| {
        b.iter(|| {
            let finder = ShortestPathFinder::new(&builder, |_, _, cost: &f64| *cost);
            black_box(finder.find_vertex_path(black_box(&0), &goal).unwrap())
        });
    });
}

/// Benchmark corner-to-corner shortest path on the compiled snapshot.
fn bench_shortest_path_compiled(c: &mut Criterion) {
    let compiled = ImmutableDirectedGraph::from(&build_object_grid());
    let goal = SIDE * SIDE - 1;
    c.bench_function("shortest_path_compiled", |b| {
        b.iter(|| {
            let finder = ShortestPathFinder::new(&compiled, |_, _, cost: &f64| *cost);
            black_box(finder.find_edge_path(black_box(&0), &goal).unwrap())
        });
    });
}

/// Benchmark fewest-arrow search on the compiled snapshot.
fn bench_any_path_compiled(c: &mut Criterion) {
    let compiled = ImmutableDirectedGraph::from(&build_object_grid());
    let goal = SIDE * SIDE - 1;
    c.bench_function("any_path_compiled", |b| {
        b.iter(|| {
            let finder = AnyPathFinder::new(&compiled);
            black_box(finder.find_vertex_path(black_box(&0), &goal).unwrap())
        });
    });
}

/// Benchmark integer shortest path with a reused search context.
fn bench_shortest_path_int_context(c: &mut Criterion) {
    let compiled = ImmutableAttributedIntDirectedGraph::from(&build_int_grid());
    let goal = VertexId::new(SIDE * SIDE - 1);
    let mut context = SearchContext::with_capacity(SIDE * SIDE);
    c.bench_function("shortest_path_int_context", |b| {
        b.iter(|| {
            let found = find_shortest_int_path(
                &compiled,
                &mut context,
                black_box(VertexId::new(0)),
                |v| v == goal,
                |_, _, cost: &f64| *cost,
                f64::INFINITY,
            );
            black_box(found.unwrap())
        });
    });
}

/// Benchmark a full breadth-first sweep.
fn bench_breadth_first(c: &mut Criterion) {
    let compiled = ImmutableIntBidiGraph::from(&build_int_grid());
    c.bench_function("breadth_first_sweep", |b| {
        b.iter(|| black_box(int_breadth_first(&compiled, VertexId::new(0)).count()));
    });
}

/// Benchmark Tarjan's strongly connected components.
fn bench_scc(c: &mut Criterion) {
    let compiled = ImmutableIntBidiGraph::from(&build_int_grid());
    c.bench_function("strongly_connected_components", |b| {
        b.iter(|| black_box(int_strongly_connected_components(black_box(&compiled))));
    });
}

/// Benchmark topological ordering with cycle breaking.
fn bench_topological_breaking_cycles(c: &mut Criterion) {
    let compiled = ImmutableIntBidiGraph::from(&build_int_grid());
    c.bench_function("topological_sort_breaking_cycles", |b| {
        b.iter(|| black_box(int_topological_sort_breaking_cycles(black_box(&compiled))));
    });
}

criterion_group!(
    benches,
    // Construction
    bench_build_object_graph,
    bench_compile,
    // Path finding
    bench_shortest_path_builder,
    bench_shortest_path_compiled,
    bench_any_path_compiled,
    bench_shortest_path_int_context,
    // Analysis
    bench_breadth_first,
    bench_scc,
    bench_topological_breaking_cycles,
);
criterion_main!(benches);
