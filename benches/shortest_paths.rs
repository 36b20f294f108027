//! Benchmarks for the shortest-path family, mirroring the shape of the
//! teacher repo's `crates/algorithms/benches/shortest_paths.rs`: one
//! criterion group per algorithm, each exercised over a handful of graph
//! sizes built deterministically (no external RNG dependency) so runs are
//! reproducible across machines.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

use graphalg::graph::{Graph, GraphCapability, MutableGraph};
use graphalg::id::Directedness;
use graphalg::shortest_paths::{BellmanFord, Dijkstra, DijkstraMode};

const SIZES: [usize; 4] = [16, 64, 256, 1024];

/// A ring lattice with `connectivity` forward chords per node, the same
/// "sparse, locally-clustered" shape `newman_watts_strogatz_graph` gives
/// the teacher's benches, built without a dependency on a random-graph
/// generator crate.
fn ring_lattice(nodes: usize, connectivity: usize) -> Graph {
    let mut g = Graph::new();
    let ids: Vec<_> = (0..nodes).map(|_| g.add_node()).collect();
    for i in 0..nodes {
        for k in 1..=connectivity {
            let j = (i + k) % nodes;
            g.add_arc(ids[i], ids[j], Directedness::Directed).unwrap();
        }
    }
    g
}

fn dijkstra_sum(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("dijkstra/sum");
    for &nodes in &SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(nodes), &nodes, |bench, &nodes| {
            bench.iter_batched(
                || ring_lattice(nodes, 4),
                |graph| {
                    let source = graph.node_at_index(0).unwrap();
                    let mut dijkstra = Dijkstra::new(&graph, |_| 1.0f64, DijkstraMode::Sum);
                    dijkstra.add_source(source);
                    dijkstra.run(None).unwrap();
                },
                BatchSize::SmallInput,
            );
        });
    }
}

fn bellman_ford_sparse(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("bellman_ford/sparse");
    for &nodes in &SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(nodes), &nodes, |bench, &nodes| {
            bench.iter_batched(
                || ring_lattice(nodes, 4),
                |graph| {
                    let source = graph.node_at_index(0).unwrap();
                    let mut bf = BellmanFord::new(&graph, |_| 1.0f64);
                    bf.add_source(source);
                    let _ = bf.run();
                },
                BatchSize::SmallInput,
            );
        });
    }
}

criterion_group!(benches, dijkstra_sum, bellman_ford_sparse);
criterion_main!(benches);
