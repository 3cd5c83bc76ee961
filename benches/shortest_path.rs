#![forbid(unsafe_code)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sombra_route::primitives::DynamicArray;
use sombra_route::{
    EdgeIndex, EdgeIndexKind, Graph, PathFinder, RelaxationMode, RouteOptions, RoutingFee,
    VertexId,
};

const VERTEX_COUNTS: [usize; 3] = [64, 256, 1_024];
const FAN_OUT: usize = 6;
const QUERIES: usize = 32;

fn random_edges(vertex_count: usize, seed: u64) -> Vec<(u32, u32, i64)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut edges = Vec::with_capacity(vertex_count * FAN_OUT);
    for src in 0..vertex_count as u32 {
        for _ in 0..FAN_OUT {
            let dst = rng.gen_range(0..vertex_count as u32);
            edges.push((src, dst, rng.gen_range(1..100)));
        }
    }
    edges
}

fn random_queries(vertex_count: usize, seed: u64) -> Vec<(VertexId, VertexId)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..QUERIES)
        .map(|_| {
            (
                VertexId(rng.gen_range(0..vertex_count as u32)),
                VertexId(rng.gen_range(0..vertex_count as u32)),
            )
        })
        .collect()
}

fn build(kind: EdgeIndexKind, vertex_count: usize, edges: &[(u32, u32, i64)]) -> Graph {
    let mut index = EdgeIndex::new(kind, vertex_count);
    for &(src, dst, weight) in edges {
        index.update(VertexId(src), VertexId(dst), weight);
    }
    Graph::from_edges(index).expect("graph")
}

fn static_weights(c: &mut Criterion) {
    let mut group = c.benchmark_group("route/static");
    group.sample_size(30);
    group.throughput(Throughput::Elements(QUERIES as u64));

    for vertex_count in VERTEX_COUNTS {
        let edges = random_edges(vertex_count, 0x5eed);
        let queries = random_queries(vertex_count, 0xfeed);
        for (label, kind, mode) in [
            ("sparse_reopen", EdgeIndexKind::Sparse, RelaxationMode::Reopen),
            ("sparse_visit_once", EdgeIndexKind::Sparse, RelaxationMode::VisitOnce),
            ("dense_reopen", EdgeIndexKind::Dense, RelaxationMode::Reopen),
        ] {
            let options = RouteOptions::default().relaxation(mode);
            let mut finder =
                PathFinder::with_options(build(kind, vertex_count, &edges), options).expect("finder");
            let mut path = DynamicArray::new();
            group.bench_with_input(
                BenchmarkId::new(label, vertex_count),
                &queries,
                |b, queries| {
                    b.iter(|| {
                        for &(src, dst) in queries {
                            black_box(finder.shortest_path(src, dst, &mut path));
                        }
                    });
                },
            );
        }
    }
    group.finish();
}

fn routing_fees(c: &mut Criterion) {
    let mut group = c.benchmark_group("route/fees");
    group.sample_size(30);
    group.throughput(Throughput::Elements(QUERIES as u64));

    for vertex_count in VERTEX_COUNTS {
        let mut rng = ChaCha8Rng::seed_from_u64(0xfee5);
        let mut index = EdgeIndex::sparse(vertex_count);
        for (src, dst, _) in random_edges(vertex_count, 0x5eed) {
            let fee = RoutingFee::new(rng.gen_range(0..5_000), rng.gen_range(0..2_000));
            index
                .update_with_data(VertexId(src), VertexId(dst), 0, fee)
                .expect("sparse index");
        }
        let mut finder = PathFinder::new(Graph::from_edges(index).expect("graph"));
        finder.use_routing_fees();
        finder.set_initial_amount(1_000_000);
        let queries = random_queries(vertex_count, 0xfeed);
        group.bench_with_input(
            BenchmarkId::new("sparse", vertex_count),
            &queries,
            |b, queries| {
                b.iter(|| {
                    for &(src, dst) in queries {
                        black_box(finder.route(src, dst));
                    }
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, static_weights, routing_fees);
criterion_main!(benches);
