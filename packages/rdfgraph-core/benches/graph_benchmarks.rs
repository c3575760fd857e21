//! Graph and dataset benchmarks
//!
//! Measures:
//! - Statement insertion (same storage vs. re-interning from another storage)
//! - Pattern matching with one and two bound positions
//! - Dataset matching with a variable graph

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rdfgraph_core::*;

fn statements(storage: &NodeStorage, count: usize) -> Vec<Statement> {
    let p = Iri::make("http://example.org/p", storage);
    (0..count)
        .map(|i| {
            Statement::new(
                Iri::make(&format!("http://example.org/s/{}", i % 100), storage),
                p,
                Literal::from_value(&LiteralValue::Long(i as i64), storage),
            )
        })
        .collect()
}

fn bench_graph_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_add");

    for count in [1_000usize, 10_000] {
        let source = NodeStorage::new_sync().unwrap();
        let batch = statements(&source, count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("same_storage", count), &batch, |b, batch| {
            b.iter(|| {
                let mut graph = Graph::with_storage(source.clone());
                for statement in batch {
                    graph.add(statement).unwrap();
                }
                black_box(graph.len())
            });
        });

        group.bench_with_input(BenchmarkId::new("foreign_storage", count), &batch, |b, batch| {
            b.iter(|| {
                let mut graph = Graph::with_storage(NodeStorage::new_sync().unwrap());
                for statement in batch {
                    graph.add(statement).unwrap();
                }
                black_box(graph.len())
            });
        });
    }

    group.finish();
}

fn bench_graph_match(c: &mut Criterion) {
    let storage = NodeStorage::new_sync().unwrap();
    let mut graph = Graph::with_storage(storage.clone());
    for statement in statements(&storage, 10_000) {
        graph.add(&statement).unwrap();
    }

    let s = Iri::make("http://example.org/s/7", &storage);
    let p = Iri::make("http://example.org/p", &storage);
    let x = Variable::make("x", false, &storage);
    let y = Variable::make("y", false, &storage);

    c.bench_function("match_two_bound_10k", |b| {
        let pattern = TriplePattern::new(s, p, x);
        b.iter(|| black_box(graph.match_pattern(&pattern).unwrap().count()));
    });

    c.bench_function("match_one_bound_10k", |b| {
        let pattern = TriplePattern::new(y, p, x);
        b.iter(|| black_box(graph.match_pattern(&pattern).unwrap().count()));
    });
}

fn bench_dataset_match(c: &mut Criterion) {
    let storage = NodeStorage::new_sync().unwrap();
    let mut dataset = Dataset::with_storage(storage.clone());
    for g in 0..16 {
        let name = Iri::make(&format!("http://example.org/g/{}", g), &storage);
        for statement in statements(&storage, 1_000) {
            dataset.add(&Quad::new(name, statement.subject, statement.predicate, statement.object)).unwrap();
        }
    }

    let g = Variable::make("g", false, &storage);
    let s = Iri::make("http://example.org/s/3", &storage);
    let p = Iri::make("http://example.org/p", &storage);
    let o = Variable::make("o", false, &storage);

    c.bench_function("dataset_variable_graph_16x1k", |b| {
        let pattern = QuadPattern::new(g, s, p, o);
        b.iter(|| black_box(dataset.match_pattern(&pattern).unwrap().count()));
    });
}

criterion_group!(benches, bench_graph_add, bench_graph_match, bench_dataset_match);
criterion_main!(benches);
