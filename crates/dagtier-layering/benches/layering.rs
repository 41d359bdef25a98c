mod support;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use dagtier_core::GraphView;
use dagtier_layering::CoffmanGraham;
use support::{TIERS, generate_dag};

const SEED: u64 = 0xDA6_7135;

fn bench_transitive_reduction(c: &mut Criterion) {
    let mut group = c.benchmark_group("dag.transitive_reduction");

    for tier in TIERS {
        let dag = generate_dag(tier, SEED);
        group.throughput(Throughput::Elements(dag.edge_count() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(tier.name), &dag, |b, dag| {
            b.iter(|| black_box(dag.transitive_reduction().edge_count()));
        });
    }

    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("layering.coffman_graham");

    for tier in TIERS {
        let dag = generate_dag(tier, SEED).transitive_reduction();
        group.throughput(Throughput::Elements(dag.count() as u64));
        for width in [4_usize, 16] {
            let solver = CoffmanGraham::solver_for_arbitrary_graphs(width).expect("positive width");
            group.bench_with_input(
                BenchmarkId::new(tier.name, width),
                &dag,
                |b, dag| {
                    b.iter(|| black_box(solver.solve(dag).expect("acyclic").len()));
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_transitive_reduction, bench_solve);
criterion_main!(benches);
