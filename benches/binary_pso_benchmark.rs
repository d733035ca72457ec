use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use hypso::{core::Minimizer, solvers::particles::BinaryPSO, test_functions::G01};

fn binary_pso_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Binary PSO");
    for swarm_size in [10, 17, 40] {
        group.bench_with_input(
            BenchmarkId::new("G01", swarm_size),
            &swarm_size,
            |b, swarm_size| {
                b.iter_batched(
                    || {
                        Minimizer::new(Box::new(
                            BinaryPSO::default().with_swarm_size(*swarm_size),
                        ))
                        .with_seed(0)
                        .with_max_steps(200)
                    },
                    |mut m| {
                        let result = m.minimize(&G01, &mut ()).unwrap();
                        black_box(result);
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }
    group.finish();
}

criterion_group!(benches, binary_pso_benchmark);
criterion_main!(benches);
