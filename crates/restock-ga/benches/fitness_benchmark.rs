use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;
use restock_core::{GaConfig, PenaltyWeights, ProductRecord};
use restock_ga::init::seeded_genome;
use restock_ga::{GeneticSolver, PenaltyFitness};

fn catalog(size: usize) -> Vec<ProductRecord> {
    (0..size)
        .map(|i| {
            let demand = 50.0 + (i % 17) as f64 * 10.0;
            ProductRecord::new(format!("SKU-{:04}", i), demand, (i % 7) as f64 * 5.0)
                .with_stock_bounds(10.0, demand * 3.0)
                .with_costs(1.0 + (i % 5) as f64, 0.1)
                .with_shrinkage_rate(0.02)
        })
        .collect()
}

fn bench_fitness(c: &mut Criterion) {
    let mut group = c.benchmark_group("penalty_fitness");

    for size in [10usize, 100, 1000] {
        let products = catalog(size);
        let fitness = PenaltyFitness::new(&products, PenaltyWeights::default());
        let mut rng = StdRng::seed_from_u64(1);
        let genome = seeded_genome(&products, 0.1, &mut rng);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &genome, |b, genome| {
            b.iter(|| fitness.evaluate(black_box(genome)))
        });
    }

    group.finish();
}

fn bench_solver(c: &mut Criterion) {
    let products = catalog(50);
    let solver = GeneticSolver::new(GaConfig::new(20, 100).with_seed(7));

    c.bench_function("genetic_solver_50x20", |b| {
        b.iter(|| solver.solve(black_box(&products)))
    });
}

criterion_group!(benches, bench_fitness, bench_solver);
criterion_main!(benches);
