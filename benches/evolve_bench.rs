//! Criterion benchmarks for the u-evolve GA engine.
//!
//! Uses synthetic problems (OneMax, a bounded Sphere over digit genes) to
//! measure engine overhead independent of any domain.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use u_evolve::ga::{
    crossover, BinaryEncoding, Chromosome, Crossover, Direction, FitnessEvaluator, FnEncoding,
    GaConfig, Individual, Selection, Simulation, Wheel,
};
use u_evolve::random::create_rng;

// ===========================================================================
// OneMax: maximize the number of set bits
// ===========================================================================

struct OneMax;

impl FitnessEvaluator<bool> for OneMax {
    type Data = ();

    fn calculate_fitness(&self, ind: &Individual<bool>, _: &()) -> f64 {
        ind[0].genes().iter().filter(|&&b| b).count() as f64
    }

    fn should_finish(&self, _: &Individual<bool>) -> bool {
        false
    }
}

fn bits(len: usize) -> Individual<bool> {
    let mut ind = Individual::new();
    ind.add_chromosome(Chromosome::from_length(BinaryEncoding, len, &mut create_rng(0)));
    ind
}

// ===========================================================================
// Sphere: minimize sum(x_i^2) with x_i in -5..=5
// ===========================================================================

struct Sphere;

impl FitnessEvaluator<i32> for Sphere {
    type Data = ();

    fn calculate_fitness(&self, ind: &Individual<i32>, _: &()) -> f64 {
        ind[0].genes().iter().map(|x| (x * x) as f64).sum()
    }

    fn should_finish(&self, top: &Individual<i32>) -> bool {
        top.fitness() == 0.0
    }
}

fn digits(dim: usize) -> Individual<i32> {
    let encoding = FnEncoding::new(|rng| rng.random_range(-5..=5));
    let mut ind = Individual::new();
    ind.add_chromosome(Chromosome::from_length(encoding, dim, &mut create_rng(0)));
    ind
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_ga_onemax(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_onemax");
    group.sample_size(10);

    for (len, pop, gen) in [(32usize, 50usize, 50usize), (128, 100, 30), (512, 100, 20)] {
        let config = GaConfig::default()
            .with_population_size(pop)
            .with_max_generations(gen)
            .with_elitism(true)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("l{}_p{}_g{}", len, pop, gen), len),
            &config,
            |b, config| {
                b.iter(|| {
                    let mut sim = Simulation::builder(OneMax, ())
                        .prototype(bits(len))
                        .config(black_box(config.clone()))
                        .build()
                        .unwrap();
                    black_box(sim.run().unwrap())
                })
            },
        );
    }
    group.finish();
}

fn bench_ga_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_sphere");
    group.sample_size(10);

    for selection in [Selection::RouletteWheel, Selection::StochasticUniversal] {
        let config = GaConfig::default()
            .with_population_size(100)
            .with_max_generations(30)
            .with_selection(selection)
            .with_crossover(Crossover::Uniform)
            .with_direction(Direction::Minimize)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("{:?}", selection), 20),
            &config,
            |b, config| {
                b.iter(|| {
                    let mut sim = Simulation::builder(Sphere, ())
                        .prototype(digits(20))
                        .config(black_box(config.clone()))
                        .build()
                        .unwrap();
                    black_box(sim.run().unwrap())
                })
            },
        );
    }
    group.finish();
}

fn bench_wheel(c: &mut Criterion) {
    let mut group = c.benchmark_group("wheel");
    let mut rng = create_rng(7);

    for n in [100usize, 1_000, 10_000] {
        let weights: Vec<f64> = (0..n).map(|_| rng.random_range(0.0..10.0)).collect();
        group.bench_with_input(BenchmarkId::new("build", n), &weights, |b, w| {
            b.iter(|| black_box(Wheel::from_weights(black_box(w))))
        });

        let wheel = Wheel::from_weights(&weights);
        group.bench_with_input(BenchmarkId::new("spin", n), &wheel, |b, wheel| {
            let mut rng = create_rng(1);
            b.iter(|| black_box(wheel.index_of(rng.random_range(0.0..1.0))))
        });
    }
    group.finish();
}

fn bench_crossover(c: &mut Criterion) {
    let mut group = c.benchmark_group("crossover");
    let one = bits(1_000);
    let two = bits(1_000).random_likeness(&mut create_rng(3));

    for strategy in [Crossover::OnePoint, Crossover::MultiPoint, Crossover::Uniform] {
        group.bench_function(format!("{:?}", strategy), |b| {
            let mut rng = create_rng(5);
            b.iter(|| black_box(crossover(&one, &two, strategy, &mut rng).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_ga_onemax,
    bench_ga_sphere,
    bench_wheel,
    bench_crossover
);
criterion_main!(benches);
