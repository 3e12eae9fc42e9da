//! Criterion benchmarks for u-qarm hot paths.
//!
//! Uses synthetic uniform tables so the numbers reflect evaluation and
//! front arithmetic cost rather than any particular dataset.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use u_qarm::data::{Dataset, Target, TargetSpec};
use u_qarm::front::{front_distance, SupportWindow};
use u_qarm::ga::{EvolutionConfig, EvolutionEngine};
use u_qarm::random::create_rng;
use u_qarm::rule::{
    CandidateFactory, ChromosomeMode, FitnessEvaluator, GaussianMutator, SearchConfig,
    SupportConstraint,
};
use u_qarm::search::RuleProblem;

// ===========================================================================
// Synthetic data
// ===========================================================================

/// `cols` uniform attributes plus a target column in the last position.
fn uniform_table(rows: usize, cols: usize) -> (Dataset, Target) {
    let mut rng = create_rng(42);
    let data: Vec<Vec<f64>> = (0..rows)
        .map(|_| (0..=cols).map(|_| rng.random_range(0.0..1.0)).collect())
        .collect();
    let mut names: Vec<String> = (0..cols).map(|c| format!("x{c}")).collect();
    names.push("y".into());
    let dataset = Dataset::new(names, data).expect("synthetic table is valid");
    let target = TargetSpec::percentiles("y", 0.9, 1.0)
        .resolve(&dataset)
        .expect("target column exists");
    (dataset, target)
}

/// A descending staircase front of `n` points.
fn staircase(n: usize, shift: f64) -> Vec<[f64; 2]> {
    (0..n)
        .map(|i| {
            let x = 1.0 + 999.0 * i as f64 / (n - 1) as f64;
            [x, (1.0 - i as f64 / n as f64 + shift).min(1.0)]
        })
        .collect()
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    for &rows in &[1_000, 10_000, 100_000] {
        let (dataset, target) = uniform_table(rows, 8);
        let config = SearchConfig::new(target, dataset.all_bounds(), dataset.percentiles())
            .with_fixed(vec![0, 1, 2])
            .with_mode(ChromosomeMode::Full);
        let factory = CandidateFactory::new(config).expect("three fixed attributes");
        let candidate = factory.create(&mut create_rng(7));
        let evaluator = FitnessEvaluator::new(&dataset, target);

        group.bench_with_input(BenchmarkId::from_parameter(rows), &candidate, |b, cand| {
            b.iter(|| black_box(evaluator.evaluate(black_box(cand))))
        });
    }
    group.finish();
}

fn bench_front_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("front_distance");
    let window = SupportWindow::new(1.0, 1000.0);

    for &n in &[10, 100, 1000] {
        let parent = staircase(n, 0.0);
        let child = staircase(n, 0.05);
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(parent, child),
            |b, (p, ch)| b.iter(|| black_box(front_distance(black_box(p), black_box(ch), window))),
        );
    }
    group.finish();
}

fn bench_evolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("evolution");
    group.sample_size(10);

    let (dataset, target) = uniform_table(2_000, 6);
    for &(pop, gen) in &[(50, 20), (100, 50)] {
        let config = SearchConfig::new(target, dataset.all_bounds(), dataset.percentiles())
            .with_fixed(vec![0])
            .with_search(vec![1, 2, 3, 4, 5]);
        let problem = RuleProblem::new(
            &dataset,
            config,
            SupportConstraint::default(),
            GaussianMutator::default(),
        )
        .expect("non-empty chromosome");
        let evolution = EvolutionConfig::default()
            .with_population_size(pop)
            .with_generations(gen)
            .with_parallel(false);

        group.bench_with_input(
            BenchmarkId::new(format!("p{pop}_g{gen}"), pop),
            &evolution,
            |b, cfg| {
                b.iter(|| {
                    let mut rng = create_rng(42);
                    let result = EvolutionEngine::run(black_box(&problem), cfg, None, &mut rng);
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_front_distance, bench_evolution);
criterion_main!(benches);
