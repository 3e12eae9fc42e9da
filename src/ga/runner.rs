//! Generational NSGA-II loop.
//!
//! [`EvolutionEngine`] orchestrates one evolutionary run:
//! initialization (fresh or seeded) → constraint → evaluation →
//! { selection → mutation → constraint → evaluation } × generations.

use super::config::EvolutionConfig;
use super::multi_objective::nsga2_select;
use super::types::{Individual, MoeaProblem};
use rand::Rng;
use rayon::prelude::*;

/// Result of one evolutionary run.
#[derive(Debug, Clone)]
pub struct EvolutionResult<I: Individual> {
    /// The full final-generation population, every member evaluated.
    ///
    /// Front extraction is left to the caller.
    pub population: Vec<I>,

    /// Number of generations executed (always `config.generations`).
    pub generations: usize,

    /// Number of fitness evaluations performed.
    pub evaluations: usize,

    /// How many initial individuals came from the seed population.
    pub seeded: usize,
}

/// Executes the evolutionary loop.
///
/// The generator is borrowed, never created here: one generator per search
/// session is threaded through every run so a single seed reproduces the
/// whole search.
///
/// # Usage
///
/// ```ignore
/// let mut rng = u_qarm::random::create_rng(42);
/// let config = EvolutionConfig::default().with_generations(50);
/// let result = EvolutionEngine::run(&problem, &config, None, &mut rng);
/// let front = u_qarm::front::pareto_front(&result.population);
/// ```
pub struct EvolutionEngine;

impl EvolutionEngine {
    /// Runs the evolution.
    ///
    /// When `seed` is given, up to `population_size` of its individuals are
    /// passed through [`MoeaProblem::adopt`] and the shortfall is filled with fresh samples.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call
    /// [`EvolutionConfig::validate`] first to get a descriptive error).
    pub fn run<P: MoeaProblem, R: Rng>(
        problem: &P,
        config: &EvolutionConfig,
        seed: Option<&[P::Individual]>,
        rng: &mut R,
    ) -> EvolutionResult<P::Individual> {
        config.validate().expect("invalid EvolutionConfig");

        let pop_size = config.population_size;
        let survivor_count = config.survivor_count();
        let offspring_count = config.offspring_count();

        // 1. Initialize population
        let mut population: Vec<P::Individual> = Vec::with_capacity(pop_size);
        if let Some(seed) = seed {
            for ind in seed.iter().take(pop_size) {
                population.push(problem.adopt(ind.clone(), rng));
            }
        }
        let seeded = population.len();
        while population.len() < pop_size {
            population.push(problem.create_individual(rng));
        }

        // 2. Constrain and evaluate initial population
        enforce_constraint(problem, &mut population, rng);
        let mut evaluations = evaluate_population(problem, &mut population, config.parallel);

        // 3. Evolutionary loop
        for gen in 0..config.generations {
            let objectives: Vec<[f64; 2]> = population
                .iter()
                .map(Individual::objectives_or_worst)
                .collect();

            let survivors: Vec<P::Individual> = nsga2_select(&objectives, survivor_count)
                .into_iter()
                .map(|i| population[i].clone())
                .collect();

            let mut offspring: Vec<P::Individual> = nsga2_select(&objectives, offspring_count)
                .into_iter()
                .map(|i| population[i].clone())
                .collect();

            for child in offspring.iter_mut() {
                if rng.random_range(0.0..1.0) < config.mutation_rate {
                    problem.mutate(child, rng);
                }
            }

            enforce_constraint(problem, &mut offspring, rng);
            evaluations += evaluate_population(problem, &mut offspring, config.parallel);

            population = survivors;
            population.extend(offspring);

            problem.on_generation(gen + 1, &population);
        }

        EvolutionResult {
            population,
            generations: config.generations,
            evaluations,
            seeded,
        }
    }
}

/// Replace every infeasible individual by its repair.
fn enforce_constraint<P: MoeaProblem, R: Rng>(
    problem: &P,
    population: &mut [P::Individual],
    rng: &mut R,
) {
    for slot in population.iter_mut() {
        if !problem.is_feasible(slot) {
            let original = slot.clone();
            *slot = problem.repair(original, rng);
        }
    }
}

/// Evaluate every individual lacking a cached fitness. Returns the count.
fn evaluate_population<P: MoeaProblem>(
    problem: &P,
    population: &mut [P::Individual],
    parallel: bool,
) -> usize {
    if parallel {
        population
            .par_iter_mut()
            .filter(|ind| ind.fitness().is_none())
            .map(|ind| {
                let f = problem.evaluate(ind);
                ind.set_fitness(f);
            })
            .count()
    } else {
        let mut count = 0;
        for ind in population.iter_mut().filter(|ind| ind.fitness().is_none()) {
            let f = problem.evaluate(ind);
            ind.set_fitness(f);
            count += 1;
        }
        count
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    // ---- Toy problem: a point in [0,1]², objectives (x, 1 - x²·y) ----

    #[derive(Clone, Debug)]
    struct Point {
        x: f64,
        y: f64,
        fitness: Option<[f64; 2]>,
    }

    impl Individual for Point {
        type Fitness = [f64; 2];
        fn fitness(&self) -> Option<[f64; 2]> {
            self.fitness
        }
        fn set_fitness(&mut self, f: [f64; 2]) {
            self.fitness = Some(f);
        }
    }

    struct Toy {
        /// Points with x above this are infeasible.
        max_x: f64,
    }

    impl MoeaProblem for Toy {
        type Individual = Point;

        fn create_individual<R: Rng>(&self, rng: &mut R) -> Point {
            Point {
                x: rng.random_range(0.0..1.0),
                y: rng.random_range(0.0..1.0),
                fitness: None,
            }
        }

        fn evaluate(&self, p: &Point) -> [f64; 2] {
            [p.x, 1.0 - p.x * p.x * p.y]
        }

        fn mutate<R: Rng>(&self, p: &mut Point, rng: &mut R) {
            p.x = (p.x + rng.random_range(-0.1..0.1)).clamp(0.0, 1.0);
            p.y = (p.y + rng.random_range(-0.1..0.1)).clamp(0.0, 1.0);
            p.fitness = None;
        }

        fn is_feasible(&self, p: &Point) -> bool {
            p.x <= self.max_x
        }

        fn repair<R: Rng>(&self, p: Point, _rng: &mut R) -> Point {
            Point {
                x: self.max_x,
                fitness: None,
                ..p
            }
        }
    }

    fn config() -> EvolutionConfig {
        EvolutionConfig::default()
            .with_population_size(40)
            .with_generations(30)
            .with_parallel(false)
    }

    #[test]
    fn test_population_size_and_evaluated() {
        let mut rng = create_rng(42);
        let result = EvolutionEngine::run(&Toy { max_x: 1.0 }, &config(), None, &mut rng);
        assert_eq!(result.population.len(), 40);
        assert_eq!(result.generations, 30);
        assert_eq!(result.seeded, 0);
        assert!(result.population.iter().all(|p| p.fitness.is_some()));
        assert!(result.evaluations >= 40);
    }

    #[test]
    fn test_constraint_respected() {
        let mut rng = create_rng(7);
        let result = EvolutionEngine::run(&Toy { max_x: 0.5 }, &config(), None, &mut rng);
        assert!(result.population.iter().all(|p| p.x <= 0.5));
    }

    #[test]
    fn test_converges_toward_front() {
        let mut rng = create_rng(3);
        let result = EvolutionEngine::run(&Toy { max_x: 1.0 }, &config(), None, &mut rng);
        // Optimal trade-off has y = 0: confidence-like objective reaches 1.
        let best_second = result
            .population
            .iter()
            .map(|p| p.fitness.unwrap()[1])
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(best_second > 0.99, "got {best_second}");
    }

    #[test]
    fn test_seeded_start() {
        let seed: Vec<Point> = (0..100)
            .map(|i| Point {
                x: i as f64 / 100.0,
                y: 0.0,
                fitness: None,
            })
            .collect();
        let mut rng = create_rng(1);
        let cfg = config().with_generations(0);
        let result = EvolutionEngine::run(&Toy { max_x: 1.0 }, &cfg, Some(&seed), &mut rng);
        assert_eq!(result.seeded, 40);
        assert_eq!(result.population.len(), 40);
        for (i, p) in result.population.iter().enumerate() {
            assert_eq!(p.x, i as f64 / 100.0);
        }
    }

    #[test]
    fn test_seed_shortfall_is_padded() {
        let seed = vec![Point {
            x: 0.25,
            y: 0.5,
            fitness: None,
        }];
        let mut rng = create_rng(1);
        let cfg = config().with_generations(0);
        let result = EvolutionEngine::run(&Toy { max_x: 1.0 }, &cfg, Some(&seed), &mut rng);
        assert_eq!(result.seeded, 1);
        assert_eq!(result.population.len(), 40);
        assert_eq!(result.population[0].x, 0.25);
    }

    #[test]
    fn test_deterministic_given_seed() {
        let run = |seed| {
            let mut rng = create_rng(seed);
            EvolutionEngine::run(&Toy { max_x: 1.0 }, &config(), None, &mut rng)
                .population
                .iter()
                .map(|p| (p.x, p.y))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(11), run(11));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut a = create_rng(5);
        let mut b = create_rng(5);
        let seq = EvolutionEngine::run(&Toy { max_x: 1.0 }, &config(), None, &mut a);
        let par = EvolutionEngine::run(
            &Toy { max_x: 1.0 },
            &config().with_parallel(true),
            None,
            &mut b,
        );
        let xs = |r: &EvolutionResult<Point>| r.population.iter().map(|p| p.x).collect::<Vec<_>>();
        assert_eq!(xs(&seq), xs(&par));
    }
}
