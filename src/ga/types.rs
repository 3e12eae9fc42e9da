//! Core trait definitions for the multi-objective GA.
//!
//! The two central traits, [`Individual`] and [`MoeaProblem`], define the
//! contract between the generic evolutionary engine and the rule-mining
//! problem. The engine knows nothing about intervals or datasets; it only
//! sees objective vectors, feasibility, and the operators below.

use rand::Rng;

/// A two-objective fitness value.
///
/// Both objectives are **maximized**.
pub trait Fitness: Copy + Send + Sync + std::fmt::Debug + 'static {
    /// The objective vector used for dominance sorting.
    fn objectives(&self) -> [f64; 2];
}

impl Fitness for [f64; 2] {
    fn objectives(&self) -> [f64; 2] {
        *self
    }
}

/// A candidate solution in the population.
///
/// Individuals cache their own fitness. The engine calls
/// [`MoeaProblem::evaluate`] and stores the result via
/// [`set_fitness`](Individual::set_fitness); any operator that changes the
/// genotype must clear it again.
pub trait Individual: Clone + Send + Sync {
    /// The fitness type. Must implement [`Fitness`].
    type Fitness: Fitness;

    /// The cached fitness, or `None` if not evaluated since the last change.
    fn fitness(&self) -> Option<Self::Fitness>;

    /// Stores a freshly computed fitness.
    fn set_fitness(&mut self, fitness: Self::Fitness);

    /// Objective vector, or the worst possible vector when unevaluated.
    fn objectives_or_worst(&self) -> [f64; 2] {
        self.fitness()
            .map(|f| f.objectives())
            .unwrap_or([f64::NEG_INFINITY, f64::NEG_INFINITY])
    }
}

/// A bare objective vector is its own, always-evaluated individual.
impl Individual for [f64; 2] {
    type Fitness = [f64; 2];

    fn fitness(&self) -> Option<[f64; 2]> {
        Some(*self)
    }

    fn set_fitness(&mut self, fitness: [f64; 2]) {
        *self = fitness;
    }
}

/// Defines a constrained two-objective optimization problem.
///
/// Covers the operators the engine needs:
///
/// 1. **Initialization**: create random individuals, adopt seeded ones
/// 2. **Evaluation**: compute the objective vector
/// 3. **Mutation**: perturb an individual
/// 4. **Constraint**: feasibility test and repair
///
/// # Thread Safety
///
/// `MoeaProblem` must be `Send + Sync` because the engine may evaluate
/// individuals in parallel using rayon.
pub trait MoeaProblem: Send + Sync {
    /// The individual (solution) type for this problem.
    type Individual: Individual;

    /// Creates a random individual.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Evaluates an individual and returns its fitness.
    ///
    /// This is the expensive operation; the engine may call it in parallel.
    fn evaluate(
        &self,
        individual: &Self::Individual,
    ) -> <Self::Individual as Individual>::Fitness;

    /// Mutates an individual in place.
    ///
    /// The default implementation is a no-op.
    fn mutate<R: Rng>(&self, _individual: &mut Self::Individual, _rng: &mut R) {}

    /// Returns `true` if the individual satisfies the problem constraint.
    ///
    /// The default implementation accepts everything.
    fn is_feasible(&self, _individual: &Self::Individual) -> bool {
        true
    }

    /// Replaces an infeasible individual.
    ///
    /// Must never fail: when no feasible replacement is found the
    /// implementation returns the best effort it has. The default returns
    /// the individual unchanged.
    fn repair<R: Rng>(&self, individual: Self::Individual, _rng: &mut R) -> Self::Individual {
        individual
    }

    /// Adapts an individual taken from a seed population to this problem.
    ///
    /// Called once per seeded individual before the first evaluation. The
    /// default implementation returns it unchanged.
    fn adopt<R: Rng>(&self, individual: Self::Individual, _rng: &mut R) -> Self::Individual {
        individual
    }

    /// Called at the end of each generation with the current population.
    ///
    /// Useful for logging. The default implementation is a no-op.
    fn on_generation(&self, _generation: usize, _population: &[Self::Individual]) {}
}
