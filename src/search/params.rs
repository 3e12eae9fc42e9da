//! Search hyperparameters.

use crate::error::{QarmError, Result};
use crate::ga::EvolutionConfig;
use crate::rule::{ChromosomeMode, SupportConstraint};

/// Hyperparameters of one rule-tree search.
///
/// Three evolutionary phases have their own population size and generation
/// count: ranking attributes at the root, ranking attributes below an
/// existing front, and refining intervals.
///
/// # Examples
///
/// ```
/// use u_qarm::search::SearchParams;
///
/// let params = SearchParams::default()
///     .with_max_depth(3)
///     .with_improvement_threshold(0.05)
///     .with_seed(42);
/// assert!(params.validate().is_ok());
/// assert_eq!(params.range_evolution().population_size, 200);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchParams {
    /// Population size when ranking attributes with no parent front.
    pub pop_size_attr_first: usize,
    /// Generations when ranking attributes with no parent front.
    pub max_gen_attr_first: usize,
    /// Population size when ranking attributes below a parent front.
    pub pop_size_attr_parent: usize,
    /// Generations when ranking attributes below a parent front.
    pub max_gen_attr_parent: usize,
    /// Population size of interval refinement.
    pub pop_size_range: usize,
    /// Generations of interval refinement.
    pub max_gen_range: usize,

    pub mutation_rate: f64,
    pub mutation_std: f64,

    /// Smallest acceptable antecedent support.
    pub min_support: usize,
    /// Largest acceptable antecedent support.
    pub max_support: usize,
    /// Fresh candidates tried when repairing an infeasible one.
    pub repair_attempts: usize,

    /// Maximum number of attributes in a rule.
    pub max_depth: usize,
    /// Children committed per non-root node.
    pub max_children: usize,
    /// Children committed at the root.
    pub max_first_children: usize,
    /// Smallest front distance accepted for a commit.
    pub improvement_threshold: f64,

    /// Construction mode of attribute-ranking runs.
    pub chromosome_mode: ChromosomeMode,
    /// Evaluate populations with rayon.
    pub parallel: bool,
    /// Seed of the session generator; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            pop_size_attr_first: 100,
            max_gen_attr_first: 100,
            pop_size_attr_parent: 500,
            max_gen_attr_parent: 200,
            pop_size_range: 200,
            max_gen_range: 500,
            mutation_rate: 1.0,
            mutation_std: 0.15,
            min_support: 1,
            max_support: 1_000_000,
            repair_attempts: 10,
            max_depth: 2,
            max_children: 1,
            max_first_children: 4,
            improvement_threshold: 0.1,
            chromosome_mode: ChromosomeMode::Pool,
            parallel: true,
            seed: None,
        }
    }
}

impl SearchParams {
    /// Small populations and short runs, for tests and demos.
    pub fn fast() -> Self {
        Self {
            pop_size_attr_first: 40,
            max_gen_attr_first: 20,
            pop_size_attr_parent: 60,
            max_gen_attr_parent: 20,
            pop_size_range: 40,
            max_gen_range: 30,
            ..Self::default()
        }
    }

    /// Sets population size and generations of root attribute ranking.
    pub fn with_attr_first(mut self, population: usize, generations: usize) -> Self {
        self.pop_size_attr_first = population;
        self.max_gen_attr_first = generations;
        self
    }

    /// Sets population size and generations of attribute ranking below a parent.
    pub fn with_attr_parent(mut self, population: usize, generations: usize) -> Self {
        self.pop_size_attr_parent = population;
        self.max_gen_attr_parent = generations;
        self
    }

    /// Sets population size and generations of interval refinement.
    pub fn with_range(mut self, population: usize, generations: usize) -> Self {
        self.pop_size_range = population;
        self.max_gen_range = generations;
        self
    }

    pub fn with_mutation(mut self, rate: f64, std: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self.mutation_std = std.max(0.0);
        self
    }

    pub fn with_support(mut self, min: usize, max: usize) -> Self {
        self.min_support = min;
        self.max_support = max;
        self
    }

    pub fn with_repair_attempts(mut self, attempts: usize) -> Self {
        self.repair_attempts = attempts;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Sets the child limits of the root and of every other node.
    pub fn with_children(mut self, first: usize, others: usize) -> Self {
        self.max_first_children = first;
        self.max_children = others;
        self
    }

    pub fn with_improvement_threshold(mut self, threshold: f64) -> Self {
        self.improvement_threshold = threshold;
        self
    }

    pub fn with_chromosome_mode(mut self, mode: ChromosomeMode) -> Self {
        self.chromosome_mode = mode;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn evolution(&self, population: usize, generations: usize) -> EvolutionConfig {
        EvolutionConfig::default()
            .with_population_size(population)
            .with_generations(generations)
            .with_mutation_rate(self.mutation_rate)
            .with_mutation_std(self.mutation_std)
            .with_parallel(self.parallel)
    }

    /// Evolution settings for attribute ranking with no parent front.
    pub fn attr_first_evolution(&self) -> EvolutionConfig {
        self.evolution(self.pop_size_attr_first, self.max_gen_attr_first)
    }

    /// Evolution settings for attribute ranking below a parent front.
    pub fn attr_parent_evolution(&self) -> EvolutionConfig {
        self.evolution(self.pop_size_attr_parent, self.max_gen_attr_parent)
    }

    /// Evolution settings for interval refinement.
    pub fn range_evolution(&self) -> EvolutionConfig {
        self.evolution(self.pop_size_range, self.max_gen_range)
    }

    /// The feasibility constraint implied by the support window.
    pub fn constraint(&self) -> SupportConstraint {
        SupportConstraint::new(self.min_support, self.max_support, self.repair_attempts)
    }

    /// Validates every phase configuration and the search bounds.
    pub fn validate(&self) -> Result<()> {
        self.attr_first_evolution().validate()?;
        self.attr_parent_evolution().validate()?;
        self.range_evolution().validate()?;

        if self.min_support > self.max_support {
            return Err(QarmError::InvalidConfig(format!(
                "min_support ({}) exceeds max_support ({})",
                self.min_support, self.max_support
            )));
        }
        if self.improvement_threshold.is_nan() {
            return Err(QarmError::InvalidConfig(
                "improvement_threshold must not be NaN".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = SearchParams::default();
        assert_eq!((p.pop_size_attr_first, p.max_gen_attr_first), (100, 100));
        assert_eq!((p.pop_size_attr_parent, p.max_gen_attr_parent), (500, 200));
        assert_eq!((p.pop_size_range, p.max_gen_range), (200, 500));
        assert_eq!(p.max_depth, 2);
        assert_eq!(p.max_children, 1);
        assert_eq!(p.max_first_children, 4);
        assert_eq!(p.min_support, 1);
        assert_eq!(p.max_support, 1_000_000);
        assert!((p.improvement_threshold - 0.1).abs() < 1e-12);
        assert!(p.seed.is_none());
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_phase_configs() {
        let p = SearchParams::default()
            .with_mutation(0.5, 0.2)
            .with_parallel(false);
        let cfg = p.attr_parent_evolution();
        assert_eq!(cfg.population_size, 500);
        assert_eq!(cfg.generations, 200);
        assert!((cfg.mutation_rate - 0.5).abs() < 1e-12);
        assert!((cfg.mutation_std - 0.2).abs() < 1e-12);
        assert!(!cfg.parallel);
    }

    #[test]
    fn test_constraint() {
        let c = SearchParams::default()
            .with_support(5, 50)
            .with_repair_attempts(3)
            .constraint();
        assert_eq!(c, SupportConstraint::new(5, 50, 3));
    }

    #[test]
    fn test_validate_rejects() {
        assert!(SearchParams::default().with_support(10, 5).validate().is_err());
        assert!(SearchParams::default()
            .with_range(1, 10)
            .validate()
            .is_err());
        assert!(SearchParams::default()
            .with_improvement_threshold(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_fast_preset_is_valid() {
        let p = SearchParams::fast();
        assert!(p.validate().is_ok());
        assert!(p.pop_size_range < SearchParams::default().pop_size_range);
    }
}
