//! Evolution configuration.
//!
//! [`EvolutionConfig`] holds all parameters that control one evolutionary
//! run.

use crate::error::{QarmError, Result};

/// Configuration for one run of the [`EvolutionEngine`](super::EvolutionEngine).
///
/// # Defaults
///
/// ```
/// use u_qarm::ga::EvolutionConfig;
///
/// let config = EvolutionConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generations, 100);
/// assert_eq!(config.offspring_fraction, 0.75);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_qarm::ga::EvolutionConfig;
///
/// let config = EvolutionConfig::default()
///     .with_population_size(200)
///     .with_generations(500)
///     .with_mutation_rate(0.8)
///     .with_mutation_std(0.1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolutionConfig {
    /// Number of individuals in the population.
    pub population_size: usize,

    /// Exact number of generations to run.
    ///
    /// This is a hard iteration bound; there is no convergence test.
    pub generations: usize,

    /// Probability of mutating an offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Standard deviation of the Gaussian interval shift, as a fraction of
    /// the attribute's `[min, max]` width.
    pub mutation_std: f64,

    /// Fraction of each new generation produced as (mutated) offspring.
    ///
    /// The rest are survivors copied unchanged.
    pub offspring_fraction: f64,

    /// Whether to evaluate individuals in parallel using rayon.
    pub parallel: bool,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 100,
            mutation_rate: 1.0,
            mutation_std: 0.15,
            offspring_fraction: 0.75,
            parallel: true,
        }
    }
}

impl EvolutionConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation standard deviation (relative to attribute width).
    pub fn with_mutation_std(mut self, std: f64) -> Self {
        self.mutation_std = std.max(0.0);
        self
    }

    /// Sets the offspring fraction.
    pub fn with_offspring_fraction(mut self, fraction: f64) -> Self {
        self.offspring_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Number of offspring per generation.
    pub fn offspring_count(&self) -> usize {
        ((self.population_size as f64 * self.offspring_fraction).round() as usize)
            .min(self.population_size)
    }

    /// Number of survivors per generation.
    pub fn survivor_count(&self) -> usize {
        self.population_size - self.offspring_count()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(QarmError::InvalidConfig(
                "population_size must be at least 2".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(QarmError::InvalidConfig(
                "mutation_rate must be in [0, 1]".into(),
            ));
        }
        if !self.mutation_std.is_finite() || self.mutation_std < 0.0 {
            return Err(QarmError::InvalidConfig(
                "mutation_std must be finite and non-negative".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.offspring_fraction) {
            return Err(QarmError::InvalidConfig(
                "offspring_fraction must be in [0, 1]".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EvolutionConfig::default();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.generations, 100);
        assert!((config.mutation_rate - 1.0).abs() < 1e-10);
        assert!((config.mutation_std - 0.15).abs() < 1e-10);
        assert!((config.offspring_fraction - 0.75).abs() < 1e-10);
        assert!(config.parallel);
    }

    #[test]
    fn test_builder_pattern() {
        let config = EvolutionConfig::default()
            .with_population_size(200)
            .with_generations(10)
            .with_mutation_rate(0.5)
            .with_mutation_std(0.05)
            .with_offspring_fraction(0.5)
            .with_parallel(false);

        assert_eq!(config.population_size, 200);
        assert_eq!(config.generations, 10);
        assert!((config.mutation_rate - 0.5).abs() < 1e-10);
        assert!((config.mutation_std - 0.05).abs() < 1e-10);
        assert!((config.offspring_fraction - 0.5).abs() < 1e-10);
        assert!(!config.parallel);
    }

    #[test]
    fn test_clamp_rates() {
        let config = EvolutionConfig::default()
            .with_mutation_rate(2.0)
            .with_mutation_std(-1.0)
            .with_offspring_fraction(-0.5);
        assert!((config.mutation_rate - 1.0).abs() < 1e-10);
        assert_eq!(config.mutation_std, 0.0);
        assert_eq!(config.offspring_fraction, 0.0);
    }

    #[test]
    fn test_offspring_split() {
        let config = EvolutionConfig::default().with_population_size(10);
        assert_eq!(config.offspring_count(), 8);
        assert_eq!(config.survivor_count(), 2);

        let config = EvolutionConfig::default().with_population_size(100);
        assert_eq!(config.offspring_count(), 75);
        assert_eq!(config.survivor_count(), 25);
    }

    #[test]
    fn test_validate_ok() {
        assert!(EvolutionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_population_too_small() {
        let config = EvolutionConfig::default().with_population_size(1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_nan_std() {
        let mut config = EvolutionConfig::default();
        config.mutation_std = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_generations_is_allowed() {
        let config = EvolutionConfig::default().with_generations(0);
        assert!(config.validate().is_ok());
    }
}
