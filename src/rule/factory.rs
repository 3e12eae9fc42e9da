//! Random candidate construction.

use super::candidate::RuleCandidate;
use super::config::{ChromosomeMode, SearchConfig};
use super::gene::AttributeGene;
use crate::error::Result;
use rand::Rng;
use std::sync::{Mutex, PoisonError};

/// Rotating pool of attribute indices.
///
/// Indices are drawn without replacement until the pool is exhausted, then
/// the pool is refilled with every index. Over a run each search attribute
/// is therefore offered about equally often.
#[derive(Debug, Clone)]
pub struct IndexPool {
    all: Vec<usize>,
    remaining: Vec<usize>,
}

impl IndexPool {
    pub fn new(indices: Vec<usize>) -> Self {
        Self {
            remaining: indices.clone(),
            all: indices,
        }
    }

    /// Every index the pool was built from.
    pub fn all(&self) -> &[usize] {
        &self.all
    }

    /// Indices not yet drawn in the current cycle.
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    /// Draws one index, refilling first when exhausted. `None` if the pool is empty.
    pub fn take_random<R: Rng>(&mut self, rng: &mut R) -> Option<usize> {
        if self.all.is_empty() {
            return None;
        }
        if self.remaining.is_empty() {
            self.remaining.extend_from_slice(&self.all);
        }
        let i = rng.random_range(0..self.remaining.len());
        Some(self.remaining.swap_remove(i))
    }
}

const MAX_FULL_ATTEMPTS: usize = 1_000;

/// Builds random, valid candidates for one [`SearchConfig`].
pub struct CandidateFactory<'a> {
    config: SearchConfig<'a>,
    pool: Mutex<IndexPool>,
}

impl<'a> CandidateFactory<'a> {
    /// Creates a factory.
    ///
    /// # Errors
    ///
    /// Propagates [`SearchConfig::validate`]; in particular a configuration
    /// with neither fixed nor searched attributes yields
    /// [`QarmError::EmptyChromosome`](crate::error::QarmError::EmptyChromosome).
    pub fn new(config: SearchConfig<'a>) -> Result<Self> {
        config.validate()?;
        let pool = Mutex::new(IndexPool::new(config.search().to_vec()));
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &SearchConfig<'a> {
        &self.config
    }

    /// A fresh random candidate.
    pub fn create<R: Rng>(&self, rng: &mut R) -> RuleCandidate {
        match self.config.mode {
            ChromosomeMode::Pool => self.create_pooled(rng),
            ChromosomeMode::Full => self.create_full(rng),
        }
    }

    /// A random gene for `attribute`, flagged fixed when it is.
    pub fn random_gene<R: Rng>(&self, attribute: usize, rng: &mut R) -> AttributeGene {
        AttributeGene::random(
            attribute,
            self.config.bounds[attribute],
            self.config.percentiles,
            self.config.is_fixed(attribute),
            rng,
        )
    }

    fn create_pooled<R: Rng>(&self, rng: &mut R) -> RuleCandidate {
        let mut genes: Vec<AttributeGene> = self
            .config
            .fixed()
            .iter()
            .map(|&i| self.random_gene(i, rng))
            .collect();

        let search = self.config.search();
        if !search.is_empty() {
            let drawn = self
                .pool
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take_random(rng);
            let extra = drawn.unwrap_or_else(|| search[rng.random_range(0..search.len())]);
            genes.push(self.random_gene(extra, rng));
        }

        RuleCandidate::new(genes)
    }

    fn create_full<R: Rng>(&self, rng: &mut R) -> RuleCandidate {
        let search = self.config.search();
        let mut attempts = 0;
        loop {
            attempts += 1;
            let chosen = if search.is_empty() {
                None
            } else {
                Some(search[rng.random_range(0..search.len())])
            };

            let genes: Vec<AttributeGene> = (0..self.config.n_attributes())
                .filter(|&i| i != self.config.target.index)
                .map(|i| {
                    if self.config.is_fixed(i) || Some(i) == chosen {
                        self.random_gene(i, rng)
                    } else {
                        AttributeGene::full_range(i, self.config.bounds[i], false)
                    }
                })
                .collect();

            let candidate = RuleCandidate::new(genes);
            if candidate.is_valid() {
                return candidate;
            }
            // Only constant search columns can keep every gene at full range.
            if attempts >= MAX_FULL_ATTEMPTS {
                log::warn!("no valid full-mode candidate after {attempts} attempts");
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Interval, PercentileIndex, Target};
    use crate::error::QarmError;
    use crate::random::create_rng;

    struct Fixture {
        bounds: Vec<Interval>,
        index: PercentileIndex,
    }

    impl Fixture {
        fn new() -> Self {
            let col: Vec<f64> = (0..=10).map(|i| i as f64).collect();
            Self {
                bounds: vec![Interval { lower: 0.0, upper: 10.0 }; 5],
                index: PercentileIndex::from_columns(vec![col; 5]),
            }
        }

        fn config(&self) -> SearchConfig<'_> {
            let target = Target {
                index: 4,
                interval: Interval { lower: 5.0, upper: 10.0 },
            };
            SearchConfig::new(target, &self.bounds, &self.index)
        }
    }

    #[test]
    fn test_pool_cycles_through_all() {
        let mut pool = IndexPool::new(vec![3, 5, 7]);
        let mut rng = create_rng(9);
        let mut first: Vec<usize> = (0..3).filter_map(|_| pool.take_random(&mut rng)).collect();
        first.sort_unstable();
        assert_eq!(first, vec![3, 5, 7]);
        assert_eq!(pool.remaining(), 0);
        assert!(pool.take_random(&mut rng).is_some());
        assert_eq!(pool.remaining(), 2);
    }

    #[test]
    fn test_empty_pool() {
        let mut pool = IndexPool::new(vec![]);
        assert_eq!(pool.take_random(&mut create_rng(0)), None);
    }

    #[test]
    fn test_pool_mode_fixed_plus_one() {
        let fx = Fixture::new();
        let factory = CandidateFactory::new(
            fx.config().with_fixed(vec![0]).with_search(vec![1, 2, 3]),
        )
        .unwrap();
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let c = factory.create(&mut rng);
            assert_eq!(c.genes.len(), 2);
            assert_eq!(c.genes[0].attribute, 0);
            assert!(c.genes[0].fixed);
            assert!((1..=3).contains(&c.genes[1].attribute));
            assert!(c.genes.iter().all(|g| g.is_valid()));
        }
    }

    #[test]
    fn test_pool_mode_without_search() {
        let fx = Fixture::new();
        let factory = CandidateFactory::new(fx.config().with_fixed(vec![1, 2])).unwrap();
        let c = factory.create(&mut create_rng(1));
        assert_eq!(c.genes.len(), 2);
        assert!(c.is_valid());
    }

    #[test]
    fn test_full_mode_covers_non_target() {
        let fx = Fixture::new();
        let factory = CandidateFactory::new(
            fx.config()
                .with_fixed(vec![0])
                .with_search(vec![1, 2])
                .with_mode(ChromosomeMode::Full),
        )
        .unwrap();
        let mut rng = create_rng(5);
        for _ in 0..50 {
            let c = factory.create(&mut rng);
            assert!(c.is_valid());
            let attrs: Vec<usize> = c.genes.iter().map(|g| g.attribute).collect();
            assert_eq!(attrs, vec![0, 1, 2, 3]);
            assert!(c.genes[3].is_default());
            assert!(c.active_attributes().len() <= 2);
        }
    }

    #[test]
    fn test_empty_configuration_is_fatal() {
        let fx = Fixture::new();
        let err = CandidateFactory::new(fx.config().with_search(vec![4])).err();
        assert_eq!(err, Some(QarmError::EmptyChromosome));
    }
}
