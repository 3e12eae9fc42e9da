//! Gaussian interval translation.

use super::candidate::RuleCandidate;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Shifts each active interval by `N(0, std · (max − min))`.
///
/// Both bounds move by the same noise, so the interval keeps its width
/// until it hits a column bound. Default genes are left alone: moving one
/// would silently add its attribute to the antecedent.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaussianMutator {
    /// Standard deviation relative to the attribute width.
    pub std: f64,
}

impl Default for GaussianMutator {
    fn default() -> Self {
        Self { std: 0.15 }
    }
}

impl GaussianMutator {
    pub fn new(std: f64) -> Self {
        Self { std: std.max(0.0) }
    }

    /// Mutates every non-default gene in place and clears the cached fitness.
    pub fn mutate<R: Rng>(&self, candidate: &mut RuleCandidate, rng: &mut R) {
        for gene in candidate.genes.iter_mut().filter(|g| !g.is_default()) {
            let sigma = self.std * (gene.max - gene.min);
            let noise = match Normal::new(0.0, sigma) {
                Ok(normal) => normal.sample(rng),
                Err(_) => 0.0,
            };
            let lower = (gene.lower + noise).clamp(gene.min, gene.max);
            let upper = (gene.upper + noise).clamp(lower, gene.max);
            gene.lower = lower;
            gene.upper = upper;
        }
        candidate.fitness = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::rule::{AttributeGene, RuleFitness};

    fn gene(attribute: usize, lower: f64, upper: f64, fixed: bool) -> AttributeGene {
        AttributeGene {
            attribute,
            lower,
            upper,
            min: 0.0,
            max: 10.0,
            fixed,
        }
    }

    #[test]
    fn test_default_gene_untouched() {
        let mut c = RuleCandidate::new(vec![gene(0, 2.0, 4.0, false), gene(1, 0.0, 10.0, false)]);
        let mut rng = create_rng(7);
        for _ in 0..100 {
            GaussianMutator::new(0.3).mutate(&mut c, &mut rng);
            assert_eq!(c.genes[1], gene(1, 0.0, 10.0, false));
        }
    }

    #[test]
    fn test_fixed_full_range_gene_moves() {
        let mut c = RuleCandidate::new(vec![gene(0, 0.0, 10.0, true)]);
        let mut rng = create_rng(3);
        let mut moved = false;
        for _ in 0..20 {
            GaussianMutator::new(0.3).mutate(&mut c, &mut rng);
            moved |= c.genes[0].lower != 0.0 || c.genes[0].upper != 10.0;
        }
        assert!(moved);
    }

    #[test]
    fn test_invariant_and_width() {
        let mut rng = create_rng(11);
        let m = GaussianMutator::new(0.5);
        for _ in 0..500 {
            let mut c = RuleCandidate::new(vec![gene(0, 4.0, 6.0, false)]);
            m.mutate(&mut c, &mut rng);
            let g = c.genes[0];
            assert!(g.is_valid(), "{g:?}");
            // Width only shrinks when a bound was clamped.
            if g.lower > 0.0 && g.upper < 10.0 {
                assert!((g.upper - g.lower - 2.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_clears_fitness() {
        let mut c = RuleCandidate::new(vec![gene(0, 4.0, 6.0, false)]);
        c.fitness = Some(RuleFitness {
            support: 1,
            confidence: 1.0,
        });
        GaussianMutator::default().mutate(&mut c, &mut create_rng(0));
        assert!(c.fitness.is_none());
    }

    #[test]
    fn test_zero_std_is_identity() {
        let mut c = RuleCandidate::new(vec![gene(0, 4.0, 6.0, false)]);
        GaussianMutator::new(0.0).mutate(&mut c, &mut create_rng(0));
        assert_eq!(c.genes[0], gene(0, 4.0, 6.0, false));
    }
}
