//! Rule candidate: the evolutionary individual.

use super::fitness::RuleFitness;
use super::gene::AttributeGene;
use crate::ga::Individual;
use std::collections::HashSet;

/// An ordered collection of attribute genes forming one rule antecedent.
///
/// Valid when attribute indices are unique, every gene is individually
/// valid, and at least one gene is non-default.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleCandidate {
    pub genes: Vec<AttributeGene>,
    /// Cached `(support, confidence)`; cleared by any genotype change.
    pub fitness: Option<RuleFitness>,
}

impl RuleCandidate {
    /// Creates an unevaluated candidate.
    pub fn new(genes: Vec<AttributeGene>) -> Self {
        Self {
            genes,
            fitness: None,
        }
    }

    /// Genes that take part in the antecedent.
    pub fn active_genes(&self) -> impl Iterator<Item = &AttributeGene> + '_ {
        self.genes.iter().filter(|g| !g.is_default())
    }

    /// Attribute indices of the active genes, in gene order.
    pub fn active_attributes(&self) -> Vec<usize> {
        self.active_genes().map(|g| g.attribute).collect()
    }

    /// The gene for `attribute`, if present.
    pub fn gene(&self, attribute: usize) -> Option<&AttributeGene> {
        self.genes.iter().find(|g| g.attribute == attribute)
    }

    /// Checks the candidate invariant.
    pub fn is_valid(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.genes.len());
        self.genes.iter().all(|g| g.is_valid() && seen.insert(g.attribute))
            && self.genes.iter().any(|g| !g.is_default())
    }

    /// Re-marks every gene's `fixed` flag against a new fixed set.
    pub fn rebind(&mut self, fixed: &[usize]) {
        for g in &mut self.genes {
            g.fixed = fixed.contains(&g.attribute);
        }
        self.fitness = None;
    }

    /// Human-readable antecedent, e.g. `a ∈ [0.1000, 0.5000] AND b ∈ [...]`.
    pub fn describe(&self, names: &[String]) -> String {
        let parts: Vec<String> = self
            .active_genes()
            .map(|g| {
                let name = names
                    .get(g.attribute)
                    .cloned()
                    .unwrap_or_else(|| format!("attr#{}", g.attribute));
                format!("{name} ∈ {}", g.interval())
            })
            .collect();
        if parts.is_empty() {
            "TRUE".to_string()
        } else {
            parts.join(" AND ")
        }
    }
}

impl Individual for RuleCandidate {
    type Fitness = RuleFitness;

    fn fitness(&self) -> Option<RuleFitness> {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: RuleFitness) {
        self.fitness = Some(fitness);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Interval;

    fn gene(attribute: usize, lower: f64, upper: f64) -> AttributeGene {
        AttributeGene {
            attribute,
            lower,
            upper,
            min: 0.0,
            max: 1.0,
            fixed: false,
        }
    }

    #[test]
    fn test_valid_candidate() {
        let c = RuleCandidate::new(vec![gene(0, 0.2, 0.4), gene(1, 0.0, 1.0)]);
        assert!(c.is_valid());
        assert_eq!(c.active_attributes(), vec![0]);
    }

    #[test]
    fn test_duplicate_attribute_invalid() {
        let c = RuleCandidate::new(vec![gene(0, 0.2, 0.4), gene(0, 0.1, 0.3)]);
        assert!(!c.is_valid());
    }

    #[test]
    fn test_all_default_invalid() {
        let c = RuleCandidate::new(vec![gene(0, 0.0, 1.0), gene(1, 0.0, 1.0)]);
        assert!(!c.is_valid());
    }

    #[test]
    fn test_inverted_gene_invalid() {
        let c = RuleCandidate::new(vec![gene(0, 0.6, 0.4)]);
        assert!(!c.is_valid());
    }

    #[test]
    fn test_rebind_activates_full_range_gene() {
        let mut c = RuleCandidate::new(vec![gene(0, 0.2, 0.4), gene(1, 0.0, 1.0)]);
        c.fitness = Some(RuleFitness {
            support: 3,
            confidence: 0.5,
        });
        c.rebind(&[1]);
        assert_eq!(c.active_attributes(), vec![0, 1]);
        assert!(c.fitness.is_none());
    }

    #[test]
    fn test_describe() {
        let c = RuleCandidate::new(vec![gene(0, 0.25, 0.5), gene(1, 0.0, 1.0), gene(2, 0.0, 0.125)]);
        let names = vec!["a".to_string(), "b".to_string()];
        assert_eq!(
            c.describe(&names),
            "a ∈ [0.2500, 0.5000] AND attr#2 ∈ [0.0000, 0.1250]"
        );
        assert_eq!(c.gene(1).map(|g| g.interval()), Some(Interval { lower: 0.0, upper: 1.0 }));
    }
}
