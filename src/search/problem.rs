//! Rule mining as a constrained two-objective problem.

use crate::data::Dataset;
use crate::error::Result;
use crate::ga::{Individual, MoeaProblem};
use crate::rule::{
    CandidateFactory, ChromosomeMode, FitnessEvaluator, GaussianMutator, RuleCandidate,
    RuleFitness, SearchConfig, SupportConstraint,
};
use rand::Rng;

/// Plugs the rule operators into the [`EvolutionEngine`](crate::ga::EvolutionEngine).
pub struct RuleProblem<'a> {
    factory: CandidateFactory<'a>,
    evaluator: FitnessEvaluator<'a>,
    constraint: SupportConstraint,
    mutator: GaussianMutator,
}

impl<'a> RuleProblem<'a> {
    /// # Errors
    ///
    /// Fails when `config` cannot produce a non-empty candidate.
    pub fn new(
        dataset: &'a Dataset,
        config: SearchConfig<'a>,
        constraint: SupportConstraint,
        mutator: GaussianMutator,
    ) -> Result<Self> {
        let evaluator = FitnessEvaluator::new(dataset, config.target);
        let factory = CandidateFactory::new(config)?;
        Ok(Self {
            factory,
            evaluator,
            constraint,
            mutator,
        })
    }

    pub fn config(&self) -> &SearchConfig<'a> {
        self.factory.config()
    }

    pub fn evaluator(&self) -> &FitnessEvaluator<'a> {
        &self.evaluator
    }

    pub fn mutator(&self) -> &GaussianMutator {
        &self.mutator
    }

    /// Whether a seeded gene on `attribute` may stay in a candidate of this run.
    fn admits(&self, attribute: usize) -> bool {
        let config = self.config();
        if attribute >= config.n_attributes() || attribute == config.target.index {
            return false;
        }
        match config.mode {
            ChromosomeMode::Pool => {
                config.is_fixed(attribute) || config.search().contains(&attribute)
            }
            ChromosomeMode::Full => true,
        }
    }
}

impl MoeaProblem for RuleProblem<'_> {
    type Individual = RuleCandidate;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> RuleCandidate {
        self.factory.create(rng)
    }

    fn evaluate(&self, candidate: &RuleCandidate) -> RuleFitness {
        self.evaluator.evaluate(candidate)
    }

    fn mutate<R: Rng>(&self, candidate: &mut RuleCandidate, rng: &mut R) {
        self.mutator.mutate(candidate, rng);
    }

    fn is_feasible(&self, candidate: &RuleCandidate) -> bool {
        self.constraint.test(candidate, &self.evaluator)
    }

    fn repair<R: Rng>(&self, candidate: RuleCandidate, rng: &mut R) -> RuleCandidate {
        self.constraint
            .repair(candidate, &self.factory, &self.evaluator, rng)
    }

    /// Re-targets a candidate from a parent front at this run.
    ///
    /// Genes this run does not admit are dropped, fixed flags are rebound,
    /// and every fixed attribute the candidate lacks gets a random gene.
    /// Kept intervals are not changed. A candidate left invalid is replaced
    /// by a fresh one.
    fn adopt<R: Rng>(&self, candidate: RuleCandidate, rng: &mut R) -> RuleCandidate {
        let fixed = self.config().fixed();
        let mut genes: Vec<_> = candidate
            .genes
            .into_iter()
            .filter(|g| self.admits(g.attribute))
            .collect();
        for &attribute in fixed {
            if !genes.iter().any(|g| g.attribute == attribute) {
                genes.push(self.factory.random_gene(attribute, rng));
            }
        }

        let mut adopted = RuleCandidate::new(genes);
        adopted.rebind(fixed);
        if adopted.is_valid() {
            adopted
        } else {
            self.factory.create(rng)
        }
    }

    fn on_generation(&self, generation: usize, population: &[RuleCandidate]) {
        if !log::log_enabled!(log::Level::Trace) {
            return;
        }
        let best_confidence = population
            .iter()
            .map(|c| c.objectives_or_worst()[1])
            .fold(f64::NEG_INFINITY, f64::max);
        let best_support = population
            .iter()
            .filter_map(|c| c.fitness.map(|f| f.support))
            .max()
            .unwrap_or(0);
        log::trace!(
            "generation {generation}: best confidence {best_confidence:.4}, best support {best_support}"
        );
    }
}
