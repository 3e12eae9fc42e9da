//! Read-only state shared by every search primitive.

use super::params::SearchParams;
use super::problem::RuleProblem;
use crate::data::{Dataset, Interval, Target};
use crate::error::Result;
use crate::front::{pareto_front, SupportWindow};
use crate::ga::{EvolutionConfig, EvolutionEngine};
use crate::rule::{
    AttributeGene, ChromosomeMode, FitnessEvaluator, GaussianMutator, RuleCandidate, SearchConfig,
};
use rand::Rng;
use std::time::Instant;

/// Dataset, resolved target and hyperparameters of one search.
#[derive(Debug, Clone)]
pub struct SearchContext<'a> {
    pub dataset: &'a Dataset,
    pub target: Target,
    pub params: SearchParams,
}

impl<'a> SearchContext<'a> {
    /// # Errors
    ///
    /// Fails on invalid `params` or a target index outside the dataset.
    pub fn new(dataset: &'a Dataset, target: Target, params: SearchParams) -> Result<Self> {
        params.validate()?;
        dataset.check_index(target.index)?;
        Ok(Self {
            dataset,
            target,
            params,
        })
    }

    pub fn evaluator(&self) -> FitnessEvaluator<'a> {
        FitnessEvaluator::new(self.dataset, self.target)
    }

    /// Support window for front comparison: `[min_support, max_support]`.
    pub fn window(&self) -> SupportWindow {
        SupportWindow::new(self.params.min_support as f64, self.params.max_support as f64)
    }

    /// A chromosome configuration over this dataset and target.
    pub fn search_config(
        &self,
        fixed: Vec<usize>,
        search: Vec<usize>,
        mode: ChromosomeMode,
    ) -> SearchConfig<'a> {
        SearchConfig::new(self.target, self.dataset.all_bounds(), self.dataset.percentiles())
            .with_fixed(fixed)
            .with_search(search)
            .with_mode(mode)
    }

    /// A fixed-gene candidate carrying the given intervals, each clamped
    /// to its column bounds. `None` if no interval is given.
    pub fn seed_candidate(&self, intervals: &[(usize, Option<Interval>)]) -> Option<RuleCandidate> {
        let genes: Vec<AttributeGene> = intervals
            .iter()
            .filter_map(|&(attribute, interval)| {
                let interval = interval?;
                let bounds = self.dataset.bounds(attribute);
                let lower = interval.lower.clamp(bounds.lower, bounds.upper);
                let upper = interval.upper.clamp(lower, bounds.upper);
                Some(AttributeGene {
                    attribute,
                    lower,
                    upper,
                    min: bounds.lower,
                    max: bounds.upper,
                    fixed: true,
                })
            })
            .collect();
        (!genes.is_empty()).then(|| RuleCandidate::new(genes))
    }

    /// The rule problem of one run, mutating with `evolution.mutation_std`.
    pub fn problem(
        &self,
        config: SearchConfig<'a>,
        evolution: &EvolutionConfig,
    ) -> Result<RuleProblem<'a>> {
        let mutator = GaussianMutator::new(evolution.mutation_std);
        RuleProblem::new(self.dataset, config, self.params.constraint(), mutator)
    }

    /// Runs one evolution and returns the Pareto front of its final population.
    ///
    /// An empty `seed` is treated as no seed.
    pub fn run_evolution<R: Rng>(
        &self,
        config: SearchConfig<'a>,
        evolution: &EvolutionConfig,
        seed: Option<&[RuleCandidate]>,
        rng: &mut R,
    ) -> Result<Vec<RuleCandidate>> {
        evolution.validate()?;
        let problem = self.problem(config, evolution)?;
        let seed = seed.filter(|s| !s.is_empty());

        let start = Instant::now();
        let result = EvolutionEngine::run(&problem, evolution, seed, rng);
        let front = pareto_front(&result.population);

        log::debug!(
            "evolution: pop={}, gens={}, seeded={}, evaluations={}, front={}, elapsed={:.2?}",
            evolution.population_size,
            result.generations,
            result.seeded,
            result.evaluations,
            front.len(),
            start.elapsed()
        );
        Ok(front)
    }
}
