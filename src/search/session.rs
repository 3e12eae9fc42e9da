//! Depth-first rule-tree search.

use super::context::SearchContext;
use super::params::SearchParams;
use super::ranker::top_attribute;
use super::refiner::top_range;
use super::tree::{NodeId, RuleTree};
use crate::data::{Dataset, Interval, Target};
use crate::error::Result;
use crate::front::front_distance;
use crate::random::create_rng_opt;
use crate::rule::RuleCandidate;
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::BTreeSet;
use std::time::Instant;

/// Owns the mutable state of one rule-tree search.
///
/// The front stack and the used-attribute set change only inside
/// [`run`](Self::run): every commit pushes a front and marks its attribute
/// used, and both are undone when the recursion below it returns, so a
/// completed traversal leaves them as it found them.
///
/// # Examples
///
/// ```
/// use u_qarm::data::{Dataset, TargetSpec};
/// use u_qarm::search::{SearchParams, SearchSession};
///
/// let rows: Vec<Vec<f64>> = (0..50)
///     .map(|i| vec![i as f64, ((i * 13) % 50) as f64, if i >= 40 { 1.0 } else { 0.0 }])
///     .collect();
/// let ds = Dataset::new(vec!["a".into(), "b".into(), "y".into()], rows).unwrap();
/// let target = TargetSpec::range("y", Some(1.0), None).resolve(&ds).unwrap();
///
/// let params = SearchParams::fast().with_max_depth(1).with_seed(3);
/// let mut session = SearchSession::new(&ds, target, params).unwrap();
/// let tree = session.run().unwrap();
/// assert!(tree.depth() <= 1);
/// ```
pub struct SearchSession<'a, R: Rng = StdRng> {
    ctx: SearchContext<'a>,
    rng: R,
    front_stack: Vec<Vec<RuleCandidate>>,
    used: BTreeSet<usize>,
    tree: RuleTree,
}

impl<'a> SearchSession<'a, StdRng> {
    /// Creates a session whose generator is seeded from `params.seed`.
    ///
    /// # Errors
    ///
    /// Fails on invalid `params` or a target outside the dataset.
    pub fn new(dataset: &'a Dataset, target: Target, params: SearchParams) -> Result<Self> {
        let rng = create_rng_opt(params.seed);
        Self::with_rng(dataset, target, params, rng)
    }
}

impl<'a, R: Rng> SearchSession<'a, R> {
    /// Creates a session drawing from `rng`; `params.seed` is ignored.
    pub fn with_rng(dataset: &'a Dataset, target: Target, params: SearchParams, rng: R) -> Result<Self> {
        Ok(Self {
            ctx: SearchContext::new(dataset, target, params)?,
            rng,
            front_stack: Vec::new(),
            used: BTreeSet::new(),
            tree: RuleTree::new(),
        })
    }

    /// Keeps `attribute` out of every rule of this session.
    pub fn exclude(&mut self, attribute: usize) -> &mut Self {
        self.used.insert(attribute);
        self
    }

    pub fn context(&self) -> &SearchContext<'a> {
        &self.ctx
    }

    /// Attributes currently unavailable for new additions.
    pub fn used(&self) -> &BTreeSet<usize> {
        &self.used
    }

    pub fn tree(&self) -> &RuleTree {
        &self.tree
    }

    pub fn into_tree(self) -> RuleTree {
        self.tree
    }

    /// Runs the depth-first search from the empty rule.
    ///
    /// Any tree from a previous run is discarded.
    pub fn run(&mut self) -> Result<&RuleTree> {
        self.tree = RuleTree::new();
        self.front_stack.clear();

        let params = &self.ctx.params;
        log::info!(
            "rule search: target {} ∈ {}, {} rows, max_depth={}, children={}/{}, threshold={}",
            self.ctx.dataset.name(self.ctx.target.index),
            self.ctx.target.interval,
            self.ctx.dataset.n_rows(),
            params.max_depth,
            params.max_first_children,
            params.max_children,
            params.improvement_threshold
        );

        let start = Instant::now();
        let root = self.tree.root();
        self.expand(root, Vec::new())?;

        log::info!(
            "rule search finished: {} rules, depth {}, elapsed={:.2?}",
            self.tree.len() - 1,
            self.tree.depth(),
            start.elapsed()
        );
        Ok(&self.tree)
    }

    fn expand(&mut self, node: NodeId, prefix: Vec<(usize, Interval)>) -> Result<()> {
        let child_limit = if node == self.tree.root() {
            self.ctx.params.max_first_children
        } else {
            self.ctx.params.max_children
        };
        let threshold = self.ctx.params.improvement_threshold;
        let mut committed: Vec<usize> = Vec::new();

        while prefix.len() < self.ctx.params.max_depth && committed.len() < child_limit {
            let universe: Vec<usize> = (0..self.ctx.dataset.n_cols())
                .filter(|&a| {
                    a != self.ctx.target.index
                        && !self.used.contains(&a)
                        && !committed.contains(&a)
                })
                .collect();
            if universe.is_empty() {
                log::debug!("no attributes left to add at depth {}", prefix.len());
                break;
            }

            let parent = self.front_stack.last().map(Vec::as_slice);
            let ranking = top_attribute(&self.ctx, &prefix, &universe, parent, &mut self.rng)?;
            let Some(attribute) = ranking.best else {
                log::debug!("attribute ranking found no candidate at depth {}", prefix.len());
                break;
            };

            let mut request: Vec<(usize, Option<Interval>)> =
                prefix.iter().map(|&(a, i)| (a, Some(i))).collect();
            request.push((attribute, None));
            let selection = top_range(&self.ctx, &request, parent, &mut self.rng)?;
            let Some(interval) = selection.interval(attribute) else {
                log::debug!(
                    "range refinement found no rule using {}",
                    self.ctx.dataset.name(attribute)
                );
                break;
            };

            let improvement =
                front_distance(parent.unwrap_or(&[]), &selection.front, self.ctx.window());
            if improvement < threshold {
                log::info!(
                    "reject {} ∈ {} at depth {}: improvement {improvement:.4} < {threshold}",
                    self.ctx.dataset.name(attribute),
                    interval,
                    prefix.len() + 1
                );
                break;
            }

            let child = self.tree.add_child(
                node,
                attribute,
                interval,
                selection.ranges.clone(),
                selection.front.clone(),
                improvement,
            );
            log::info!(
                "commit {} ∈ {} at depth {}: improvement {improvement:.4}, front {}",
                self.ctx.dataset.name(attribute),
                interval,
                prefix.len() + 1,
                selection.front.len()
            );

            self.front_stack.push(selection.front);
            self.used.insert(attribute);
            committed.push(attribute);

            let outcome = self.expand(child, selection.ranges);

            self.front_stack.pop();
            self.used.remove(&attribute);
            outcome?;
        }
        Ok(())
    }
}
