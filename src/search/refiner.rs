//! Choosing intervals for a fixed attribute set.

use super::context::SearchContext;
use crate::data::{round_to, Interval, PercentileIndex};
use crate::error::{QarmError, Result};
use crate::rule::{ChromosomeMode, RuleCandidate};
use rand::Rng;
use std::time::Instant;

/// Decimal places reported intervals are rounded to.
const ROUND_DECIMALS: u32 = 4;

/// Outcome of [`top_range`].
#[derive(Debug, Clone, Default)]
pub struct RangeSelection {
    /// `(attribute, interval)` in request order; empty if no front member
    /// used exactly the requested attributes.
    pub ranges: Vec<(usize, Interval)>,
    /// Balance score of the selected candidate (lower is better).
    pub score: f64,
    /// The selected front member.
    pub selected: Option<RuleCandidate>,
    /// The full front of the refinement run.
    pub front: Vec<RuleCandidate>,
}

impl RangeSelection {
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Interval chosen for `attribute`.
    pub fn interval(&self, attribute: usize) -> Option<Interval> {
        self.ranges
            .iter()
            .find(|(a, _)| *a == attribute)
            .map(|&(_, i)| i)
    }
}

/// Finds the best intervals for exactly the attributes in `attributes`.
///
/// Runs a fixed-attribute evolution seeded from `parent_front` (or, with no
/// parent front, from the given seed intervals). Among front members whose
/// active attributes are exactly the requested set, picks the one with the
/// lowest [`balance_score`](crate::rule::ConfusionMatrix::balance_score);
/// the first wins ties.
///
/// Reported bounds are rounded to four decimals unless rounding would
/// change which rows the interval matches.
///
/// # Errors
///
/// [`QarmError::InvalidConfig`] if `attributes` is empty; configuration
/// errors from the chromosome setup.
pub fn top_range<R: Rng>(
    ctx: &SearchContext<'_>,
    attributes: &[(usize, Option<Interval>)],
    parent_front: Option<&[RuleCandidate]>,
    rng: &mut R,
) -> Result<RangeSelection> {
    if attributes.is_empty() {
        return Err(QarmError::InvalidConfig(
            "range refinement needs at least one attribute".into(),
        ));
    }
    let requested: Vec<usize> = attributes.iter().map(|&(a, _)| a).collect();
    let config = ctx.search_config(requested.clone(), Vec::new(), ChromosomeMode::Full);

    let parent = parent_front.filter(|f| !f.is_empty());
    let interval_seed: Option<Vec<RuleCandidate>> = match parent {
        Some(_) => None,
        None => ctx.seed_candidate(attributes).map(|c| vec![c]),
    };
    let seed = parent.or(interval_seed.as_deref());

    let start = Instant::now();
    let front = ctx.run_evolution(config, &ctx.params.range_evolution(), seed, rng)?;

    let evaluator = ctx.evaluator();
    let mut best: Option<(f64, &RuleCandidate)> = None;
    for candidate in &front {
        let active = candidate.active_attributes();
        if active.len() != requested.len() || !active.iter().all(|a| requested.contains(a)) {
            continue;
        }
        let score = evaluator.confusion(candidate).balance_score();
        let better = match best {
            Some((best_score, _)) => score < best_score,
            None => true,
        };
        if better {
            best = Some((score, candidate));
        }
    }

    let Some((score, selected)) = best else {
        log::info!(
            "no front member of {} uses exactly {:?}",
            front.len(),
            names(ctx, &requested)
        );
        return Ok(RangeSelection {
            front,
            ..RangeSelection::default()
        });
    };

    let percentiles = ctx.dataset.percentiles();
    let mut ranges = Vec::with_capacity(requested.len());
    for &attribute in &requested {
        let Some(gene) = selected.gene(attribute) else {
            continue;
        };
        let interval = report_interval(percentiles, attribute, gene.interval());
        log::debug!(
            "{} ∈ {} (percentiles {:.0}..{:.0})",
            ctx.dataset.name(attribute),
            interval,
            percentiles.cumulative_percentage(attribute, interval.lower),
            percentiles.cumulative_percentage(attribute, interval.upper)
        );
        ranges.push((attribute, interval));
    }
    log::debug!(
        "range refinement: score={score:.4}, front={}, elapsed={:.2?}",
        front.len(),
        start.elapsed()
    );

    let selected = selected.clone();
    Ok(RangeSelection {
        ranges,
        score,
        selected: Some(selected),
        front,
    })
}

/// Rounds `interval`, keeping the exact bounds where rounding would move
/// a column value across either end.
fn report_interval(percentiles: &PercentileIndex, attribute: usize, interval: Interval) -> Interval {
    let lower = round_to(interval.lower, ROUND_DECIMALS);
    let upper = round_to(interval.upper, ROUND_DECIMALS);
    let lower_same = percentiles.count_below(attribute, lower)
        == percentiles.count_below(attribute, interval.lower);
    let upper_same = percentiles.count_at_or_below(attribute, upper)
        == percentiles.count_at_or_below(attribute, interval.upper);
    Interval {
        lower: if lower_same { lower } else { interval.lower },
        upper: if upper_same { upper } else { interval.upper },
    }
}

fn names(ctx: &SearchContext<'_>, attributes: &[usize]) -> Vec<String> {
    attributes.iter().map(|&a| ctx.dataset.name(a)).collect()
}
