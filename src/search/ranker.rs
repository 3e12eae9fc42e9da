//! Choosing the next attribute to add to a rule.

use super::context::SearchContext;
use crate::data::Interval;
use crate::error::Result;
use crate::front::average_vertical_distance;
use crate::rule::RuleCandidate;
use rand::Rng;
use std::time::Instant;

/// Outcome of [`top_attribute`].
#[derive(Debug, Clone, Default)]
pub struct AttributeRanking {
    /// Highest-scoring attribute, `None` if the front held no free attribute.
    pub best: Option<usize>,
    /// `(attribute, score)` in rank order, ties in first-seen order.
    pub scores: Vec<(usize, f64)>,
    /// The front the ranking was read from.
    pub front: Vec<RuleCandidate>,
}

/// Proposes the attribute from `universe` that best extends `prefix`.
///
/// Runs a pool-mode evolution (prefix attributes fixed, one free attribute
/// drawn from `universe` per candidate) seeded from `parent_front`, then
/// groups the resulting front by free attribute:
///
/// - no parent front: scores by how many front members carry the attribute
/// - with a parent front: scores by the group's
///   [`average_vertical_distance`] above the parent front
///
/// With no parent front, the prefix intervals (if any) seed one candidate.
pub fn top_attribute<R: Rng>(
    ctx: &SearchContext<'_>,
    prefix: &[(usize, Interval)],
    universe: &[usize],
    parent_front: Option<&[RuleCandidate]>,
    rng: &mut R,
) -> Result<AttributeRanking> {
    let fixed: Vec<usize> = prefix.iter().map(|&(a, _)| a).collect();
    let config = ctx.search_config(fixed.clone(), universe.to_vec(), ctx.params.chromosome_mode);
    if config.search().is_empty() {
        log::debug!("attribute ranking: empty search universe");
        return Ok(AttributeRanking::default());
    }

    let parent = parent_front.filter(|f| !f.is_empty());
    let evolution = match parent {
        Some(_) => ctx.params.attr_parent_evolution(),
        None => ctx.params.attr_first_evolution(),
    };
    let prefix_seed: Option<Vec<RuleCandidate>> = match parent {
        Some(_) => None,
        None => {
            let intervals: Vec<_> = prefix.iter().map(|&(a, i)| (a, Some(i))).collect();
            ctx.seed_candidate(&intervals).map(|c| vec![c])
        }
    };
    let seed = parent.or(prefix_seed.as_deref());

    let start = Instant::now();
    let front = ctx.run_evolution(config, &evolution, seed, rng)?;

    // Front members per free attribute, in first-seen order.
    let mut groups: Vec<(usize, Vec<RuleCandidate>)> = Vec::new();
    for candidate in &front {
        for gene in candidate.active_genes() {
            if fixed.contains(&gene.attribute) {
                continue;
            }
            match groups.iter_mut().find(|(a, _)| *a == gene.attribute) {
                Some((_, members)) => members.push(candidate.clone()),
                None => groups.push((gene.attribute, vec![candidate.clone()])),
            }
        }
    }

    let mut scores: Vec<(usize, f64)> = groups
        .iter()
        .map(|(attribute, members)| {
            let score = match parent {
                Some(parent) => average_vertical_distance(members, parent),
                None => members.len() as f64,
            };
            (*attribute, score)
        })
        .collect();
    // Stable: equal scores keep first-seen order.
    scores.sort_by(|a, b| b.1.total_cmp(&a.1));

    if log::log_enabled!(log::Level::Debug) {
        let metric = if parent.is_some() {
            "avg vertical distance"
        } else {
            "front frequency"
        };
        for (attribute, score) in &scores {
            log::debug!(
                "  {:<20} {metric} = {score:.4}",
                ctx.dataset.name(*attribute)
            );
        }
        log::debug!(
            "attribute ranking: {} candidates over {} front members, elapsed={:.2?}",
            scores.len(),
            front.len(),
            start.elapsed()
        );
    }

    Ok(AttributeRanking {
        best: scores.first().map(|&(a, _)| a),
        scores,
        front,
    })
}
