//! Pareto front extraction and comparison.
//!
//! # Key Functions
//!
//! - [`pareto_front`]: non-dominated members of a population
//! - [`front_distance`]: signed area gained by a child front over its parent
//! - [`average_vertical_distance`]: mean height of a group above a reference front

mod curve;
mod distance;

pub use curve::{Polyline, SupportWindow};
pub use distance::{average_vertical_distance, front_distance};

use crate::ga::multi_objective::non_dominated_sort;
use crate::ga::Individual;

/// Evaluated, non-dominated members of `population`, in population order.
///
/// Both objectives are maximized. Members sharing a front member's exact
/// objective vector are all kept, so the front may hold more candidates
/// than distinct points. Unevaluated members are ignored.
///
/// # Examples
///
/// ```
/// use u_qarm::front::pareto_front;
///
/// let population = vec![[10.0, 0.2], [5.0, 0.5], [5.0, 0.5], [4.0, 0.4]];
/// let front = pareto_front(&population);
/// assert_eq!(front, vec![[10.0, 0.2], [5.0, 0.5], [5.0, 0.5]]);
/// ```
pub fn pareto_front<I: Individual>(population: &[I]) -> Vec<I> {
    let evaluated: Vec<&I> = population
        .iter()
        .filter(|ind| ind.fitness().is_some())
        .collect();
    let objectives: Vec<[f64; 2]> = evaluated
        .iter()
        .map(|ind| ind.objectives_or_worst())
        .collect();

    let sorted = non_dominated_sort(&objectives);
    match sorted.fronts.first() {
        Some(front) => front.iter().map(|&i| evaluated[i].clone()).collect(),
        None => Vec::new(),
    }
}

/// `(support, confidence)` of each front member, unevaluated members skipped.
pub fn front_points<I: Individual>(front: &[I]) -> Vec<[f64; 2]> {
    front
        .iter()
        .filter(|ind| ind.fitness().is_some())
        .map(Individual::objectives_or_worst)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::multi_objective::{dominance, Dominance};
    use crate::rule::{AttributeGene, RuleCandidate, RuleFitness};

    fn candidate(support: Option<usize>, confidence: f64) -> RuleCandidate {
        let mut c = RuleCandidate::new(vec![AttributeGene {
            attribute: 0,
            lower: 0.0,
            upper: 0.5,
            min: 0.0,
            max: 1.0,
            fixed: false,
        }]);
        c.fitness = support.map(|support| RuleFitness {
            support,
            confidence,
        });
        c
    }

    #[test]
    fn test_front_keeps_duplicates_skips_unevaluated() {
        let pop = vec![
            candidate(Some(10), 0.5),
            candidate(None, 0.0),
            candidate(Some(10), 0.5),
            candidate(Some(5), 0.4),
            candidate(Some(2), 0.9),
        ];
        let front = pareto_front(&pop);
        assert_eq!(front.len(), 3);
        assert_eq!(
            front_points(&front),
            vec![[10.0, 0.5], [10.0, 0.5], [2.0, 0.9]]
        );
    }

    #[test]
    fn test_front_members_mutually_non_dominated() {
        let pop: Vec<[f64; 2]> = (0..50)
            .map(|i| {
                let x = (i * 37 % 50) as f64;
                [x, ((i * 13) % 17) as f64 / 17.0]
            })
            .collect();
        let front = pareto_front(&pop);
        assert!(!front.is_empty());
        for a in &front {
            for b in &pop {
                assert_ne!(dominance(b, a), Dominance::Left, "{b:?} dominates {a:?}");
            }
        }
    }

    #[test]
    fn test_empty_population() {
        let empty: Vec<[f64; 2]> = vec![];
        assert!(pareto_front(&empty).is_empty());
    }
}
