//! Support window feasibility and repair-by-resampling.

use super::candidate::RuleCandidate;
use super::factory::CandidateFactory;
use super::fitness::FitnessEvaluator;
use rand::Rng;

/// Keeps antecedent support inside `[min_support, max_support]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SupportConstraint {
    pub min_support: usize,
    pub max_support: usize,
    /// Fresh candidates tried by [`repair`](Self::repair).
    pub max_attempts: usize,
}

impl Default for SupportConstraint {
    fn default() -> Self {
        Self {
            min_support: 1,
            max_support: 1_000_000,
            max_attempts: 10,
        }
    }
}

impl SupportConstraint {
    pub fn new(min_support: usize, max_support: usize, max_attempts: usize) -> Self {
        Self {
            min_support,
            max_support,
            max_attempts,
        }
    }

    fn support_of(&self, candidate: &RuleCandidate, evaluator: &FitnessEvaluator<'_>) -> usize {
        match candidate.fitness {
            Some(f) => f.support,
            None => evaluator.support(candidate),
        }
    }

    /// Whether the candidate's support lies in the window.
    ///
    /// A cached fitness is reused; otherwise only support is computed.
    pub fn test(&self, candidate: &RuleCandidate, evaluator: &FitnessEvaluator<'_>) -> bool {
        let support = self.support_of(candidate, evaluator);
        (self.min_support..=self.max_support).contains(&support)
    }

    /// Replaces an infeasible candidate.
    ///
    /// Draws up to `max_attempts` fresh candidates from `factory` and returns
    /// the first feasible one. Failing that, returns the attempt closest to
    /// the window (first seen wins ties) if it is strictly closer than
    /// `candidate`, else `candidate` itself. Never fails.
    pub fn repair<R: Rng>(
        &self,
        candidate: RuleCandidate,
        factory: &CandidateFactory<'_>,
        evaluator: &FitnessEvaluator<'_>,
        rng: &mut R,
    ) -> RuleCandidate {
        let original_gap = gap_to_range(
            self.support_of(&candidate, evaluator),
            self.min_support,
            self.max_support,
        );

        let mut best: Option<(usize, RuleCandidate)> = None;
        for _ in 0..self.max_attempts {
            let attempt = factory.create(rng);
            let support = evaluator.support(&attempt);
            let gap = gap_to_range(support, self.min_support, self.max_support);
            if gap == 0 {
                return attempt;
            }
            let closer = match &best {
                Some((best_gap, _)) => gap < *best_gap,
                None => true,
            };
            if closer {
                best = Some((gap, attempt));
            }
        }

        match best {
            Some((gap, attempt)) if gap < original_gap => attempt,
            _ => candidate,
        }
    }
}

/// Distance from `x` to `[lo, hi]`: `max(0, lo - x) + max(0, x - hi)`.
///
/// # Examples
///
/// ```
/// use u_qarm::rule::gap_to_range;
///
/// assert_eq!(gap_to_range(3, 5, 10), 2);
/// assert_eq!(gap_to_range(7, 5, 10), 0);
/// assert_eq!(gap_to_range(12, 5, 10), 2);
/// ```
pub fn gap_to_range(x: usize, lo: usize, hi: usize) -> usize {
    lo.saturating_sub(x) + x.saturating_sub(hi)
}
