//! Rule evaluation against the dataset.
//!
//! Every evaluation first extracts the active genes into parallel
//! `(index, lower, upper)` arrays, then makes a single pass over the rows
//! with a short-circuit AND over those arrays. The inner loop touches only
//! the active attributes, which keeps wide datasets cheap.

use super::candidate::RuleCandidate;
use crate::data::{Dataset, Target};
use crate::ga::Fitness;

/// `(support, confidence)` of a rule, both maximized.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleFitness {
    /// Rows matching the antecedent.
    pub support: usize,
    /// `support(X ∧ Y) / support(X)`, 0 when `support` is 0.
    pub confidence: f64,
}

impl Fitness for RuleFitness {
    fn objectives(&self) -> [f64; 2] {
        [self.support as f64, self.confidence]
    }
}

/// 2×2 counts of antecedent match × target match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfusionMatrix {
    pub true_positive: usize,
    pub false_positive: usize,
    pub false_negative: usize,
    pub true_negative: usize,
}

impl ConfusionMatrix {
    /// `fp / (fp + tn)`, 0 when the denominator is 0.
    pub fn false_positive_rate(&self) -> f64 {
        ratio(
            self.false_positive,
            self.false_positive + self.true_negative,
        )
    }

    /// `fn / (fn + tp)`, 0 when the denominator is 0.
    pub fn false_negative_rate(&self) -> f64 {
        ratio(
            self.false_negative,
            self.false_negative + self.true_positive,
        )
    }

    /// Distance from a balanced error trade-off.
    ///
    /// 0 when both rates are 0, `+∞` when exactly one is 0, otherwise
    /// `|max / min - 1|`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_qarm::rule::ConfusionMatrix;
    ///
    /// let m = ConfusionMatrix {
    ///     true_positive: 8,
    ///     false_positive: 1,
    ///     false_negative: 2,
    ///     true_negative: 9,
    /// };
    /// // FPR = 0.1, FNR = 0.2
    /// assert!((m.balance_score() - 1.0).abs() < 1e-12);
    /// ```
    pub fn balance_score(&self) -> f64 {
        let type1 = self.false_positive_rate();
        let type2 = self.false_negative_rate();
        match (type1 == 0.0, type2 == 0.0) {
            (true, true) => 0.0,
            (true, false) | (false, true) => f64::INFINITY,
            (false, false) => (type1.max(type2) / type1.min(type2) - 1.0).abs(),
        }
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Active genes as parallel arrays.
struct ActiveBounds {
    index: Vec<usize>,
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl ActiveBounds {
    fn of(candidate: &RuleCandidate) -> Self {
        let k = candidate.active_genes().count();
        let mut bounds = Self {
            index: Vec::with_capacity(k),
            lower: Vec::with_capacity(k),
            upper: Vec::with_capacity(k),
        };
        for g in candidate.active_genes() {
            bounds.index.push(g.attribute);
            bounds.lower.push(g.lower);
            bounds.upper.push(g.upper);
        }
        bounds
    }

    /// Short-circuit AND over the active bounds. `NaN` fails.
    #[inline]
    fn matches(&self, row: &[f64]) -> bool {
        for j in 0..self.index.len() {
            let v = row[self.index[j]];
            if !(v >= self.lower[j] && v <= self.upper[j]) {
                return false;
            }
        }
        true
    }
}

/// Evaluates rule candidates against one dataset and target.
#[derive(Debug, Clone, Copy)]
pub struct FitnessEvaluator<'a> {
    dataset: &'a Dataset,
    target: Target,
}

impl<'a> FitnessEvaluator<'a> {
    pub fn new(dataset: &'a Dataset, target: Target) -> Self {
        Self { dataset, target }
    }

    /// The target this evaluator scores against.
    pub fn target(&self) -> Target {
        self.target
    }

    /// Support and confidence in one pass.
    pub fn evaluate(&self, candidate: &RuleCandidate) -> RuleFitness {
        let active = ActiveBounds::of(candidate);
        let mut support_x = 0usize;
        let mut support_xy = 0usize;

        for row in self.dataset.rows() {
            let y_ok = self.target.matches(row);
            if active.matches(row) {
                support_x += 1;
                if y_ok {
                    support_xy += 1;
                }
            }
        }

        RuleFitness {
            support: support_x,
            confidence: ratio(support_xy, support_x),
        }
    }

    /// Antecedent support only, skipping the target test.
    ///
    /// With no active gene the antecedent is vacuously true and every row
    /// matches.
    pub fn support(&self, candidate: &RuleCandidate) -> usize {
        let active = ActiveBounds::of(candidate);
        if active.index.is_empty() {
            return self.dataset.n_rows();
        }
        self.dataset.rows().filter(|row| active.matches(row)).count()
    }

    /// Rows whose target cell lies in the target interval.
    pub fn target_support(&self) -> usize {
        self.dataset
            .rows()
            .filter(|row| self.target.matches(row))
            .count()
    }

    /// Confidence divided by the unconditional target probability.
    ///
    /// 0 when the target never occurs.
    pub fn lift(&self, candidate: &RuleCandidate) -> f64 {
        let support_y = self.target_support();
        if support_y == 0 {
            return 0.0;
        }
        let base = support_y as f64 / self.dataset.n_rows() as f64;
        self.evaluate(candidate).confidence / base
    }

    /// Full 2×2 confusion counts.
    pub fn confusion(&self, candidate: &RuleCandidate) -> ConfusionMatrix {
        let active = ActiveBounds::of(candidate);
        let mut m = ConfusionMatrix::default();
        for row in self.dataset.rows() {
            match (active.matches(row), self.target.matches(row)) {
                (true, true) => m.true_positive += 1,
                (true, false) => m.false_positive += 1,
                (false, true) => m.false_negative += 1,
                (false, false) => m.true_negative += 1,
            }
        }
        m
    }
}
