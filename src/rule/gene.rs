//! One attribute interval of a rule antecedent.

use crate::data::{Interval, PercentileProvider};
use rand::Rng;

/// A closed interval over one attribute, bounded by the column's `[min, max]`.
///
/// Invariant: `min <= lower <= upper <= max`.
///
/// A gene spanning the whole column range is *default*: it constrains
/// nothing and is left out of the antecedent, unless its attribute is
/// fixed, in which case it stays active at full range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeGene {
    pub attribute: usize,
    pub lower: f64,
    pub upper: f64,
    pub min: f64,
    pub max: f64,
    /// Whether `attribute` is in the fixed set of the run that owns this gene.
    pub fixed: bool,
}

impl AttributeGene {
    /// A gene covering the full `[min, max]` range of the attribute.
    pub fn full_range(attribute: usize, bounds: Interval, fixed: bool) -> Self {
        Self {
            attribute,
            lower: bounds.lower,
            upper: bounds.upper,
            min: bounds.lower,
            max: bounds.upper,
            fixed,
        }
    }

    /// Samples a random interval through the attribute's empirical distribution.
    ///
    /// Two uniform quantiles are drawn, ordered, and mapped through
    /// `percentiles`; the results are clamped so the gene invariant holds.
    pub fn random<R: Rng>(
        attribute: usize,
        bounds: Interval,
        percentiles: &dyn PercentileProvider,
        fixed: bool,
        rng: &mut R,
    ) -> Self {
        let p1: f64 = rng.random_range(0.0..1.0);
        let p2: f64 = rng.random_range(0.0..1.0);
        let (lo_p, hi_p) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };

        let min = bounds.lower;
        let max = bounds.upper;
        let raw_lower = percentiles.value(attribute, lo_p);
        let raw_upper = percentiles.value(attribute, hi_p);

        let lower = if raw_lower.is_nan() {
            min
        } else {
            raw_lower.clamp(min, max)
        };
        let upper = if raw_upper.is_nan() {
            max
        } else {
            raw_upper.clamp(lower, max)
        };

        Self {
            attribute,
            lower,
            upper,
            min,
            max,
            fixed,
        }
    }

    /// Returns `true` if `min <= lower <= upper <= max`.
    pub fn is_valid(&self) -> bool {
        self.min <= self.lower && self.lower <= self.upper && self.upper <= self.max
    }

    /// Full range and not fixed: inert, excluded from the antecedent.
    pub fn is_default(&self) -> bool {
        self.lower == self.min && self.upper == self.max && !self.fixed
    }

    /// The gene's current interval.
    pub fn interval(&self) -> Interval {
        Interval {
            lower: self.lower,
            upper: self.upper,
        }
    }

    /// Tests the gene's attribute cell of `row`. `NaN` never matches.
    #[inline]
    pub fn matches(&self, row: &[f64]) -> bool {
        let v = row[self.attribute];
        v >= self.lower && v <= self.upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PercentileIndex;
    use crate::random::create_rng;

    fn index() -> PercentileIndex {
        PercentileIndex::from_columns(vec![(0..=100).map(|i| i as f64).collect()])
    }

    #[test]
    fn test_full_range_default() {
        let g = AttributeGene::full_range(0, Interval { lower: 0.0, upper: 1.0 }, false);
        assert!(g.is_valid());
        assert!(g.is_default());

        let fixed = AttributeGene::full_range(0, Interval { lower: 0.0, upper: 1.0 }, true);
        assert!(!fixed.is_default());
    }

    #[test]
    fn test_random_respects_bounds() {
        let idx = index();
        let mut rng = create_rng(42);
        let bounds = Interval { lower: 10.0, upper: 90.0 };
        for _ in 0..500 {
            let g = AttributeGene::random(0, bounds, &idx, false, &mut rng);
            assert!(g.is_valid(), "{g:?}");
        }
    }

    #[test]
    fn test_random_follows_distribution() {
        let idx = PercentileIndex::from_columns(vec![vec![0.0, 0.0, 0.0, 0.0, 1000.0]]);
        let mut rng = create_rng(1);
        let bounds = Interval { lower: 0.0, upper: 1000.0 };
        let low_lowers = (0..200)
            .map(|_| AttributeGene::random(0, bounds, &idx, false, &mut rng))
            .filter(|g| g.lower < 500.0)
            .count();
        // Most of the mass sits at 0, so most sampled lower bounds do too.
        assert!(low_lowers > 150, "got {low_lowers}");
    }

    #[test]
    fn test_matches_rejects_nan() {
        let g = AttributeGene {
            attribute: 1,
            lower: 0.0,
            upper: 1.0,
            min: 0.0,
            max: 2.0,
            fixed: false,
        };
        assert!(g.matches(&[9.0, 0.5]));
        assert!(g.matches(&[9.0, 1.0]));
        assert!(!g.matches(&[9.0, 1.5]));
        assert!(!g.matches(&[9.0, f64::NAN]));
    }
}
