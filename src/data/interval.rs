//! Closed numeric intervals.

use crate::error::{QarmError, Result};

/// A closed interval `[lower, upper]` over one attribute.
///
/// A `NaN` value is never contained in any interval.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    pub lower: f64,
    pub upper: f64,
}

impl Interval {
    /// Creates an interval, rejecting `NaN` endpoints and `lower > upper`.
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        if lower.is_nan() || upper.is_nan() || lower > upper {
            return Err(QarmError::InvalidInterval { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Returns `true` if `value` lies inside the closed interval.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        // NaN compares false on both sides.
        value >= self.lower && value <= self.upper
    }

    /// Width of the interval.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Returns a copy with both endpoints rounded to `decimals` places.
    pub fn rounded(&self, decimals: u32) -> Self {
        Self {
            lower: round_to(self.lower, decimals),
            upper: round_to(self.upper, decimals),
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:.4}, {:.4}]", self.lower, self.upper)
    }
}

/// Rounds `value` half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_inverted() {
        assert!(Interval::new(2.0, 1.0).is_err());
        assert!(Interval::new(f64::NAN, 1.0).is_err());
        assert!(Interval::new(1.0, 1.0).is_ok());
    }

    #[test]
    fn test_contains_is_closed_and_nan_safe() {
        let iv = Interval::new(0.0, 1.0).unwrap();
        assert!(iv.contains(0.0));
        assert!(iv.contains(1.0));
        assert!(!iv.contains(1.0000001));
        assert!(!iv.contains(f64::NAN));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.123456, 4), 0.1235);
        assert_eq!(round_to(-1.00004, 4), -1.0);
        let iv = Interval::new(0.11111, 0.99999).unwrap().rounded(2);
        assert_eq!(iv, Interval { lower: 0.11, upper: 1.0 });
    }
}
