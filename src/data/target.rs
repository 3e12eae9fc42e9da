//! Consequent (target) attribute resolution.

use super::{Dataset, Interval};
use crate::error::{QarmError, Result};

/// Reference to a dataset column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnRef {
    Name(String),
    Index(usize),
}

/// How the accepted target interval is given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetBounds {
    /// Literal bounds; a missing endpoint means the column MIN / MAX.
    Range {
        lower: Option<f64>,
        upper: Option<f64>,
    },
    /// Quantiles in `[0, 1]`, resolved through the column's percentile index.
    Percentiles { lower: f64, upper: f64 },
}

/// Unresolved description of the consequent.
///
/// # Examples
///
/// ```
/// use u_qarm::data::{Dataset, TargetSpec};
///
/// let ds = Dataset::new(
///     vec!["x".into(), "y".into()],
///     (0..11).map(|i| vec![i as f64, i as f64]).collect(),
/// ).unwrap();
///
/// let target = TargetSpec::percentiles("y", 0.9, 1.0).resolve(&ds).unwrap();
/// assert_eq!(target.index, 1);
/// assert_eq!(target.interval.lower, 9.0);
/// assert_eq!(target.interval.upper, 10.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TargetSpec {
    pub column: ColumnRef,
    pub bounds: TargetBounds,
}

/// The resolved consequent: a column and its accepted closed interval.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Target {
    pub index: usize,
    pub interval: Interval,
}

impl Target {
    /// Returns `true` if the row's target cell lies in the accepted interval.
    #[inline]
    pub fn matches(&self, row: &[f64]) -> bool {
        self.interval.contains(row[self.index])
    }
}

impl TargetSpec {
    /// Target by column name with literal bounds (`None` = MIN / MAX).
    pub fn range(column: impl Into<String>, lower: Option<f64>, upper: Option<f64>) -> Self {
        Self {
            column: ColumnRef::Name(column.into()),
            bounds: TargetBounds::Range { lower, upper },
        }
    }

    /// Target by column name with percentile bounds in `[0, 1]`.
    pub fn percentiles(column: impl Into<String>, lower: f64, upper: f64) -> Self {
        Self {
            column: ColumnRef::Name(column.into()),
            bounds: TargetBounds::Percentiles { lower, upper },
        }
    }

    /// Addresses the column by index instead of name.
    pub fn with_index(mut self, index: usize) -> Self {
        self.column = ColumnRef::Index(index);
        self
    }

    /// Resolves against `dataset`.
    ///
    /// # Errors
    ///
    /// Unknown columns, percentiles outside `[0, 1]` and inverted intervals
    /// are all rejected here, before any search begins.
    pub fn resolve(&self, dataset: &Dataset) -> Result<Target> {
        let index = match &self.column {
            ColumnRef::Name(name) => dataset.column_index(name)?,
            ColumnRef::Index(i) => dataset.check_index(*i)?,
        };
        let bounds = dataset.bounds(index);

        let interval = match self.bounds {
            TargetBounds::Range { lower, upper } => Interval::new(
                lower.unwrap_or(bounds.lower),
                upper.unwrap_or(bounds.upper),
            )?,
            TargetBounds::Percentiles { lower, upper } => {
                for p in [lower, upper] {
                    if !(0.0..=1.0).contains(&p) {
                        return Err(QarmError::InvalidPercentile(p));
                    }
                }
                if lower > upper {
                    return Err(QarmError::InvalidInterval { lower, upper });
                }
                let pct = dataset.percentiles();
                Interval::new(pct.value_at(index, lower), pct.value_at(index, upper))?
            }
        };

        log::info!(
            "target '{}' accepted range {}",
            dataset.name(index),
            interval
        );

        Ok(Target { index, interval })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::new(
            vec!["a".into(), "y".into()],
            (0..=100).map(|i| vec![i as f64, (100 - i) as f64]).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_literal_range_with_open_ends() {
        let ds = dataset();
        let t = TargetSpec::range("y", None, Some(40.0)).resolve(&ds).unwrap();
        assert_eq!(t.index, 1);
        assert_eq!(t.interval, Interval { lower: 0.0, upper: 40.0 });
    }

    #[test]
    fn test_percentile_range() {
        let ds = dataset();
        let t = TargetSpec::percentiles("a", 0.25, 0.75).resolve(&ds).unwrap();
        assert_eq!(t.interval, Interval { lower: 25.0, upper: 75.0 });
    }

    #[test]
    fn test_unknown_target() {
        let ds = dataset();
        let err = TargetSpec::range("zzz", None, None).resolve(&ds).unwrap_err();
        assert_eq!(err, QarmError::AttributeNotFound("zzz".into()));
    }

    #[test]
    fn test_index_out_of_range() {
        let ds = dataset();
        let err = TargetSpec::range("", None, None)
            .with_index(5)
            .resolve(&ds)
            .unwrap_err();
        assert!(matches!(err, QarmError::AttributeOutOfRange { index: 5, .. }));
    }

    #[test]
    fn test_invalid_orderings() {
        let ds = dataset();
        assert!(TargetSpec::range("y", Some(5.0), Some(1.0)).resolve(&ds).is_err());
        assert!(TargetSpec::percentiles("y", 0.8, 0.2).resolve(&ds).is_err());
        assert_eq!(
            TargetSpec::percentiles("y", 0.1, 1.5).resolve(&ds).unwrap_err(),
            QarmError::InvalidPercentile(1.5)
        );
    }

    #[test]
    fn test_matches_row() {
        let t = Target {
            index: 1,
            interval: Interval { lower: 0.0, upper: 1.0 },
        };
        assert!(t.matches(&[9.0, 0.5]));
        assert!(!t.matches(&[9.0, f64::NAN]));
    }
}
