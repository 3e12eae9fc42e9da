//! Per-column empirical distributions.
//!
//! [`PercentileIndex`] keeps an ascending copy of every column with
//! non-finite cells removed. It answers two questions:
//!
//! - percentile → value, by linear interpolation between nearest ranks
//! - value → cumulative percentage, by binary search
//!
//! Random interval initialization goes through the [`PercentileProvider`]
//! seam, which biases sampled bounds toward where the data actually lies
//! instead of the raw `[min, max]` range.

use rayon::prelude::*;

/// Maps an attribute and a quantile in `[0, 1]` to a column value.
pub trait PercentileProvider: Send + Sync {
    /// Value at quantile `percentile` of attribute `attribute`.
    ///
    /// Quantiles outside `[0, 1]` are clamped.
    fn value(&self, attribute: usize, percentile: f64) -> f64;
}

/// Columns sorted ascending, `NaN`/infinite cells excluded.
#[derive(Debug, Clone)]
pub struct PercentileIndex {
    columns: Vec<Vec<f64>>,
}

/// Column-count × row-count above which columns are sorted in parallel.
const PARALLEL_SORT_MIN_COLUMNS: usize = 8;
const PARALLEL_SORT_MIN_ROWS: usize = 10_000;

impl PercentileIndex {
    /// Builds the index from unsorted columns.
    ///
    /// Each column is filtered and sorted independently, so wide and tall
    /// inputs are processed with rayon.
    pub fn from_columns(columns: Vec<Vec<f64>>) -> Self {
        let rows = columns.first().map_or(0, Vec::len);
        let prepare = |col: Vec<f64>| {
            let mut col: Vec<f64> = col.into_iter().filter(|v| v.is_finite()).collect();
            col.sort_by(f64::total_cmp);
            col
        };

        let columns = if columns.len() > PARALLEL_SORT_MIN_COLUMNS && rows > PARALLEL_SORT_MIN_ROWS
        {
            columns.into_par_iter().map(prepare).collect()
        } else {
            columns.into_iter().map(prepare).collect()
        };

        Self { columns }
    }

    /// Number of indexed columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if no columns are indexed.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The sorted finite values of `attribute`.
    ///
    /// # Panics
    /// Panics if `attribute` is out of range.
    pub fn column(&self, attribute: usize) -> &[f64] {
        &self.columns[attribute]
    }

    /// Value at quantile `percentile` (clamped to `[0, 1]`).
    ///
    /// Uses rank interpolation: `pos = p * (n - 1)`, blending the two
    /// neighbouring order statistics. Returns `NaN` for an empty column.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_qarm::data::PercentileIndex;
    ///
    /// let index = PercentileIndex::from_columns(vec![vec![4.0, 0.0, 2.0]]);
    /// assert_eq!(index.value_at(0, 0.0), 0.0);
    /// assert_eq!(index.value_at(0, 0.25), 1.0);
    /// assert_eq!(index.value_at(0, 1.0), 4.0);
    /// ```
    pub fn value_at(&self, attribute: usize, percentile: f64) -> f64 {
        let col = &self.columns[attribute];
        let n = col.len();
        if n == 0 {
            return f64::NAN;
        }

        let p = if percentile.is_nan() {
            0.0
        } else {
            percentile.clamp(0.0, 1.0)
        };
        if p <= 0.0 {
            return col[0];
        }
        if p >= 1.0 {
            return col[n - 1];
        }

        let pos = p * (n - 1) as f64;
        let lo = pos as usize;
        let hi = lo + 1;
        let w = pos - lo as f64;
        if w == 0.0 || hi >= n {
            return col[lo];
        }
        col[lo] + (col[hi] - col[lo]) * w
    }

    /// Percentage (0–100) of finite values less than or equal to `threshold`.
    ///
    /// Values tied with `threshold` are counted.
    pub fn cumulative_percentage(&self, attribute: usize, threshold: f64) -> f64 {
        let col = &self.columns[attribute];
        if col.is_empty() {
            return 0.0;
        }
        let count = col.partition_point(|&v| v <= threshold);
        count as f64 / col.len() as f64 * 100.0
    }

    /// Number of finite values strictly below `value`.
    pub(crate) fn count_below(&self, attribute: usize, value: f64) -> usize {
        self.columns[attribute].partition_point(|&v| v < value)
    }

    /// Number of finite values at or below `value`.
    pub(crate) fn count_at_or_below(&self, attribute: usize, value: f64) -> usize {
        self.columns[attribute].partition_point(|&v| v <= value)
    }
}

impl PercentileProvider for PercentileIndex {
    fn value(&self, attribute: usize, percentile: f64) -> f64 {
        self.value_at(attribute, percentile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> PercentileIndex {
        PercentileIndex::from_columns(vec![
            vec![3.0, f64::NAN, 1.0, 2.0, 0.0, 4.0],
            vec![5.0, 5.0, 5.0, 5.0, 5.0, 5.0],
        ])
    }

    #[test]
    fn test_nan_excluded_and_sorted() {
        let idx = index();
        assert_eq!(idx.column(0), &[0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(idx.column(1).len(), 6);
    }

    #[test]
    fn test_value_interpolates_between_ranks() {
        let idx = index();
        assert_eq!(idx.value_at(0, 0.5), 2.0);
        assert!((idx.value_at(0, 0.125) - 0.5).abs() < 1e-12);
        assert_eq!(idx.value_at(0, -3.0), 0.0);
        assert_eq!(idx.value_at(0, 7.0), 4.0);
    }

    #[test]
    fn test_value_constant_column() {
        let idx = index();
        assert_eq!(idx.value_at(1, 0.37), 5.0);
    }

    #[test]
    fn test_cumulative_percentage_counts_ties() {
        let idx = index();
        assert_eq!(idx.cumulative_percentage(0, 2.0), 60.0);
        assert_eq!(idx.cumulative_percentage(0, 2.5), 60.0);
        assert_eq!(idx.cumulative_percentage(0, -1.0), 0.0);
        assert_eq!(idx.cumulative_percentage(1, 5.0), 100.0);
    }

    #[test]
    fn test_parallel_path_matches_sequential() {
        let cols: Vec<Vec<f64>> = (0..10)
            .map(|c| (0..10_001).map(|r| ((r * 7919 + c) % 10_007) as f64).collect())
            .collect();
        let idx = PercentileIndex::from_columns(cols.clone());
        for (c, col) in cols.into_iter().enumerate() {
            let mut expected = col;
            expected.sort_by(f64::total_cmp);
            assert_eq!(idx.column(c), expected.as_slice());
        }
    }
}
