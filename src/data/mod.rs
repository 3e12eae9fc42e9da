//! In-memory numeric dataset.
//!
//! A [`Dataset`] is an immutable rows × columns matrix of `f64` values
//! (`NaN` marks a missing cell) with column names, a [`PercentileIndex`]
//! over every column and per-column `[min, max]` bounds. It is built once
//! at session start and shared read-only by every search component.
//!
//! # Key Types
//!
//! - [`Dataset`]: the matrix plus derived per-column statistics
//! - [`PercentileIndex`] / [`PercentileProvider`]: percentile lookups
//! - [`Interval`]: closed attribute range
//! - [`TargetSpec`] → [`Target`]: the consequent attribute and its accepted interval

mod interval;
mod percentile;
mod target;

pub use interval::{round_to, Interval};
pub use percentile::{PercentileIndex, PercentileProvider};
pub use target::{ColumnRef, Target, TargetBounds, TargetSpec};

use crate::error::{QarmError, Result};

/// Immutable numeric matrix with per-column statistics.
#[derive(Debug, Clone)]
pub struct Dataset {
    names: Vec<String>,
    /// Row-major cells, `n_rows * n_cols` long.
    cells: Vec<f64>,
    n_rows: usize,
    n_cols: usize,
    percentiles: PercentileIndex,
    bounds: Vec<Interval>,
}

impl Dataset {
    /// Builds a dataset from column names and rows.
    ///
    /// # Errors
    ///
    /// - [`QarmError::EmptyDataset`] if `rows` is empty
    /// - [`QarmError::NoColumns`] if rows have zero width
    /// - [`QarmError::ColumnCountMismatch`] if `names` disagrees with the row width
    /// - [`QarmError::RaggedRow`] if rows have different widths
    /// - [`QarmError::EmptyColumn`] if a column has no finite value
    ///
    /// # Examples
    ///
    /// ```
    /// use u_qarm::data::Dataset;
    ///
    /// let ds = Dataset::new(
    ///     vec!["a".into(), "y".into()],
    ///     vec![vec![1.0, 0.0], vec![2.0, 1.0], vec![f64::NAN, 1.0]],
    /// ).unwrap();
    /// assert_eq!(ds.n_rows(), 3);
    /// assert_eq!(ds.bounds(0).upper, 2.0);
    /// ```
    pub fn new(names: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_rows = rows.len();
        if n_rows == 0 {
            return Err(QarmError::EmptyDataset);
        }
        let n_cols = rows[0].len();
        if n_cols == 0 {
            return Err(QarmError::NoColumns);
        }
        if names.len() != n_cols {
            return Err(QarmError::ColumnCountMismatch {
                names: names.len(),
                columns: n_cols,
            });
        }

        let mut cells = Vec::with_capacity(n_rows * n_cols);
        let mut columns: Vec<Vec<f64>> = vec![Vec::with_capacity(n_rows); n_cols];
        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(QarmError::RaggedRow {
                    row: r,
                    expected: n_cols,
                    found: row.len(),
                });
            }
            for (c, &v) in row.iter().enumerate() {
                columns[c].push(v);
            }
            cells.extend(row);
        }

        let percentiles = PercentileIndex::from_columns(columns);
        let mut bounds = Vec::with_capacity(n_cols);
        for (c, name) in names.iter().enumerate() {
            let col = percentiles.column(c);
            match (col.first(), col.last()) {
                (Some(&min), Some(&max)) => bounds.push(Interval {
                    lower: min,
                    upper: max,
                }),
                _ => {
                    return Err(QarmError::EmptyColumn {
                        column: name.clone(),
                    })
                }
            }
        }

        log::debug!("dataset built: rows={n_rows}, cols={n_cols}");

        Ok(Self {
            names,
            cells,
            n_rows,
            n_cols,
            percentiles,
            bounds,
        })
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Column names in column order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Name of column `index`, or a synthetic `attr#i` label if out of range.
    pub fn name(&self, index: usize) -> String {
        self.names
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("attr#{index}"))
    }

    /// Looks up a column index by name.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| QarmError::AttributeNotFound(name.to_string()))
    }

    /// Checks that `index` names an existing column.
    pub fn check_index(&self, index: usize) -> Result<usize> {
        if index < self.n_cols {
            Ok(index)
        } else {
            Err(QarmError::AttributeOutOfRange {
                index,
                columns: self.n_cols,
            })
        }
    }

    /// Row `r` as a slice.
    #[inline]
    pub fn row(&self, r: usize) -> &[f64] {
        &self.cells[r * self.n_cols..(r + 1) * self.n_cols]
    }

    /// Iterates over all rows.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.cells.chunks_exact(self.n_cols)
    }

    /// Cell at row `r`, column `c`.
    #[inline]
    pub fn value(&self, r: usize, c: usize) -> f64 {
        self.cells[r * self.n_cols + c]
    }

    /// `[min, max]` of the finite values in column `c`.
    pub fn bounds(&self, c: usize) -> Interval {
        self.bounds[c]
    }

    /// Bounds of every column.
    pub fn all_bounds(&self) -> &[Interval] {
        &self.bounds
    }

    /// The per-column percentile index.
    pub fn percentiles(&self) -> &PercentileIndex {
        &self.percentiles
    }

    /// Sorted finite values of column `c`.
    pub fn sorted_column(&self, c: usize) -> &[f64] {
        self.percentiles.column(c)
    }
}
