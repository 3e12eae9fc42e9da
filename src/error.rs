//! Error types for dataset setup and search configuration.
//!
//! Only setup can fail. Once a [`SearchSession`](crate::search::SearchSession)
//! is running, "nothing found" outcomes are reported as `Option`/empty
//! results and constraint repair degrades gracefully instead of erroring.

use thiserror::Error;

/// Errors raised while building datasets, targets and configurations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QarmError {
    #[error("dataset has no rows")]
    EmptyDataset,

    #[error("dataset has no columns")]
    NoColumns,

    #[error("column '{column}' has no finite values")]
    EmptyColumn { column: String },

    #[error("row {row} has {found} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{names} column names given for {columns} columns")]
    ColumnCountMismatch { names: usize, columns: usize },

    #[error("attribute '{0}' not found")]
    AttributeNotFound(String),

    #[error("attribute index {index} out of range for {columns} columns")]
    AttributeOutOfRange { index: usize, columns: usize },

    #[error("invalid interval: lower bound {lower} exceeds upper bound {upper}")]
    InvalidInterval { lower: f64, upper: f64 },

    #[error("percentile {0} outside [0, 1]")]
    InvalidPercentile(f64),

    #[error("chromosome would contain no genes: fixed and search attributes are both empty")]
    EmptyChromosome,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QarmError>;
