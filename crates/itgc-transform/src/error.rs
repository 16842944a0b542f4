//! Error types for the transform stages.

use thiserror::Error;

/// Errors from pipeline transform operations.
///
/// Every variant is recoverable at the caller boundary: a failing stage
/// returns before touching its input frame.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Referenced column is absent from the table.
    #[error("column '{column}' not found")]
    ColumnNotFound { column: String },

    /// Join key column is absent from one side of a merge.
    #[error("join key column '{column}' not found in {side} table")]
    JoinKeyNotFound { column: String, side: &'static str },

    /// Sample request was smaller than one row, or the table is empty.
    #[error("invalid sample size: {requested} (need at least 1 row to sample)")]
    InvalidSampleSize { requested: usize },

    /// Operation needs a date-typed column; run date normalization first.
    #[error("column '{column}' is not a date column")]
    NotADateColumn { column: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;
