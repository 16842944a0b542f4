//! Error types for ITGC data ingestion.

use thiserror::Error;

/// Errors that can occur while turning uploaded bytes into a table.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Every configured text encoding failed to decode the buffer.
    #[error("unreadable file: {reason}")]
    UnreadableFile { reason: String },

    /// Parsed result has zero rows or zero columns.
    #[error("parsed table is empty (no rows or no columns)")]
    EmptyTable,

    /// Failed to parse decoded CSV text.
    #[error("failed to parse CSV: {message}")]
    CsvParse { message: String },

    /// Failed to open or read the workbook container.
    #[error("failed to read workbook: {message}")]
    Workbook { message: String },

    /// Requested worksheet does not exist in the workbook.
    #[error("worksheet not found: {name}")]
    SheetNotFound { name: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
