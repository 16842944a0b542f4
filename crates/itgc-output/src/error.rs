//! Error types for evidence export.

use thiserror::Error;

/// Errors from serializing a table to an export buffer.
#[derive(Debug, Error)]
pub enum OutputError {
    /// CSV serialization failed.
    #[error("failed to write CSV: {message}")]
    Csv { message: String },

    /// Workbook assembly failed.
    #[error("failed to write workbook: {message}")]
    Workbook { message: String },
}

impl From<zip::result::ZipError> for OutputError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Workbook {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for OutputError {
    fn from(err: std::io::Error) -> Self {
        Self::Workbook {
            message: err.to_string(),
        }
    }
}

impl From<quick_xml::Error> for OutputError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Workbook {
            message: err.to_string(),
        }
    }
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, OutputError>;
