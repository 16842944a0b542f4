//! Error types for mapping operations.

use std::fmt;

/// Errors from mapping operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// Referenced column not found in the source table.
    ColumnNotFound(String),
    /// Column already bound to another role.
    ColumnAlreadyBound { column: String, role: String },
    /// Mapping has no bindings to apply.
    EmptyMapping,
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ColumnNotFound(c) => write!(f, "Column not found: {c}"),
            Self::ColumnAlreadyBound { column, role } => {
                write!(f, "Column '{column}' already bound to role '{role}'")
            }
            Self::EmptyMapping => write!(f, "Mapping has no bindings"),
        }
    }
}

impl std::error::Error for MappingError {}
