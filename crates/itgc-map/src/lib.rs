//! Column-role mapping for ITGC source tables.
//!
//! The external caller (UI or CLI) owns column selection; this crate
//! owns validation and the rename to canonical role names, so the
//! transform stages downstream can address columns by role rather than
//! by whatever header a ticketing export happened to use.

mod error;
mod types;

use polars::prelude::DataFrame;

pub use error::MappingError;
pub use types::{Binding, ColumnMapping, ColumnRole};

impl ColumnMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a role to a source column. Re-binding a role replaces the
    /// earlier binding.
    pub fn bind(&mut self, role: ColumnRole, column: impl Into<String>) -> &mut Self {
        let column = column.into();
        if let Some(existing) = self.bindings.iter_mut().find(|b| b.role == role) {
            existing.column = column;
        } else {
            self.bindings.push(Binding { role, column });
        }
        self
    }

    /// Source column bound to a role, if any.
    pub fn column_for(&self, role: ColumnRole) -> Option<&str> {
        self.bindings
            .iter()
            .find(|b| b.role == role)
            .map(|b| b.column.as_str())
    }

    /// True when no roles are bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Check every binding against the table: each referenced column
    /// must exist, and no column may serve two roles.
    pub fn validate(&self, df: &DataFrame) -> Result<(), MappingError> {
        if self.bindings.is_empty() {
            return Err(MappingError::EmptyMapping);
        }
        for (idx, binding) in self.bindings.iter().enumerate() {
            if df.column(&binding.column).is_err() {
                return Err(MappingError::ColumnNotFound(binding.column.clone()));
            }
            if let Some(earlier) = self.bindings[..idx]
                .iter()
                .find(|b| b.column == binding.column)
            {
                return Err(MappingError::ColumnAlreadyBound {
                    column: binding.column.clone(),
                    role: earlier.role.canonical_name().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Validate, then return a new frame with every bound column renamed
    /// to its canonical role name. Unbound columns pass through.
    pub fn apply(&self, df: &DataFrame) -> Result<DataFrame, MappingError> {
        self.validate(df)?;
        let mut renamed = df.clone();
        for binding in &self.bindings {
            renamed
                .rename(&binding.column, binding.role.canonical_name().into())
                .map_err(|_| MappingError::ColumnNotFound(binding.column.clone()))?;
        }
        Ok(renamed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    // Disambiguate from `polars::prelude::ColumnMapping` pulled in by the
    // glob above; explicit named imports take precedence over globs.
    use super::ColumnMapping;

    fn source_frame() -> DataFrame {
        df!(
            "Ticket #" => ["CHG-1", "CHG-2"],
            "Opened" => ["2024-01-01", "2024-01-02"],
            "Closed" => ["2024-01-05", ""],
        )
        .unwrap()
    }

    #[test]
    fn apply_renames_bound_columns_only() {
        let mut mapping = ColumnMapping::new();
        mapping
            .bind(ColumnRole::RequestId, "Ticket #")
            .bind(ColumnRole::RaisedDate, "Opened");
        let out = mapping.apply(&source_frame()).unwrap();

        assert!(out.column("request_id").is_ok());
        assert!(out.column("raised_date").is_ok());
        assert!(out.column("Closed").is_ok());
        assert!(out.column("Ticket #").is_err());
    }

    #[test]
    fn rebinding_a_role_keeps_the_later_column() {
        let mut mapping = ColumnMapping::new();
        mapping.bind(ColumnRole::RaisedDate, "Opened");
        mapping.bind(ColumnRole::RaisedDate, "Closed");

        assert_eq!(mapping.column_for(ColumnRole::RaisedDate), Some("Closed"));
        assert_eq!(mapping.bindings.len(), 1);
    }

    #[test]
    fn unknown_column_is_rejected() {
        let mut mapping = ColumnMapping::new();
        mapping.bind(ColumnRole::RequestId, "No Such Column");
        assert_eq!(
            mapping.validate(&source_frame()),
            Err(MappingError::ColumnNotFound("No Such Column".to_string()))
        );
    }

    #[test]
    fn one_column_cannot_serve_two_roles() {
        let mut mapping = ColumnMapping::new();
        mapping
            .bind(ColumnRole::RaisedDate, "Opened")
            .bind(ColumnRole::ResolvedDate, "Opened");
        assert!(matches!(
            mapping.validate(&source_frame()),
            Err(MappingError::ColumnAlreadyBound { .. })
        ));
    }

    #[test]
    fn empty_mapping_is_rejected() {
        let mapping = ColumnMapping::new();
        assert_eq!(
            mapping.validate(&source_frame()),
            Err(MappingError::EmptyMapping)
        );
    }

    #[test]
    fn mapping_round_trips_through_json() {
        let mut mapping = ColumnMapping::new();
        mapping
            .bind(ColumnRole::Department, "Dept")
            .bind(ColumnRole::Role, "Access Level");
        let json = serde_json::to_string(&mapping).unwrap();
        let back: ColumnMapping = serde_json::from_str(&json).unwrap();
        assert_eq!(mapping, back);
    }
}
