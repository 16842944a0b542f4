//! IT vs non-IT role conflict detection.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use itgc_common::any_to_string_non_empty;
use polars::prelude::*;
use regex::Regex;

use crate::error::{Result, TransformError};

/// Departments counted as IT: a standalone word "it", or the spelled-out
/// and punctuated forms. Word boundaries keep "Digital" and "Quality"
/// out of the IT partition.
static IT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bit\b|information technology|i\.t\.").expect("valid IT pattern")
});

/// True when a department label belongs to the IT partition.
pub fn is_it_department(department: &str) -> bool {
    IT_PATTERN.is_match(department)
}

/// Outcome of a role-conflict scan.
#[derive(Debug, Clone)]
pub struct RoleConflicts {
    /// Distinct roles held in IT departments.
    pub it_roles: BTreeSet<String>,
    /// Distinct roles held outside IT.
    pub non_it_roles: BTreeSet<String>,
    /// Roles appearing on both sides; empty means no conflicts.
    pub conflicting_roles: BTreeSet<String>,
    /// Every row whose role value is in the conflict set.
    pub flagged: DataFrame,
}

impl RoleConflicts {
    /// True when no role spans both partitions.
    pub fn is_clean(&self) -> bool {
        self.conflicting_roles.is_empty()
    }
}

/// Partition rows into IT / non-IT by the department column, collect the
/// distinct role values on each side, and flag every row whose role
/// appears in both partitions.
///
/// Missing or blank departments are never IT; missing roles are skipped.
/// An empty intersection is a valid outcome, not an error.
pub fn role_conflicts(
    df: &DataFrame,
    dept_column: &str,
    role_column: &str,
) -> Result<RoleConflicts> {
    let dept = df
        .column(dept_column)
        .map_err(|_| TransformError::ColumnNotFound {
            column: dept_column.to_string(),
        })?;
    let role = df
        .column(role_column)
        .map_err(|_| TransformError::ColumnNotFound {
            column: role_column.to_string(),
        })?;

    let mut it_roles = BTreeSet::new();
    let mut non_it_roles = BTreeSet::new();
    let mut row_roles: Vec<Option<String>> = Vec::with_capacity(df.height());

    for idx in 0..df.height() {
        let is_it = any_to_string_non_empty(dept.get(idx).unwrap_or(AnyValue::Null))
            .is_some_and(|d| is_it_department(&d));
        let role_value = any_to_string_non_empty(role.get(idx).unwrap_or(AnyValue::Null));
        if let Some(value) = &role_value {
            if is_it {
                it_roles.insert(value.clone());
            } else {
                non_it_roles.insert(value.clone());
            }
        }
        row_roles.push(role_value);
    }

    let conflicting_roles: BTreeSet<String> =
        it_roles.intersection(&non_it_roles).cloned().collect();

    let flagged_indices: Vec<IdxSize> = row_roles
        .iter()
        .enumerate()
        .filter(|(_, role)| {
            role.as_ref()
                .is_some_and(|r| conflicting_roles.contains(r))
        })
        .map(|(idx, _)| idx as IdxSize)
        .collect();
    let flagged = df.take(&IdxCa::from_vec("flagged_idx".into(), flagged_indices))?;

    tracing::debug!(
        it_roles = it_roles.len(),
        non_it_roles = non_it_roles.len(),
        conflicts = conflicting_roles.len(),
        flagged_rows = flagged.height(),
        "role conflict scan complete"
    );

    Ok(RoleConflicts {
        it_roles,
        non_it_roles,
        conflicting_roles,
        flagged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_boundary_keeps_non_it_departments_out() {
        assert!(is_it_department("IT"));
        assert!(is_it_department("it support"));
        assert!(is_it_department("Group IT"));
        assert!(is_it_department("Information Technology"));
        assert!(is_it_department("I.T. Operations"));

        assert!(!is_it_department("Digital"));
        assert!(!is_it_department("Quality"));
        assert!(!is_it_department("Audit"));
        assert!(!is_it_department("Finance"));
    }
}
