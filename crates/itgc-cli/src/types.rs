//! Result types returned by the review commands.

use std::path::PathBuf;

use itgc_transform::CheckSummary;

/// Outcome of a change-management review run.
#[derive(Debug)]
pub struct ChangeOutcome {
    /// Rows in the checked population.
    pub rows: usize,
    /// Finding counts.
    pub summary: CheckSummary,
    /// Exported population with check columns.
    pub checked_file: PathBuf,
    /// Exported manual-test sample, when requested.
    pub sample_file: Option<PathBuf>,
}

/// Outcome of an incident-management review run.
#[derive(Debug)]
pub struct IncidentOutcome {
    /// Rows in the population.
    pub rows: usize,
    /// Exported population with duration columns.
    pub output_file: PathBuf,
}

/// Role-conflict findings from an access review.
#[derive(Debug)]
pub struct ConflictOutcome {
    /// Distinct roles held in IT departments.
    pub it_roles: usize,
    /// Distinct roles held outside IT.
    pub non_it_roles: usize,
    /// Roles held on both sides.
    pub conflicting_roles: Vec<String>,
    /// Rows holding a conflicting role.
    pub flagged_rows: usize,
    /// Exported flagged rows, when any exist.
    pub flagged_file: Option<PathBuf>,
}

/// Outcome of a user-access review run.
#[derive(Debug)]
pub struct AccessOutcome {
    /// Rows in the merged population (always the access listing's count).
    pub rows: usize,
    /// Exported merged dataset.
    pub mapped_file: PathBuf,
    /// Exported dataset with GAP / AD-HR columns, when derived.
    pub reviewed_file: Option<PathBuf>,
    /// Exported random sample, when requested.
    pub sample_file: Option<PathBuf>,
    /// Role-conflict findings, when the check ran.
    pub conflicts: Option<ConflictOutcome>,
}
