//! Column mapping types for source-to-role binding.
//!
//! An auditor declares which source column plays which semantic role
//! ("this column is the raised date"); the mapping is created per upload,
//! consumed immediately, and never persisted. Mappings serialize to JSON
//! so an external caller can hand one over as a file.

use serde::{Deserialize, Serialize};

/// Semantic roles a source column can be bound to, across the three
/// review flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    // Change Management
    RequestId,
    RaisedDate,
    ResolvedDate,
    // Incident Management
    StartDate,
    CloseDate,
    // User Access Management
    HrKey,
    AccessHrKey,
    AdKey,
    AccessAdKey,
    HrJoiningDate,
    AdJoiningDate,
    GapDate,
    Department,
    Role,
}

impl ColumnRole {
    /// Canonical column name the bound source column is renamed to.
    pub fn canonical_name(self) -> &'static str {
        match self {
            Self::RequestId => "request_id",
            Self::RaisedDate => "raised_date",
            Self::ResolvedDate => "resolved_date",
            Self::StartDate => "start_date",
            Self::CloseDate => "close_date",
            Self::HrKey => "hr_key",
            Self::AccessHrKey => "access_hr_key",
            Self::AdKey => "ad_key",
            Self::AccessAdKey => "access_ad_key",
            Self::HrJoiningDate => "hr_joining_date",
            Self::AdJoiningDate => "ad_joining_date",
            Self::GapDate => "gap_date",
            Self::Department => "department",
            Self::Role => "role",
        }
    }
}

/// One role → source column binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    /// Semantic role the column plays.
    pub role: ColumnRole,
    /// Column name in the source table.
    pub column: String,
}

/// An ordered set of role → column bindings for one source table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// Bindings in declaration order.
    pub bindings: Vec<Binding>,
}
