//! ITGC review pipeline stages.
//!
//! Each stage is a stateless function from a `DataFrame` (plus
//! parameters) to a new `DataFrame` or report value; nothing mutates
//! shared state, so stages are idempotent and freely re-runnable as the
//! auditor refines column choices:
//!
//! - [`normalize_date_column`]: permissive date coercion, nulls for
//!   unparsable values;
//! - [`left_join`]: merge HR/AD attributes onto an access listing;
//! - [`date_delta`] / [`gap_from_max`]: resolution-time and dormancy
//!   metrics;
//! - [`flag_missing`] / [`flag_date_order`] / [`CheckSummary`]:
//!   change/incident record checks;
//! - [`role_conflicts`]: roles shared between IT and non-IT users;
//! - [`sample`]: top/bottom/seeded-random row extraction.

mod checks;
mod datetime;
mod error;
mod join;
mod metrics;
mod normalize;
mod roles;
mod sample;

pub use checks::{CheckSummary, flag_date_order, flag_missing};
pub use datetime::parse_date;
pub use error::{Result, TransformError};
pub use join::{JoinSpec, left_join};
pub use metrics::{date_delta, gap_from_max};
pub use normalize::normalize_date_column;
pub use roles::{RoleConflicts, is_it_department, role_conflicts};
pub use sample::{SampleSpec, sample};
