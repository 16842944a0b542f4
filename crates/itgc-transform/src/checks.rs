//! Change/incident record checks: missing dates and impossible ordering.

use polars::prelude::*;

use crate::error::{Result, TransformError};
use crate::metrics::date_days;

/// Append a boolean column that is true where the named column is null.
pub fn flag_missing(df: &DataFrame, column: &str, name: &str) -> Result<DataFrame> {
    let col = df
        .column(column)
        .map_err(|_| TransformError::ColumnNotFound {
            column: column.to_string(),
        })?;
    let values: Vec<bool> = (0..df.height())
        .map(|idx| matches!(col.get(idx).unwrap_or(AnyValue::Null), AnyValue::Null))
        .collect();
    let mut out = df.clone();
    out.with_column(Series::new(name.into(), values))?;
    Ok(out)
}

/// Append a boolean column that is true where both dates are present
/// and `later` is strictly before `earlier`.
///
/// Rows with a missing date flag false; the missing-date check is a
/// separate finding.
pub fn flag_date_order(df: &DataFrame, earlier: &str, later: &str, name: &str) -> Result<DataFrame> {
    let earlier_days = date_days(df, earlier)?;
    let later_days = date_days(df, later)?;

    let values: Vec<bool> = earlier_days
        .iter()
        .zip(&later_days)
        .map(|(e, l)| matches!((e, l), (Some(e), Some(l)) if l < e))
        .collect();

    let mut out = df.clone();
    out.with_column(Series::new(name.into(), values))?;
    Ok(out)
}

/// Finding counts for a change-management population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckSummary {
    /// Total rows examined.
    pub rows: usize,
    /// Rows with no raised date.
    pub missing_raised: usize,
    /// Rows with no resolved date.
    pub missing_resolved: usize,
    /// Rows resolved before they were raised.
    pub resolved_before_raised: usize,
}

impl CheckSummary {
    /// Count findings over normalized raised/resolved date columns.
    pub fn collect(df: &DataFrame, raised: &str, resolved: &str) -> Result<Self> {
        let raised_days = date_days(df, raised)?;
        let resolved_days = date_days(df, resolved)?;

        let mut summary = Self {
            rows: df.height(),
            missing_raised: 0,
            missing_resolved: 0,
            resolved_before_raised: 0,
        };
        for (r, s) in raised_days.iter().zip(&resolved_days) {
            if r.is_none() {
                summary.missing_raised += 1;
            }
            if s.is_none() {
                summary.missing_resolved += 1;
            }
            if let (Some(r), Some(s)) = (r, s) {
                if s < r {
                    summary.resolved_before_raised += 1;
                }
            }
        }
        Ok(summary)
    }
}
