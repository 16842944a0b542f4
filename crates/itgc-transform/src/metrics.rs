//! Derived audit metrics over date columns.

use polars::prelude::*;

use crate::error::{Result, TransformError};

/// Read a `Date` column as day counts since the epoch.
///
/// Errors when the column is absent or not date-typed; callers are
/// expected to run date normalization first.
pub(crate) fn date_days(df: &DataFrame, column: &str) -> Result<Vec<Option<i32>>> {
    let col = df
        .column(column)
        .map_err(|_| TransformError::ColumnNotFound {
            column: column.to_string(),
        })?;
    if col.dtype() != &DataType::Date {
        return Err(TransformError::NotADateColumn {
            column: column.to_string(),
        });
    }
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(match col.get(idx).unwrap_or(AnyValue::Null) {
            AnyValue::Date(days) => Some(days),
            _ => None,
        });
    }
    Ok(values)
}

/// Append `to - from` in whole days as a nullable integer column.
///
/// A null on either side yields null, not zero. Recomputing under an
/// existing name overwrites that column.
pub fn date_delta(df: &DataFrame, from: &str, to: &str, name: &str) -> Result<DataFrame> {
    let from_days = date_days(df, from)?;
    let to_days = date_days(df, to)?;

    let values: Vec<Option<i64>> = from_days
        .iter()
        .zip(&to_days)
        .map(|(f, t)| match (f, t) {
            (Some(f), Some(t)) => Some(i64::from(*t) - i64::from(*f)),
            _ => None,
        })
        .collect();

    let mut out = df.clone();
    out.with_column(Series::new(name.into(), values))?;
    Ok(out)
}

/// Append `max(D) - D[i]` in days: how far each row's date lags the
/// most recent one in the column. Used as the dormancy measure for
/// access reviews: large gaps flag stale accounts.
///
/// Null dates stay null; a column with no dates at all yields an
/// all-null gap column rather than an error.
pub fn gap_from_max(df: &DataFrame, column: &str, name: &str) -> Result<DataFrame> {
    let days = date_days(df, column)?;
    let max = days.iter().flatten().copied().max();

    let values: Vec<Option<i64>> = days
        .iter()
        .map(|d| match (max, d) {
            (Some(max), Some(d)) => Some(i64::from(max) - i64::from(*d)),
            _ => None,
        })
        .collect();

    let mut out = df.clone();
    out.with_column(Series::new(name.into(), values))?;
    Ok(out)
}
