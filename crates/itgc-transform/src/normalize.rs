//! Date column normalization.

use itgc_common::any_to_string;
use polars::prelude::*;

use crate::datetime::{date_to_days, parse_date};
use crate::error::{Result, TransformError};

/// Coerce the named column to the `Date` dtype.
///
/// Cells that are already dates pass through; text cells are parsed with
/// the permissive format list; everything unparsable becomes null. One
/// bad row never blocks the import; the only error here is a missing
/// column. All other columns are untouched.
pub fn normalize_date_column(df: &DataFrame, column: &str) -> Result<DataFrame> {
    let col = df
        .column(column)
        .map_err(|_| TransformError::ColumnNotFound {
            column: column.to_string(),
        })?;

    if col.dtype() == &DataType::Date {
        return Ok(df.clone());
    }

    let mut values: Vec<Option<i32>> = Vec::with_capacity(df.height());
    let mut unparsed = 0usize;
    for idx in 0..df.height() {
        let value = col.get(idx).unwrap_or(AnyValue::Null);
        let days = match value {
            AnyValue::Null => None,
            AnyValue::Date(days) => Some(days),
            other => {
                let text = any_to_string(other);
                let parsed = parse_date(&text).map(date_to_days);
                if parsed.is_none() && !text.trim().is_empty() {
                    unparsed += 1;
                }
                parsed
            }
        };
        values.push(days);
    }

    if unparsed > 0 {
        tracing::debug!(column, unparsed, "unparsable date values coerced to null");
    }

    let series = Series::new(column.into(), values).cast(&DataType::Date)?;
    let mut out = df.clone();
    out.with_column(series)?;
    Ok(out)
}
