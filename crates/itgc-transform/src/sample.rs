//! Row sampling for manual testing.

use std::cmp::Ordering;

use itgc_common::{any_to_f64, any_to_string_non_empty};
use polars::prelude::*;

use crate::error::{Result, TransformError};

/// How to pick rows for the manual-test sample.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleSpec {
    /// The `n` largest values of a sort column (e.g. longest-running
    /// changes).
    Top { column: String, n: usize },
    /// The `n` smallest values (e.g. quickest resolutions).
    Bottom { column: String, n: usize },
    /// Uniform draw without replacement; a fixed seed makes the sample
    /// reproducible across reruns of the same population.
    Random { n: usize, seed: u64 },
}

impl SampleSpec {
    fn requested(&self) -> usize {
        match self {
            Self::Top { n, .. } | Self::Bottom { n, .. } | Self::Random { n, .. } => *n,
        }
    }
}

/// Sort key for ordered sampling: numbers, dates, and booleans compare
/// numerically, everything else as text.
enum SortKey {
    Num(f64),
    Text(String),
}

impl SortKey {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Num(a), Self::Num(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            // Mixed keys cannot occur: the key kind is fixed per column dtype.
            (Self::Num(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Num(_)) => Ordering::Greater,
        }
    }
}

/// Extract a sample of `min(n, rows)` rows.
///
/// Top/Bottom sort by the named column with nulls always last, ties in
/// input order. Random sampling is seeded and deterministic for a given
/// input frame.
pub fn sample(df: &DataFrame, spec: &SampleSpec) -> Result<DataFrame> {
    let requested = spec.requested();
    if requested == 0 || df.height() == 0 {
        return Err(TransformError::InvalidSampleSize { requested });
    }
    let n = requested.min(df.height());

    match spec {
        SampleSpec::Top { column, .. } => ordered_sample(df, column, n, true),
        SampleSpec::Bottom { column, .. } => ordered_sample(df, column, n, false),
        SampleSpec::Random { seed, .. } => {
            let out = df.sample_n_literal(n, false, false, Some(*seed))?;
            Ok(out)
        }
    }
}

fn ordered_sample(df: &DataFrame, column: &str, n: usize, descending: bool) -> Result<DataFrame> {
    let col = df
        .column(column)
        .map_err(|_| TransformError::ColumnNotFound {
            column: column.to_string(),
        })?;
    let numeric = is_numeric_like(col.dtype());

    let mut present: Vec<(usize, SortKey)> = Vec::with_capacity(df.height());
    let mut missing: Vec<usize> = Vec::new();
    for idx in 0..df.height() {
        let value = col.get(idx).unwrap_or(AnyValue::Null);
        let key = if numeric {
            any_to_f64(value).map(SortKey::Num)
        } else {
            any_to_string_non_empty(value).map(SortKey::Text)
        };
        match key {
            Some(key) => present.push((idx, key)),
            None => missing.push(idx),
        }
    }

    // Stable sort keeps ties in input order.
    present.sort_by(|(_, a), (_, b)| {
        if descending {
            b.compare(a)
        } else {
            a.compare(b)
        }
    });

    // Nulls sort last regardless of direction, so a short sample is
    // never padded with undefined-order rows while defined ones remain.
    let indices: Vec<IdxSize> = present
        .iter()
        .map(|(idx, _)| *idx)
        .chain(missing)
        .take(n)
        .map(|idx| idx as IdxSize)
        .collect();

    Ok(df.take(&IdxCa::from_vec("sample_idx".into(), indices))?)
}

fn is_numeric_like(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
            | DataType::Boolean
            | DataType::Date
    )
}
