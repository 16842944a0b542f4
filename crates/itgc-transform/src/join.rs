//! Left outer merge of two tables on text-normalized keys.

use std::collections::HashMap;

use itgc_common::any_to_string_non_empty;
use polars::prelude::*;

use crate::error::{Result, TransformError};

/// One merge request: carry a subset of right-hand columns onto every
/// left row whose key matches.
#[derive(Debug, Clone)]
pub struct JoinSpec<'a> {
    /// Base table; its row set and order define the output.
    pub left: &'a DataFrame,
    /// Lookup table.
    pub right: &'a DataFrame,
    /// Key column in the left table.
    pub left_key: String,
    /// Key column in the right table.
    pub right_key: String,
    /// Right-hand columns to carry into the output.
    pub carry: Vec<String>,
}

/// Left outer merge.
///
/// Keys are compared as trimmed text so a numeric employee id still
/// matches its text twin. Blank and missing keys never match. Every
/// left row appears exactly once: when several right rows share a key,
/// the first occurrence wins. Unmatched rows carry nulls.
///
/// Column collision rules: the right key column itself is never
/// carried: its values are already represented by the left key on
/// matched rows, and when the two keys share a name the left copy is
/// kept. Any other carried column that collides with a left column
/// overrides it in place.
pub fn left_join(spec: &JoinSpec<'_>) -> Result<DataFrame> {
    let left_key_col =
        spec.left
            .column(&spec.left_key)
            .map_err(|_| TransformError::JoinKeyNotFound {
                column: spec.left_key.clone(),
                side: "left",
            })?;
    let right_key_col =
        spec.right
            .column(&spec.right_key)
            .map_err(|_| TransformError::JoinKeyNotFound {
                column: spec.right_key.clone(),
                side: "right",
            })?;
    for name in &spec.carry {
        if spec.right.column(name).is_err() {
            return Err(TransformError::ColumnNotFound {
                column: name.clone(),
            });
        }
    }

    // First occurrence of each right key wins.
    let mut lookup: HashMap<String, IdxSize> = HashMap::with_capacity(spec.right.height());
    for idx in 0..spec.right.height() {
        let value = right_key_col.get(idx).unwrap_or(AnyValue::Null);
        if let Some(key) = any_to_string_non_empty(value) {
            lookup.entry(key).or_insert(idx as IdxSize);
        }
    }

    let indices = (0..spec.left.height()).map(|idx| {
        let value = left_key_col.get(idx).unwrap_or(AnyValue::Null);
        any_to_string_non_empty(value).and_then(|key| lookup.get(&key).copied())
    });
    let gather = IdxCa::from_iter_options("join_idx".into(), indices);

    let mut matched = 0usize;
    let mut out = spec.left.clone();
    for name in &spec.carry {
        if name == &spec.right_key {
            // Redundant with the left key column on matched rows.
            continue;
        }
        let taken = spec
            .right
            .column(name)?
            .as_materialized_series()
            .take(&gather)?;
        matched = taken.len() - taken.null_count();
        out.with_column(taken)?;
    }

    tracing::debug!(
        left_rows = spec.left.height(),
        right_rows = spec.right.height(),
        matched,
        "left join complete"
    );
    debug_assert_eq!(out.height(), spec.left.height());
    Ok(out)
}
