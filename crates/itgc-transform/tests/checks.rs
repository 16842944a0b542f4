//! Tests for change/incident record checks.

use polars::prelude::*;

use itgc_transform::{CheckSummary, flag_date_order, flag_missing, normalize_date_column};

fn change_frame() -> DataFrame {
    let df = df!(
        "request_id" => ["CHG-1", "CHG-2", "CHG-3"],
        "raised_date" => ["2024-01-10", "", "2024-02-01"],
        "resolved_date" => ["2024-01-05", "2024-01-02", ""],
    )
    .unwrap();
    let df = normalize_date_column(&df, "raised_date").unwrap();
    normalize_date_column(&df, "resolved_date").unwrap()
}

#[test]
fn missing_flags_follow_nulls() {
    let out = flag_missing(&change_frame(), "raised_date", "missing_raised").unwrap();
    let col = out.column("missing_raised").unwrap();

    assert_eq!(col.get(0).unwrap(), AnyValue::Boolean(false));
    assert_eq!(col.get(1).unwrap(), AnyValue::Boolean(true));
    assert_eq!(col.get(2).unwrap(), AnyValue::Boolean(false));
}

#[test]
fn order_flag_requires_both_dates() {
    let out = flag_date_order(
        &change_frame(),
        "raised_date",
        "resolved_date",
        "resolved_before_raised",
    )
    .unwrap();
    let col = out.column("resolved_before_raised").unwrap();

    // Resolved five days before raised.
    assert_eq!(col.get(0).unwrap(), AnyValue::Boolean(true));
    // A missing side is a missing-date finding, not an ordering one.
    assert_eq!(col.get(1).unwrap(), AnyValue::Boolean(false));
    assert_eq!(col.get(2).unwrap(), AnyValue::Boolean(false));
}

#[test]
fn equal_dates_are_in_order() {
    let df = df!(
        "raised_date" => ["2024-01-10"],
        "resolved_date" => ["2024-01-10"],
    )
    .unwrap();
    let df = normalize_date_column(&df, "raised_date").unwrap();
    let df = normalize_date_column(&df, "resolved_date").unwrap();

    let out = flag_date_order(&df, "raised_date", "resolved_date", "flag").unwrap();
    assert_eq!(
        out.column("flag").unwrap().get(0).unwrap(),
        AnyValue::Boolean(false)
    );
}

#[test]
fn summary_counts_findings() {
    let summary = CheckSummary::collect(&change_frame(), "raised_date", "resolved_date").unwrap();

    assert_eq!(
        summary,
        CheckSummary {
            rows: 3,
            missing_raised: 1,
            missing_resolved: 1,
            resolved_before_raised: 1,
        }
    );
}
