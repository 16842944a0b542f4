//! Tests for derived date metrics.

use polars::prelude::*;

use itgc_transform::{TransformError, date_delta, gap_from_max, normalize_date_column};

fn change_frame() -> DataFrame {
    let df = df!(
        "request_id" => ["CHG-1", "CHG-2"],
        "raised_date" => ["2024-01-01", ""],
        "resolved_date" => ["2024-01-05", "2024-01-02"],
    )
    .unwrap();
    let df = normalize_date_column(&df, "raised_date").unwrap();
    normalize_date_column(&df, "resolved_date").unwrap()
}

#[test]
fn delta_is_whole_days_with_null_propagation() {
    let out = date_delta(&change_frame(), "raised_date", "resolved_date", "days_to_resolve")
        .unwrap();
    let col = out.column("days_to_resolve").unwrap();

    assert_eq!(col.get(0).unwrap(), AnyValue::Int64(4));
    assert_eq!(col.get(1).unwrap(), AnyValue::Null);
}

#[test]
fn delta_is_antisymmetric() {
    let df = change_frame();
    let forward = date_delta(&df, "raised_date", "resolved_date", "fwd").unwrap();
    let both = date_delta(&forward, "resolved_date", "raised_date", "rev").unwrap();

    for idx in 0..both.height() {
        let fwd = both.column("fwd").unwrap().get(idx).unwrap();
        let rev = both.column("rev").unwrap().get(idx).unwrap();
        match (fwd, rev) {
            (AnyValue::Int64(f), AnyValue::Int64(r)) => assert_eq!(f, -r),
            (AnyValue::Null, AnyValue::Null) => {}
            other => panic!("mismatched delta pair: {other:?}"),
        }
    }
}

#[test]
fn recomputation_overwrites_the_column() {
    let df = change_frame();
    let out = date_delta(&df, "raised_date", "resolved_date", "delta").unwrap();
    let out = date_delta(&out, "resolved_date", "raised_date", "delta").unwrap();

    assert_eq!(out.width(), df.width() + 1);
    assert_eq!(
        out.column("delta").unwrap().get(0).unwrap(),
        AnyValue::Int64(-4)
    );
}

#[test]
fn gap_is_nonnegative_and_zero_at_the_max() {
    let df = df!(
        "user" => ["a", "b", "c", "d"],
        "last_logon" => ["2024-03-01", "2024-01-31", "", "2024-03-01"],
    )
    .unwrap();
    let df = normalize_date_column(&df, "last_logon").unwrap();
    let out = gap_from_max(&df, "last_logon", "GAP").unwrap();
    let col = out.column("GAP").unwrap();

    assert_eq!(col.get(0).unwrap(), AnyValue::Int64(0));
    assert_eq!(col.get(1).unwrap(), AnyValue::Int64(30));
    assert_eq!(col.get(2).unwrap(), AnyValue::Null);
    // Both rows holding the max gap to zero.
    assert_eq!(col.get(3).unwrap(), AnyValue::Int64(0));
}

#[test]
fn gap_over_all_null_dates_is_all_null() {
    let df = df!(
        "user" => ["a", "b"],
        "last_logon" => ["", "not a date"],
    )
    .unwrap();
    let df = normalize_date_column(&df, "last_logon").unwrap();
    let out = gap_from_max(&df, "last_logon", "GAP").unwrap();

    assert_eq!(out.column("GAP").unwrap().null_count(), 2);
}

#[test]
fn unnormalized_column_is_rejected() {
    let df = df!(
        "raised_date" => ["2024-01-01"],
        "resolved_date" => ["2024-01-05"],
    )
    .unwrap();
    assert!(matches!(
        date_delta(&df, "raised_date", "resolved_date", "delta"),
        Err(TransformError::NotADateColumn { .. })
    ));
    assert!(matches!(
        gap_from_max(&df, "raised_date", "GAP"),
        Err(TransformError::NotADateColumn { .. })
    ));
}

#[test]
fn missing_column_is_reported() {
    let df = change_frame();
    assert!(matches!(
        date_delta(&df, "raised_date", "nope", "delta"),
        Err(TransformError::ColumnNotFound { .. })
    ));
}
