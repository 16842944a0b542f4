//! Tests for IT vs non-IT role conflict detection.

use polars::prelude::*;

use itgc_transform::role_conflicts;

#[test]
fn disjoint_roles_mean_no_conflicts() {
    let df = df!(
        "department" => ["IT", "Finance", "Information Technology"],
        "role" => ["Admin", "Viewer", "Admin"],
    )
    .unwrap();
    let result = role_conflicts(&df, "department", "role").unwrap();

    assert_eq!(
        result.it_roles.iter().collect::<Vec<_>>(),
        vec!["Admin"]
    );
    assert_eq!(
        result.non_it_roles.iter().collect::<Vec<_>>(),
        vec!["Viewer"]
    );
    assert!(result.is_clean());
    assert_eq!(result.flagged.height(), 0);
    // The empty flagged table keeps the population's columns.
    assert_eq!(result.flagged.width(), df.width());
}

#[test]
fn shared_roles_flag_every_holder() {
    let df = df!(
        "user" => ["a", "b", "c", "d"],
        "department" => ["IT", "Finance", "I.T. Operations", "Payroll"],
        "role" => ["Admin", "Admin", "Operator", "Viewer"],
    )
    .unwrap();
    let result = role_conflicts(&df, "department", "role").unwrap();

    assert_eq!(
        result.conflicting_roles.iter().collect::<Vec<_>>(),
        vec!["Admin"]
    );
    // Both the IT admin and the Finance admin are flagged.
    assert_eq!(result.flagged.height(), 2);
    assert_eq!(itgc_common::cell_string(&result.flagged, "user", 0), "a");
    assert_eq!(itgc_common::cell_string(&result.flagged, "user", 1), "b");
}

#[test]
fn intersection_is_symmetric() {
    let df = df!(
        "department" => ["IT", "Sales", "IT", "Sales"],
        "role" => ["Admin", "Admin", "Viewer", "Viewer"],
    )
    .unwrap();
    let result = role_conflicts(&df, "department", "role").unwrap();

    let forward: Vec<_> = result
        .it_roles
        .intersection(&result.non_it_roles)
        .collect();
    let backward: Vec<_> = result
        .non_it_roles
        .intersection(&result.it_roles)
        .collect();
    assert_eq!(forward, backward);
    assert_eq!(result.conflicting_roles.len(), 2);
}

#[test]
fn missing_departments_are_never_it() {
    let df = df!(
        "department" => [Some("IT"), None, Some("")],
        "role" => [Some("Admin"), Some("Admin"), Some("Admin")],
    )
    .unwrap();
    let result = role_conflicts(&df, "department", "role").unwrap();

    // Rows without a department land in the non-IT partition, so the
    // shared "Admin" role is a conflict.
    assert!(result.non_it_roles.contains("Admin"));
    assert_eq!(result.flagged.height(), 3);
}

#[test]
fn missing_roles_are_dropped() {
    let df = df!(
        "department" => ["IT", "Finance"],
        "role" => [None::<&str>, None],
    )
    .unwrap();
    let result = role_conflicts(&df, "department", "role").unwrap();

    assert!(result.it_roles.is_empty());
    assert!(result.non_it_roles.is_empty());
    assert!(result.is_clean());
}

#[test]
fn substring_departments_stay_non_it() {
    let df = df!(
        "department" => ["Digital", "IT"],
        "role" => ["Admin", "Admin"],
    )
    .unwrap();
    let result = role_conflicts(&df, "department", "role").unwrap();

    // "Digital" is not IT, so Admin spans both partitions.
    assert_eq!(result.conflicting_roles.len(), 1);
}
