//! End-to-end test of the change-management review command.

use itgc_cli::cli::{ChangeArgs, ExportFormatArg, SampleMethodArg};
use itgc_cli::commands::run_change;

fn change_args(input: std::path::PathBuf, output_dir: std::path::PathBuf) -> ChangeArgs {
    ChangeArgs {
        file: input,
        sheet: None,
        mapping: None,
        request_id: Some("Ticket".to_string()),
        raised: Some("Opened".to_string()),
        resolved: Some("Closed".to_string()),
        sample: Some(2),
        method: SampleMethodArg::Top,
        sample_by: None,
        output_dir: Some(output_dir),
        format: ExportFormatArg::Csv,
    }
}

#[test]
fn change_flow_checks_and_samples() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("changes.csv");
    std::fs::write(
        &input,
        "Ticket,Opened,Closed\n\
         CHG-1,2024-01-01,2024-01-05\n\
         CHG-2,,2024-01-02\n\
         CHG-3,2024-02-10,2024-02-01\n",
    )
    .unwrap();

    let outcome = run_change(&change_args(input, dir.path().to_path_buf())).unwrap();

    assert_eq!(outcome.rows, 3);
    assert_eq!(outcome.summary.missing_raised, 1);
    assert_eq!(outcome.summary.missing_resolved, 0);
    assert_eq!(outcome.summary.resolved_before_raised, 1);

    // The checked file reloads with the derived columns in place.
    let checked =
        itgc_ingest::load_csv(&std::fs::read(&outcome.checked_file).unwrap()).unwrap();
    assert_eq!(checked.height(), 3);
    for column in [
        "request_id",
        "raised_date",
        "resolved_date",
        "missing_raised",
        "missing_resolved",
        "resolved_before_raised",
        "days_to_resolve",
    ] {
        assert!(checked.column(column).is_ok(), "missing column {column}");
    }
    assert_eq!(itgc_common::cell_string(&checked, "days_to_resolve", 0), "4");

    // Top-2 sample by resolution time.
    let sample_file = outcome.sample_file.expect("sample requested");
    let sampled = itgc_ingest::load_csv(&std::fs::read(&sample_file).unwrap()).unwrap();
    assert_eq!(sampled.height(), 2);
    assert_eq!(itgc_common::cell_string(&sampled, "request_id", 0), "CHG-1");
}

#[test]
fn change_flow_requires_a_mapping() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("changes.csv");
    std::fs::write(&input, "Ticket,Opened,Closed\nCHG-1,2024-01-01,2024-01-05\n").unwrap();

    let mut args = change_args(input, dir.path().to_path_buf());
    args.raised = None;
    assert!(run_change(&args).is_err());
}

#[test]
fn change_flow_accepts_a_mapping_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("changes.csv");
    std::fs::write(&input, "Ticket,Opened,Closed\nCHG-1,2024-01-01,2024-01-05\n").unwrap();
    let mapping_path = dir.path().join("mapping.json");
    std::fs::write(
        &mapping_path,
        r#"{"bindings":[
            {"role":"request_id","column":"Ticket"},
            {"role":"raised_date","column":"Opened"},
            {"role":"resolved_date","column":"Closed"}
        ]}"#,
    )
    .unwrap();

    let mut args = change_args(input, dir.path().to_path_buf());
    args.mapping = Some(mapping_path);
    args.request_id = None;
    args.raised = None;
    args.resolved = None;
    args.sample = None;

    let outcome = run_change(&args).unwrap();
    assert_eq!(outcome.rows, 1);
    assert!(outcome.sample_file.is_none());
}
