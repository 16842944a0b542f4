//! Review command implementations.
//!
//! Each command runs the same pipeline shape: load → map → normalize →
//! derive → screen → sample → export, with every stage delegated to the
//! library crates. Commands return outcome structs; printing is the
//! summary module's job.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::DataFrame;

use itgc_map::{ColumnMapping, ColumnRole};
use itgc_output::{write_csv, write_xlsx};
use itgc_transform::{
    CheckSummary, JoinSpec, SampleSpec, date_delta, flag_date_order, flag_missing, gap_from_max,
    left_join, normalize_date_column, role_conflicts, sample,
};

use crate::cli::{AccessArgs, ChangeArgs, ExportFormatArg, IncidentArgs, SampleMethodArg, SheetsArgs};
use crate::types::{AccessOutcome, ChangeOutcome, ConflictOutcome, IncidentOutcome};

/// Seed for change-management random samples.
const CHANGE_SAMPLE_SEED: u64 = 1;

/// Seed for user-access random samples.
const ACCESS_SAMPLE_SEED: u64 = 42;

/// Load a population from disk: workbooks go through sheet selection,
/// everything else is treated as CSV.
fn load_table(path: &Path, sheet: Option<&str>) -> Result<DataFrame> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    if extension.eq_ignore_ascii_case("xlsx") || extension.eq_ignore_ascii_case("xlsm") {
        let sheet = match sheet {
            Some(name) => name.to_string(),
            None => itgc_ingest::sheet_names(&bytes)?
                .into_iter()
                .next()
                .with_context(|| format!("{} has no worksheets", path.display()))?,
        };
        tracing::info!(file = %path.display(), sheet = %sheet, "loading worksheet");
        Ok(itgc_ingest::load_sheet(&bytes, &sheet)?)
    } else {
        tracing::info!(file = %path.display(), "loading CSV");
        Ok(itgc_ingest::load_csv(&bytes)?)
    }
}

fn ensure_output_dir(dir: Option<&Path>) -> Result<PathBuf> {
    let dir = dir.map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Write an evidence file named `<stem>_<YYYYMMDD>.<ext>` and return its path.
fn export(
    df: &DataFrame,
    dir: &Path,
    stem: &str,
    format: ExportFormatArg,
    sheet: &str,
) -> Result<PathBuf> {
    let stamp = chrono::Local::now().format("%Y%m%d");
    let (bytes, extension) = match format {
        ExportFormatArg::Csv => (write_csv(df)?, "csv"),
        ExportFormatArg::Xlsx => (write_xlsx(df, sheet)?, "xlsx"),
    };
    let path = dir.join(format!("{stem}_{stamp}.{extension}"));
    fs::write(&path, bytes).with_context(|| format!("write {}", path.display()))?;
    tracing::info!(file = %path.display(), rows = df.height(), "wrote evidence file");
    Ok(path)
}

fn change_mapping(args: &ChangeArgs) -> Result<ColumnMapping> {
    if let Some(path) = &args.mapping {
        let text =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        return serde_json::from_str(&text)
            .with_context(|| format!("parse mapping {}", path.display()));
    }
    let request_id = args
        .request_id
        .as_ref()
        .context("--request-id is required without --mapping")?;
    let raised = args
        .raised
        .as_ref()
        .context("--raised is required without --mapping")?;
    let resolved = args
        .resolved
        .as_ref()
        .context("--resolved is required without --mapping")?;

    let mut mapping = ColumnMapping::new();
    mapping
        .bind(ColumnRole::RequestId, request_id)
        .bind(ColumnRole::RaisedDate, raised)
        .bind(ColumnRole::ResolvedDate, resolved);
    Ok(mapping)
}

/// Change-management review: completeness and ordering checks plus the
/// resolution-time metric, with optional sampling.
pub fn run_change(args: &ChangeArgs) -> Result<ChangeOutcome> {
    let df = load_table(&args.file, args.sheet.as_deref())?;
    let mapping = change_mapping(args)?;
    let df = mapping.apply(&df)?;

    let df = normalize_date_column(&df, "raised_date")?;
    let df = normalize_date_column(&df, "resolved_date")?;
    let df = flag_missing(&df, "raised_date", "missing_raised")?;
    let df = flag_missing(&df, "resolved_date", "missing_resolved")?;
    let df = flag_date_order(&df, "raised_date", "resolved_date", "resolved_before_raised")?;
    let df = date_delta(&df, "raised_date", "resolved_date", "days_to_resolve")?;
    let summary = CheckSummary::collect(&df, "raised_date", "resolved_date")?;

    let output_dir = ensure_output_dir(args.output_dir.as_deref())?;
    let checked_file = export(
        &df,
        &output_dir,
        "checked_change_management",
        args.format,
        "Checked Changes",
    )?;

    let sample_file = match args.sample {
        Some(n) => {
            let rank_column = args
                .sample_by
                .clone()
                .unwrap_or_else(|| "days_to_resolve".to_string());
            let spec = match args.method {
                SampleMethodArg::Top => SampleSpec::Top {
                    column: rank_column,
                    n,
                },
                SampleMethodArg::Bottom => SampleSpec::Bottom {
                    column: rank_column,
                    n,
                },
                SampleMethodArg::Random => SampleSpec::Random {
                    n,
                    seed: CHANGE_SAMPLE_SEED,
                },
            };
            let sampled = sample(&df, &spec)?;
            Some(export(
                &sampled,
                &output_dir,
                "sampled_requests",
                args.format,
                "Sampled Requests",
            )?)
        }
        None => None,
    };

    Ok(ChangeOutcome {
        rows: df.height(),
        summary,
        checked_file,
        sample_file,
    })
}

/// Incident-management review: stage-duration metrics between start,
/// resolved, and close dates.
pub fn run_incident(args: &IncidentArgs) -> Result<IncidentOutcome> {
    let df = load_table(&args.file, args.sheet.as_deref())?;

    let mut mapping = ColumnMapping::new();
    mapping
        .bind(ColumnRole::StartDate, &args.start)
        .bind(ColumnRole::ResolvedDate, &args.resolved)
        .bind(ColumnRole::CloseDate, &args.close);
    let df = mapping.apply(&df)?;

    let df = normalize_date_column(&df, "start_date")?;
    let df = normalize_date_column(&df, "resolved_date")?;
    let df = normalize_date_column(&df, "close_date")?;
    let df = date_delta(&df, "start_date", "resolved_date", "Start-Resolved")?;
    let df = date_delta(&df, "resolved_date", "close_date", "Resolved-Close")?;

    let output_dir = ensure_output_dir(args.output_dir.as_deref())?;
    let output_file = export(
        &df,
        &output_dir,
        "updated_incidents",
        args.format,
        "Incidents",
    )?;

    Ok(IncidentOutcome {
        rows: df.height(),
        output_file,
    })
}

fn carry_columns(requested: &[String], right: &DataFrame) -> Vec<String> {
    if requested.is_empty() {
        right
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    } else {
        requested.to_vec()
    }
}

/// User-access review: HR (and optional AD) merge, dormancy and
/// joining-date enrichment, role-conflict screen, random sample.
pub fn run_access(args: &AccessArgs) -> Result<AccessOutcome> {
    let access = load_table(&args.access, args.sheet.as_deref())?;
    let hr = load_table(&args.hr, args.hr_sheet.as_deref())?;

    let mut merged = left_join(&JoinSpec {
        left: &access,
        right: &hr,
        left_key: args.access_hr_key.clone(),
        right_key: args.hr_key.clone(),
        carry: carry_columns(&args.hr_columns, &hr),
    })?;

    if let Some(ad_path) = &args.ad {
        let ad_key = args.ad_key.as_ref().context("--ad-key is required with --ad")?;
        let access_ad_key = args
            .access_ad_key
            .as_ref()
            .context("--access-ad-key is required with --ad")?;
        let ad = load_table(ad_path, args.ad_sheet.as_deref())?;
        merged = left_join(&JoinSpec {
            left: &merged,
            right: &ad,
            left_key: access_ad_key.clone(),
            right_key: ad_key.clone(),
            carry: carry_columns(&args.ad_columns, &ad),
        })?;
    }

    let output_dir = ensure_output_dir(args.output_dir.as_deref())?;
    let mapped_file = export(
        &merged,
        &output_dir,
        "Mapped_User_Access",
        args.format,
        "MappedData",
    )?;

    let mut enriched = false;
    if let Some(column) = &args.gap_date {
        merged = normalize_date_column(&merged, column)?;
        merged = gap_from_max(&merged, column, "GAP")?;
        enriched = true;
    }
    if let (Some(ad_column), Some(hr_column)) = (&args.ad_join_date, &args.hr_join_date) {
        merged = normalize_date_column(&merged, ad_column)?;
        merged = normalize_date_column(&merged, hr_column)?;
        merged = date_delta(&merged, hr_column, ad_column, "AD-HR")?;
        enriched = true;
    }

    let reviewed_file = if enriched {
        Some(export(
            &merged,
            &output_dir,
            "User_Access_Reviewed",
            args.format,
            "User Access Review",
        )?)
    } else {
        None
    };

    let sample_file = match args.sample {
        Some(n) => {
            let sampled = sample(
                &merged,
                &SampleSpec::Random {
                    n,
                    seed: ACCESS_SAMPLE_SEED,
                },
            )?;
            Some(export(
                &sampled,
                &output_dir,
                "Random_Sample",
                args.format,
                "RandomSample",
            )?)
        }
        None => None,
    };

    let conflicts = match (&args.department, &args.role) {
        (Some(department), Some(role)) => {
            let result = role_conflicts(&merged, department, role)?;
            let flagged_file = if result.is_clean() {
                None
            } else {
                Some(export(
                    &result.flagged,
                    &output_dir,
                    "IT_NonIT_Conflicts",
                    args.format,
                    "IT_NonIT_Conflict",
                )?)
            };
            Some(ConflictOutcome {
                it_roles: result.it_roles.len(),
                non_it_roles: result.non_it_roles.len(),
                conflicting_roles: result.conflicting_roles.iter().cloned().collect(),
                flagged_rows: result.flagged.height(),
                flagged_file,
            })
        }
        _ => None,
    };

    Ok(AccessOutcome {
        rows: merged.height(),
        mapped_file,
        reviewed_file,
        sample_file,
        conflicts,
    })
}

/// List worksheet names, the read-only step before a workbook load.
pub fn run_sheets(args: &SheetsArgs) -> Result<Vec<String>> {
    let bytes = fs::read(&args.file).with_context(|| format!("read {}", args.file.display()))?;
    Ok(itgc_ingest::sheet_names(&bytes)?)
}
