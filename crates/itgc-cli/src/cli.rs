//! CLI argument definitions for the ITGC review tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "itgc-review",
    version,
    about = "ITGC Review Studio - Change, incident, and user-access audit checks",
    long_about = "Run IT General Controls review checks over exported populations.\n\n\
                  Supports change-management, incident-management, and user-access\n\
                  reviews with CSV and XLSX evidence exports."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check a change-management population and sample it for testing.
    Change(ChangeArgs),

    /// Derive stage durations for an incident-management population.
    Incident(IncidentArgs),

    /// Merge, enrich, and screen a user-access population.
    Access(AccessArgs),

    /// List the worksheet names of a workbook.
    Sheets(SheetsArgs),
}

#[derive(Parser)]
pub struct ChangeArgs {
    /// Change-management export (CSV or XLSX).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Worksheet to load when the file is a workbook (default: first sheet).
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,

    /// Column-role mapping as a JSON file (alternative to the column flags).
    #[arg(long = "mapping", value_name = "PATH")]
    pub mapping: Option<PathBuf>,

    /// Request id column.
    #[arg(long = "request-id", value_name = "COLUMN")]
    pub request_id: Option<String>,

    /// Raised date column.
    #[arg(long = "raised", value_name = "COLUMN")]
    pub raised: Option<String>,

    /// Resolved date column.
    #[arg(long = "resolved", value_name = "COLUMN")]
    pub resolved: Option<String>,

    /// Number of rows to sample for manual testing.
    #[arg(long = "sample", value_name = "N")]
    pub sample: Option<usize>,

    /// How to pick the sample.
    #[arg(long = "method", value_enum, default_value = "top")]
    pub method: SampleMethodArg,

    /// Column to rank by for top/bottom sampling (default: days_to_resolve).
    #[arg(long = "sample-by", value_name = "COLUMN")]
    pub sample_by: Option<String>,

    /// Output directory for evidence files (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Evidence file format.
    #[arg(long = "format", value_enum, default_value = "xlsx")]
    pub format: ExportFormatArg,
}

#[derive(Parser)]
pub struct IncidentArgs {
    /// Incident-management export (CSV or XLSX).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Worksheet to load when the file is a workbook (default: first sheet).
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,

    /// Start date column.
    #[arg(long = "start", value_name = "COLUMN")]
    pub start: String,

    /// Resolved date column.
    #[arg(long = "resolved", value_name = "COLUMN")]
    pub resolved: String,

    /// Close/end date column.
    #[arg(long = "close", value_name = "COLUMN")]
    pub close: String,

    /// Output directory for evidence files (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Evidence file format.
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: ExportFormatArg,
}

#[derive(Parser)]
pub struct AccessArgs {
    /// User access listing (CSV or XLSX).
    #[arg(long = "access", value_name = "FILE")]
    pub access: PathBuf,

    /// HR data file (CSV or XLSX).
    #[arg(long = "hr", value_name = "FILE")]
    pub hr: PathBuf,

    /// Active Directory export (CSV or XLSX, optional).
    #[arg(long = "ad", value_name = "FILE")]
    pub ad: Option<PathBuf>,

    /// Worksheet for the access workbook (default: first sheet).
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,

    /// Worksheet for the HR workbook (default: first sheet).
    #[arg(long = "hr-sheet", value_name = "NAME")]
    pub hr_sheet: Option<String>,

    /// Worksheet for the AD workbook (default: first sheet).
    #[arg(long = "ad-sheet", value_name = "NAME")]
    pub ad_sheet: Option<String>,

    /// Key column in the HR table.
    #[arg(long = "hr-key", value_name = "COLUMN")]
    pub hr_key: String,

    /// Matching column in the access table for the HR join.
    #[arg(long = "access-hr-key", value_name = "COLUMN")]
    pub access_hr_key: String,

    /// HR columns to carry into the merge (default: all).
    #[arg(long = "hr-columns", value_name = "COLUMNS", value_delimiter = ',')]
    pub hr_columns: Vec<String>,

    /// Key column in the AD table (requires --ad).
    #[arg(long = "ad-key", value_name = "COLUMN")]
    pub ad_key: Option<String>,

    /// Matching column in the merged table for the AD join.
    #[arg(long = "access-ad-key", value_name = "COLUMN")]
    pub access_ad_key: Option<String>,

    /// AD columns to carry into the merge (default: all).
    #[arg(long = "ad-columns", value_name = "COLUMNS", value_delimiter = ',')]
    pub ad_columns: Vec<String>,

    /// Date column for the dormancy GAP calculation.
    #[arg(long = "gap-date", value_name = "COLUMN")]
    pub gap_date: Option<String>,

    /// AD joining date column for the AD-HR difference.
    #[arg(long = "ad-join-date", value_name = "COLUMN")]
    pub ad_join_date: Option<String>,

    /// HR joining date column for the AD-HR difference.
    #[arg(long = "hr-join-date", value_name = "COLUMN")]
    pub hr_join_date: Option<String>,

    /// Department column for the IT vs non-IT role check.
    #[arg(long = "department", value_name = "COLUMN")]
    pub department: Option<String>,

    /// Role/access column for the IT vs non-IT role check.
    #[arg(long = "role", value_name = "COLUMN")]
    pub role: Option<String>,

    /// Number of rows to draw as a random sample.
    #[arg(long = "sample", value_name = "N")]
    pub sample: Option<usize>,

    /// Output directory for evidence files (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Evidence file format.
    #[arg(long = "format", value_enum, default_value = "xlsx")]
    pub format: ExportFormatArg,
}

#[derive(Parser)]
pub struct SheetsArgs {
    /// Workbook to inspect.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SampleMethodArg {
    /// Largest values of the ranking column (longest-running changes).
    Top,
    /// Smallest values (quickest resolutions).
    Bottom,
    /// Seeded uniform draw.
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormatArg {
    /// Comma-separated text.
    Csv,
    /// Single-sheet workbook.
    Xlsx,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
