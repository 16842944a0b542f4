//! ITGC data ingestion: uploaded byte buffers to Polars DataFrames.
//!
//! Two input shapes are supported, matching what auditors actually
//! receive from ticketing, HR, and directory systems:
//!
//! - CSV (`load_csv`), with UTF-8 → Windows-1252 → ISO-8859-15 decode
//!   fallback;
//! - XLSX workbooks (`sheet_names` + `load_sheet`), where the caller
//!   inspects sheet names before choosing which one to load.
//!
//! Both return an error for empty parse results instead of handing an
//! empty frame to the rest of the pipeline.

mod csv;
mod error;
mod excel;

pub use csv::{decode_text, load_csv};
pub use error::{IngestError, Result};
pub use excel::{load_sheet, sheet_names};
