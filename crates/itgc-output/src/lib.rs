//! Evidence export: serializing review tables to downloadable buffers.
//!
//! Auditors attach the outputs of a review run to their workpapers, so
//! both writers target byte buffers rather than files; where a buffer
//! ends up (download, disk, archive) is the caller's concern.

mod csv;
mod error;
mod xlsx;

pub use csv::write_csv;
pub use error::{OutputError, Result};
pub use xlsx::{sanitize_sheet_name, write_xlsx};
