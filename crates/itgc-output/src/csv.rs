//! CSV export.

use polars::prelude::*;

use crate::error::{OutputError, Result};

/// Serialize a table to CSV bytes: UTF-8, comma-separated, header row,
/// no index column. Dates are written as `YYYY-MM-DD` and nulls as
/// empty cells, never as literal "nan"/"null" text.
pub fn write_csv(df: &DataFrame) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut frame = df.clone();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .with_date_format(Some("%Y-%m-%d".to_string()))
        .finish(&mut frame)
        .map_err(|e| OutputError::Csv {
            message: e.to_string(),
        })?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_and_rows_in_column_order() {
        let df = df!(
            "request_id" => ["CHG-1", "CHG-2"],
            "days_to_resolve" => [Some(4i64), None],
        )
        .unwrap();
        let bytes = write_csv(&df).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();

        assert_eq!(lines.next(), Some("request_id,days_to_resolve"));
        assert_eq!(lines.next(), Some("CHG-1,4"));
        // Null serializes as an empty cell.
        assert_eq!(lines.next(), Some("CHG-2,"));
    }
}
