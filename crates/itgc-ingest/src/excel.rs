//! Workbook loading via calamine.
//!
//! Sheet selection is a two-step contract: callers list sheet names
//! first (a read-only inspection), then load one sheet by name. The
//! first worksheet row is the header; remaining rows become cells with
//! per-column type inference. String-typed date cells are left as text
//! here; coercion to the `Date` dtype is the date normalizer's job.

use std::io::Cursor;

use calamine::{Data, DataType as CalamineData, Reader, Xlsx};
use chrono::NaiveDate;
use polars::prelude::*;

use crate::csv::validate_shape;
use crate::error::{IngestError, Result};

/// Inferred type of one worksheet column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnType {
    Int,
    Float,
    Bool,
    Date,
    Text,
}

fn open_workbook(bytes: &[u8]) -> Result<Xlsx<Cursor<Vec<u8>>>> {
    Xlsx::new(Cursor::new(bytes.to_vec())).map_err(|e| IngestError::Workbook {
        message: e.to_string(),
    })
}

/// List worksheet names without loading any cells.
pub fn sheet_names(bytes: &[u8]) -> Result<Vec<String>> {
    let workbook = open_workbook(bytes)?;
    Ok(workbook.sheet_names().to_vec())
}

/// Load one named worksheet into a DataFrame.
pub fn load_sheet(bytes: &[u8], sheet: &str) -> Result<DataFrame> {
    let mut workbook = open_workbook(bytes)?;
    if !workbook.sheet_names().iter().any(|name| name == sheet) {
        return Err(IngestError::SheetNotFound {
            name: sheet.to_string(),
        });
    }
    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| IngestError::Workbook {
            message: e.to_string(),
        })?;

    let rows: Vec<Vec<Data>> = range.rows().map(|r| r.to_vec()).collect();
    if rows.len() < 2 {
        return Err(IngestError::EmptyTable);
    }

    let headers: Vec<String> = rows[0]
        .iter()
        .enumerate()
        .map(|(idx, cell)| header_name(cell, idx))
        .collect();

    let mut columns: Vec<Column> = Vec::with_capacity(headers.len());
    for (col_idx, header) in headers.iter().enumerate() {
        let cells: Vec<Option<&Data>> = rows[1..].iter().map(|row| row.get(col_idx)).collect();
        let inferred = infer_column_type(&cells);
        columns.push(column_to_series(header, &cells, inferred)?.into());
    }

    let df = DataFrame::new(columns)?;
    validate_shape(&df)?;
    tracing::debug!(
        sheet,
        rows = df.height(),
        columns = df.width(),
        "loaded worksheet"
    );
    Ok(df)
}

fn header_name(cell: &Data, idx: usize) -> String {
    let name = cell.as_string().unwrap_or_default();
    let trimmed = name.trim();
    if trimmed.is_empty() {
        format!("column_{}", idx + 1)
    } else {
        trimmed.to_string()
    }
}

/// Infer a column type from its cells: a type wins only when every
/// non-empty cell agrees, otherwise the column degrades to text.
fn infer_column_type(cells: &[Option<&Data>]) -> ColumnType {
    let mut saw_value = false;
    let (mut all_bool, mut all_int, mut all_num, mut all_date) = (true, true, true, true);

    for cell in cells.iter().flatten() {
        match cell {
            Data::Empty => continue,
            Data::Bool(_) => {
                all_int = false;
                all_num = false;
                all_date = false;
            }
            Data::Int(_) => {
                all_bool = false;
                all_date = false;
            }
            Data::Float(_) => {
                all_bool = false;
                all_int = false;
                all_date = false;
            }
            Data::DateTime(_) | Data::DateTimeIso(_) => {
                all_bool = false;
                all_int = false;
                all_num = false;
            }
            _ => {
                all_bool = false;
                all_int = false;
                all_num = false;
                all_date = false;
            }
        }
        saw_value = true;
    }

    if !saw_value {
        return ColumnType::Text;
    }
    if all_bool {
        ColumnType::Bool
    } else if all_date {
        ColumnType::Date
    } else if all_int {
        ColumnType::Int
    } else if all_num {
        ColumnType::Float
    } else {
        ColumnType::Text
    }
}

fn column_to_series(name: &str, cells: &[Option<&Data>], inferred: ColumnType) -> Result<Series> {
    let series = match inferred {
        ColumnType::Int => {
            let values: Vec<Option<i64>> = cells
                .iter()
                .map(|c| c.and_then(|cell| cell.as_i64()))
                .collect();
            Series::new(name.into(), values)
        }
        ColumnType::Float => {
            let values: Vec<Option<f64>> = cells
                .iter()
                .map(|c| c.and_then(|cell| cell.as_f64()))
                .collect();
            Series::new(name.into(), values)
        }
        ColumnType::Bool => {
            let values: Vec<Option<bool>> = cells
                .iter()
                .map(|c| c.and_then(|cell| cell.get_bool()))
                .collect();
            Series::new(name.into(), values)
        }
        ColumnType::Date => {
            let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch");
            let values: Vec<Option<i32>> = cells
                .iter()
                .map(|c| {
                    c.and_then(|cell| cell.as_datetime())
                        .map(|dt| (dt.date() - epoch).num_days() as i32)
                })
                .collect();
            Series::new(name.into(), values).cast(&DataType::Date)?
        }
        ColumnType::Text => {
            let values: Vec<Option<String>> = cells
                .iter()
                .map(|c| c.and_then(|cell| cell.as_string()))
                .collect();
            Series::new(name.into(), values)
        }
    };
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_all_int() {
        let a = Data::Int(1);
        let b = Data::Int(2);
        let cells = vec![Some(&a), Some(&b), None];
        assert_eq!(infer_column_type(&cells), ColumnType::Int);
    }

    #[test]
    fn test_infer_mixed_numeric() {
        let a = Data::Int(1);
        let b = Data::Float(2.5);
        let cells = vec![Some(&a), Some(&b)];
        assert_eq!(infer_column_type(&cells), ColumnType::Float);
    }

    #[test]
    fn test_infer_numeric_and_text_degrades() {
        let a = Data::Int(1);
        let b = Data::String("x".to_string());
        let cells = vec![Some(&a), Some(&b)];
        assert_eq!(infer_column_type(&cells), ColumnType::Text);
    }

    #[test]
    fn test_infer_empty_column_is_text() {
        let a = Data::Empty;
        let cells = vec![Some(&a), None];
        assert_eq!(infer_column_type(&cells), ColumnType::Text);
    }

    #[test]
    fn test_header_auto_naming() {
        assert_eq!(header_name(&Data::String("User ID".to_string()), 0), "User ID");
        assert_eq!(header_name(&Data::Empty, 2), "column_3");
    }

    #[test]
    fn test_garbage_bytes_is_workbook_error() {
        assert!(matches!(
            sheet_names(b"not a zip archive"),
            Err(IngestError::Workbook { .. })
        ));
    }
}
