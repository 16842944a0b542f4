//! XLSX export.
//!
//! An .xlsx file is a zip container of SpreadsheetML parts; this module
//! assembles the minimal part set (content types, relationships,
//! workbook, one worksheet, a stylesheet) directly. Text and dates are
//! written as inline strings, numbers and booleans as native cells, and
//! nulls as absent cells so they render blank.

use std::io::{Cursor, Write};

use itgc_common::format_numeric;
use polars::prelude::*;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use ::zip::write::SimpleFileOptions;
use ::zip::{CompressionMethod, ZipWriter};

use crate::error::Result;

/// Spreadsheet main namespace.
const SPREADSHEET_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";

/// Package relationships namespace.
const PACKAGE_RELS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Document relationships namespace prefix.
const DOC_RELS_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const CONTENT_TYPES: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
    r#"<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
    r#"<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
    r#"</Types>"#,
);

const STYLES: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    r#"<fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts>"#,
    r#"<fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills>"#,
    r#"<borders count="1"><border/></borders>"#,
    r#"<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#,
    r#"<cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs>"#,
    r#"</styleSheet>"#,
);

/// Serialize a table to a single-worksheet workbook byte buffer.
pub fn write_xlsx(df: &DataFrame, sheet_name: &str) -> Result<Vec<u8>> {
    let sheet = sanitize_sheet_name(sheet_name);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(CONTENT_TYPES.as_bytes())?;

    zip.start_file("_rels/.rels", options)?;
    zip.write_all(&root_rels_xml()?)?;

    zip.start_file("xl/workbook.xml", options)?;
    zip.write_all(&workbook_xml(&sheet)?)?;

    zip.start_file("xl/_rels/workbook.xml.rels", options)?;
    zip.write_all(&workbook_rels_xml()?)?;

    zip.start_file("xl/styles.xml", options)?;
    zip.write_all(STYLES.as_bytes())?;

    zip.start_file("xl/worksheets/sheet1.xml", options)?;
    zip.write_all(&worksheet_xml(df)?)?;

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

/// Clamp a sheet name to Excel's rules: the `[]:*?/\` characters are
/// stripped and the result truncated to 31 characters; an empty result
/// falls back to "Sheet1".
pub fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .collect();
    let truncated: String = cleaned.trim().chars().take(31).collect();
    if truncated.is_empty() {
        "Sheet1".to_string()
    } else {
        truncated
    }
}

fn root_rels_xml() -> Result<Vec<u8>> {
    let mut xml = Writer::new(Vec::new());
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    let mut rels = BytesStart::new("Relationships");
    rels.push_attribute(("xmlns", PACKAGE_RELS_NS));
    xml.write_event(Event::Start(rels))?;
    let mut rel = BytesStart::new("Relationship");
    rel.push_attribute(("Id", "rId1"));
    rel.push_attribute(("Type", format!("{DOC_RELS_NS}/officeDocument").as_str()));
    rel.push_attribute(("Target", "xl/workbook.xml"));
    xml.write_event(Event::Empty(rel))?;
    xml.write_event(Event::End(BytesEnd::new("Relationships")))?;
    Ok(xml.into_inner())
}

fn workbook_rels_xml() -> Result<Vec<u8>> {
    let mut xml = Writer::new(Vec::new());
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    let mut rels = BytesStart::new("Relationships");
    rels.push_attribute(("xmlns", PACKAGE_RELS_NS));
    xml.write_event(Event::Start(rels))?;

    let mut sheet = BytesStart::new("Relationship");
    sheet.push_attribute(("Id", "rId1"));
    sheet.push_attribute(("Type", format!("{DOC_RELS_NS}/worksheet").as_str()));
    sheet.push_attribute(("Target", "worksheets/sheet1.xml"));
    xml.write_event(Event::Empty(sheet))?;

    let mut styles = BytesStart::new("Relationship");
    styles.push_attribute(("Id", "rId2"));
    styles.push_attribute(("Type", format!("{DOC_RELS_NS}/styles").as_str()));
    styles.push_attribute(("Target", "styles.xml"));
    xml.write_event(Event::Empty(styles))?;

    xml.write_event(Event::End(BytesEnd::new("Relationships")))?;
    Ok(xml.into_inner())
}

fn workbook_xml(sheet_name: &str) -> Result<Vec<u8>> {
    let mut xml = Writer::new(Vec::new());
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    let mut workbook = BytesStart::new("workbook");
    workbook.push_attribute(("xmlns", SPREADSHEET_NS));
    workbook.push_attribute(("xmlns:r", DOC_RELS_NS));
    xml.write_event(Event::Start(workbook))?;

    xml.write_event(Event::Start(BytesStart::new("sheets")))?;
    let mut sheet = BytesStart::new("sheet");
    sheet.push_attribute(("name", sheet_name));
    sheet.push_attribute(("sheetId", "1"));
    sheet.push_attribute(("r:id", "rId1"));
    xml.write_event(Event::Empty(sheet))?;
    xml.write_event(Event::End(BytesEnd::new("sheets")))?;

    xml.write_event(Event::End(BytesEnd::new("workbook")))?;
    Ok(xml.into_inner())
}

fn worksheet_xml(df: &DataFrame) -> Result<Vec<u8>> {
    let mut xml = Writer::new(Vec::new());
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    let mut worksheet = BytesStart::new("worksheet");
    worksheet.push_attribute(("xmlns", SPREADSHEET_NS));
    xml.write_event(Event::Start(worksheet))?;
    xml.write_event(Event::Start(BytesStart::new("sheetData")))?;

    // Header row.
    let headers: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    write_row(&mut xml, 1, |xml| {
        for (col_idx, header) in headers.iter().enumerate() {
            write_inline_string(xml, col_idx, 1, header)?;
        }
        Ok(())
    })?;

    // Data rows.
    for row_idx in 0..df.height() {
        let row_number = (row_idx + 2) as u32;
        write_row(&mut xml, row_number, |xml| {
            for (col_idx, column) in df.get_columns().iter().enumerate() {
                let value = column.get(row_idx).unwrap_or(AnyValue::Null);
                write_cell(xml, col_idx, row_number, value)?;
            }
            Ok(())
        })?;
    }

    xml.write_event(Event::End(BytesEnd::new("sheetData")))?;
    xml.write_event(Event::End(BytesEnd::new("worksheet")))?;
    Ok(xml.into_inner())
}

fn write_row<F>(xml: &mut Writer<Vec<u8>>, row_number: u32, cells: F) -> Result<()>
where
    F: FnOnce(&mut Writer<Vec<u8>>) -> Result<()>,
{
    let mut row = BytesStart::new("row");
    row.push_attribute(("r", row_number.to_string().as_str()));
    xml.write_event(Event::Start(row))?;
    cells(xml)?;
    xml.write_event(Event::End(BytesEnd::new("row")))?;
    Ok(())
}

/// Write one cell; nulls are skipped entirely so they stay blank.
fn write_cell(
    xml: &mut Writer<Vec<u8>>,
    col_idx: usize,
    row_number: u32,
    value: AnyValue<'_>,
) -> Result<()> {
    match value {
        AnyValue::Null => Ok(()),
        AnyValue::Int8(v) => write_number(xml, col_idx, row_number, &v.to_string()),
        AnyValue::Int16(v) => write_number(xml, col_idx, row_number, &v.to_string()),
        AnyValue::Int32(v) => write_number(xml, col_idx, row_number, &v.to_string()),
        AnyValue::Int64(v) => write_number(xml, col_idx, row_number, &v.to_string()),
        AnyValue::UInt8(v) => write_number(xml, col_idx, row_number, &v.to_string()),
        AnyValue::UInt16(v) => write_number(xml, col_idx, row_number, &v.to_string()),
        AnyValue::UInt32(v) => write_number(xml, col_idx, row_number, &v.to_string()),
        AnyValue::UInt64(v) => write_number(xml, col_idx, row_number, &v.to_string()),
        AnyValue::Float32(v) => write_number(xml, col_idx, row_number, &format_numeric(f64::from(v))),
        AnyValue::Float64(v) => write_number(xml, col_idx, row_number, &format_numeric(v)),
        AnyValue::Boolean(v) => write_boolean(xml, col_idx, row_number, v),
        // Dates and everything else are written as stable ISO-style text.
        other => write_inline_string(xml, col_idx, row_number, &itgc_common::any_to_string(other)),
    }
}

fn cell_start(col_idx: usize, row_number: u32) -> BytesStart<'static> {
    let mut cell = BytesStart::new("c");
    cell.push_attribute(("r", format!("{}{row_number}", column_letters(col_idx)).as_str()));
    cell
}

fn write_number(
    xml: &mut Writer<Vec<u8>>,
    col_idx: usize,
    row_number: u32,
    text: &str,
) -> Result<()> {
    xml.write_event(Event::Start(cell_start(col_idx, row_number)))?;
    xml.write_event(Event::Start(BytesStart::new("v")))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new("v")))?;
    xml.write_event(Event::End(BytesEnd::new("c")))?;
    Ok(())
}

fn write_boolean(
    xml: &mut Writer<Vec<u8>>,
    col_idx: usize,
    row_number: u32,
    value: bool,
) -> Result<()> {
    let mut cell = cell_start(col_idx, row_number);
    cell.push_attribute(("t", "b"));
    xml.write_event(Event::Start(cell))?;
    xml.write_event(Event::Start(BytesStart::new("v")))?;
    xml.write_event(Event::Text(BytesText::new(if value { "1" } else { "0" })))?;
    xml.write_event(Event::End(BytesEnd::new("v")))?;
    xml.write_event(Event::End(BytesEnd::new("c")))?;
    Ok(())
}

fn write_inline_string(
    xml: &mut Writer<Vec<u8>>,
    col_idx: usize,
    row_number: u32,
    text: &str,
) -> Result<()> {
    let mut cell = cell_start(col_idx, row_number);
    cell.push_attribute(("t", "inlineStr"));
    xml.write_event(Event::Start(cell))?;
    xml.write_event(Event::Start(BytesStart::new("is")))?;
    xml.write_event(Event::Start(BytesStart::new("t")))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new("t")))?;
    xml.write_event(Event::End(BytesEnd::new("is")))?;
    xml.write_event(Event::End(BytesEnd::new("c")))?;
    Ok(())
}

/// Spreadsheet column reference for a 0-based index: A, B, ... Z, AA, AB.
fn column_letters(mut idx: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (idx % 26) as u8);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).expect("ASCII letters")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letters(0), "A");
        assert_eq!(column_letters(25), "Z");
        assert_eq!(column_letters(26), "AA");
        assert_eq!(column_letters(27), "AB");
        assert_eq!(column_letters(51), "AZ");
        assert_eq!(column_letters(52), "BA");
    }

    #[test]
    fn test_sanitize_sheet_name() {
        assert_eq!(sanitize_sheet_name("User Access Review"), "User Access Review");
        assert_eq!(sanitize_sheet_name("a/b:c"), "abc");
        assert_eq!(sanitize_sheet_name(""), "Sheet1");
        assert_eq!(
            sanitize_sheet_name("a very long worksheet name that exceeds the limit"),
            "a very long worksheet name that"
        );
    }

    #[test]
    fn test_workbook_is_a_zip_with_expected_parts() {
        let df = df!("a" => [1i64], "b" => ["x"]).unwrap();
        let bytes = write_xlsx(&df, "Evidence").unwrap();

        // Zip local-file magic.
        assert_eq!(&bytes[..4], b"PK\x03\x04");
        let mut archive = ::zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert!(names.contains(&"xl/workbook.xml".to_string()));
        assert!(names.contains(&"xl/worksheets/sheet1.xml".to_string()));
    }
}
