//! CSV loading from uploaded byte buffers.
//!
//! Audit populations arrive as exports from ticketing and HR systems,
//! which are frequently not UTF-8. Decoding tries UTF-8 first and then
//! falls back through legacy single-byte encodings before giving up.

use std::io::Cursor;

use encoding_rs::Encoding;
use polars::prelude::*;

use crate::error::{IngestError, Result};

/// Fallback encodings tried, in order, when the buffer is not valid UTF-8.
const FALLBACK_ENCODINGS: [&Encoding; 2] = [encoding_rs::WINDOWS_1252, encoding_rs::ISO_8859_15];

/// Decode a raw byte buffer to text.
///
/// UTF-8 (with or without BOM) wins when it decodes cleanly; otherwise
/// each fallback encoding is tried in order. All decoders exhausted is
/// an `UnreadableFile` error.
pub fn decode_text(bytes: &[u8]) -> Result<String> {
    let stripped = bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes);

    if let Ok(text) = std::str::from_utf8(stripped) {
        return Ok(text.to_string());
    }

    for encoding in FALLBACK_ENCODINGS {
        if let Some(decoded) = encoding.decode_without_bom_handling_and_without_replacement(bytes) {
            tracing::debug!(encoding = encoding.name(), "decoded with fallback encoding");
            return Ok(decoded.into_owned());
        }
    }

    Err(IngestError::UnreadableFile {
        reason: "not valid UTF-8 and no fallback encoding applied".to_string(),
    })
}

/// Parse an uploaded CSV byte buffer into a DataFrame.
///
/// The first row is the header. Schema inference is bounded, and an
/// empty parse result (zero rows or zero columns) is an error rather
/// than an empty frame.
pub fn load_csv(bytes: &[u8]) -> Result<DataFrame> {
    let text = decode_text(bytes)?;
    if text.trim().is_empty() {
        return Err(IngestError::EmptyTable);
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .into_reader_with_file_handle(Cursor::new(text.into_bytes()))
        .finish()
        .map_err(|e| IngestError::CsvParse {
            message: e.to_string(),
        })?;

    validate_shape(&df)?;
    tracing::debug!(rows = df.height(), columns = df.width(), "loaded CSV table");
    Ok(df)
}

/// Reject frames with zero rows or zero columns.
pub(crate) fn validate_shape(df: &DataFrame) -> Result<()> {
    if df.height() == 0 || df.width() == 0 {
        return Err(IngestError::EmptyTable);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_utf8_csv() {
        let df = load_csv(b"id,name\n1,alpha\n2,beta\n").unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 2);
    }

    #[test]
    fn test_load_windows_1252_csv() {
        // "José" with an ISO-8859-1/Windows-1252 e-acute byte.
        let bytes = b"id,name\n1,Jos\xe9\n";
        let df = load_csv(bytes).unwrap();
        let name = itgc_common::cell_string(&df, "name", 0);
        assert_eq!(name, "José");
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let df = load_csv(b"\xef\xbb\xbfid,name\n1,x\n").unwrap();
        assert!(df.column("id").is_ok());
    }

    #[test]
    fn test_empty_buffer_is_empty_table() {
        assert!(matches!(load_csv(b""), Err(IngestError::EmptyTable)));
        assert!(matches!(load_csv(b"   \n"), Err(IngestError::EmptyTable)));
    }

    #[test]
    fn test_header_only_is_empty_table() {
        assert!(matches!(
            load_csv(b"id,name\n"),
            Err(IngestError::EmptyTable)
        ));
    }
}
