// ============================================================
// CSV PARSER
// ============================================================
// Parse CSV files with encoding detection and column validation

use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use encoding_rs::{Encoding, WINDOWS_1252};

use crate::domain::error::{AppError, Result};

/// A fully loaded CSV file: header names plus raw records
#[derive(Debug, Clone)]
pub struct CsvTable {
    headers: Vec<String>,
    records: Vec<StringRecord>,
}

impl CsvTable {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find_column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Position of `name` in the header row.
    ///
    /// `expected` is echoed back in the error so callers can report every
    /// column the job needs, not only the first one found missing.
    pub fn column_index(&self, name: &str, expected: &[&str]) -> Result<usize> {
        self.find_column(name).ok_or_else(|| AppError::MissingColumn {
            column: name.to_string(),
            expected: expected.iter().map(|s| s.to_string()).collect(),
            available: self.headers.clone(),
        })
    }

    /// Cell at (`row`, `column`). Missing trailing cells read as empty.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.records
            .get(row)
            .and_then(|record| record.get(column))
            .unwrap_or("")
    }
}

/// Comma-separated parser with encoding detection
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvParser;

impl CsvParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a CSV file. A missing file is reported before anything is read.
    pub fn parse_file(&self, path: &Path) -> Result<CsvTable> {
        if !path.is_file() {
            return Err(AppError::NotFound(format!(
                "CSV file not found: {}",
                path.display()
            )));
        }

        let bytes = fs::read(path).map_err(|e| {
            AppError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        self.parse_content(&decode_bytes(&bytes))
    }

    /// Parse CSV content from string
    pub fn parse_content(&self, content: &str) -> Result<CsvTable> {
        let mut reader = ReaderBuilder::new()
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;
            records.push(record);
        }

        Ok(CsvTable { headers, records })
    }
}

/// Decode file bytes to text.
///
/// A byte-order mark selects UTF-8 or UTF-16. Without one, valid UTF-8 is
/// used as is and anything else is read as Windows-1252.
pub fn decode_bytes(bytes: &[u8]) -> String {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return text.into_owned();
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            tracing::debug!("Input is not valid UTF-8, decoding as Windows-1252");
            let (text, _, _) = WINDOWS_1252.decode(bytes);
            text.into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_csv() {
        let content = "content,label_sentiment,score\nbagus sekali,1,5\njelek,0,1";
        let table = CsvParser::new().parse_content(content).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.headers(), ["content", "label_sentiment", "score"]);
        assert_eq!(table.cell(0, 0), "bagus sekali");
        assert_eq!(table.cell(1, 2), "1");
    }

    #[test]
    fn test_quoted_commas_stay_in_cell() {
        let table = CsvParser::new()
            .parse_content("text,label\n\"mantap, keren\",1")
            .unwrap();
        assert_eq!(table.cell(0, 0), "mantap, keren");
        assert_eq!(table.cell(0, 1), "1");
    }

    #[test]
    fn test_ragged_rows_read_as_empty() {
        let content = "text,label,score\nhalo,1\n";
        let table = CsvParser::new().parse_content(content).unwrap();
        assert_eq!(table.cell(0, 2), "");
        assert_eq!(table.cell(5, 0), "");
    }

    #[test]
    fn test_missing_column_reports_available() {
        let table = CsvParser::new()
            .parse_content("review,label\nbagus,1")
            .unwrap();
        match table.column_index("text", &["text", "label"]) {
            Err(AppError::MissingColumn {
                column,
                expected,
                available,
            }) => {
                assert_eq!(column, "text");
                assert_eq!(expected, vec!["text", "label"]);
                assert_eq!(available, vec!["review", "label"]);
            }
            other => panic!("expected MissingColumn, got {:?}", other),
        }
        assert_eq!(table.column_index("label", &["label"]).unwrap(), 1);
    }

    #[test]
    fn test_decode_utf8_bom_and_utf16() {
        let mut utf8 = vec![0xEF, 0xBB, 0xBF];
        utf8.extend_from_slice("text,label".as_bytes());
        assert_eq!(decode_bytes(&utf8), "text,label");

        let mut utf16 = vec![0xFF, 0xFE];
        for unit in "ok".encode_utf16() {
            utf16.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_bytes(&utf16), "ok");
    }

    #[test]
    fn test_decode_falls_back_to_windows_1252() {
        // "café" in Windows-1252
        assert_eq!(decode_bytes(&[0x63, 0x61, 0x66, 0xE9]), "café");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = CsvParser::new()
            .parse_file(&dir.path().join("absent.csv"))
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
