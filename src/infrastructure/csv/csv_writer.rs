// ============================================================
// CSV WRITER
// ============================================================
// UTF-8 output with a byte-order mark, written atomically

use std::path::Path;

use csv::WriterBuilder;

use crate::domain::error::{AppError, Result};
use crate::infrastructure::artifact_store::atomic_write_bytes;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Write `headers` and `rows` to `path`, replacing any existing file.
pub fn write_csv<I, R>(path: &Path, headers: &[&str], rows: I) -> Result<()>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
{
    let mut writer = WriterBuilder::new().from_writer(UTF8_BOM.to_vec());
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::IoError(format!("Failed to flush CSV buffer: {}", e)))?;

    atomic_write_bytes(path, &bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::csv::CsvParser;

    #[test]
    fn test_output_starts_with_bom_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("clean.csv");

        write_csv(
            &path,
            &["text", "label"],
            vec![vec!["bagus mantap", "1"], vec!["lambat, error", "0"]],
        )
        .unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));

        let table = CsvParser::new().parse_file(&path).unwrap();
        assert_eq!(table.headers(), ["text", "label"]);
        assert_eq!(table.cell(1, 0), "lambat, error");
    }
}
