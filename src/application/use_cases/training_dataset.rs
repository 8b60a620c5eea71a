//! Loading and validating the clean dataset for training.

use std::path::Path;

use crate::domain::error::Result;
use crate::domain::review::{parse_label, LabeledText, CLEAN_LABEL_COLUMN, CLEAN_TEXT_COLUMN};
use crate::infrastructure::csv::CsvParser;

/// Read `text`/`label` rows from `path`.
///
/// Missing files and missing columns fail before any row is converted.
/// Empty text cells become `""`; labels must be integers (or integral floats).
pub fn load_training_dataset(path: &Path) -> Result<Vec<LabeledText>> {
    let table = CsvParser::new().parse_file(path)?;

    let expected = [CLEAN_TEXT_COLUMN, CLEAN_LABEL_COLUMN];
    let text_idx = table.column_index(CLEAN_TEXT_COLUMN, &expected)?;
    let label_idx = table.column_index(CLEAN_LABEL_COLUMN, &expected)?;

    tracing::info!(
        path = %path.display(),
        rows = table.len(),
        columns = table.headers().len(),
        "Loaded training data"
    );

    (0..table.len())
        .map(|row| {
            Ok(LabeledText {
                text: table.cell(row, text_idx).to_string(),
                label: parse_label(row + 1, table.cell(row, label_idx))?,
            })
        })
        .collect()
}
