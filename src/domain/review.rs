// ============================================================
// REVIEW RECORDS
// ============================================================
// Row types shared by the cleaning and training jobs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::error::{AppError, Result};

/// Column names of the clean dataset shared by both jobs
pub const CLEAN_TEXT_COLUMN: &str = "text";
pub const CLEAN_LABEL_COLUMN: &str = "label";
pub const CLEAN_SCORE_COLUMN: &str = "score";

/// One row of the raw reviews table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// 1-based data row number in the source file (header excluded)
    pub row: usize,

    /// Raw review text, `None` when the cell is empty
    pub content: Option<String>,

    /// Label cell as read; coerced only once the row survives filtering
    pub label: String,

    /// Optional score, passed through verbatim
    pub score: Option<String>,
}

/// A review after text normalization, ready for modeling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanedRecord {
    pub text: String,
    pub label: i64,
    pub score: Option<String>,
}

/// A training example read back from the clean dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledText {
    pub text: String,
    pub label: i64,
}

/// Coerce a label cell to an integer.
///
/// Integral floats such as `"1.0"` are accepted since spreadsheet exports
/// commonly write integer columns that way. Floats outside the `i64` range
/// are rejected rather than saturated.
pub fn parse_label(row: usize, raw: &str) -> Result<i64> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Ok(value);
    }

    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    const LOWER: f64 = i64::MIN as f64;
    const UPPER: f64 = i64::MAX as f64;
    match trimmed.parse::<f64>() {
        Ok(value) if value.fract() == 0.0 && (LOWER..UPPER).contains(&value) => Ok(value as i64),
        _ => Err(AppError::InvalidLabel {
            row,
            value: raw.to_string(),
        }),
    }
}

/// Count of rows per label, in ascending label order
pub fn label_distribution(labels: impl IntoIterator<Item = i64>) -> BTreeMap<i64, usize> {
    let mut counts = BTreeMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_label_integers() {
        assert_eq!(parse_label(1, "1").unwrap(), 1);
        assert_eq!(parse_label(1, " -1 ").unwrap(), -1);
        assert_eq!(parse_label(1, "0").unwrap(), 0);
    }

    #[test]
    fn test_parse_label_integral_float() {
        assert_eq!(parse_label(3, "2.0").unwrap(), 2);
    }

    #[test]
    fn test_parse_label_rejects_text_and_fractions() {
        match parse_label(7, "positif") {
            Err(AppError::InvalidLabel { row, value }) => {
                assert_eq!(row, 7);
                assert_eq!(value, "positif");
            }
            other => panic!("expected InvalidLabel, got {:?}", other),
        }
        assert!(parse_label(2, "0.5").is_err());
        assert!(parse_label(2, "").is_err());
    }

    #[test]
    fn test_parse_label_rejects_out_of_range_floats() {
        assert!(matches!(
            parse_label(4, "1e30"),
            Err(AppError::InvalidLabel { row: 4, .. })
        ));
        assert!(parse_label(4, "-1e19").is_err());
        assert!(parse_label(4, "inf").is_err());
        assert!(parse_label(4, "NaN").is_err());
        assert_eq!(parse_label(4, "1e3").unwrap(), 1000);
    }

    #[test]
    fn test_label_distribution_is_sorted() {
        let counts = label_distribution([1, 0, 1, -1, 1]);
        assert_eq!(counts.into_iter().collect::<Vec<_>>(), vec![(-1, 1), (0, 1), (1, 3)]);
    }
}
