// ============================================================
// REVIEW CLEANING USE CASE
// ============================================================
// Raw reviews CSV -> normalized, filtered, deduplicated clean CSV

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use validator::Validate;

use super::dataset_filter::{filter_reviews, CleanedReview, FilterStats, NormalizedReview};
use super::text_cleaner::{IndonesianStemmer, LinguisticBackend, TextCleaner};
use crate::domain::error::{AppError, Result};
use crate::domain::pipeline_config::{BackendPreference, CleanerConfig};
use crate::domain::review::{
    label_distribution, ReviewRecord, CLEAN_LABEL_COLUMN, CLEAN_SCORE_COLUMN, CLEAN_TEXT_COLUMN,
};
use crate::infrastructure::csv::{write_csv, CsvParser};
use crate::infrastructure::linguistic_resources::read_word_list;

/// Resolve the configured preference into a concrete backend.
pub fn select_backend(preference: BackendPreference, dictionary_path: &Path) -> Result<LinguisticBackend> {
    match preference {
        BackendPreference::Baseline => Ok(LinguisticBackend::Baseline),
        BackendPreference::Extended => match read_word_list(dictionary_path)? {
            Some(words) => Ok(extended_backend(words, dictionary_path)),
            None => Err(AppError::ConfigError(format!(
                "Extended backend requires a root-word dictionary at {}",
                dictionary_path.display()
            ))),
        },
        BackendPreference::Auto => match read_word_list(dictionary_path)? {
            Some(words) => Ok(extended_backend(words, dictionary_path)),
            None => {
                tracing::warn!(
                    path = %dictionary_path.display(),
                    "Root-word dictionary unavailable, using baseline backend"
                );
                Ok(LinguisticBackend::Baseline)
            }
        },
    }
}

fn extended_backend(words: Vec<String>, dictionary_path: &Path) -> LinguisticBackend {
    let stemmer = IndonesianStemmer::from_words(words);
    tracing::info!(
        path = %dictionary_path.display(),
        roots = stemmer.dictionary_len(),
        "Loaded root-word dictionary"
    );
    LinguisticBackend::Extended(stemmer)
}

/// Raw and cleaned text of one surviving row
#[derive(Debug, Clone, Serialize)]
pub struct PreviewRow {
    pub raw: String,
    pub cleaned: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CleaningSummary {
    pub output_path: PathBuf,
    pub backend: &'static str,
    pub uses_extended_backend: bool,
    pub stats: FilterStats,
    pub label_distribution: BTreeMap<i64, usize>,
    pub preview: Vec<PreviewRow>,
}

/// Reviews read from the input table
struct ReviewTable {
    records: Vec<ReviewRecord>,
    has_score: bool,
}

pub struct ReviewCleaningUseCase {
    config: CleanerConfig,
}

impl ReviewCleaningUseCase {
    pub fn new(config: CleanerConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<CleaningSummary> {
        self.config.validate()?;

        let backend = select_backend(self.config.backend, &self.config.dictionary_path)?;
        let cleaner = TextCleaner::new(backend);
        tracing::info!(
            backend = cleaner.backend().name(),
            extended = cleaner.uses_extended_backend(),
            "Text cleaner ready"
        );

        let table = self.read_reviews()?;

        let normalized: Vec<NormalizedReview> = table
            .records
            .into_iter()
            .map(|record| NormalizedReview {
                row: record.row,
                text: cleaner.clean(record.content.as_deref()),
                raw: record.content,
                label: record.label,
                score: record.score,
            })
            .collect();

        let (kept, stats) =
            filter_reviews(normalized, self.config.min_words, self.config.drop_duplicates)?;
        tracing::info!(
            input_rows = stats.input_rows,
            dropped_short = stats.dropped_short,
            dropped_duplicate = stats.dropped_duplicate,
            kept = stats.kept,
            "Filtered cleaned reviews"
        );

        self.write_output(&kept, table.has_score)?;

        let summary = CleaningSummary {
            output_path: self.config.output_csv.clone(),
            backend: cleaner.backend().name(),
            uses_extended_backend: cleaner.uses_extended_backend(),
            stats,
            label_distribution: label_distribution(kept.iter().map(|r| r.record.label)),
            preview: kept
                .iter()
                .take(self.config.preview_rows)
                .map(|r| PreviewRow {
                    raw: r.raw.clone().unwrap_or_default(),
                    cleaned: r.record.text.clone(),
                })
                .collect(),
        };
        log_summary(&summary);

        Ok(summary)
    }

    /// Columns are validated before any row is converted.
    fn read_reviews(&self) -> Result<ReviewTable> {
        let table = CsvParser::new().parse_file(&self.config.input_csv)?;

        let text_column = self.config.text_column.as_str();
        let label_column = self.config.label_column.as_str();
        let expected = [text_column, label_column];
        let text_idx = table.column_index(text_column, &expected)?;
        let label_idx = table.column_index(label_column, &expected)?;
        let score_idx = table.find_column(&self.config.score_column);

        tracing::info!(
            path = %self.config.input_csv.display(),
            rows = table.len(),
            has_score = score_idx.is_some(),
            "Loaded raw reviews"
        );

        let records = (0..table.len())
            .map(|row| {
                let content = table.cell(row, text_idx);
                ReviewRecord {
                    row: row + 1,
                    content: (!content.is_empty()).then(|| content.to_string()),
                    label: table.cell(row, label_idx).to_string(),
                    score: score_idx
                        .map(|idx| table.cell(row, idx))
                        .filter(|s| !s.is_empty())
                        .map(str::to_string),
                }
            })
            .collect();

        Ok(ReviewTable {
            records,
            has_score: score_idx.is_some(),
        })
    }

    fn write_output(&self, kept: &[CleanedReview], has_score: bool) -> Result<()> {
        let mut headers = vec![CLEAN_TEXT_COLUMN, CLEAN_LABEL_COLUMN];
        if has_score {
            headers.push(CLEAN_SCORE_COLUMN);
        }

        let rows = kept.iter().map(|r| {
            let mut row = vec![r.record.text.clone(), r.record.label.to_string()];
            if has_score {
                row.push(r.record.score.clone().unwrap_or_default());
            }
            row
        });

        write_csv(&self.config.output_csv, &headers, rows)
    }
}

fn log_summary(summary: &CleaningSummary) {
    tracing::info!(
        output = %summary.output_path.display(),
        rows = summary.stats.kept,
        backend = summary.backend,
        extended = summary.uses_extended_backend,
        "Cleaning finished"
    );
    for (label, count) in &summary.label_distribution {
        tracing::info!(label, count, "Label distribution");
    }
    for row in &summary.preview {
        tracing::info!(raw = %row.raw, clean = %row.cleaned, "Preview");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn config(dir: &Path, backend: BackendPreference) -> CleanerConfig {
        CleanerConfig {
            input_csv: dir.join("reviews.csv"),
            output_csv: dir.join("reviews_clean.csv"),
            dictionary_path: dir.join("kata-dasar.txt"),
            backend,
            ..Default::default()
        }
    }

    #[test]
    fn test_end_to_end_with_score() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path(), BackendPreference::Baseline);
        fs::write(
            &cfg.input_csv,
            "content,label_sentiment,score\n\
             \"Aplikasi ini SANGAT bagus!!! http://x.com\",1,5\n\
             Lowongan kerja banyak dan cepat,1,5\n\
             \"lowongan KERJA banyak, cepat!!\",1,4\n\
             Sering error saat login,0,1\n\
             ,0,2\n",
        )
        .unwrap();

        let summary = ReviewCleaningUseCase::new(cfg.clone()).run().unwrap();
        assert_eq!(summary.backend, "baseline");
        assert_eq!(
            summary.stats,
            FilterStats {
                input_rows: 5,
                dropped_short: 2,
                dropped_duplicate: 1,
                kept: 2
            }
        );
        assert_eq!(summary.label_distribution.get(&1), Some(&1));
        assert_eq!(summary.preview[0].raw, "Lowongan kerja banyak dan cepat");
        assert_eq!(summary.preview[0].cleaned, "lowongan kerja banyak cepat");

        let output = fs::read_to_string(&cfg.output_csv).unwrap();
        assert_eq!(
            output,
            "\u{feff}text,label,score\nlowongan kerja banyak cepat,1,5\nsering error saat login,0,1\n"
        );
    }

    #[test]
    fn test_score_column_optional() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path(), BackendPreference::Baseline);
        fs::write(&cfg.input_csv, "content,label_sentiment\nbagus mantap sekali,1\n").unwrap();

        ReviewCleaningUseCase::new(cfg.clone()).run().unwrap();
        let output = fs::read_to_string(&cfg.output_csv).unwrap();
        assert!(output.starts_with("\u{feff}text,label\n"));
    }

    #[test]
    fn test_missing_text_column_fails_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path(), BackendPreference::Baseline);
        fs::write(&cfg.input_csv, "review,label_sentiment\nbagus mantap,1\n").unwrap();

        match ReviewCleaningUseCase::new(cfg.clone()).run() {
            Err(AppError::MissingColumn {
                column, expected, ..
            }) => {
                assert_eq!(column, "content");
                assert_eq!(expected, vec!["content", "label_sentiment"]);
            }
            other => panic!("expected MissingColumn, got {:?}", other),
        }
        assert!(!cfg.output_csv.exists());
    }

    #[test]
    fn test_auto_backend_uses_dictionary_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path(), BackendPreference::Auto);
        fs::write(&cfg.dictionary_path, "bantu\nmudah\nkerja\n").unwrap();
        fs::write(
            &cfg.input_csv,
            "content,label_sentiment\nSangat membantu cari pekerjaan,1\n",
        )
        .unwrap();

        let summary = ReviewCleaningUseCase::new(cfg).run().unwrap();
        assert!(summary.uses_extended_backend);
        assert_eq!(summary.preview[0].cleaned, "bantu cari kerja");
    }

    #[test]
    fn test_backend_selection() {
        let dir = tempfile::tempdir().unwrap();
        let dictionary = dir.path().join("kata-dasar.txt");

        assert!(matches!(
            select_backend(BackendPreference::Auto, &dictionary).unwrap(),
            LinguisticBackend::Baseline
        ));
        assert!(matches!(
            select_backend(BackendPreference::Extended, &dictionary),
            Err(AppError::ConfigError(_))
        ));

        fs::write(&dictionary, "bantu\n").unwrap();
        assert!(matches!(
            select_backend(BackendPreference::Baseline, &dictionary).unwrap(),
            LinguisticBackend::Baseline
        ));
        assert!(matches!(
            select_backend(BackendPreference::Extended, &dictionary).unwrap(),
            LinguisticBackend::Extended(_)
        ));
    }

    #[test]
    fn test_unlabeled_empty_row_is_filtered_out() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path(), BackendPreference::Baseline);
        fs::write(
            &cfg.input_csv,
            "content,label_sentiment\nlowongan kerja banyak,1\nsering error login,0\n,\n",
        )
        .unwrap();

        let summary = ReviewCleaningUseCase::new(cfg.clone()).run().unwrap();
        assert_eq!(summary.stats.kept, 2);
        assert_eq!(summary.stats.dropped_short, 1);

        let output = fs::read_to_string(&cfg.output_csv).unwrap();
        assert_eq!(
            output,
            "\u{feff}text,label\nlowongan kerja banyak,1\nsering error login,0\n"
        );
    }

    #[test]
    fn test_invalid_label_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path(), BackendPreference::Baseline);
        fs::write(
            &cfg.input_csv,
            "content,label_sentiment\nbagus mantap sekali,1\nlowongan kerja banyak,positif\n",
        )
        .unwrap();

        assert!(matches!(
            ReviewCleaningUseCase::new(cfg).run(),
            Err(AppError::InvalidLabel { row: 2, .. })
        ));
    }
}
