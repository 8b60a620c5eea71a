// ============================================================
// PIPELINE CONFIGURATION
// ============================================================
// Paths and tunables for the cleaning and training jobs.
// Every value has a compile-time default; `ulasan.toml` may override.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::{Validate, ValidationError};

pub const INPUT_CSV: &str = "nyarigawe_reviews.csv";
pub const OUTPUT_CSV: &str = "nyarigawe_reviews_clean.csv";
pub const TEXT_COL: &str = "content";
pub const LABEL_COL: &str = "label_sentiment";
pub const SCORE_COL: &str = "score";
pub const DROP_DUPLICATES: bool = true;
pub const MIN_WORDS: usize = 2;
pub const PREVIEW_ROWS: usize = 5;
pub const ROOT_WORD_DICTIONARY: &str = "resources/kata-dasar.txt";

pub const CLEAN_PATH: &str = OUTPUT_CSV;
pub const MODEL_PATH: &str = "svm_sentiment_model.bin";
pub const TEST_SIZE: f64 = 0.2;
pub const RANDOM_STATE: u64 = 42;
pub const SVM_C: f64 = 1.0;
pub const SVM_MAX_ITER: usize = 1000;
pub const SVM_TOLERANCE: f64 = 1e-3;
pub const PROBE_TEXTS: [&str; 2] = [
    "aplikasinya sangat membantu dan mudah digunakan",
    "sering error dan susah dipakai mengecewakan",
];

/// Which stopword/stemming backend the cleaner should use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendPreference {
    /// Use the extended backend when the root-word dictionary is present
    #[default]
    Auto,
    /// Baseline stopwords only, no stemming
    Baseline,
    /// Require the extended backend; a missing dictionary is an error
    Extended,
}

/// Settings for the review cleaning job
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_cleaner_columns"))]
pub struct CleanerConfig {
    /// Raw reviews CSV
    pub input_csv: PathBuf,

    /// Destination of the cleaned dataset
    pub output_csv: PathBuf,

    /// Column holding the review text
    #[validate(length(min = 1))]
    pub text_column: String,

    /// Column holding the integer sentiment label
    #[validate(length(min = 1))]
    pub label_column: String,

    /// Optional column passed through unchanged when present
    pub score_column: String,

    /// Keep only the first row per (cleaned text, label)
    pub drop_duplicates: bool,

    /// Minimum number of tokens a cleaned text must keep
    #[validate(range(min = 1))]
    pub min_words: usize,

    /// Number of before/after rows shown in the job summary
    pub preview_rows: usize,

    /// Stopword/stemmer backend selection
    pub backend: BackendPreference,

    /// Root-word dictionary used by the extended backend
    pub dictionary_path: PathBuf,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            input_csv: PathBuf::from(INPUT_CSV),
            output_csv: PathBuf::from(OUTPUT_CSV),
            text_column: TEXT_COL.to_string(),
            label_column: LABEL_COL.to_string(),
            score_column: SCORE_COL.to_string(),
            drop_duplicates: DROP_DUPLICATES,
            min_words: MIN_WORDS,
            preview_rows: PREVIEW_ROWS,
            backend: BackendPreference::Auto,
            dictionary_path: PathBuf::from(ROOT_WORD_DICTIONARY),
        }
    }
}

fn validate_cleaner_columns(config: &CleanerConfig) -> Result<(), ValidationError> {
    if config.text_column == config.label_column {
        return Err(ValidationError::new("text_and_label_columns_must_differ"));
    }
    Ok(())
}

/// Settings for the training job
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TrainerConfig {
    /// Cleaned dataset produced by the cleaning job
    pub clean_csv: PathBuf,

    /// Destination of the serialized model
    pub model_path: PathBuf,

    /// Fraction of rows held out for evaluation
    #[validate(range(exclusive_min = 0.0, exclusive_max = 1.0))]
    pub test_size: f64,

    /// Seed for the split and the solver's visiting order
    pub random_state: u64,

    /// SVM regularization strength
    #[validate(range(exclusive_min = 0.0))]
    pub c: f64,

    /// Maximum solver epochs per binary sub-problem
    #[validate(range(min = 1))]
    pub max_iter: usize,

    /// Stopping tolerance on the projected gradient gap
    #[validate(range(exclusive_min = 0.0))]
    pub tolerance: f64,

    /// Canonical texts predicted before and after the save/reload round trip
    #[validate(length(min = 1))]
    pub probe_texts: Vec<String>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            clean_csv: PathBuf::from(CLEAN_PATH),
            model_path: PathBuf::from(MODEL_PATH),
            test_size: TEST_SIZE,
            random_state: RANDOM_STATE,
            c: SVM_C,
            max_iter: SVM_MAX_ITER,
            tolerance: SVM_TOLERANCE,
            probe_texts: PROBE_TEXTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Both jobs' settings, as loaded from defaults plus `ulasan.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PipelineConfig {
    #[validate(nested)]
    pub cleaner: CleanerConfig,

    #[validate(nested)]
    pub trainer: TrainerConfig,
}
