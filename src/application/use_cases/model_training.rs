// ============================================================
// MODEL TRAINING USE CASE
// ============================================================
// Clean CSV -> stratified split -> TF-IDF + linear SVM -> evaluate
// -> save -> reload and compare probe predictions

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use validator::Validate;

use super::evaluation::{ClassificationReport, ConfusionMatrix};
use super::linear_svm::LinearSvcParams;
use super::sentiment_model::SentimentModel;
use super::stratified_split::stratified_split;
use super::training_dataset::load_training_dataset;
use crate::domain::error::Result;
use crate::domain::pipeline_config::TrainerConfig;
use crate::domain::review::label_distribution;
use crate::infrastructure::artifact_store::atomic_write_bytes;

/// Outcome of comparing probe predictions before saving and after reloading
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SelfCheck {
    Match,
    Mismatch { before: Vec<i64>, after: Vec<i64> },
}

impl SelfCheck {
    pub fn compare(before: Vec<i64>, after: Vec<i64>) -> Self {
        if before == after {
            SelfCheck::Match
        } else {
            SelfCheck::Mismatch { before, after }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub trained_at: DateTime<Utc>,
    pub dataset_rows: usize,
    pub label_distribution: BTreeMap<i64, usize>,
    pub train_rows: usize,
    pub test_rows: usize,
    pub accuracy: f64,
    pub classification_report: ClassificationReport,
    pub confusion_matrix: ConfusionMatrix,
    pub probe_texts: Vec<String>,
    pub probe_predictions: Vec<i64>,
    pub model_path: PathBuf,
    pub model_sha256: String,
    pub self_check: SelfCheck,
}

/// `<model file name>.report.json` next to the model
pub fn report_path(model_path: &Path) -> PathBuf {
    let mut name = model_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".report.json");
    model_path.with_file_name(name)
}

pub struct ModelTrainingUseCase {
    config: TrainerConfig,
}

impl ModelTrainingUseCase {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<TrainingReport> {
        self.config.validate()?;
        let config = &self.config;
        tracing::info!(
            data = %config.clean_csv.display(),
            model = %config.model_path.display(),
            "Retraining sentiment model"
        );

        let records = load_training_dataset(&config.clean_csv)?;
        let dataset_rows = records.len();
        let distribution = label_distribution(records.iter().map(|r| r.label));
        for (label, count) in &distribution {
            tracing::info!(label, count, "Label distribution");
        }

        let split = stratified_split(records, config.test_size, config.random_state)?;
        tracing::info!(
            train = split.train.len(),
            test = split.test.len(),
            "Stratified split"
        );

        let (train_texts, train_labels): (Vec<&str>, Vec<i64>) =
            split.train.iter().map(|r| (r.text.as_str(), r.label)).unzip();
        let (test_texts, test_labels): (Vec<&str>, Vec<i64>) =
            split.test.iter().map(|r| (r.text.as_str(), r.label)).unzip();

        let model = SentimentModel::fit(&train_texts, &train_labels, &LinearSvcParams::from(config))?;
        tracing::info!(classes = ?model.classes(), "Model training finished");

        let predictions = model.predict(&test_texts)?;
        let classification_report = ClassificationReport::new(&test_labels, &predictions);
        let confusion_matrix = ConfusionMatrix::new(&test_labels, &predictions);
        tracing::info!("Accuracy: {:.4}", classification_report.accuracy);
        tracing::info!("Classification report:\n{}", classification_report);
        tracing::info!("Confusion matrix (rows = true, columns = predicted):\n{}", confusion_matrix);

        let probe_predictions = model.predict(&config.probe_texts)?;
        tracing::info!(predictions = ?probe_predictions, "Probe predictions before save");

        model.ensure_fitted()?;
        tracing::info!("TF-IDF vectorizer is fitted");

        let trained_at = Utc::now();
        let model_sha256 = model.save(&config.model_path, trained_at)?;

        let reloaded = SentimentModel::load(&config.model_path)?;
        let reloaded_predictions = reloaded.predict(&config.probe_texts)?;
        let self_check = SelfCheck::compare(probe_predictions.clone(), reloaded_predictions);
        match &self_check {
            SelfCheck::Match => tracing::info!("Reloaded model reproduces probe predictions"),
            SelfCheck::Mismatch { before, after } => tracing::warn!(
                before = ?before,
                after = ?after,
                "Reloaded model predictions differ from the fitted model"
            ),
        }

        let report = TrainingReport {
            trained_at,
            dataset_rows,
            label_distribution: distribution,
            train_rows: train_labels.len(),
            test_rows: test_labels.len(),
            accuracy: classification_report.accuracy,
            classification_report,
            confusion_matrix,
            probe_texts: config.probe_texts.clone(),
            probe_predictions,
            model_path: config.model_path.clone(),
            model_sha256,
            self_check,
        };

        let report_file = report_path(&config.model_path);
        atomic_write_bytes(&report_file, &serde_json::to_vec_pretty(&report)?)?;
        tracing::info!(path = %report_file.display(), "Training report written");

        Ok(report)
    }
}
