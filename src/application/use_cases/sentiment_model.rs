// ============================================================
// SENTIMENT MODEL
// ============================================================
// TF-IDF features feeding a linear SVM, persisted as one artifact

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::linear_svm::{LinearSvc, LinearSvcParams};
use super::tfidf_vectorizer::TfidfVectorizer;
use crate::domain::error::{AppError, Result};
use crate::infrastructure::model_store::{read_artifact, write_artifact, ModelArtifact};

/// Fitted text -> label predictor. Immutable once fitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentModel {
    vectorizer: TfidfVectorizer,
    classifier: LinearSvc,
}

impl SentimentModel {
    pub fn fit<T: AsRef<str>>(texts: &[T], labels: &[i64], params: &LinearSvcParams) -> Result<Self> {
        if texts.len() != labels.len() {
            return Err(AppError::ModelError(format!(
                "Got {} texts but {} labels",
                texts.len(),
                labels.len()
            )));
        }

        let (vectorizer, features) = TfidfVectorizer::fit_transform(texts)?;
        tracing::info!(
            samples = texts.len(),
            features = vectorizer.num_features(),
            "Fitting linear SVM"
        );
        let classifier = LinearSvc::fit(&features, labels, params)?;

        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    pub fn predict<T: AsRef<str>>(&self, texts: &[T]) -> Result<Vec<i64>> {
        let features = self.vectorizer.transform(texts)?;
        self.classifier.predict(&features)
    }

    /// Fails unless the vectorizer can transform text.
    pub fn ensure_fitted(&self) -> Result<()> {
        self.vectorizer.transform(&["test text"])?;
        if self.vectorizer.num_features() != self.classifier.num_features() {
            return Err(AppError::ModelError(
                "Vectorizer and classifier disagree on the feature count".to_string(),
            ));
        }
        Ok(())
    }

    pub fn classes(&self) -> &[i64] {
        self.classifier.classes()
    }

    /// Write the model to `path`; returns the artifact's SHA-256.
    pub fn save(&self, path: &Path, trained_at: DateTime<Utc>) -> Result<String> {
        write_artifact(path, self, trained_at)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let artifact: ModelArtifact<Self> = read_artifact(path)?;
        tracing::info!(
            path = %path.display(),
            trained_at = %artifact.trained_at,
            "Model artifact loaded"
        );
        Ok(artifact.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> (Vec<&'static str>, Vec<i64>) {
        let texts = vec![
            "bagus mantap membantu",
            "mantap cepat bagus",
            "sangat membantu cari kerja",
            "mudah dipakai bagus",
            "error lambat kecewa",
            "susah login error",
            "kecewa sering error",
            "lambat susah dipakai",
        ];
        let labels = vec![1, 1, 1, 1, 0, 0, 0, 0];
        (texts, labels)
    }

    #[test]
    fn test_fit_and_predict() {
        let (texts, labels) = corpus();
        let model = SentimentModel::fit(&texts, &labels, &LinearSvcParams::default()).unwrap();

        assert_eq!(model.classes(), [0, 1]);
        assert_eq!(model.predict(&texts).unwrap(), labels);
        assert_eq!(
            model.predict(&["bagus mantap", "error kecewa"]).unwrap(),
            vec![1, 0]
        );
        assert!(model.ensure_fitted().is_ok());
    }

    #[test]
    fn test_save_and_load_keeps_predictions() {
        let (texts, labels) = corpus();
        let model = SentimentModel::fit(&texts, &labels, &LinearSvcParams::default()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("svm_sentiment_model.bin");
        let checksum = model.save(&path, Utc::now()).unwrap();
        assert_eq!(checksum.len(), 64);

        let loaded = SentimentModel::load(&path).unwrap();
        let probes = ["aplikasi bagus membantu", "sering error lambat", "kata asing"];
        assert_eq!(
            model.predict(&probes).unwrap(),
            loaded.predict(&probes).unwrap()
        );
    }

    #[test]
    fn test_length_mismatch_is_error() {
        let err = SentimentModel::fit(&["bagus"], &[1, 0], &LinearSvcParams::default()).unwrap_err();
        assert!(matches!(err, AppError::ModelError(_)));
    }

    #[test]
    fn test_empty_texts_fail_on_vocabulary() {
        let err = SentimentModel::fit(&["", "x"], &[1, 0], &LinearSvcParams::default()).unwrap_err();
        assert!(matches!(err, AppError::ModelError(_)));
    }
}
