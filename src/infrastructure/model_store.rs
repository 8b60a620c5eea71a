//! Binary model artifacts: a versioned bincode envelope written atomically.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};
use crate::infrastructure::artifact_store::{atomic_write_bytes, sha256_hex_file};

pub const MODEL_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact<M> {
    /// Must stay the first field; it is read on its own before the body
    pub format_version: u32,
    pub trained_at: DateTime<Utc>,
    pub model: M,
}

/// Serialize `model` to `path` and return the SHA-256 of the written file.
pub fn write_artifact<M: Serialize>(
    path: &Path,
    model: &M,
    trained_at: DateTime<Utc>,
) -> Result<String> {
    let artifact = ModelArtifact {
        format_version: MODEL_FORMAT_VERSION,
        trained_at,
        model,
    };
    let bytes = bincode::serialize(&artifact)?;
    atomic_write_bytes(path, &bytes)?;

    let checksum = sha256_hex_file(path)?;
    tracing::info!(
        path = %path.display(),
        bytes = bytes.len(),
        sha256 = %checksum,
        "Model artifact written"
    );
    Ok(checksum)
}

pub fn read_artifact<M: DeserializeOwned>(path: &Path) -> Result<ModelArtifact<M>> {
    if !path.is_file() {
        return Err(AppError::NotFound(format!(
            "Model artifact not found: {}",
            path.display()
        )));
    }

    let bytes = fs::read(path).map_err(|e| {
        AppError::IoError(format!("Failed to read model {}: {}", path.display(), e))
    })?;

    let version: u32 = bincode::deserialize(&bytes)?;
    if version != MODEL_FORMAT_VERSION {
        return Err(AppError::ModelError(format!(
            "Unsupported model format version {} (expected {})",
            version, MODEL_FORMAT_VERSION
        )));
    }

    Ok(bincode::deserialize(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Weights {
        values: Vec<f64>,
        labels: Vec<i64>,
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");
        let model = Weights {
            values: vec![0.5, -1.25],
            labels: vec![0, 1],
        };
        let trained_at = Utc::now();

        let checksum = write_artifact(&path, &model, trained_at).unwrap();
        assert_eq!(checksum.len(), 64);

        let artifact: ModelArtifact<Weights> = read_artifact(&path).unwrap();
        assert_eq!(artifact.format_version, MODEL_FORMAT_VERSION);
        assert_eq!(artifact.trained_at, trained_at);
        assert_eq!(artifact.model, model);
    }

    #[test]
    fn test_unknown_version_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");
        let artifact = ModelArtifact {
            format_version: MODEL_FORMAT_VERSION + 1,
            trained_at: Utc::now(),
            model: 7u8,
        };
        fs::write(&path, bincode::serialize(&artifact).unwrap()).unwrap();

        let err = read_artifact::<u8>(&path).unwrap_err();
        assert!(matches!(err, AppError::ModelError(_)));
    }

    #[test]
    fn test_missing_artifact_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_artifact::<u8>(&dir.path().join("none.bin")).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_garbage_is_model_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");
        fs::write(&path, [1u8, 0]).unwrap();
        assert!(matches!(
            read_artifact::<u8>(&path),
            Err(AppError::ModelError(_))
        ));
    }
}
