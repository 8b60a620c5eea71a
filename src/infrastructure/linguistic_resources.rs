//! Probing for optional linguistic resource files.

use std::fs;
use std::path::Path;

use crate::domain::error::{AppError, Result};
use crate::infrastructure::csv::decode_bytes;

/// Read a one-word-per-line list.
///
/// Returns `Ok(None)` when the file is absent or holds no words, so callers
/// can decide whether that is fatal.
pub fn read_word_list(path: &Path) -> Result<Option<Vec<String>>> {
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "Word list not present");
        return Ok(None);
    }

    let bytes = fs::read(path).map_err(|e| {
        AppError::IoError(format!("Failed to read word list {}: {}", path.display(), e))
    })?;

    let words: Vec<String> = decode_bytes(&bytes)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect();

    if words.is_empty() {
        return Ok(None);
    }

    Ok(Some(words))
}
