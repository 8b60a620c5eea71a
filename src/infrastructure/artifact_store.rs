// ============================================================
// ARTIFACT STORE
// ============================================================
// Atomic file replacement and content checksums for job outputs

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::error::{AppError, Result};

fn io_context<'a>(action: &'a str, path: &'a Path) -> impl FnOnce(io::Error) -> AppError + 'a {
    move |e| AppError::IoError(format!("Failed to {} {}: {}", action, path.display(), e))
}

fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(io_context("create directory", path))
}

/// `<path>.<tag>-<uuid>` next to `path`
fn sibling(path: &Path, tag: &str) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(format!(".{}-{}", tag, Uuid::new_v4()));
    path.with_file_name(name)
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = fs::File::create(path).map_err(io_context("create", path))?;
    file.write_all(bytes).map_err(io_context("write", path))?;
    file.sync_all().ok();
    Ok(())
}

/// Stage `bytes` in a uuid-named sibling, then rename it over `path`.
///
/// An existing file is moved aside first and put back if the swap fails,
/// so readers see either the old content or the new, never a partial write.
pub fn atomic_write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }

    let staged = sibling(path, "tmp");
    if let Err(err) = write_synced(&staged, bytes) {
        let _ = fs::remove_file(&staged);
        return Err(err);
    }

    let previous = path.exists().then(|| sibling(path, "bak"));
    if let Some(backup) = &previous {
        fs::rename(path, backup).map_err(io_context("move aside", path))?;
    }

    if let Err(e) = fs::rename(&staged, path) {
        let _ = fs::remove_file(&staged);
        if let Some(backup) = &previous {
            let _ = fs::rename(backup, path);
        }
        return Err(io_context("replace", path)(e));
    }

    if let Some(backup) = previous {
        let _ = fs::remove_file(backup);
    }
    Ok(())
}

/// Lowercase hex SHA-256 of the file at `path`, streamed.
pub fn sha256_hex_file(path: &Path) -> Result<String> {
    let mut file = fs::File::open(path).map_err(io_context("open for hashing", path))?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher).map_err(io_context("hash", path))?;
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_write_creates_parent_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("models").join("svm.bin");

        atomic_write_bytes(&path, b"first").unwrap();
        atomic_write_bytes(&path, b"second").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"second");
        let leftovers: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path() != path)
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_sha256_of_known_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abc.txt");
        fs::write(&path, b"abc").unwrap();

        assert_eq!(
            sha256_hex_file(&path).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
