// src/infrastructure/image_storage.rs
//
// Image file storage
//
// RULES:
// - Stored names are generated, never taken from the client
// - Returned paths are storage-relative; URL building happens at projection

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Relative path prefix of everything stored by `LocalImageStorage`
const UPLOAD_PREFIX: &str = "uploads";

#[cfg_attr(test, mockall::automock)]
pub trait ImageStorage: Send + Sync {
    /// Persist `bytes`, returning the storage-relative path
    fn store(&self, extension: &str, bytes: &[u8]) -> AppResult<String>;

    /// Remove a previously stored file
    fn remove(&self, relative_path: &str) -> AppResult<()>;
}

/// Stores images under a local directory, one sub-directory per day
#[derive(Debug, Clone)]
pub struct LocalImageStorage {
    root: PathBuf,
}

impl LocalImageStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn absolute(&self, relative_path: &str) -> AppResult<PathBuf> {
        let inner = relative_path
            .strip_prefix(UPLOAD_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| AppError::Other(format!("Not a stored image path: {}", relative_path)))?;

        if inner.split('/').any(|part| part == ".." || part.is_empty()) {
            return Err(AppError::Other(format!("Invalid image path: {}", relative_path)));
        }

        Ok(self.root.join(inner))
    }
}

impl ImageStorage for LocalImageStorage {
    fn store(&self, extension: &str, bytes: &[u8]) -> AppResult<String> {
        let day = Utc::now().format("%Y%m%d").to_string();
        let dir = self.root.join(&day);
        fs::create_dir_all(&dir)?;

        let file_name = format!("{}.{}", Uuid::new_v4().simple(), extension);
        fs::write(dir.join(&file_name), bytes)?;

        Ok(format!("{}/{}/{}", UPLOAD_PREFIX, day, file_name))
    }

    fn remove(&self, relative_path: &str) -> AppResult<()> {
        let path = self.absolute(relative_path)?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalImageStorage::new(dir.path());

        let relative = storage.store("png", b"\x89PNG").unwrap();
        assert!(relative.starts_with("uploads/"));
        assert!(relative.ends_with(".png"));

        let absolute = storage.absolute(&relative).unwrap();
        assert_eq!(fs::read(&absolute).unwrap(), b"\x89PNG");

        storage.remove(&relative).unwrap();
        assert!(!absolute.exists());
    }

    #[test]
    fn test_remove_rejects_escaping_paths() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalImageStorage::new(dir.path());
        assert!(storage.remove("uploads/../secret").is_err());
        assert!(storage.remove("/etc/passwd").is_err());
    }
}
