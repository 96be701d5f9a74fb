//! Storage service implementation using Apache OpenDAL.

use std::path::PathBuf;

use opendal::{ErrorKind, Operator, services};

use super::error::StorageError;

/// File extensions accepted for document upload.
pub const ALLOWED_EXTENSIONS: [&str; 6] = ["pdf", "doc", "docx", "jpg", "jpeg", "png"];

/// Storage service for document files.
#[derive(Debug, Clone)]
pub struct StorageService {
    operator: Operator,
}

impl StorageService {
    /// Create a storage service rooted at the configured upload directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the filesystem backend cannot be initialized.
    pub fn from_root(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root: PathBuf = root.into();
        std::fs::create_dir_all(&root)
            .map_err(|e| StorageError::configuration(e.to_string()))?;
        let builder = services::Fs::default().root(
            root.to_str()
                .ok_or_else(|| StorageError::configuration("invalid upload directory path"))?,
        );

        let operator = Operator::new(builder)
            .map_err(|e| StorageError::configuration(e.to_string()))?
            .finish();

        Ok(Self { operator })
    }

    /// Validate that a filename carries an allowed extension.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::ExtensionNotAllowed` otherwise.
    pub fn validate_filename(filename: &str) -> Result<(), StorageError> {
        match file_extension(filename) {
            Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
            Some(ext) => Err(StorageError::extension_not_allowed(ext)),
            None => Err(StorageError::extension_not_allowed("")),
        }
    }

    /// Write file bytes under `key`. An existing file is overwritten
    /// (last write wins).
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn write(&self, key: &str, data: Vec<u8>) -> Result<(), StorageError> {
        self.operator
            .write(key, data)
            .await
            .map(|_| ())
            .map_err(StorageError::from)
    }

    /// Read file bytes stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the file does not exist.
    pub async fn read(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let buffer = self.operator.read(key).await.map_err(StorageError::from)?;
        Ok(buffer.to_vec())
    }

    /// Remove the file stored under `key`. A file already missing on disk is
    /// a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails for any other reason.
    pub async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match self.operator.delete(key).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::from(e)),
        }
    }

    /// Check if a file exists in storage.
    pub async fn exists(&self, key: &str) -> bool {
        match self.operator.stat(key).await {
            Ok(_) => true,
            Err(_) => false,
        }
    }
}

/// Lowercased extension of `filename`, without the dot.
#[must_use]
pub fn file_extension(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Sanitize filename for use as a storage key.
///
/// Only allows ASCII alphanumeric characters, dots, hyphens, and underscores.
#[must_use]
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
