//! Error types for taskmaster-storage.

use std::path::PathBuf;

use thiserror::Error;

use taskmaster_core::StoreError;

/// All errors that can arise from reading or writing persisted files.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Nothing exists at the path yet. Expected on first run.
    #[error("no file at {path}")]
    NotFound { path: PathBuf },

    /// The file exists but its contents cannot be used.
    #[error("file at {path} could not be loaded: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: CorruptData,
    },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error (write path).
    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, StorageError::Corrupt { .. })
    }
}

/// Why a present file was rejected.
#[derive(Debug, Error)]
pub enum CorruptData {
    /// Not valid JSON, or JSON of the wrong shape.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Well-formed, but violates a store invariant (duplicate id, dangling assignment, ...).
    #[error("invalid data: {0}")]
    Invalid(#[from] StoreError),
}

/// Convenience constructor for [`StorageError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.into(),
        source,
    }
}

/// Convenience constructor for [`StorageError::Corrupt`].
pub(crate) fn corrupt(path: impl Into<PathBuf>, source: impl Into<CorruptData>) -> StorageError {
    StorageError::Corrupt {
        path: path.into(),
        source: source.into(),
    }
}
