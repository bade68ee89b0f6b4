//! Record store error types.

use std::path::PathBuf;

use curio_core::CoreError;
use thiserror::Error;

/// Errors raised while loading or writing record files.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a file or directory failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Record-level failure (malformed document, duplicate name).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A new record would overwrite an existing file.
    #[error("Record file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// An entity could not be serialized to YAML.
    #[error("Failed to serialize record: {0}")]
    Serialize(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
