//! Storage operation errors

use std::io;
use std::path::PathBuf;

use filekit_core::ToolkitError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} exists and is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("Invalid file name: {0}")]
    InvalidName(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl StorageError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        StorageError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

impl From<StorageError> for ToolkitError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io {
                action,
                path,
                source,
            } => ToolkitError::filesystem(
                format!("Failed to {} {}", action, path.display()),
                source,
            ),
            StorageError::NotADirectory(path) => ToolkitError::filesystem(
                format!("{} is not a directory", path.display()),
                io::Error::new(io::ErrorKind::AlreadyExists, "path exists and is not a directory"),
            ),
            StorageError::InvalidName(name) => ToolkitError::InvalidFileName(name),
        }
    }
}
