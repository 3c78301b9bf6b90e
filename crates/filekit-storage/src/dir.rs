//! Idempotent directory creation

use std::io;
use std::path::Path;

use tokio::fs;

use crate::error::{StorageError, StorageResult};

/// Permission mode for directories created on Unix
pub const DIR_MODE: u32 = 0o755;

/// Make sure `path` exists as a directory, creating it and any missing parents.
///
/// An existing directory is left untouched. Losing a creation race to another caller is not
/// an error: "already exists" from the create call counts as success as long as the path
/// really is a directory afterwards.
pub async fn create_dir_if_not_exist(path: impl AsRef<Path>) -> StorageResult<()> {
    let path = path.as_ref();

    match fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => return Ok(()),
        Ok(_) => return Err(StorageError::NotADirectory(path.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(StorageError::io("inspect directory", path, e)),
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(DIR_MODE);

    match builder.create(path).await {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "Created directory");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            if is_dir(path).await {
                Ok(())
            } else {
                Err(StorageError::NotADirectory(path.to_path_buf()))
            }
        }
        Err(e) => Err(StorageError::io("create directory", path, e)),
    }
}

async fn is_dir(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}
