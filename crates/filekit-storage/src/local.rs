use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::dir::create_dir_if_not_exist;
use crate::error::{StorageError, StorageResult};

/// Local filesystem storage rooted at one destination directory
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a storage handle for `base_path`.
    ///
    /// The directory is not touched here; it is created on demand before each file.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Convert a file name to a path inside the base directory.
    ///
    /// Only bare names are accepted, which keeps every stored file directly inside
    /// `base_path`.
    fn name_to_path(&self, name: &str) -> StorageResult<PathBuf> {
        let is_bare = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\', '\0']);

        if !is_bare {
            return Err(StorageError::InvalidName(name.to_string()));
        }

        Ok(self.base_path.join(name))
    }

    /// Open `name` for writing, creating the base directory first if needed.
    ///
    /// An existing file with the same name is truncated.
    pub async fn create(&self, name: &str) -> StorageResult<StagedFile> {
        let path = self.name_to_path(name)?;

        create_dir_if_not_exist(&self.base_path).await?;

        let file = fs::File::create(&path)
            .await
            .map_err(|e| StorageError::io("create file", &path, e))?;

        Ok(StagedFile {
            file,
            path,
            written: 0,
            started: Instant::now(),
        })
    }

    /// Delete `name`; a file that is already gone is not an error.
    pub async fn remove(&self, name: &str) -> StorageResult<()> {
        let path = self.name_to_path(name)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Removed stored file");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io("remove file", &path, e)),
        }
    }

    pub async fn exists(&self, name: &str) -> StorageResult<bool> {
        let path = self.name_to_path(name)?;
        fs::try_exists(&path)
            .await
            .map_err(|e| StorageError::io("inspect file", &path, e))
    }
}

/// A file being written by `LocalStorage::create`
#[derive(Debug)]
pub struct StagedFile {
    file: fs::File,
    path: PathBuf,
    written: u64,
    started: Instant,
}

impl StagedFile {
    pub async fn write(&mut self, chunk: &[u8]) -> StorageResult<()> {
        self.file
            .write_all(chunk)
            .await
            .map_err(|e| StorageError::io("write file", &self.path, e))?;
        self.written += chunk.len() as u64;
        Ok(())
    }

    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and sync the file, returning the number of bytes written.
    pub async fn finish(mut self) -> StorageResult<u64> {
        self.file
            .flush()
            .await
            .map_err(|e| StorageError::io("flush file", &self.path, e))?;
        self.file
            .sync_all()
            .await
            .map_err(|e| StorageError::io("sync file", &self.path, e))?;

        tracing::info!(
            path = %self.path.display(),
            size_bytes = self.written,
            duration_ms = self.started.elapsed().as_secs_f64() * 1000.0,
            "Local storage write successful"
        );

        Ok(self.written)
    }
}
