//! Configuration module
//!
//! `UploadConfig` is an explicit value handed to every upload pipeline instance; there is no
//! process-wide configuration. It can be built in code or loaded from `FILEKIT_*` environment
//! variables.

use serde::Deserialize;

/// Sentinel meaning "no upload size limit"
pub const UNBOUNDED_UPLOAD_SIZE: u64 = u64::MAX;
/// Length of randomized file base names
pub const DEFAULT_RENAME_LENGTH: usize = 25;

const ENV_PREFIX: &str = "FILEKIT_";

/// Upload policy for one pipeline
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Maximum request body size in bytes; `UNBOUNDED_UPLOAD_SIZE` disables the check
    pub max_upload_size: u64,
    /// Allowed sniffed MIME types; empty allows any type
    pub allowed_mime_types: Vec<String>,
    /// Length of the random base name used when renaming uploads
    pub rename_length: usize,
    /// Remove files already written by a call when that call fails.
    ///
    /// Removal is by name: without rename, it can delete a same-named file that a concurrent
    /// request stored in the meantime.
    pub cleanup_on_error: bool,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_upload_size: UNBOUNDED_UPLOAD_SIZE,
            allowed_mime_types: Vec::new(),
            rename_length: DEFAULT_RENAME_LENGTH,
            cleanup_on_error: true,
        }
    }
}

impl UploadConfig {
    /// Load configuration from the environment (and `.env` when present).
    ///
    /// Reads `FILEKIT_MAX_UPLOAD_SIZE`, `FILEKIT_ALLOWED_MIME_TYPES` (comma-separated),
    /// `FILEKIT_RENAME_LENGTH` and `FILEKIT_CLEANUP_ON_ERROR`. Unset variables keep their
    /// defaults.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let config: UploadConfig = envy::prefixed(ENV_PREFIX)
            .from_env()
            .map_err(|e| anyhow::anyhow!("Invalid upload configuration: {}", e))?;

        let config = config.normalized();
        config.validate()?;
        Ok(config)
    }

    pub fn with_max_upload_size(mut self, max_upload_size: u64) -> Self {
        self.max_upload_size = max_upload_size;
        self
    }

    pub fn with_allowed_mime_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_mime_types = types.into_iter().map(Into::into).collect();
        self.normalized()
    }

    pub fn with_rename_length(mut self, rename_length: usize) -> Self {
        self.rename_length = rename_length;
        self
    }

    pub fn with_cleanup_on_error(mut self, cleanup_on_error: bool) -> Self {
        self.cleanup_on_error = cleanup_on_error;
        self
    }

    /// Whether a size limit is in force
    pub fn is_size_limited(&self) -> bool {
        self.max_upload_size != UNBOUNDED_UPLOAD_SIZE
    }

    /// Check a sniffed content type against the allow-list.
    ///
    /// Only the MIME essence is compared, so `text/plain; charset=utf-8` matches an entry of
    /// `text/plain` and parameters cannot be used to slip past the list.
    pub fn is_allowed(&self, content_type: &str) -> bool {
        if self.allowed_mime_types.is_empty() {
            return true;
        }
        let essence = mime_essence(content_type);
        self.allowed_mime_types
            .iter()
            .any(|allowed| mime_essence(allowed) == essence)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_upload_size == 0 {
            return Err(anyhow::anyhow!(
                "FILEKIT_MAX_UPLOAD_SIZE must be greater than zero"
            ));
        }
        if self.rename_length == 0 {
            return Err(anyhow::anyhow!(
                "FILEKIT_RENAME_LENGTH must be greater than zero"
            ));
        }
        Ok(())
    }

    fn normalized(mut self) -> Self {
        let mut types: Vec<String> = self
            .allowed_mime_types
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        types.sort();
        types.dedup();
        self.allowed_mime_types = types;
        self
    }
}

/// Normalize MIME type by stripping parameters (e.g. "image/jpeg; q=1" -> "image/jpeg").
fn mime_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_lowercase()
}
