//! Types returned by the upload pipeline

use serde::{Deserialize, Serialize};

/// A file stored by the upload pipeline
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Base name supplied by the client; untrusted
    pub original_file_name: String,
    /// Name of the file inside the destination directory
    pub new_file_name: String,
    /// Bytes written to disk
    pub file_size: i64,
    /// Content type sniffed from the file's leading bytes
    pub content_type: String,
}
