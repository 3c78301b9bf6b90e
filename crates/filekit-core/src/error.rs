//! Error types module
//!
//! Every fallible filekit operation returns a `ToolkitError`. The library never builds HTTP
//! responses itself; instead each variant describes how a web caller should present it
//! through the `ErrorMetadata` trait (status code, machine-readable code, client message).

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like rejected uploads
    Debug,
    /// Warning level - for limits being hit
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// by the HTTP layer that calls into this library.
pub trait ErrorMetadata {
    /// HTTP status code a web caller should return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "UNSUPPORTED_FILE_TYPE")
    fn error_code(&self) -> &'static str;

    /// Whether retrying the same request can succeed
    fn is_recoverable(&self) -> bool;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden from clients
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum ToolkitError {
    #[error("Unsupported file type {content_type} for file {file_name}")]
    UnsupportedFileType {
        content_type: String,
        file_name: String,
    },

    #[error("Upload exceeds the maximum size of {limit} bytes")]
    UploadTooLarge { limit: u64 },

    #[error("Filesystem error: {message}")]
    Filesystem {
        message: String,
        #[source]
        source: io::Error,
    },

    #[error("No file provided")]
    NoFileProvided,

    #[error("Slug is empty")]
    EmptyResult,

    #[error("Invalid multipart request: {0}")]
    InvalidMultipart(String),

    #[error("Invalid file name: {0}")]
    InvalidFileName(String),
}

impl ToolkitError {
    /// Wrap an I/O failure with a description of what was being attempted.
    pub fn filesystem(message: impl Into<String>, source: io::Error) -> Self {
        ToolkitError::Filesystem {
            message: message.into(),
            source,
        }
    }

    /// Get the error type name for logs
    pub fn error_type(&self) -> &'static str {
        match self {
            ToolkitError::UnsupportedFileType { .. } => "UnsupportedFileType",
            ToolkitError::UploadTooLarge { .. } => "UploadTooLarge",
            ToolkitError::Filesystem { .. } => "Filesystem",
            ToolkitError::NoFileProvided => "NoFileProvided",
            ToolkitError::EmptyResult => "EmptyResult",
            ToolkitError::InvalidMultipart(_) => "InvalidMultipart",
            ToolkitError::InvalidFileName(_) => "InvalidFileName",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, sensitive, log_level).
fn toolkit_error_static_metadata(err: &ToolkitError) -> (u16, &'static str, bool, bool, LogLevel) {
    match err {
        ToolkitError::UnsupportedFileType { .. } => {
            (415, "UNSUPPORTED_FILE_TYPE", false, false, LogLevel::Debug)
        }
        ToolkitError::UploadTooLarge { .. } => {
            (413, "UPLOAD_TOO_LARGE", false, false, LogLevel::Warn)
        }
        ToolkitError::Filesystem { .. } => (500, "FILESYSTEM_ERROR", true, true, LogLevel::Error),
        ToolkitError::NoFileProvided => (400, "NO_FILE_PROVIDED", false, false, LogLevel::Debug),
        ToolkitError::EmptyResult => (422, "EMPTY_SLUG", false, false, LogLevel::Debug),
        ToolkitError::InvalidMultipart(_) => {
            (400, "INVALID_MULTIPART", false, false, LogLevel::Debug)
        }
        ToolkitError::InvalidFileName(_) => {
            (400, "INVALID_FILE_NAME", false, false, LogLevel::Debug)
        }
    }
}

impl ErrorMetadata for ToolkitError {
    fn http_status_code(&self) -> u16 {
        toolkit_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        toolkit_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        toolkit_error_static_metadata(self).2
    }

    fn is_sensitive(&self) -> bool {
        toolkit_error_static_metadata(self).3
    }

    fn log_level(&self) -> LogLevel {
        toolkit_error_static_metadata(self).4
    }

    fn client_message(&self) -> String {
        match self {
            ToolkitError::UnsupportedFileType { content_type, .. } => {
                format!("The uploaded file type {} is not permitted", content_type)
            }
            ToolkitError::UploadTooLarge { limit } => {
                format!("The upload exceeds the maximum size of {} bytes", limit)
            }
            ToolkitError::Filesystem { .. } => "Failed to store the uploaded file".to_string(),
            ToolkitError::NoFileProvided => "No file was provided".to_string(),
            ToolkitError::EmptyResult => {
                "The text does not contain any characters usable in a slug".to_string()
            }
            ToolkitError::InvalidMultipart(ref msg) => msg.clone(),
            ToolkitError::InvalidFileName(ref name) => format!("Invalid file name: {}", name),
        }
    }
}
