//! Filekit Upload Library
//!
//! Ingests `multipart/form-data` uploads into a local directory. Each file part is sniffed
//! from its leading bytes (the client-supplied part `Content-Type` is ignored), checked against
//! the configured allow-list, optionally renamed, and streamed to disk.
//!
//! ```no_run
//! use axum::extract::Request;
//! use filekit_upload::{UploadConfig, Uploader};
//!
//! async fn handle(request: Request) -> Result<(), filekit_upload::ToolkitError> {
//!     let uploader = Uploader::new(
//!         UploadConfig::default()
//!             .with_allowed_mime_types(["image/png", "image/jpeg"])
//!             .with_max_upload_size(10 * 1024 * 1024),
//!     );
//!     let files = uploader.upload_files(request, "./uploads", true).await?;
//!     for file in files {
//!         println!("{} -> {}", file.original_file_name, file.new_file_name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod naming;
pub mod service;
pub mod sniff;
pub mod types;

pub use filekit_core::{
    random_string, slugify, ErrorMetadata, LogLevel, ToolkitError, UploadConfig,
};
pub use filekit_storage::create_dir_if_not_exist;
pub use service::Uploader;
pub use sniff::detect_content_type;
pub use types::UploadedFile;
