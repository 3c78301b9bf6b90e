//! Filekit Core Library
//!
//! This crate provides the error types, upload configuration, and the naming helpers
//! (random strings and slugs) shared by the storage and upload crates.

pub mod config;
pub mod error;
pub mod random;
pub mod slug;

pub use config::UploadConfig;
pub use error::{ErrorMetadata, LogLevel, ToolkitError};
pub use random::random_string;
pub use slug::slugify;
