//! Filekit Storage Library
//!
//! Local filesystem persistence for uploads: idempotent directory creation and a
//! streaming file writer rooted in a destination directory.
//!
//! # File names
//!
//! `LocalStorage` only accepts bare file names. Names containing path separators, `.` or
//! `..` are rejected so a stored file can never land outside the destination directory.

pub mod dir;
pub mod error;
pub mod local;

pub use dir::{create_dir_if_not_exist, DIR_MODE};
pub use error::{StorageError, StorageResult};
pub use local::{LocalStorage, StagedFile};
