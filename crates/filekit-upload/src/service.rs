//! Multipart upload service
//!
//! Every file part is sniffed, checked against the allow-list, named and then stored. Parts are
//! handled one at a time in request order, so the returned files line up with the order of the
//! file parts in the request body.

use std::path::Path;

use axum::extract::Request;
use bytes::Bytes;
use filekit_core::{ToolkitError, UploadConfig};
use filekit_storage::LocalStorage;
use futures::Stream;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use multer::{Constraints, Field, Multipart, SizeLimit};

use crate::naming::{base_file_name, destination_name};
use crate::sniff::{detect_content_type, SNIFF_LEN};
use crate::types::UploadedFile;

/// Upload pipeline bound to one `UploadConfig`
///
/// Holds no state besides its configuration, so one instance can serve concurrent requests.
#[derive(Clone, Debug, Default)]
pub struct Uploader {
    config: UploadConfig,
}

/// Leading bytes of a file part read for sniffing
struct SniffedHead {
    bytes: Vec<u8>,
    /// The part ended within the sniffed bytes
    complete: bool,
}

impl Uploader {
    pub fn new(config: UploadConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Store every file part of a multipart request in `destination`.
    ///
    /// A request without file parts yields an empty list. Non-file form fields are ignored.
    ///
    /// With `rename` set, stored names are random strings carrying the original extension.
    /// Without it the client's base file name is used, and the caller is responsible for
    /// deciding whether that name is acceptable (see `naming::sanitize_filename`); uploads
    /// sharing a name overwrite each other.
    pub async fn upload_files(
        &self,
        request: Request,
        destination: impl AsRef<Path>,
        rename: bool,
    ) -> Result<Vec<UploadedFile>, ToolkitError> {
        let (parts, body) = request.into_parts();

        let content_type = parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                ToolkitError::InvalidMultipart("Missing Content-Type header".to_string())
            })?;

        let content_length = parts
            .headers
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        self.upload_stream(
            content_type,
            content_length,
            body.into_data_stream(),
            destination,
            rename,
        )
        .await
    }

    /// Store the file parts of a request and return the first one.
    ///
    /// Fails with `ToolkitError::NoFileProvided` when the request has no file part.
    pub async fn upload_one_file(
        &self,
        request: Request,
        destination: impl AsRef<Path>,
        rename: bool,
    ) -> Result<UploadedFile, ToolkitError> {
        self.upload_files(request, destination, rename)
            .await?
            .into_iter()
            .next()
            .ok_or(ToolkitError::NoFileProvided)
    }

    /// Store every file part of a raw multipart body.
    ///
    /// `content_type` is the request's `multipart/form-data` header value and is only used to
    /// find the boundary. `content_length`, when known, lets oversized bodies be refused before
    /// anything is read.
    pub async fn upload_stream<S, O, E>(
        &self,
        content_type: &str,
        content_length: Option<u64>,
        body: S,
        destination: impl AsRef<Path>,
        rename: bool,
    ) -> Result<Vec<UploadedFile>, ToolkitError>
    where
        S: Stream<Item = Result<O, E>> + Send + 'static,
        O: Into<Bytes> + 'static,
        E: Into<Box<dyn std::error::Error + Send + Sync>> + 'static,
    {
        let limit = self.config.max_upload_size;

        if let Some(length) = content_length {
            if self.config.is_size_limited() && length > limit {
                tracing::warn!(
                    content_length = length,
                    limit = limit,
                    "Rejected upload exceeding size limit"
                );
                return Err(ToolkitError::UploadTooLarge { limit });
            }
        }

        let boundary = multer::parse_boundary(content_type)
            .map_err(|e| ToolkitError::InvalidMultipart(e.to_string()))?;

        let constraints = if self.config.is_size_limited() {
            Constraints::new().size_limit(SizeLimit::new().whole_stream(limit))
        } else {
            Constraints::new()
        };

        let mut multipart = Multipart::with_constraints(body, boundary, constraints);
        let storage = LocalStorage::new(destination.as_ref());
        let mut written = Vec::new();

        match self
            .store_parts(&mut multipart, &storage, rename, &mut written)
            .await
        {
            Ok(files) => Ok(files),
            Err(err) => {
                if self.config.cleanup_on_error {
                    discard(&storage, &written).await;
                } else if !written.is_empty() {
                    tracing::warn!(
                        files = written.len(),
                        error = %err,
                        "Upload failed; files stored earlier in the request were kept"
                    );
                }
                Err(err)
            }
        }
    }

    /// Process file parts in order. Every name created on disk is pushed to `written` before
    /// any byte is written, so a failing call knows what to clean up.
    async fn store_parts(
        &self,
        multipart: &mut Multipart<'static>,
        storage: &LocalStorage,
        rename: bool,
        written: &mut Vec<String>,
    ) -> Result<Vec<UploadedFile>, ToolkitError> {
        let mut files = Vec::new();

        while let Some(mut field) = multipart
            .next_field()
            .await
            .map_err(|e| self.multipart_error(e))?
        {
            let client_name = match field.file_name() {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => {
                    tracing::debug!(
                        field = field.name().unwrap_or_default(),
                        "Skipping non-file multipart field"
                    );
                    continue;
                }
            };

            let original_file_name = base_file_name(&client_name)
                .ok_or_else(|| ToolkitError::InvalidFileName(client_name.clone()))?
                .to_string();

            let head = self.read_head(&mut field).await?;
            let content_type = detect_content_type(&head.bytes);

            tracing::debug!(
                file_name = %original_file_name,
                content_type = %content_type,
                "Sniffed upload content type"
            );

            if !self.config.is_allowed(&content_type) {
                tracing::warn!(
                    file_name = %original_file_name,
                    content_type = %content_type,
                    "Rejected upload with disallowed content type"
                );
                return Err(ToolkitError::UnsupportedFileType {
                    content_type,
                    file_name: original_file_name,
                });
            }

            let new_file_name =
                destination_name(&original_file_name, rename, self.config.rename_length);

            let mut staged = storage.create(&new_file_name).await?;
            written.push(new_file_name.clone());

            staged.write(&head.bytes).await?;
            if !head.complete {
                while let Some(chunk) = field.chunk().await.map_err(|e| self.multipart_error(e))? {
                    staged.write(&chunk).await?;
                }
            }
            let file_size = staged.finish().await?;

            tracing::info!(
                original_file_name = %original_file_name,
                new_file_name = %new_file_name,
                content_type = %content_type,
                size_bytes = file_size,
                "Stored uploaded file"
            );

            files.push(UploadedFile {
                original_file_name,
                new_file_name,
                file_size: i64::try_from(file_size).unwrap_or(i64::MAX),
                content_type,
            });
        }

        Ok(files)
    }

    /// Read at least `SNIFF_LEN` bytes of the part (or all of it, if shorter).
    async fn read_head(&self, field: &mut Field<'static>) -> Result<SniffedHead, ToolkitError> {
        let mut bytes = Vec::with_capacity(SNIFF_LEN);

        while bytes.len() < SNIFF_LEN {
            match field.chunk().await.map_err(|e| self.multipart_error(e))? {
                Some(chunk) => bytes.extend_from_slice(&chunk),
                None => {
                    return Ok(SniffedHead {
                        bytes,
                        complete: true,
                    })
                }
            }
        }

        Ok(SniffedHead {
            bytes,
            complete: false,
        })
    }

    fn multipart_error(&self, err: multer::Error) -> ToolkitError {
        match err {
            multer::Error::StreamSizeExceeded { .. } | multer::Error::FieldSizeExceeded { .. } => {
                tracing::warn!(
                    limit = self.config.max_upload_size,
                    "Upload body exceeded size limit"
                );
                ToolkitError::UploadTooLarge {
                    limit: self.config.max_upload_size,
                }
            }
            other => ToolkitError::InvalidMultipart(other.to_string()),
        }
    }
}

/// Best-effort removal of files written by a failed call.
async fn discard(storage: &LocalStorage, names: &[String]) {
    for name in names {
        if let Err(e) = storage.remove(name).await {
            tracing::warn!(
                error = %e,
                file_name = %name,
                "Failed to remove file from aborted upload"
            );
        }
    }
}
