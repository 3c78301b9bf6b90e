//! File naming rules for stored uploads

use filekit_core::{random_string, ToolkitError};

const MAX_FILENAME_LENGTH: usize = 255;

/// Reduce a client-supplied file name to its final path component.
///
/// Browsers may send a full client path (with `/` or `\`); only the last component is kept.
/// Returns `None` when nothing usable is left (empty, `.` or `..`).
pub fn base_file_name(client_name: &str) -> Option<&str> {
    let trimmed = client_name.trim_end_matches(['/', '\\']);
    let base = trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed);

    match base {
        "" | "." | ".." => None,
        base => Some(base),
    }
}

/// Extension of `name` including the leading dot, or `""` when there is none.
///
/// The extension starts at the last `.` in the name, so `archive.tar.gz` yields `.gz`.
pub fn file_extension(name: &str) -> &str {
    name.rfind('.').map(|idx| &name[idx..]).unwrap_or("")
}

/// Pick the stored name for an upload.
///
/// With `rename` the name is `length` random characters followed by the original extension;
/// otherwise the original name is used as is.
pub fn destination_name(original: &str, rename: bool, length: usize) -> String {
    if rename {
        format!("{}{}", random_string(length), file_extension(original))
    } else {
        original.to_string()
    }
}

/// Sanitize a file name for callers that keep original names.
///
/// Characters other than alphanumerics, `.`, `-` and `_` become `_`, and names are capped at
/// 255 characters. Names containing `..` are rejected.
pub fn sanitize_filename(filename: &str) -> Result<String, ToolkitError> {
    let base = base_file_name(filename)
        .ok_or_else(|| ToolkitError::InvalidFileName(filename.to_string()))?;

    if base.contains("..") {
        return Err(ToolkitError::InvalidFileName(filename.to_string()));
    }

    let sanitized: String = base
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    Ok(sanitized)
}
