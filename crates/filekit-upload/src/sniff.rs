//! Content type detection from file bytes

/// Number of leading bytes inspected to decide a content type
pub const SNIFF_LEN: usize = 512;

pub const OCTET_STREAM: &str = "application/octet-stream";
pub const PLAIN_TEXT: &str = "text/plain; charset=utf-8";

/// Detect the content type of `data` from its first `SNIFF_LEN` bytes.
///
/// Known binary signatures are matched first. Data without a signature is reported as
/// UTF-8 plain text unless it contains control bytes that never appear in text, in which
/// case it is `application/octet-stream`.
pub fn detect_content_type(data: &[u8]) -> String {
    let head = &data[..data.len().min(SNIFF_LEN)];

    if let Some(kind) = infer::get(head) {
        return kind.mime_type().to_string();
    }

    if looks_like_text(head) {
        PLAIN_TEXT.to_string()
    } else {
        OCTET_STREAM.to_string()
    }
}

fn looks_like_text(data: &[u8]) -> bool {
    !data
        .iter()
        .any(|&b| matches!(b, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F))
}
