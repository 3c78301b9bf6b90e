//! URL slugs from arbitrary text.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ToolkitError;

static NON_SLUG_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("slug pattern is a valid regex"));

/// Turn `input` into a lowercase, hyphen-separated ASCII slug.
///
/// Non-ASCII characters are dropped first, never transliterated, so they neither split a word
/// nor turn into ASCII through case folding. The rest is lowercased, every run of characters
/// other than `a-z` and `0-9` collapses into a single hyphen, and hyphens at either end are
/// trimmed. Text made only of non-ASCII characters has no slug and yields
/// `ToolkitError::EmptyResult`.
pub fn slugify(input: &str) -> Result<String, ToolkitError> {
    if input.is_empty() {
        return Err(ToolkitError::EmptyResult);
    }

    let ascii: String = input
        .chars()
        .filter(char::is_ascii)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    let slug = NON_SLUG_RUN
        .replace_all(&ascii, "-")
        .trim_matches('-')
        .to_string();

    if slug.is_empty() {
        return Err(ToolkitError::EmptyResult);
    }

    Ok(slug)
}
