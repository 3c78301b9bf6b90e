//! Random identifiers for renamed uploads.
//!
//! Not suitable for secrets: the output only has to keep file names apart.

use rand::Rng;

const RANDOM_STRING_SOURCE: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_+";

/// Generate a string of exactly `length` characters drawn uniformly from
/// letters, digits, `_` and `+`.
pub fn random_string(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| RANDOM_STRING_SOURCE[rng.random_range(0..RANDOM_STRING_SOURCE.len())] as char)
        .collect()
}
