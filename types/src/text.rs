//! Small pure text helpers.

/// Keeps at most `max` characters of `s`.
///
/// Counts `char`s rather than bytes so multi-byte names are never split.
#[must_use]
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
