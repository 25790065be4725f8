//! Plain-text normalization shared by every parser.
//!
//! Keyword scoring counts raw substrings, so the text it sees has to be in a
//! single canonical form: lowercase, with every run of whitespace replaced by
//! one space and no leading or trailing whitespace.

/// Lowercases text and collapses all whitespace runs to a single space
///
/// Applying this to its own output returns the same string.
pub fn normalize(text: &str) -> String {
    normalize_whitespace_in_segment(text).to_lowercase()
}

/// Normalizes whitespace within a single line or paragraph
pub fn normalize_whitespace_in_segment(segment: &str) -> String {
    segment.split_whitespace().collect::<Vec<_>>().join(" ")
}
