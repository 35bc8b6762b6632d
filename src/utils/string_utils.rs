//! Text cleanup for values scraped out of the maps DOM
//!
//! Place names come back from several places (heading, aria-label, Open
//! Graph, document title) with invisible direction marks, stray separators
//! and truncation ellipses. Everything funnels through `normalize_place_text`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Zero-width and bidi control characters Google sprinkles into labels
const INVISIBLE_CHARS: [char; 10] = [
    '\u{200b}', '\u{200c}', '\u{200d}', '\u{200e}', '\u{200f}', '\u{2066}', '\u{2067}',
    '\u{2068}', '\u{2069}', '\u{feff}',
];

/// Characters trimmed from both ends of a name
const EDGE_CHARS: [char; 8] = [' ', '\n', '\t', '·', '-', '|', '—', '–'];

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

static TRAILING_ELLIPSIS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(…|\.{3})$").expect("Invalid ellipsis regex"));

/// Remove zero-width and direction-control characters.
#[must_use]
pub fn strip_invisible(s: &str) -> String {
    s.chars().filter(|c| !INVISIBLE_CHARS.contains(c)).collect()
}

/// Whether a (raw) label was cut off by the UI.
#[must_use]
pub fn is_truncated(s: &str) -> bool {
    let s = strip_invisible(s);
    let s = s.trim_end();
    s.ends_with('…') || s.ends_with("...")
}

/// Normalize a candidate place name.
///
/// Strips invisible characters, trims separators and dashes from both ends,
/// collapses internal whitespace and finally drops a trailing ellipsis.
#[must_use]
pub fn normalize_place_text(s: &str) -> String {
    let s = strip_invisible(s);
    let s = s.trim_matches(|c| EDGE_CHARS.contains(&c));
    let s = WHITESPACE_RUN.replace_all(s, " ");
    TRAILING_ELLIPSIS.replace(&s, "").trim().to_string()
}

/// Safely truncate a string to a maximum number of characters (not bytes).
///
/// Used for log previews of review text, which is mostly Cyrillic.
#[inline]
#[must_use]
pub fn safe_truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        None => s,
        Some((byte_idx, _)) => &s[..byte_idx],
    }
}
