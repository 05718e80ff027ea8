//! Whitespace normalization and small text utilities shared by the
//! extraction and scoring passes.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Collapses every whitespace run (spaces, tabs, newlines) into a single
/// space and trims both ends. Empty or all-whitespace input yields an empty
/// string. Idempotent: normalizing already-normalized text is a no-op.
pub fn normalize_text(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// First character uppercased, the rest lowercased ("mysql" → "Mysql").
/// Display form used for extracted skill and language names.
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Whole-word containment: `phrase` must appear in `text` with no
/// alphanumeric character directly before or after it. Used for canonical
/// and alias matching where plain substring search would hit inside longer
/// words ("java" inside "javascript", "r" inside almost anything).
pub(crate) fn contains_word(text: &str, phrase: &str) -> bool {
    if phrase.is_empty() {
        return false;
    }
    let mut from = 0;
    while let Some(pos) = text[from..].find(phrase) {
        let start = from + pos;
        let end = start + phrase.len();
        let before_ok = text[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = text[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return true;
        }
        from = end.max(start + 1);
    }
    false
}
