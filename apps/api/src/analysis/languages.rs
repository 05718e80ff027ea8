//! Spoken-language detection with optional proficiency annotations.
//!
//! The detector never guesses: only names from the fixed list below are
//! reported, and only when they literally occur in the input.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

use crate::analysis::normalize::capitalize;

/// Recognized language names. Matching is whole-word and case-insensitive.
static LANGUAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(english|tamil|hindi|telugu|malayalam|kannada|french|german|spanish|marathi|bengali|punjabi|gujarati|urdu|oriya|nepali)\b\s*(\([^)]*\))?",
    )
    .expect("valid language regex")
});

static LIST_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,;/]| and ").expect("valid separator regex"));

/// A detected language plus an optional proficiency qualifier. The
/// proficiency is the parenthetical that immediately follows the name,
/// uppercased with parentheses and internal whitespace removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedLanguage {
    pub name: String,
    pub proficiency: Option<String>,
}

impl ExtractedLanguage {
    /// Display form: `"English FLUENT"` or `"English"`.
    pub fn rendered(&self) -> String {
        match &self.proficiency {
            Some(p) => format!("{} {}", self.name, p),
            None => self.name.clone(),
        }
    }
}

/// Scans text for recognized language names. Duplicate renderings are
/// dropped; order of first occurrence is preserved. Empty input yields an
/// empty sequence.
pub fn normalize_languages(text: &str) -> Vec<ExtractedLanguage> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let lower = text.to_lowercase();
    let mut seen = HashSet::new();
    let mut results = Vec::new();
    for caps in LANGUAGE_RE.captures_iter(&lower) {
        let name = capitalize(&caps[1]);
        let proficiency = caps
            .get(2)
            .map(|m| {
                m.as_str()
                    .trim_start_matches('(')
                    .trim_end_matches(')')
                    .to_uppercase()
                    .split_whitespace()
                    .collect::<String>()
            })
            .filter(|p| !p.is_empty());
        let lang = ExtractedLanguage { name, proficiency };
        if seen.insert(lang.rendered()) {
            results.push(lang);
        }
    }
    results
}

/// Sequence input: items are joined with single spaces before matching.
pub fn normalize_language_list<S: AsRef<str>>(items: &[S]) -> Vec<ExtractedLanguage> {
    let joined = items
        .iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    normalize_languages(&joined)
}

/// Loose-input entry point for model output: accepts a string (split on
/// `,`/`;`/`/` and the word "and"), an array (items coerced to strings), or
/// anything else (best-effort string conversion). Never fails.
pub fn languages_from_value(value: &Value) -> Vec<ExtractedLanguage> {
    match value {
        Value::Null => Vec::new(),
        Value::String(s) => {
            let parts: Vec<&str> = LIST_SEPARATOR.split(s).collect();
            normalize_language_list(&parts)
        }
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect();
            normalize_language_list(&parts)
        }
        other => normalize_languages(&other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rendered(langs: &[ExtractedLanguage]) -> Vec<String> {
        langs.iter().map(|l| l.rendered()).collect()
    }

    #[test]
    fn test_duplicate_rendering_collapsed() {
        let langs = normalize_languages("English (Fluent), English (Fluent)");
        assert_eq!(rendered(&langs), vec!["English FLUENT"]);
    }

    #[test]
    fn test_empty_inputs_yield_empty() {
        assert!(normalize_languages("").is_empty());
        assert!(normalize_languages("   ").is_empty());
        assert!(normalize_language_list::<&str>(&[]).is_empty());
        assert!(languages_from_value(&Value::Null).is_empty());
    }

    #[test]
    fn test_proficiency_uppercased_and_stripped() {
        let langs = normalize_languages("Hindi (Native  Speaker)");
        assert_eq!(rendered(&langs), vec!["Hindi NATIVESPEAKER"]);
    }

    #[test]
    fn test_first_distinct_rendering_wins() {
        // Same language with differing annotations keeps both renderings,
        // but the exact repeat is dropped.
        let langs = normalize_languages("Tamil (Fluent), Tamil, Tamil (Fluent)");
        assert_eq!(rendered(&langs), vec!["Tamil FLUENT", "Tamil"]);
    }

    #[test]
    fn test_whole_word_matching() {
        // "germane" must not match "german"
        assert!(normalize_languages("a germane point").is_empty());
        assert_eq!(
            rendered(&normalize_languages("Fluent in German.")),
            vec!["German"]
        );
    }

    #[test]
    fn test_sequence_input_joined() {
        let langs = normalize_language_list(&["English (Fluent)", "", "Tamil"]);
        assert_eq!(rendered(&langs), vec!["English FLUENT", "Tamil"]);
    }

    #[test]
    fn test_loose_value_inputs() {
        let from_string = languages_from_value(&json!("English and Hindi; Tamil"));
        assert_eq!(rendered(&from_string), vec!["English", "Hindi", "Tamil"]);

        let from_array = languages_from_value(&json!(["English (Fluent)", 42, null]));
        assert_eq!(rendered(&from_array), vec!["English FLUENT"]);
    }

    #[test]
    fn test_unknown_language_never_guessed() {
        assert!(normalize_languages("Fluent in Klingon and Esperanto").is_empty());
    }

    #[test]
    fn test_empty_parenthetical_ignored() {
        let langs = normalize_languages("English ()");
        assert_eq!(rendered(&langs), vec!["English"]);
    }
}
