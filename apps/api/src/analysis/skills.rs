//! Skill and keyword extraction.
//!
//! Two strategies:
//! - **Heading-scoped strict mode** (`extract_sections`): only text between a
//!   recognized section heading and the next recognized heading is
//!   considered. A category whose heading never occurs is reported as the
//!   literal `"not found"` marker, never a guessed list.
//! - **Global fallback mode** (`extract_skills_global`): the whole text is
//!   delimiter-split, used by the lightweight scoring path.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::{Serialize, Serializer};
use std::collections::BTreeSet;

use crate::analysis::lexicon::SkillLexicon;
use crate::analysis::normalize::{capitalize, contains_word, normalize_text};

static DELIMITERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,\n;|/•·]").expect("valid delimiter regex"));
static PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s-]").expect("valid punctuation regex"));
static VERSION_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\d+(?:\.\d+)*\b").expect("valid version regex"));

/// Strict-mode result for one category: either the extracted entries (empty
/// means the heading existed but nothing was extractable) or the explicit
/// not-found marker. Serializes as a string list or the literal `"not found"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionOutcome {
    Found(Vec<String>),
    NotFound,
}

impl SectionOutcome {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SectionOutcome::NotFound)
    }
}

impl Serialize for SectionOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SectionOutcome::Found(items) => items.serialize(serializer),
            SectionOutcome::NotFound => serializer.serialize_str("not found"),
        }
    }
}

/// Output of heading-scoped strict extraction.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct StrictExtraction {
    pub technical_skills: SectionOutcome,
    pub areas_of_interest: SectionOutcome,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum HeadingKind {
    Skills,
    Interests,
    Boundary,
}

struct HeadingHit {
    start: usize,
    end: usize,
    kind: HeadingKind,
}

/// Finds every recognized heading occurrence in the lowercased text, sorted
/// by position. Overlapping hits (e.g. "skills" inside "technical skills")
/// keep only the longest match starting earliest.
fn collect_heading_hits(lexicon: &SkillLexicon, lower: &str) -> Vec<HeadingHit> {
    let families = [
        (&lexicon.skill_headings, HeadingKind::Skills),
        (&lexicon.interest_headings, HeadingKind::Interests),
        (&lexicon.boundary_headings, HeadingKind::Boundary),
    ];
    let mut hits = Vec::new();
    for (phrases, kind) in families {
        for phrase in phrases {
            for (start, matched) in lower.match_indices(phrase.as_str()) {
                hits.push(HeadingHit {
                    start,
                    end: start + matched.len(),
                    kind,
                });
            }
        }
    }
    // Longest-first at equal starts, then drop hits nested in a kept one.
    hits.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
    let mut kept: Vec<HeadingHit> = Vec::new();
    let mut cursor = 0usize;
    for hit in hits {
        if hit.start >= cursor {
            cursor = hit.end;
            kept.push(hit);
        }
    }
    kept
}

/// Heading-scoped strict extraction of technical skills and areas of
/// interest. Total: any input yields a result, empty text yields two
/// `NotFound` markers.
pub fn extract_sections(lexicon: &SkillLexicon, text: &str) -> StrictExtraction {
    let lower = text.to_lowercase();
    let hits = collect_heading_hits(lexicon, &lower);

    let mut skills: BTreeSet<String> = BTreeSet::new();
    let mut interests: BTreeSet<String> = BTreeSet::new();
    let mut saw_skill_heading = false;
    let mut saw_interest_heading = false;

    for (i, hit) in hits.iter().enumerate() {
        let bucket = match hit.kind {
            HeadingKind::Skills => {
                saw_skill_heading = true;
                &mut skills
            }
            HeadingKind::Interests => {
                saw_interest_heading = true;
                &mut interests
            }
            HeadingKind::Boundary => continue,
        };
        let section_end = hits.get(i + 1).map_or(lower.len(), |next| next.start);
        let section = &lower[hit.end..section_end];
        for token in tokenize(lexicon, section) {
            bucket.insert(token);
        }
    }

    StrictExtraction {
        technical_skills: outcome(saw_skill_heading, skills),
        areas_of_interest: outcome(saw_interest_heading, interests),
    }
}

fn outcome(heading_seen: bool, entries: BTreeSet<String>) -> SectionOutcome {
    if !heading_seen {
        return SectionOutcome::NotFound;
    }
    SectionOutcome::Found(entries.into_iter().map(|s| capitalize(&s)).collect())
}

/// Global fallback mode: the whole text is delimiter-split regardless of
/// heading context. Result is deduplicated, alphabetically sorted, and
/// capitalized for display.
pub fn extract_skills_global(lexicon: &SkillLexicon, text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let tokens: BTreeSet<String> = tokenize(lexicon, &lower).into_iter().collect();
    tokens.into_iter().map(|s| capitalize(&s)).collect()
}

/// Delimiter-splits a chunk of lowercased text into cleaned, normalized
/// candidate tokens. Tokens shorter than 2 characters after cleaning are
/// discarded.
fn tokenize(lexicon: &SkillLexicon, chunk: &str) -> Vec<String> {
    DELIMITERS
        .split(chunk)
        .filter_map(|raw| clean_token(lexicon, raw))
        .collect()
}

fn clean_token(lexicon: &SkillLexicon, raw: &str) -> Option<String> {
    let stripped = PUNCTUATION.replace_all(raw, " ");
    let collapsed = normalize_text(&stripped);
    if collapsed.chars().count() < 2 {
        return None;
    }
    // "Python 3.8" folds to "python"
    let base = VERSION_SUFFIX.replace_all(&collapsed, "");
    let base = base.trim();
    if base.is_empty() {
        return None;
    }
    let normalized = lexicon.normalize_skill(base);
    if normalized.chars().count() < 2 {
        return None;
    }
    Some(normalized)
}

/// Extracts programming languages by canonical name or alias, whole-word
/// matched. The single-letter name "R" is only accepted with contextual
/// evidence ("r " or " r," literal substrings, or the word "language"
/// anywhere) to avoid false positives from stray letters.
pub fn extract_programming_languages(lexicon: &SkillLexicon, text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut found: BTreeSet<String> = BTreeSet::new();
    for entry in &lexicon.programming {
        let hit = contains_word(&lower, &entry.canonical)
            || entry.aliases.iter().any(|a| contains_word(&lower, a));
        if hit {
            found.insert(capitalize(&entry.canonical));
        }
    }
    if found.contains("R")
        && !(lower.contains("r ") || lower.contains(" r,") || lower.contains("language"))
    {
        found.remove("R");
    }
    found.into_iter().collect()
}

/// Union of programming languages and technical skills, sorted.
pub fn merge_programming_into_technical(
    programming: &[String],
    technical: &[String],
) -> Vec<String> {
    let merged: BTreeSet<String> = technical
        .iter()
        .chain(programming.iter())
        .cloned()
        .collect();
    merged.into_iter().collect()
}

/// Lightweight keyword score: programming languages weigh double, capped at
/// 100.
pub fn compute_keyword_score(skills: usize, programming: usize, interests: usize) -> u32 {
    ((programming * 2 + skills + interests) as u32).min(100)
}

/// Skills block produced by the lightweight text-only parse.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ParsedSkills {
    pub technical: Vec<String>,
    pub programming_languages: Vec<String>,
    pub area_of_interest: Vec<String>,
}

/// Output of [`parse_resume_sections`].
#[derive(Debug, Clone, serde::Serialize)]
pub struct SectionParse {
    pub skills: ParsedSkills,
    pub ats_score: u32,
}

/// Text-only lightweight parse: global-mode skill extraction merged with
/// detected programming languages plus a keyword score. No heading scoping
/// and no model calls.
pub fn parse_resume_sections(lexicon: &SkillLexicon, text: &str) -> SectionParse {
    let programming = extract_programming_languages(lexicon, text);
    let technical = extract_skills_global(lexicon, text);
    let merged = merge_programming_into_technical(&programming, &technical);
    let area_of_interest: Vec<String> = Vec::new();

    let ats_score =
        compute_keyword_score(merged.len(), programming.len(), area_of_interest.len());

    SectionParse {
        skills: ParsedSkills {
            technical: merged,
            programming_languages: programming,
            area_of_interest,
        },
        ats_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> SkillLexicon {
        SkillLexicon::builtin()
    }

    #[test]
    fn test_heading_scoped_extraction_excludes_next_section() {
        let lex = lexicon();
        let text = "TECHNICAL SKILLS\nPython, React, MySQL\nPROJECTS\nBuilt a chat app with Redis";
        let extraction = extract_sections(&lex, text);
        assert_eq!(
            extraction.technical_skills,
            SectionOutcome::Found(vec![
                "Mysql".to_string(),
                "Python".to_string(),
                "React".to_string()
            ])
        );
    }

    #[test]
    fn test_missing_heading_is_not_found_marker() {
        let lex = lexicon();
        let extraction = extract_sections(&lex, "A plain paragraph about nothing in particular.");
        assert!(extraction.technical_skills.is_not_found());
        assert!(extraction.areas_of_interest.is_not_found());
        assert_eq!(
            serde_json::to_value(&extraction.technical_skills).unwrap(),
            serde_json::json!("not found")
        );
    }

    #[test]
    fn test_heading_present_but_empty_yields_empty_list_not_marker() {
        let lex = lexicon();
        let extraction = extract_sections(&lex, "TECHNICAL SKILLS\nEDUCATION\nSome school");
        assert_eq!(extraction.technical_skills, SectionOutcome::Found(vec![]));
    }

    #[test]
    fn test_interest_section_separated_from_skills() {
        let lex = lexicon();
        let text = "TECHNICAL SKILLS: Docker; Kubernetes\nAREAS OF INTEREST: Cloud Computing, DevOps\nEDUCATION\nDegree";
        let extraction = extract_sections(&lex, text);
        assert_eq!(
            extraction.technical_skills,
            SectionOutcome::Found(vec!["Docker".to_string(), "Kubernetes".to_string()])
        );
        assert_eq!(
            extraction.areas_of_interest,
            SectionOutcome::Found(vec!["Cloud computing".to_string(), "Devops".to_string()])
        );
    }

    #[test]
    fn test_alias_and_version_normalization() {
        let lex = lexicon();
        let text = "SKILLS\nPython 3.8, ReactJS | my sql, k8s\nPROJECTS\nthings";
        let extraction = extract_sections(&lex, text);
        assert_eq!(
            extraction.technical_skills,
            SectionOutcome::Found(vec![
                "Kubernetes".to_string(),
                "Mysql".to_string(),
                "Python".to_string(),
                "React".to_string()
            ])
        );
    }

    #[test]
    fn test_short_tokens_discarded() {
        let lex = lexicon();
        let text = "SKILLS\na, b, Go\nPROJECTS\nx";
        let extraction = extract_sections(&lex, text);
        assert_eq!(
            extraction.technical_skills,
            SectionOutcome::Found(vec!["Go".to_string()])
        );
    }

    #[test]
    fn test_empty_text_total() {
        let lex = lexicon();
        let extraction = extract_sections(&lex, "");
        assert!(extraction.technical_skills.is_not_found());
        assert!(extract_skills_global(&lex, "").is_empty());
        assert!(extract_programming_languages(&lex, "").is_empty());
    }

    #[test]
    fn test_global_mode_ignores_headings() {
        let lex = lexicon();
        let skills = extract_skills_global(&lex, "docker, golang\nrandom prose here");
        assert!(skills.contains(&"Docker".to_string()));
        // alias "golang" folds only in programming extraction; here it stays
        // a plain token
        assert!(skills.contains(&"Golang".to_string()));
    }

    #[test]
    fn test_programming_language_detection() {
        let lex = lexicon();
        let found = extract_programming_languages(&lex, "Core Java, Python and golang");
        assert_eq!(found, vec!["Go", "Java", "Python"]);
    }

    #[test]
    fn test_java_not_matched_inside_javascript() {
        let lex = lexicon();
        let found = extract_programming_languages(&lex, "writes javascript daily");
        assert_eq!(found, vec!["Javascript"]);
    }

    #[test]
    fn test_ambiguous_r_needs_context() {
        let lex = lexicon();
        // "r" appears as a word but with no supporting evidence: the text
        // must not contain "r " / " r," / "language"
        assert!(extract_programming_languages(&lex, "exhibit r").is_empty());
        // " r," is accepted
        assert_eq!(
            extract_programming_languages(&lex, "knows r, among others"),
            vec!["R"]
        );
        // the word "language" is accepted as evidence
        assert_eq!(
            extract_programming_languages(&lex, "r is my favorite language!"),
            vec!["R"]
        );
    }

    #[test]
    fn test_merge_is_sorted_union() {
        let merged = merge_programming_into_technical(
            &["Python".to_string(), "Go".to_string()],
            &["Docker".to_string(), "Python".to_string()],
        );
        assert_eq!(merged, vec!["Docker", "Go", "Python"]);
    }

    #[test]
    fn test_keyword_score_weights_and_cap() {
        assert_eq!(compute_keyword_score(3, 2, 1), 8);
        assert_eq!(compute_keyword_score(200, 10, 0), 100);
        assert_eq!(compute_keyword_score(0, 0, 0), 0);
    }

    #[test]
    fn test_parse_resume_sections_lightweight() {
        let lex = lexicon();
        let parse = parse_resume_sections(&lex, "python, docker, kubernetes");
        assert!(parse.skills.technical.contains(&"Python".to_string()));
        assert!(parse
            .skills
            .programming_languages
            .contains(&"Python".to_string()));
        assert!(parse.skills.area_of_interest.is_empty());
        assert!(parse.ats_score > 0);
    }
}
