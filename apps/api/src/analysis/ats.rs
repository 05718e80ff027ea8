//! Heuristic ATS compatibility scoring.
//!
//! A fixed weighted rubric over the raw resume text plus a section-presence
//! record. Every category is clamped independently, the total is clamped to
//! [0, 100] and rounded to two decimals. The function is total: any input,
//! including empty text, produces a breakdown without errors.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::analysis::lexicon::SkillLexicon;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z0-9._%+-]+@[a-z0-9.-]+\.\w+").expect("valid email regex"));
static PROFILE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"linkedin\.com|github\.com").expect("valid profile regex"));
static BULLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*[-•*]").expect("valid bullet regex"));
static METRIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d+%|\b\d+\s+(?:users|clients|projects|years|months)\b|\$\d+\b|\b\d+\s+(?:x|times)\b")
        .expect("valid metric regex")
});
static IMAGE_REF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.(png|jpg|jpeg|svg)").expect("valid image regex"));

const MAX_LINE_LEN: usize = 150;

/// Which of the four required resume sections are present in the structured
/// extraction.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionPresence {
    pub experience: bool,
    pub education: bool,
    pub skills: bool,
    pub projects: bool,
}

impl SectionPresence {
    fn count(&self) -> usize {
        [self.experience, self.education, self.skills, self.projects]
            .iter()
            .filter(|p| **p)
            .count()
    }
}

/// Per-category point values, already clamped, plus the clamped total.
/// Serialized field names are the rubric's public category names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    #[serde(rename = "Section Coverage")]
    pub section_coverage: f64,
    #[serde(rename = "Contact Info")]
    pub contact_info: f64,
    #[serde(rename = "Word Count")]
    pub word_count: f64,
    #[serde(rename = "Bullet Points")]
    pub bullet_points: f64,
    #[serde(rename = "Action + Achievements")]
    pub action_achievements: f64,
    #[serde(rename = "Skills Strength")]
    pub skills_strength: f64,
    #[serde(rename = "Soft Skills & Certs")]
    pub soft_skills_certs: f64,
    #[serde(rename = "Formatting Penalty")]
    pub formatting_penalty: f64,
    #[serde(rename = "Total ATS Score")]
    pub total: f64,
}

/// Scoring result as returned to callers: the breakdown plus the values the
/// surrounding record wraps it with.
#[derive(Debug, Clone, Serialize)]
pub struct AtsReport {
    pub ats_breakdown: ScoreBreakdown,
    pub ats_score: f64,
    pub word_count: usize,
    pub languages: Vec<String>,
}

/// Applies the full rubric. `languages` is the already-detected rendered
/// language list, carried through untouched.
pub fn calculate_ats_score(
    lexicon: &SkillLexicon,
    presence: &SectionPresence,
    text: &str,
    languages: Vec<String>,
) -> AtsReport {
    let lower = text.to_lowercase();

    // Section coverage: +5 per present required section, cap 20.
    let section_coverage = ((presence.count() * 5).min(20)) as f64;

    // Contact info: +5 for an email-shaped match, +5 for a profile URL.
    let mut contact: f64 = 0.0;
    if EMAIL_RE.is_match(&lower) {
        contact += 5.0;
    }
    if PROFILE_RE.is_match(&lower) {
        contact += 5.0;
    }
    let contact_info = contact.min(10.0);

    // Word count: 5 in the [500, 1200] sweet spot, 3 at ≥300, else 0.
    let words = text.split_whitespace().count();
    let word_count_score = if (500..=1200).contains(&words) {
        5.0
    } else if words >= 300 {
        3.0
    } else {
        0.0
    };

    // Bullet density: newline-prefixed -, •, * markers.
    let bullets = BULLET_RE.find_iter(text).count();
    let bullet_points = if bullets >= 10 {
        10.0
    } else if bullets >= 4 {
        5.0
    } else {
        0.0
    };

    // Action verbs ×1, metric mentions ×2, cap 20.
    let actions = lexicon.action_verbs.find_iter(&lower).count();
    let metrics = METRIC_RE.find_iter(&lower).count();
    let action_achievements = ((actions + metrics * 2) as f64).min(20.0);

    // Technical keywords ×1.5, tool keywords ×1.0, cap 30.
    let tech_hits = lexicon
        .tech_keywords
        .iter()
        .filter(|kw| lower.contains(kw.as_str()))
        .count();
    let tool_hits = lexicon
        .tool_keywords
        .iter()
        .filter(|kw| lower.contains(kw.as_str()))
        .count();
    let skills_strength = (tech_hits as f64 * 1.5 + tool_hits as f64).min(30.0);

    // Soft skills cap 2, certification keywords cap 3.
    let soft_hits = lexicon
        .soft_skills
        .iter()
        .filter(|kw| lower.contains(kw.as_str()))
        .count()
        .min(2);
    let cert_hits = lexicon
        .cert_keywords
        .iter()
        .filter(|kw| lower.contains(kw.as_str()))
        .count()
        .min(3);
    let soft_skills_certs = (soft_hits + cert_hits) as f64;

    // Formatting penalty, floored at -5.
    let mut penalty = 0;
    if IMAGE_REF_RE.is_match(&lower) {
        penalty += 2;
    }
    let longest_line = text.split('\n').map(|l| l.chars().count()).max().unwrap_or(0);
    if longest_line > MAX_LINE_LEN {
        penalty += 1;
    }
    let formatting_penalty = -(penalty.min(5) as f64);

    let total = round2(
        (section_coverage
            + contact_info
            + word_count_score
            + bullet_points
            + action_achievements
            + skills_strength
            + soft_skills_certs
            + formatting_penalty)
            .clamp(0.0, 100.0),
    );

    AtsReport {
        ats_breakdown: ScoreBreakdown {
            section_coverage,
            contact_info,
            word_count: word_count_score,
            bullet_points,
            action_achievements,
            skills_strength,
            soft_skills_certs,
            formatting_penalty,
            total,
        },
        ats_score: total,
        word_count: words,
        languages,
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> SkillLexicon {
        SkillLexicon::builtin()
    }

    fn all_sections() -> SectionPresence {
        SectionPresence {
            experience: true,
            education: true,
            skills: true,
            projects: true,
        }
    }

    /// Builds the reference resume: four sections present, email + github
    /// URL, exactly 600 words, 12 bullets, 5 action verbs, 2 metric
    /// mentions, 10 technical keyword hits, 3 tool keyword hits ("github.com"
    /// covers both "git" and "github"), 1 soft-skill hit, 1 cert hit, no
    /// formatting penalty triggers.
    fn reference_text() -> String {
        let mut text = String::new();
        text.push_str("John Doe\n");
        text.push_str("john.doe@example.com | github.com/jdoe\n");
        text.push_str("Engineer with 3 years of backend focus, shipped pipelines 40% faster.\n");
        text.push_str("developed zz zz\n");
        text.push_str("built zz zz\n");
        text.push_str("designed zz zz\n");
        text.push_str("implemented zz zz\n");
        text.push_str("managed zz zz\n");
        text.push_str("python react docker kubernetes terraform redis pandas numpy flask graphql\n");
        text.push_str("linux teamwork scrum\n");
        for _ in 0..12 {
            text.push_str("- zz zz zz\n");
        }
        // Pad to exactly 600 words with neutral filler, 20 per line to keep
        // every line under the long-line threshold.
        let current = text.split_whitespace().count();
        assert!(current < 600);
        let mut remaining = 600 - current;
        while remaining > 0 {
            let chunk = remaining.min(20);
            let line = vec!["zz"; chunk].join(" ");
            text.push_str(&line);
            text.push('\n');
            remaining -= chunk;
        }
        text
    }

    #[test]
    fn test_reference_resume_scores_74() {
        let report = calculate_ats_score(&lexicon(), &all_sections(), &reference_text(), vec![]);
        let b = &report.ats_breakdown;
        assert_eq!(b.section_coverage, 20.0);
        assert_eq!(b.contact_info, 10.0);
        assert_eq!(b.word_count, 5.0);
        assert_eq!(b.bullet_points, 10.0);
        assert_eq!(b.action_achievements, 9.0);
        assert_eq!(b.skills_strength, 18.0);
        assert_eq!(b.soft_skills_certs, 2.0);
        assert_eq!(b.formatting_penalty, 0.0);
        assert_eq!(b.total, 74.00);
        assert_eq!(report.ats_score, 74.00);
        assert_eq!(report.word_count, 600);
    }

    #[test]
    fn test_empty_text_minimum_scores() {
        let report =
            calculate_ats_score(&lexicon(), &SectionPresence::default(), "", vec![]);
        let b = &report.ats_breakdown;
        assert_eq!(b.section_coverage, 0.0);
        assert_eq!(b.contact_info, 0.0);
        assert_eq!(b.word_count, 0.0);
        assert_eq!(b.bullet_points, 0.0);
        assert_eq!(b.action_achievements, 0.0);
        assert_eq!(b.skills_strength, 0.0);
        assert_eq!(b.soft_skills_certs, 0.0);
        assert_eq!(b.formatting_penalty, 0.0);
        assert_eq!(b.total, 0.0);
        assert_eq!(report.word_count, 0);
    }

    #[test]
    fn test_category_caps_hold_for_dense_text() {
        // Repeat a keyword-stuffed block so every counter overshoots its cap.
        let block = "developed built designed implemented managed optimized increased reduced \
                     led collaborated deployed created 10% 20% 30% 40% 50 users 60 clients ";
        let mut text = block.repeat(10);
        for kw in ["python", "java", "react", "docker", "aws", "mysql"] {
            text.push_str(kw);
            text.push(' ');
        }
        text.push_str("leadership communication teamwork certified scrum cisco oracle pmp");
        let presence = all_sections();
        let report = calculate_ats_score(&lexicon(), &presence, &text, vec![]);
        let b = &report.ats_breakdown;
        assert!(b.action_achievements <= 20.0);
        assert!(b.skills_strength <= 30.0);
        assert!(b.soft_skills_certs <= 5.0);
        assert!(b.section_coverage <= 20.0);
        assert!(b.total <= 100.0 && b.total >= 0.0);
    }

    #[test]
    fn test_word_count_bands() {
        let lex = lexicon();
        let p = SectionPresence::default();
        let text_350 = vec!["zz"; 350].join(" ");
        assert_eq!(
            calculate_ats_score(&lex, &p, &text_350, vec![]).ats_breakdown.word_count,
            3.0
        );
        let text_100 = vec!["zz"; 100].join(" ");
        assert_eq!(
            calculate_ats_score(&lex, &p, &text_100, vec![]).ats_breakdown.word_count,
            0.0
        );
        let text_1500 = vec!["zz\n"; 1500].join(" ");
        assert_eq!(
            calculate_ats_score(&lex, &p, &text_1500, vec![]).ats_breakdown.word_count,
            3.0
        );
    }

    #[test]
    fn test_bullet_bands() {
        let lex = lexicon();
        let p = SectionPresence::default();
        let five = "\n- a\n- b\n- c\n• d\n* e";
        assert_eq!(
            calculate_ats_score(&lex, &p, five, vec![]).ats_breakdown.bullet_points,
            5.0
        );
        let two = "\n- a\n- b";
        assert_eq!(
            calculate_ats_score(&lex, &p, two, vec![]).ats_breakdown.bullet_points,
            0.0
        );
    }

    #[test]
    fn test_formatting_penalty_triggers() {
        let lex = lexicon();
        let p = SectionPresence::default();
        let long_line = "z".repeat(151);
        let text = format!("photo.png\n{long_line}");
        let report = calculate_ats_score(&lex, &p, &text, vec![]);
        assert_eq!(report.ats_breakdown.formatting_penalty, -3.0);
        // Total never goes below zero.
        assert_eq!(report.ats_breakdown.total, 0.0);
    }

    #[test]
    fn test_metric_patterns() {
        let lex = lexicon();
        let p = SectionPresence::default();
        let text = "cut costs 15% across 3 projects, saved $500, grew 4 x";
        let report = calculate_ats_score(&lex, &p, text, vec![]);
        // 4 metric matches × 2 = 8
        assert_eq!(report.ats_breakdown.action_achievements, 8.0);
    }

    #[test]
    fn test_languages_carried_through() {
        let langs = vec!["English FLUENT".to_string(), "Tamil".to_string()];
        let report = calculate_ats_score(
            &lexicon(),
            &SectionPresence::default(),
            "",
            langs.clone(),
        );
        assert_eq!(report.languages, langs);
    }

    #[test]
    fn test_breakdown_serializes_with_public_category_names() {
        let report =
            calculate_ats_score(&lexicon(), &SectionPresence::default(), "", vec![]);
        let value = serde_json::to_value(&report.ats_breakdown).unwrap();
        for key in [
            "Section Coverage",
            "Contact Info",
            "Word Count",
            "Bullet Points",
            "Action + Achievements",
            "Skills Strength",
            "Soft Skills & Certs",
            "Formatting Penalty",
            "Total ATS Score",
        ] {
            assert!(value.get(key).is_some(), "missing category {key}");
        }
    }
}
