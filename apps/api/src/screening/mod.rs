//! Batch resume screening: process a set of uploaded resumes and keep the
//! candidates that pass the recruiter's filters.
//!
//! Filter semantics: numeric fields are min/max ranges, skills must ALL be
//! present (substring match against the candidate's skill list), languages
//! and areas of interest admit on ANY match, department and degree are
//! substring matches against the bachelor degree line.

pub mod handlers;

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::languages::normalize_languages;
use crate::processing::models::{Education, ResumeData, SkillsBlock};
use crate::processing::AnalyzedResume;

static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(\.\d+)?").expect("valid number regex"));

static PIPE_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\|\s*").expect("valid pipe split regex"));

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScreeningFilters {
    pub cgpa: Option<f64>,
    pub cgpa_max: Option<f64>,
    pub tenth: Option<f64>,
    pub tenth_max: Option<f64>,
    pub twelfth: Option<f64>,
    pub twelfth_max: Option<f64>,
    pub ats: Option<f64>,
    pub skills: Option<String>,
    pub language: Option<String>,
    pub department: Option<String>,
    pub degree: Option<String>,
    pub area_of_interest: Option<String>,
}

impl ScreeningFilters {
    /// Builds filters from multipart form fields. Unknown fields are
    /// ignored; unparseable numbers disable that filter.
    pub fn from_form_fields(fields: &HashMap<String, String>) -> Self {
        let num = |key: &str| fields.get(key).and_then(|v| v.trim().parse::<f64>().ok());
        let text = |key: &str| {
            fields
                .get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        ScreeningFilters {
            cgpa: num("cgpa"),
            cgpa_max: num("cgpa_max"),
            tenth: num("tenth"),
            tenth_max: num("tenth_max"),
            twelfth: num("twelfth"),
            twelfth_max: num("twelfth_max"),
            ats: num("ats"),
            skills: text("skills"),
            language: text("language"),
            department: text("department"),
            degree: text("degree"),
            area_of_interest: text("area_of_interest"),
        }
    }
}

/// Filters with term lists pre-split and lowercased for matching.
#[derive(Debug, Clone)]
pub struct CompiledFilters {
    filters: ScreeningFilters,
    skill_terms: Vec<String>,
    area_terms: Vec<String>,
    language_terms: Vec<String>,
    department: Option<String>,
    degree: Option<String>,
}

impl CompiledFilters {
    pub fn compile(filters: ScreeningFilters) -> Self {
        let split_terms = |raw: &Option<String>| -> Vec<String> {
            raw.as_deref()
                .map(|s| {
                    s.split(',')
                        .map(|t| t.trim().to_lowercase())
                        .filter(|t| !t.is_empty())
                        .collect()
                })
                .unwrap_or_default()
        };
        let skill_terms = split_terms(&filters.skills);
        let area_terms = split_terms(&filters.area_of_interest);
        // The language filter goes through the same normalization as resume
        // languages so "english (fluent)" matches a detected "English FLUENT".
        let language_terms = filters
            .language
            .as_deref()
            .map(|raw| {
                normalize_languages(raw)
                    .iter()
                    .map(|l| l.rendered().to_lowercase())
                    .collect()
            })
            .unwrap_or_default();
        let department = filters.department.as_deref().map(str::to_lowercase);
        let degree = filters.degree.as_deref().map(str::to_lowercase);
        CompiledFilters {
            filters,
            skill_terms,
            area_terms,
            language_terms,
            department,
            degree,
        }
    }

    pub fn admit(&self, data: &ResumeData, ats_score: f64) -> bool {
        let cgpa_value = parse_cgpa(&data.education.bachelor.cgpa);
        let tenth_value = parse_percentage(&data.education.tenth.percentage);
        let twelfth_value = parse_percentage(&data.education.twelfth.percentage);

        if self.filters.cgpa.is_some_and(|min| cgpa_value < min)
            || self.filters.cgpa_max.is_some_and(|max| cgpa_value > max)
            || self.filters.tenth.is_some_and(|min| tenth_value < min)
            || self.filters.tenth_max.is_some_and(|max| tenth_value > max)
            || self.filters.twelfth.is_some_and(|min| twelfth_value < min)
            || self.filters.twelfth_max.is_some_and(|max| twelfth_value > max)
            || self.filters.ats.is_some_and(|min| ats_score < min)
        {
            return false;
        }

        if !self.language_terms.is_empty() {
            let langs = language_strings(data);
            let matched = langs
                .iter()
                .any(|l| self.language_terms.iter().any(|term| l.contains(term)));
            if !matched {
                return false;
            }
        }

        let degree_line = data.education.bachelor.degree.to_lowercase();
        if let Some(dept) = &self.department {
            if !degree_line.contains(dept.as_str()) {
                return false;
            }
        }
        if let Some(degree) = &self.degree {
            if !degree_line.contains(degree.as_str()) {
                return false;
            }
        }

        if !self.skill_terms.is_empty() {
            let skills: Vec<String> = split_display_skills(&data.skills.technical)
                .iter()
                .map(|s| s.to_lowercase())
                .collect();
            let all_present = self
                .skill_terms
                .iter()
                .all(|term| skills.iter().any(|s| s.contains(term)));
            if !all_present {
                return false;
            }
        }

        if !self.area_terms.is_empty() {
            let areas: Vec<String> = data
                .skills
                .area_of_interest
                .iter()
                .map(|a| a.trim().to_lowercase())
                .collect();
            let matched = areas
                .iter()
                .any(|area| self.area_terms.iter().any(|term| area.contains(term)));
            if !matched {
                return false;
            }
        }

        true
    }
}

/// Parses "92.6%" style percentages; anything unparseable counts as 0.
pub fn parse_percentage(value: &str) -> f64 {
    value.replace('%', "").trim().parse::<f64>().unwrap_or(0.0)
}

/// Pulls the first number out of strings like "8.32 (upto 5th semester)".
pub fn parse_cgpa(value: &str) -> f64 {
    NUMBER_RE
        .find(value)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Splits pipe-joined skill entries like "Java | OOPS | JDBC" into separate
/// display skills, order-preserving and deduplicated.
pub fn split_display_skills(technical: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in technical {
        for part in PIPE_SPLIT.split(item) {
            let part = part.trim();
            if !part.is_empty() && !out.iter().any(|p| p == part) {
                out.push(part.to_string());
            }
        }
    }
    out
}

fn language_strings(data: &ResumeData) -> Vec<String> {
    match &data.languages {
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

/// One admitted candidate, shaped for recruiter-facing result lists.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateRecord {
    pub filename: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub ats_score: f64,
    pub education: Education,
    pub skills: SkillsBlock,
    pub languages: Vec<String>,
    pub area_of_interest: Vec<String>,
}

pub fn candidate_record(filename: &str, analyzed: &AnalyzedResume) -> CandidateRecord {
    let data = &analyzed.data;
    let mut skills = data.skills.clone();
    skills.technical = split_display_skills(&data.skills.technical);
    CandidateRecord {
        filename: filename.to_string(),
        name: data.name.clone(),
        email: data.email.clone(),
        phone: data.phone.clone(),
        ats_score: analyzed.ats_score,
        education: data.education.clone(),
        languages: match &data.languages {
            serde_json::Value::Array(items) => items
                .iter()
                .filter_map(|v| v.as_str())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        },
        area_of_interest: skills.area_of_interest.clone(),
        skills,
    }
}
