//! Project normalization and model-backed analysis.
//!
//! Extracted project entries arrive in whatever shape the model produced
//! (objects with varying key names, bare description strings). They are
//! normalized before prompting, and the analysis payload is coerced into a
//! strict schema afterwards.

use serde::Serialize;
use serde_json::Value;

use crate::llm_client::{LlmClient, ModelOutcome};
use crate::processing::certificates::coerce_score;
use crate::processing::models::{coerce_string_list, value_to_display_string, ProjectInsight};
use crate::processing::prompts;

const DOMAIN_WHITELIST: &[&str] = &[
    "web development",
    "ai/ml",
    "cloud",
    "full stack",
    "mobile app",
    "iot",
    "cybersecurity",
    "data science",
    "automation",
    "other",
];

const DESCRIPTION_TECH_HINTS: &[&str] = &[
    "python", "django", "react", "node", "java", "ml", "ai", "sql",
];

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NormalizedProject {
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub details: Vec<String>,
}

/// Normalizes raw project entries. Object entries map their title-ish and
/// description-ish keys; bare strings become a description with a title cut
/// from the first few words and technologies guessed from keyword hints.
pub fn normalize_projects(raw: &[Value]) -> Vec<NormalizedProject> {
    raw.iter().filter_map(normalize_project).collect()
}

/// Title stand-in for untitled projects: the first five description words.
fn short_title(description: &str) -> String {
    let words: Vec<&str> = description.split_whitespace().collect();
    if words.len() > 5 {
        format!("{}...", words[..5].join(" "))
    } else {
        description.to_string()
    }
}

fn normalize_project(value: &Value) -> Option<NormalizedProject> {
    match value {
        Value::Object(map) => {
            let mut title = map
                .get("title")
                .or_else(|| map.get("name"))
                .map(value_to_display_string)
                .unwrap_or_default();
            let description = map
                .get("description")
                .or_else(|| map.get("summary"))
                .map(value_to_display_string)
                .unwrap_or_default();
            if title.is_empty() && description.is_empty() {
                return None;
            }
            if title.is_empty() {
                title = short_title(&description);
            }
            let technologies = map
                .get("technologies")
                .or_else(|| map.get("tech_stack"))
                .map(coerce_string_list)
                .unwrap_or_default();
            let details = description
                .split(". ")
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
            Some(NormalizedProject {
                title,
                description,
                technologies,
                details,
            })
        }
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            let lower = text.to_lowercase();
            let technologies = DESCRIPTION_TECH_HINTS
                .iter()
                .filter(|hint| lower.contains(*hint))
                .map(|hint| hint.to_string())
                .collect();
            Some(NormalizedProject {
                title: short_title(text),
                description: text.to_string(),
                technologies,
                details: vec![text.to_string()],
            })
        }
        _ => None,
    }
}

/// Evaluation failures never sink a resume; they log and yield no insights.
pub async fn evaluate_projects(llm: &LlmClient, raw_projects: &[Value]) -> Vec<ProjectInsight> {
    let normalized = normalize_projects(raw_projects);
    if normalized.is_empty() {
        return Vec::new();
    }

    let projects_json =
        serde_json::to_string_pretty(&normalized).unwrap_or_else(|_| "[]".to_string());
    let prompt = prompts::project_prompt(&projects_json);
    match llm
        .call_outcome::<Value>(&prompt, prompts::EVALUATION_SYSTEM, 3000)
        .await
    {
        ModelOutcome::Parsed(value) => coerce_analysis(&value),
        ModelOutcome::UpstreamUnavailable(reason) => {
            tracing::warn!(%reason, "project evaluation unavailable, skipping");
            Vec::new()
        }
        ModelOutcome::Malformed { error, .. } => {
            tracing::warn!(%error, "malformed project evaluation, skipping");
            Vec::new()
        }
    }
}

/// Unwraps whichever container the model chose and coerces each entry.
pub fn coerce_analysis(value: &Value) -> Vec<ProjectInsight> {
    let items: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => {
            if let Some(Value::Array(items)) =
                map.get("projects").or_else(|| map.get("results"))
            {
                items.iter().collect()
            } else if map.contains_key("project_title") {
                vec![value]
            } else if let Some(Value::Array(items)) =
                map.values().find(|v| v.is_array())
            {
                items.iter().collect()
            } else {
                return Vec::new();
            }
        }
        _ => return Vec::new(),
    };

    items.into_iter().filter_map(coerce_insight).collect()
}

fn coerce_insight(value: &Value) -> Option<ProjectInsight> {
    let obj = value.as_object()?;
    let field = |key: &str| obj.get(key).map(value_to_display_string).unwrap_or_default();
    let list = |key: &str| obj.get(key).map(coerce_string_list).unwrap_or_default();

    let insight = ProjectInsight {
        project_title: field("project_title"),
        summary: field("summary"),
        technologies: list("technologies"),
        domain: normalize_domain(&field("domain")),
        problem_statement: field("problem_statement"),
        features: list("features"),
        impact: field("impact"),
        complexity_level: normalize_complexity(&field("complexity_level")),
        relevance_score: coerce_score(obj.get("relevance_score")),
        missing_points: list("missing_points"),
        recommended_improvements: list("recommended_improvements"),
        role_mapping: list("role_mapping"),
    };

    let all_empty = insight.project_title.is_empty()
        && insight.summary.is_empty()
        && insight.impact.is_empty()
        && insight.problem_statement.is_empty();
    if all_empty {
        None
    } else {
        Some(insight)
    }
}

fn normalize_domain(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    match DOMAIN_WHITELIST.iter().copied().find(|d| *d == lower) {
        Some("ai/ml") => "AI/ML".to_string(),
        Some("iot") => "IoT".to_string(),
        Some(domain) => domain
            .split(' ')
            .map(|w| {
                let mut chars = w.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" "),
        None => "Other".to_string(),
    }
}

fn normalize_complexity(raw: &str) -> String {
    match raw.trim().to_lowercase().as_str() {
        "beginner" => "Beginner".to_string(),
        "advanced" => "Advanced".to_string(),
        _ => "Intermediate".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_object_project() {
        let projects = normalize_projects(&[json!({
            "name": "Inventory Tracker",
            "summary": "Tracks stock levels. Sends low-stock alerts.",
            "tech_stack": "Python, PostgreSQL"
        })]);
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].title, "Inventory Tracker");
        assert_eq!(projects[0].technologies, vec!["Python", "PostgreSQL"]);
        assert_eq!(projects[0].details.len(), 2);
    }

    #[test]
    fn test_normalize_string_project() {
        let projects = normalize_projects(&[json!(
            "Built a Django dashboard for real-time SQL analytics across teams"
        )]);
        assert_eq!(projects[0].title, "Built a Django dashboard for...");
        assert!(projects[0].technologies.contains(&"django".to_string()));
        assert!(projects[0].technologies.contains(&"sql".to_string()));
    }

    #[test]
    fn test_normalize_skips_empty_entries() {
        let projects = normalize_projects(&[json!({}), json!(""), json!(null)]);
        assert!(projects.is_empty());
    }

    #[test]
    fn test_coerce_analysis_wrapped_and_bare() {
        let entry = json!({
            "project_title": "Tracker",
            "summary": "s",
            "technologies": ["Rust"],
            "domain": "web development",
            "complexity_level": "ADVANCED",
            "relevance_score": "88"
        });
        for payload in [
            json!({"projects": [entry.clone()]}),
            json!({"results": [entry.clone()]}),
            json!([entry.clone()]),
            entry.clone(),
        ] {
            let insights = coerce_analysis(&payload);
            assert_eq!(insights.len(), 1);
            assert_eq!(insights[0].domain, "Web Development");
            assert_eq!(insights[0].complexity_level, "Advanced");
            assert_eq!(insights[0].relevance_score, 88);
        }
    }

    #[test]
    fn test_unknown_domain_becomes_other() {
        let insights = coerce_analysis(&json!([{
            "project_title": "X", "domain": "blockchain oracles", "complexity_level": "mid"
        }]));
        assert_eq!(insights[0].domain, "Other");
        assert_eq!(insights[0].complexity_level, "Intermediate");
    }

    #[test]
    fn test_all_empty_entry_dropped() {
        let insights = coerce_analysis(&json!([{"domain": "cloud", "impact": ""}]));
        assert!(insights.is_empty());
    }

    #[test]
    fn test_impact_alone_keeps_entry() {
        let insights = coerce_analysis(&json!([
            {"impact": "Cut deploy time in half"},
            {"technologies": ["Rust", "Postgres"]}
        ]));
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].impact, "Cut deploy time in half");
    }

    #[test]
    fn test_untitled_object_project_gets_short_title() {
        let projects = normalize_projects(&[json!({
            "description": "Automated nightly reconciliation of payment ledgers across regions"
        })]);
        assert_eq!(projects[0].title, "Automated nightly reconciliation of payment...");

        let projects = normalize_projects(&[json!({"description": "Tiny script"})]);
        assert_eq!(projects[0].title, "Tiny script");
    }

    #[test]
    fn test_domain_acronym_casing() {
        let insights = coerce_analysis(&json!([
            {"project_title": "A", "domain": "AI/ML"},
            {"project_title": "B", "domain": "iot"},
            {"project_title": "C", "domain": "full stack"}
        ]));
        let domains: Vec<&str> = insights.iter().map(|i| i.domain.as_str()).collect();
        assert_eq!(domains, vec!["AI/ML", "IoT", "Full Stack"]);
    }
}
