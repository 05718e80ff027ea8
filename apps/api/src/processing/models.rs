//! Structured resume data as extracted by the model, plus the evaluation
//! records attached during processing.
//!
//! Deserialization is deliberately forgiving: every field defaults, scalars
//! are coerced to strings, and list-shaped fields accept a single
//! delimiter-separated string. Model output never fails to load into
//! [`ResumeData`] once it is valid JSON.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

static SCALAR_LIST_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,;/]\s*").expect("valid list separator regex"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeData {
    #[serde(deserialize_with = "flexible_string")]
    pub name: String,
    #[serde(deserialize_with = "flexible_string")]
    pub email: String,
    #[serde(deserialize_with = "flexible_string")]
    pub phone: String,
    #[serde(deserialize_with = "flexible_string")]
    pub linkedin: String,
    #[serde(deserialize_with = "flexible_string")]
    pub github: String,
    #[serde(deserialize_with = "flexible_string")]
    pub leetcode: String,
    #[serde(deserialize_with = "flexible_string")]
    pub codechef: String,
    /// Raw model output; replaced with rendered detections after language
    /// normalization.
    pub languages: Value,
    pub education: Education,
    pub skills: SkillsBlock,
    pub internships: Vec<Value>,
    pub projects: Vec<Value>,
    #[serde(deserialize_with = "flexible_string_list")]
    pub certificates: Vec<String>,
    #[serde(deserialize_with = "flexible_string")]
    pub role_match: String,
    #[serde(deserialize_with = "flexible_string")]
    pub summary: String,
    /// Attached by the processing pipeline, never read from model output.
    #[serde(skip_deserializing)]
    pub certificate_analysis: Vec<CertificateInsight>,
    #[serde(skip_deserializing)]
    pub project_analysis: Vec<ProjectInsight>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    #[serde(rename = "10th")]
    pub tenth: SchoolRecord,
    #[serde(rename = "12th")]
    pub twelfth: SchoolRecord,
    pub bachelor: BachelorRecord,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SchoolRecord {
    #[serde(deserialize_with = "flexible_string")]
    pub school: String,
    #[serde(deserialize_with = "flexible_string")]
    pub location: String,
    #[serde(deserialize_with = "flexible_string")]
    pub year: String,
    #[serde(deserialize_with = "flexible_string")]
    pub percentage: String,
}

impl SchoolRecord {
    pub fn is_empty(&self) -> bool {
        self.school.is_empty()
            && self.location.is_empty()
            && self.year.is_empty()
            && self.percentage.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BachelorRecord {
    #[serde(deserialize_with = "flexible_string")]
    pub institute: String,
    #[serde(deserialize_with = "flexible_string")]
    pub location: String,
    #[serde(deserialize_with = "flexible_string")]
    pub degree: String,
    #[serde(deserialize_with = "flexible_string")]
    pub expected_graduation: String,
    #[serde(deserialize_with = "flexible_string")]
    pub cgpa: String,
}

impl BachelorRecord {
    pub fn is_empty(&self) -> bool {
        self.institute.is_empty()
            && self.location.is_empty()
            && self.degree.is_empty()
            && self.expected_graduation.is_empty()
            && self.cgpa.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsBlock {
    #[serde(deserialize_with = "flexible_string_list")]
    pub technical: Vec<String>,
    #[serde(deserialize_with = "flexible_string_list")]
    pub soft: Vec<String>,
    #[serde(deserialize_with = "flexible_string_list")]
    pub area_of_interest: Vec<String>,
}

/// Model-evaluated worthiness of one certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateInsight {
    pub certificate: String,
    pub worthiness_score: u32,
    pub highlight: bool,
    pub reason: String,
}

/// Model-evaluated analysis of one project, normalized to a strict schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInsight {
    pub project_title: String,
    pub summary: String,
    pub technologies: Vec<String>,
    pub domain: String,
    pub problem_statement: String,
    pub features: Vec<String>,
    pub impact: String,
    pub complexity_level: String,
    pub relevance_score: u32,
    pub missing_points: Vec<String>,
    pub recommended_improvements: Vec<String>,
    pub role_mapping: Vec<String>,
}

/// Best-effort display string for an arbitrary JSON value. Objects surface
/// their name-like field when present; null becomes empty.
pub fn value_to_display_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Object(map) => {
            for key in ["name", "title", "certificate"] {
                if let Some(Value::String(s)) = map.get(key) {
                    if !s.trim().is_empty() {
                        return s.trim().to_string();
                    }
                }
            }
            value.to_string()
        }
        Value::Array(_) => value.to_string(),
    }
}

/// Coerces any JSON value to a string list: arrays item-by-item, strings
/// split on `,`/`;`/`/`, everything else as a single best-effort entry.
pub fn coerce_string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::String(s) => SCALAR_LIST_SEPARATOR
            .split(s)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect(),
        Value::Array(items) => items
            .iter()
            .map(value_to_display_string)
            .filter(|s| !s.is_empty())
            .collect(),
        other => {
            let s = value_to_display_string(other);
            if s.is_empty() {
                Vec::new()
            } else {
                vec![s]
            }
        }
    }
}

fn flexible_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_display_string(&value))
}

fn flexible_string_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_string_list(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resume_data_all_fields_optional() {
        let data: ResumeData = serde_json::from_str("{}").unwrap();
        assert!(data.name.is_empty());
        assert!(data.certificates.is_empty());
        assert!(data.education.bachelor.is_empty());
    }

    #[test]
    fn test_scalar_coercion() {
        let data: ResumeData = serde_json::from_value(json!({
            "name": "Jane",
            "phone": 9876543210i64,
            "education": {"10th": {"percentage": 92.6}}
        }))
        .unwrap();
        assert_eq!(data.phone, "9876543210");
        assert_eq!(data.education.tenth.percentage, "92.6");
        assert!(!data.education.tenth.is_empty());
    }

    #[test]
    fn test_string_list_from_delimited_string() {
        let skills: SkillsBlock = serde_json::from_value(json!({
            "technical": "Python, React; MySQL"
        }))
        .unwrap();
        assert_eq!(skills.technical, vec!["Python", "React", "MySQL"]);
    }

    #[test]
    fn test_string_list_from_mixed_array() {
        let list = coerce_string_list(&json!(["AWS", 42, null, {"name": "Azure AZ-900"}, "  "]));
        assert_eq!(list, vec!["AWS", "42", "Azure AZ-900"]);
    }

    #[test]
    fn test_analysis_fields_not_read_from_model_output() {
        let data: ResumeData = serde_json::from_value(json!({
            "certificate_analysis": [{"certificate": "x", "worthiness_score": 999,
                                      "highlight": true, "reason": "injected"}]
        }))
        .unwrap();
        assert!(data.certificate_analysis.is_empty());
    }
}
