//! Certificate worthiness evaluation.
//!
//! The model returns one insight per certificate; coercion tolerates the
//! usual shape drift (bare array instead of `{"results": [...]}`, numeric
//! scores as strings, booleans as "yes"/"true").

use serde_json::Value;

use crate::llm_client::{LlmClient, ModelOutcome};
use crate::processing::models::{value_to_display_string, CertificateInsight};
use crate::processing::prompts;

/// Evaluation failures never sink a resume; they log and yield no insights.
pub async fn evaluate_certificates(
    llm: &LlmClient,
    certificates: &[String],
) -> Vec<CertificateInsight> {
    let certificates: Vec<String> = certificates
        .iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();
    if certificates.is_empty() {
        return Vec::new();
    }

    let prompt = prompts::certificate_prompt(&certificates);
    match llm
        .call_outcome::<Value>(&prompt, prompts::EVALUATION_SYSTEM, 600)
        .await
    {
        ModelOutcome::Parsed(value) => coerce_insights(&value),
        ModelOutcome::UpstreamUnavailable(reason) => {
            tracing::warn!(%reason, "certificate evaluation unavailable, skipping");
            Vec::new()
        }
        ModelOutcome::Malformed { error, .. } => {
            tracing::warn!(%error, "malformed certificate evaluation, skipping");
            Vec::new()
        }
    }
}

/// Normalizes the raw evaluation payload into clean insight records.
/// Entries with an empty certificate name are dropped.
pub fn coerce_insights(value: &Value) -> Vec<CertificateInsight> {
    let items = match value {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("results") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    items
        .iter()
        .filter_map(|item| {
            let obj = item.as_object()?;
            let certificate = obj
                .get("certificate")
                .map(value_to_display_string)
                .unwrap_or_default();
            if certificate.is_empty() {
                return None;
            }
            Some(CertificateInsight {
                certificate,
                worthiness_score: coerce_score(obj.get("worthiness_score")),
                highlight: coerce_flag(obj.get("highlight")),
                reason: obj.get("reason").map(value_to_display_string).unwrap_or_default(),
            })
        })
        .collect()
}

pub(crate) fn coerce_score(value: Option<&Value>) -> u32 {
    let score = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    score.clamp(0.0, 100.0).round() as u32
}

pub(crate) fn coerce_flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => {
            matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "1")
        }
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0) != 0.0,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_from_wrapped_results() {
        let insights = coerce_insights(&json!({"results": [
            {"certificate": "AWS SAA", "worthiness_score": 85, "highlight": true, "reason": "cloud"}
        ]}));
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].certificate, "AWS SAA");
        assert_eq!(insights[0].worthiness_score, 85);
        assert!(insights[0].highlight);
    }

    #[test]
    fn test_coerce_from_bare_array() {
        let insights = coerce_insights(&json!([
            {"certificate": "CCNA", "worthiness_score": "70", "highlight": "yes", "reason": ""}
        ]));
        assert_eq!(insights[0].worthiness_score, 70);
        assert!(insights[0].highlight);
    }

    #[test]
    fn test_score_clamped_and_defaulted() {
        assert_eq!(coerce_score(Some(&json!(250))), 100);
        assert_eq!(coerce_score(Some(&json!(-5))), 0);
        assert_eq!(coerce_score(Some(&json!("garbage"))), 0);
        assert_eq!(coerce_score(None), 0);
    }

    #[test]
    fn test_empty_certificate_name_dropped() {
        let insights = coerce_insights(&json!({"results": [
            {"certificate": "  ", "worthiness_score": 50, "highlight": false, "reason": "x"},
            {"certificate": "CKA", "worthiness_score": 90, "highlight": true, "reason": "k8s"}
        ]}));
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].certificate, "CKA");
    }

    #[test]
    fn test_non_list_payload_yields_nothing() {
        assert!(coerce_insights(&json!("nope")).is_empty());
        assert!(coerce_insights(&json!({"unexpected": 1})).is_empty());
    }
}
