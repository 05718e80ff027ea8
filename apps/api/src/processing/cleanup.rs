//! Final skill-list cleanup.
//!
//! Technical skills that merely restate an area of interest or a certificate
//! add noise, so they are dropped before the resume is scored and stored.

pub fn dedup_technical_skills(
    technical: &[String],
    interests: &[String],
    certificates: &[String],
) -> Vec<String> {
    let interest_set: std::collections::HashSet<String> = interests
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();
    let cert_lowered: Vec<String> = certificates
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    let mut seen = std::collections::HashSet::new();
    let mut kept = Vec::new();
    for skill in technical {
        let lower = skill.trim().to_lowercase();
        if lower.is_empty() || !seen.insert(lower.clone()) {
            continue;
        }
        if interest_set.contains(&lower) {
            continue;
        }
        let skill_words = lower.split_whitespace().count();
        let shadowed_by_cert = cert_lowered.iter().any(|cert| {
            let cert_words = cert.split_whitespace().count();
            cert_words >= skill_words && (cert.contains(&lower) || lower.contains(cert.as_str()))
        });
        if shadowed_by_cert {
            continue;
        }
        kept.push(skill.trim().to_string());
    }
    kept
}
