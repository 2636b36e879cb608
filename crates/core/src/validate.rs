//! Symptom input validation

use std::sync::LazyLock;

use regex::Regex;

use crate::error::TriageError;

/// Upper bound on the raw description length, in characters.
const MAX_LEN: usize = 1000;

/// Lower bound on the trimmed description length, in characters.
const MIN_LEN: usize = 10;

/// Inappropriate-content denylist. A match rejects the whole input;
/// rejected input is never cleaned up and resubmitted.
static DENYLIST_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(?:fuck|shit|asshole|bitch|dick|pussy|cunt)\b",
        r"(?i)\b(?:kill|murder|harm|hurt)\s+(?:myself|yourself|themselves|someone)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid denylist pattern"))
    .collect()
});

/// Validate a raw symptom description.
///
/// Rules are applied in order and the first failing rule wins:
/// empty input, too short (trimmed), too long (raw), denylisted content.
/// Returns `TriageError::Validation` with the user-facing message.
pub fn validate_symptoms(symptoms: &str) -> Result<(), TriageError> {
    let trimmed = symptoms.trim();

    if trimmed.is_empty() {
        return Err(TriageError::Validation(
            "Please describe your symptoms".to_string(),
        ));
    }

    if trimmed.chars().count() < MIN_LEN {
        return Err(TriageError::Validation(
            "Please provide more detailed symptoms (at least 10 characters)".to_string(),
        ));
    }

    if symptoms.chars().count() > MAX_LEN {
        return Err(TriageError::Validation(
            "Symptoms description too long. Please summarize to under 1000 characters.".to_string(),
        ));
    }

    for pattern in DENYLIST_PATTERNS.iter() {
        if pattern.is_match(symptoms) {
            return Err(TriageError::Validation(
                "Please provide appropriate medical symptoms only".to_string(),
            ));
        }
    }

    Ok(())
}
