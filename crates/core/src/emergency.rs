//! Emergency symptom detection

/// Warning banner prepended to the analysis when emergency indicators are found.
pub const EMERGENCY_WARNING: &str = "🚨 URGENT: Your symptoms may indicate a medical emergency. \
     Please seek immediate medical attention or call emergency services!";

/// Symptom phrases that trigger an immediate emergency warning.
const EMERGENCY_SYMPTOMS: [&str; 20] = [
    "chest pain",
    "difficulty breathing",
    "shortness of breath",
    "severe bleeding",
    "sudden weakness",
    "slurred speech",
    "severe headache",
    "suicidal",
    "homicidal",
    "unconscious",
    "seizure",
    "stroke",
    "heart attack",
    "choking",
    "burning",
    "poison",
    "overdose",
    "anaphylaxis",
    "broken bone",
    "deep cut",
];

/// Check whether the description contains any emergency indicator.
///
/// Case-insensitive substring containment, no word-boundary enforcement:
/// partial-word overlaps ("burning" inside a cooking complaint) match too.
pub fn contains_emergency_symptoms(symptoms: &str) -> bool {
    let lower = symptoms.to_lowercase();
    EMERGENCY_SYMPTOMS.iter().any(|phrase| lower.contains(phrase))
}
