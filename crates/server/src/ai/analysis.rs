//! Prompt construction and response formatting for symptom analysis

use std::sync::LazyLock;

use regex::Regex;
use triage_core::TriageError;

use super::TextGenerator;

/// Markdown bold spans, rewritten into the HTML display convention
static BOLD_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("Invalid emphasis pattern"));

/// Build the structured analysis prompt for a validated symptom description.
///
/// The template is deterministic: the same symptoms always produce the same
/// prompt, including the fixed disclaimer block.
pub fn build_prompt(symptoms: &str) -> String {
    format!(
        r#"
Analyze the following symptoms and provide a structured response:

SYMPTOMS PROVIDED:
{symptoms}

Please structure your response as follows:

POSSIBLE CONDITIONS (list 2-4 most likely):
- [Condition name]: [Brief explanation]
- [Condition name]: [Brief explanation]

RECOMMENDED NEXT STEPS:
- [Step 1]
- [Step 2]
- [Step 3]

URGENCY LEVEL:
[Low/Medium/High]

IMPORTANT MEDICAL DISCLAIMERS:
- This analysis is for informational purposes only.
- Consult a qualified healthcare provider for diagnosis.
- Seek emergency help for severe symptoms.
- Individual cases vary; professional evaluation is essential.
"#
    )
}

/// Rewrite `**bold**` emphasis from the API into `<strong>` for the page
pub fn format_emphasis(text: &str) -> String {
    BOLD_SPAN.replace_all(text, "<strong>$1</strong>").to_string()
}

/// Run a symptom description through the analysis backend.
///
/// Builds the prompt, submits it, and post-processes the emphasis markup.
/// Upstream failures propagate as recoverable errors for the caller to map.
pub async fn analyze_symptoms(
    generator: &dyn TextGenerator,
    symptoms: &str,
) -> Result<String, TriageError> {
    let prompt = build_prompt(symptoms);
    let raw = generator.generate(&prompt).await?;
    Ok(format_emphasis(raw.trim()))
}
