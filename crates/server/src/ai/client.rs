//! Gemini API client for the generateContent endpoint

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use triage_core::TriageError;

use super::TextGenerator;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Client for the Google Gemini generateContent API
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

/// Request body for generateContent
#[derive(Serialize)]
struct ApiRequest {
    contents: Vec<RequestContent>,
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<Part>,
}

/// A single text part within a content block
#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

/// Response from generateContent
#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

/// Error envelope from the API
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl GeminiClient {
    /// Create a new client with the given API key and the default model
    pub fn new(api_key: String) -> Self {
        Self::with_model(api_key, DEFAULT_MODEL.to_string())
    }

    /// Create a new client pinned to a specific model
    pub fn with_model(api_key: String, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model,
        }
    }

    /// Submit a prompt and return the first candidate's text
    pub async fn generate_content(&self, prompt: &str) -> Result<String, TriageError> {
        let request = ApiRequest {
            contents: vec![RequestContent {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let url = format!("{}/{}:generateContent", API_BASE, self.model);
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| TriageError::Upstream(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            if let Ok(api_err) = serde_json::from_str::<ApiError>(&body) {
                return Err(TriageError::Upstream(format!(
                    "Gemini API error ({}): {}",
                    status, api_err.error.message
                )));
            }
            return Err(TriageError::Upstream(format!(
                "Gemini API error ({}): {}",
                status, body
            )));
        }

        let parsed: ApiResponse = response
            .json()
            .await
            .map_err(|e| TriageError::Upstream(format!("Failed to parse response: {}", e)))?;

        extract_text(&parsed)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, TriageError> {
        self.generate_content(prompt).await
    }
}

/// Pull the first non-empty text part out of the response
fn extract_text(response: &ApiResponse) -> Result<String, TriageError> {
    for candidate in &response.candidates {
        for part in &candidate.content.parts {
            if !part.text.is_empty() {
                return Ok(part.text.clone());
            }
        }
    }
    Err(TriageError::Upstream(
        "No text content in response".to_string(),
    ))
}
