//! Symptom analysis powered by the Gemini API

pub mod analysis;
pub mod client;

use async_trait::async_trait;
use triage_core::TriageError;

pub use client::GeminiClient;

/// Text-generation backend seam.
///
/// The server is built against this trait rather than the concrete client
/// so tests can substitute a double for the hosted API.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Submit a prompt and return the generated text.
    async fn generate(&self, prompt: &str) -> Result<String, TriageError>;
}
