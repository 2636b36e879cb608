use thiserror::Error;

/// Triage service error types
#[derive(Debug, Error)]
pub enum TriageError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Analysis request failed: {0}")]
    Upstream(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}
