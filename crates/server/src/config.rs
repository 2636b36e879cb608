//! Server configuration

use triage_core::TriageError;

/// Server configuration loaded from environment variables
pub struct Config {
    pub bind_address: String,
    pub database_path: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub api_key: Option<String>,
    pub cors_origins: Vec<String>,
    pub rate_limit_rps: u32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// The Gemini credential is required: without it the analysis client
    /// cannot serve a single request, so startup must fail rather than
    /// degrade silently.
    pub fn from_env() -> Result<Self, TriageError> {
        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .map_err(|_| {
                TriageError::Configuration(
                    "API key not found. Set GEMINI_API_KEY or GOOGLE_API_KEY in the environment \
                     or a .env file"
                        .to_string(),
                )
            })?;

        Ok(Self {
            bind_address: std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "healthcare.db".into()),
            gemini_api_key,
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash".into()),
            api_key: std::env::var("API_KEY").ok(),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            rate_limit_rps: std::env::var("RATE_LIMIT_RPS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(50),
        })
    }
}
