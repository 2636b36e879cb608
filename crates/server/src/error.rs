//! Application error handling

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use triage_core::TriageError;

/// Generic message returned when analysis fails for any internal reason
const ANALYSIS_FAILED: &str = "An error occurred while analyzing symptoms. Please try again.";

/// Fixed message returned when the history store is unreachable
const HISTORY_UNAVAILABLE: &str = "Unable to fetch history";

/// JSON error body: `{"error": "..."}`
#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Application error type
///
/// Validation messages are surfaced verbatim; everything else is logged
/// server-side and replaced by a fixed client-facing message so internal
/// error text never leaks.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Upstream(String),
    Storage(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Upstream(msg) => {
                tracing::error!(error = %msg, "Symptom analysis error");
                (StatusCode::INTERNAL_SERVER_ERROR, ANALYSIS_FAILED.to_string())
            }
            AppError::Storage(msg) => {
                tracing::error!(error = %msg, "History fetch error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    HISTORY_UNAVAILABLE.to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Unexpected error");
                (StatusCode::INTERNAL_SERVER_ERROR, ANALYSIS_FAILED.to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<TriageError> for AppError {
    fn from(err: TriageError) -> Self {
        match err {
            TriageError::Validation(msg) => AppError::BadRequest(msg),
            TriageError::Upstream(msg) => AppError::Upstream(msg),
            TriageError::Storage(msg) => AppError::Storage(msg),
            TriageError::Configuration(msg) => AppError::Internal(msg),
        }
    }
}
