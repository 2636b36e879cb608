//! Symptom submission handler

use std::sync::Arc;

use axum::{Extension, Json, extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};
use triage_core::{EMERGENCY_WARNING, contains_emergency_symptoms, validate_symptoms};

use crate::ai::{TextGenerator, analysis};
use crate::db::HistoryStore;
use crate::error::AppError;

/// Request body for a symptom check
#[derive(Deserialize)]
pub struct CheckSymptomsRequest {
    #[serde(default)]
    symptoms: String,
}

/// Response body for a symptom check
#[derive(Serialize)]
pub struct CheckSymptomsResponse {
    analysis: String,
    symptoms: String,
    has_emergency_warning: bool,
}

/// POST /check_symptoms - Validate, analyze, and log a symptom description
///
/// Validation failures surface their message verbatim with a 400. Analysis
/// failures come back as a sanitized 500 and leave no history record. The
/// record is persisted best-effort after a successful analysis; a storage
/// failure never fails the response.
pub async fn check(
    State(store): State<HistoryStore>,
    Extension(generator): Extension<Arc<dyn TextGenerator>>,
    Json(body): Json<CheckSymptomsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let symptoms = body.symptoms.trim().to_string();

    validate_symptoms(&symptoms)?;

    let has_emergency_warning = contains_emergency_symptoms(&symptoms);

    let mut analysis = analysis::analyze_symptoms(generator.as_ref(), &symptoms).await?;

    if has_emergency_warning {
        tracing::warn!("Emergency indicators present in submitted symptoms");
        analysis = format!("{}\n\n{}", EMERGENCY_WARNING, analysis);
    }

    store.save(&symptoms, &analysis).await;

    Ok(Json(CheckSymptomsResponse {
        analysis,
        symptoms,
        has_emergency_warning,
    }))
}
