//! Emergency contact information handler

use axum::Json;
use triage_core::EmergencyInfo;

/// GET /emergency_info - Static emergency contact payload
pub async fn info() -> Json<EmergencyInfo> {
    Json(EmergencyInfo::new())
}
