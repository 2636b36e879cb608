pub mod emergency;
pub mod health;
pub mod history;
pub mod index;
pub mod metrics;
pub mod symptoms;

use axum::{
    Router,
    routing::{get, post},
};

use crate::db::HistoryStore;

/// Build the symptom-check API routes (guarded by the optional API key)
pub fn api_routes() -> Router<HistoryStore> {
    Router::new()
        .route("/check_symptoms", post(symptoms::check))
        .route("/history", get(history::get))
}
