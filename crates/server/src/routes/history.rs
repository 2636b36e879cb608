//! Query history handler

use axum::{Json, extract::State, response::IntoResponse};
use triage_core::QueryRecord;

use crate::db::HistoryStore;
use crate::error::AppError;

/// Maximum number of records returned by a history fetch
const HISTORY_LIMIT: i64 = 10;

/// GET /history - Most recent queries, newest first
pub async fn get(State(store): State<HistoryStore>) -> Result<impl IntoResponse, AppError> {
    let records: Vec<QueryRecord> = store.fetch(HISTORY_LIMIT).await?;
    Ok(Json(records))
}
