use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A logged symptom query (append-only, immutable once written)
///
/// The timestamp is server-assigned at persistence time and is
/// monotonically non-decreasing by insertion order. The surrogate
/// row id is never exposed externally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRecord {
    pub symptoms: String,
    pub response: String,
    pub timestamp: DateTime<Utc>,
}
