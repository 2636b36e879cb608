//! Append-only query history backed by SQLite

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};
use triage_core::{QueryRecord, TriageError};

/// Store for the query history log.
///
/// Holds only the database path: every operation opens its own connection,
/// runs one statement, and drops it, so no lock is held across requests.
/// The blocking rusqlite calls run on the tokio blocking pool.
#[derive(Clone)]
pub struct HistoryStore {
    db_path: PathBuf,
}

impl HistoryStore {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Create the schema if it does not exist yet.
    ///
    /// Storage being unavailable at startup is not fatal: the caller logs
    /// the error and the service keeps serving, degraded per operation.
    pub async fn init(&self) -> Result<(), TriageError> {
        let path = self.db_path.clone();
        run_blocking(move || {
            let conn = Connection::open(&path)?;
            conn.execute_batch(super::DDL)?;
            Ok(())
        })
        .await
    }

    /// Append a record with a server-assigned timestamp.
    ///
    /// Persistence is best-effort: failures are logged and absorbed, so a
    /// lost record never fails the request that produced it.
    pub async fn save(&self, symptoms: &str, response: &str) {
        let path = self.db_path.clone();
        let symptoms = symptoms.to_string();
        let response = response.to_string();

        let result = run_blocking(move || {
            let conn = Connection::open(&path)?;
            conn.execute(
                "INSERT INTO query_history (symptoms, response, timestamp)
                 VALUES (?1, ?2, ?3)",
                params![symptoms, response, Utc::now()],
            )?;
            Ok(())
        })
        .await;

        if let Err(e) = result {
            tracing::error!(error = %e, "Database save error");
        }
    }

    /// Fetch up to `limit` most recent records, newest first.
    ///
    /// Ties on the timestamp fall back to insertion order so the ordering
    /// stays strict. Failures are logged here and returned for the route
    /// to convert into its fixed client-facing message.
    pub async fn fetch(&self, limit: i64) -> Result<Vec<QueryRecord>, TriageError> {
        let path = self.db_path.clone();

        let result = run_blocking(move || {
            let conn = Connection::open(&path)?;
            let mut stmt = conn.prepare(
                "SELECT symptoms, response, timestamp
                 FROM query_history
                 ORDER BY timestamp DESC, id DESC
                 LIMIT ?1",
            )?;
            let records = stmt
                .query_map(params![limit], |row| {
                    Ok(QueryRecord {
                        symptoms: row.get(0)?,
                        response: row.get(1)?,
                        timestamp: row.get::<_, DateTime<Utc>>(2)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(records)
        })
        .await;

        result.inspect_err(|e| tracing::error!(error = %e, "Database fetch error"))
    }

    /// Probe the store for the health endpoint
    pub async fn ping(&self) -> Result<(), TriageError> {
        let path = self.db_path.clone();
        run_blocking(move || {
            let conn = Connection::open(&path)?;
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
            Ok(())
        })
        .await
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }
}

/// Run a blocking rusqlite closure on the tokio blocking pool
async fn run_blocking<T, F>(f: F) -> Result<T, TriageError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, rusqlite::Error> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| TriageError::Storage(format!("Blocking task failed: {}", e)))?
        .map_err(|e| TriageError::Storage(e.to_string()))
}
