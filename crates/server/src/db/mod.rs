mod history;

pub use history::HistoryStore;

/// Schema for the query history log.
///
/// Flat append-only table; the surrogate id is internal only. The
/// descending timestamp index backs the newest-first history fetch.
pub const DDL: &str = "
CREATE TABLE IF NOT EXISTS query_history (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  symptoms TEXT NOT NULL,
  response TEXT NOT NULL,
  timestamp TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_timestamp
ON query_history(timestamp DESC);
";
