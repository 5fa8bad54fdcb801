//! Error types for pd-db

use crate::store::StoreError;
use thiserror::Error;

/// Storage and persistence errors
///
/// Every variant is fatal for the call that produced it.
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Table not found (D003)
    #[error("[D003] Table or view not found: {0}")]
    TableNotFound(String),

    /// Source or target file inaccessible (D004)
    #[error("[D004] Cannot access '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Mutex poisoned (D005)
    #[error("[D005] Database mutex poisoned: {0}")]
    MutexPoisoned(String),

    /// Portable snapshot could not be parsed or written (D006)
    #[error("[D006] Invalid snapshot '{path}': {message}")]
    InvalidSnapshot { path: String, message: String },

    /// Restored data violates a key constraint (D007)
    #[error("[D007] Restore rejected: {0}")]
    Integrity(#[from] StoreError),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl DbError {
    /// IO error with the path that caused it
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        DbError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        // duckdb::Error does not expose structured variants, so the message
        // is the only way to tell a missing table from other failures.
        let msg = err.to_string();
        if msg.contains("Table with name")
            || msg.contains("Table or view with name")
            || (msg.contains("Catalog Error") && msg.contains("Table") && msg.contains("not found"))
        {
            DbError::TableNotFound(msg)
        } else {
            DbError::ExecutionError(msg)
        }
    }
}
