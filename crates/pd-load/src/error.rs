//! Error types for pd-load

use pd_core::CoreError;
use pd_db::DbError;
use thiserror::Error;

/// Fatal load errors
///
/// Per-record problems are never errors; they are collected as issues in a
/// [`LoadReport`](crate::report::LoadReport).
#[derive(Error, Debug)]
pub enum LoadError {
    /// L001: Source could not be read; nothing was inserted for the relation
    #[error("[L001] Cannot read source '{source_name}': {cause}")]
    SourceUnreadable {
        source_name: String,
        #[source]
        cause: csv::Error,
    },

    /// L002: Background read task failed
    #[error("[L002] Source task for '{source_name}' failed: {message}")]
    Task {
        source_name: String,
        message: String,
    },

    /// L003: Store persistence failed
    #[error("[L003] {0}")]
    Persistence(#[from] DbError),

    /// L004: Configuration error
    #[error("[L004] {0}")]
    Config(#[from] CoreError),
}

/// Result type alias for LoadError
pub type LoadResult<T> = Result<T, LoadError>;
