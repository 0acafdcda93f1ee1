//! Unified application error type.
//! All modules (db, core, cli, store) return AppError to keep the error
//! handling consistent and easy to manage. The load gate has its own
//! cloneable errors because one failure is handed to every waiter.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Failure of the backend call behind a data source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("database read failed: {0}")]
    Database(String),

    #[error("I/O error while fetching: {0}")]
    Io(String),

    #[error("could not decode record: {0}")]
    Decode(String),

    #[error("host call rejected: {0}")]
    Host(String),

    #[error("fetch task panicked: {0}")]
    Panicked(String),
}

impl From<rusqlite::Error> for FetchError {
    fn from(e: rusqlite::Error) -> Self {
        FetchError::Database(e.to_string())
    }
}

impl From<io::Error> for FetchError {
    fn from(e: io::Error) -> Self {
        FetchError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

/// Outcome of a failed `ensure_loaded`. Every variant leaves the
/// collection unloaded, so the next call retries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("load cancelled before completion")]
    Cancelled,

    #[error("load timed out after {0:?}")]
    TimedOut(Duration),
}

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid position code: {0}")]
    InvalidPosition(String),

    #[error("Invalid time range: {0}")]
    InvalidRange(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("No working time with id {0}")]
    NotFound(i64),

    #[error("Load failed: {0}")]
    Load(#[from] LoadError),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_is_transparent_inside_load_error() {
        let err: LoadError = FetchError::Host("offline".into()).into();
        assert_eq!(err.to_string(), "host call rejected: offline");
    }

    #[test]
    fn load_error_converts_into_app_error() {
        let app: AppError = LoadError::Cancelled.into();
        assert!(matches!(app, AppError::Load(LoadError::Cancelled)));
        assert_eq!(app.to_string(), "Load failed: load cancelled before completion");
    }
}
