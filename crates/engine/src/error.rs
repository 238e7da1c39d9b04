//! Error types for the migration engine adapters

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The configured address could not be understood. `url` is already masked.
    #[error("Invalid database URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Failed to load migrations from {}: {message}", .dir.display())]
    Source { dir: PathBuf, message: String },

    #[error("Migration error: {0}")]
    Migrate(String),
}

impl From<sqlx::migrate::MigrateError> for EngineError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        EngineError::Migrate(err.to_string())
    }
}
