use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid migration name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Failed to create {}", .path.display())]
    Scaffold {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The `up` file exists on disk but its `down` counterpart could not be created.
    #[error(
        "Created {} but failed to create {}",
        .created.display(),
        .path.display()
    )]
    PartialScaffold {
        created: PathBuf,
        path: PathBuf,
        source: std::io::Error,
    },
}
