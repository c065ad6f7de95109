//! Error types for the CLI application.

use relsync_exit::ExitError;
use relsync_store::StoreError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database error
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Exit failure (extract or build)
    #[error("{0}")]
    Exit(#[from] ExitError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl CliError {
    /// Process exit code for the error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Exit(e) => e.exit_code(),
            CliError::Config(_) | CliError::Toml(_) => 2,
            _ => 1,
        }
    }
}
