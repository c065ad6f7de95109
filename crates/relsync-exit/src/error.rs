//! Error types for exit operations.

use relsync_builder::BuilderError;
use thiserror::Error;
use tracing::error;

/// The single error an exit reports to the invoking layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExitError {
    /// Missing or malformed exit parameters or request values
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A slot, template or item could not be resolved
    #[error("Lookup failed: {0}")]
    Lookup(String),

    /// The relationship store or another collaborator failed
    #[error("Conversion failed: {0}")]
    Conversion(String),
}

impl ExitError {
    /// Process exit code for command-line hosts
    pub fn exit_code(&self) -> i32 {
        match self {
            ExitError::InvalidRequest(_) => 2,
            ExitError::Lookup(_) => 3,
            ExitError::Conversion(_) => 1,
        }
    }
}

impl From<BuilderError> for ExitError {
    fn from(err: BuilderError) -> Self {
        match err {
            BuilderError::InvalidArgument(msg) => ExitError::InvalidRequest(msg),
            BuilderError::ItemNotFound(id) => ExitError::Lookup(format!("Item not found: {}", id)),
            e if e.is_lookup_failure() => ExitError::Lookup(e.to_string()),
            e => ExitError::Conversion(e.to_string()),
        }
    }
}

/// Log a builder failure and translate it
pub(crate) fn translate(err: BuilderError) -> ExitError {
    error!("Relationship builder failed: {}", err);
    ExitError::from(err)
}
