//! Error types for relationship builder operations

use relsync_domain::ContentId;
use thiserror::Error;

/// Errors that can occur while extracting or reconciling relationships
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// Caller passed an unusable argument (e.g. a blank slot name)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Slot name does not resolve in the catalog
    #[error("Slot not found: {0}")]
    SlotNotFound(String),

    /// Template name does not resolve in the catalog
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// Item has no summary, so no head locator can be resolved
    #[error("Item not found: {0}")]
    ItemNotFound(ContentId),

    /// Catalog backend failure
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Item summary backend failure
    #[error("Item summary error: {0}")]
    Summary(String),

    /// Relationship store failure (query, save or delete)
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BuilderError {
    /// Whether the error came from resolving a slot or template name
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            BuilderError::SlotNotFound(_) | BuilderError::TemplateNotFound(_) | BuilderError::Catalog(_)
        )
    }
}
