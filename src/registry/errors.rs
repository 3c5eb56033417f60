//! # Registry Errors

use thiserror::Error;
use uuid::Uuid;

use super::document::DocumentStatus;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry errors
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    #[error("Document not found: {0}")]
    DocumentNotFound(Uuid),

    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Document already registered: {0}")]
    DuplicateDocument(Uuid),

    /// Conditional transition found the document in a different state
    #[error("Document is already {actual}")]
    StatusConflict { actual: DocumentStatus },

    #[error("Internal registry error: {0}")]
    Internal(String),
}
