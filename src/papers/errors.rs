//! # Paper Lifecycle Errors

use thiserror::Error;

use crate::registry::{DocumentStatus, RegistryError};

/// Result type for lifecycle operations
pub type PaperResult<T> = Result<T, PaperError>;

/// Lifecycle errors
///
/// Blob *delete* failures never surface here; they travel inside
/// `DeletionOutcome`. Blob *write* failures during upload are fatal and
/// arrive as `Storage`.
#[derive(Debug, Clone, Error)]
pub enum PaperError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Moderation transition attempted from a non-pending state
    #[error("Paper is already {actual}")]
    Conflict { actual: DocumentStatus },

    #[error("You are not logged in")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    #[error("Cloud storage failure: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PaperError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            PaperError::Validation(_) => 400,
            PaperError::NotFound(_) => 404,
            PaperError::Conflict { .. } => 409,
            PaperError::Unauthorized => 401,
            PaperError::Forbidden(_) => 403,
            PaperError::Storage(_) => 502,
            PaperError::Internal(_) => 500,
        }
    }

    pub(crate) fn not_found() -> Self {
        PaperError::NotFound("Paper not found".to_string())
    }
}

impl From<RegistryError> for PaperError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::DocumentNotFound(_) => PaperError::not_found(),
            RegistryError::UserNotFound(id) => {
                PaperError::NotFound(format!("User not found: {}", id))
            }
            RegistryError::StatusConflict { actual } => PaperError::Conflict { actual },
            RegistryError::DuplicateDocument(id) => {
                PaperError::Internal(format!("duplicate document id: {}", id))
            }
            RegistryError::Internal(msg) => PaperError::Internal(msg),
        }
    }
}
