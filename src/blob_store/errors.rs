//! # Blob Store Errors

use thiserror::Error;

/// Result type for blob operations
pub type BlobResult<T> = Result<T, BlobError>;

/// Blob store errors
///
/// Only `put` can fail with one of these. Deletion reports its outcome
/// through `BlobDeleteReport` instead of raising.
#[derive(Debug, Clone, Error)]
pub enum BlobError {
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Failed to write blob: {0}")]
    WriteFailed(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_detail() {
        let err = BlobError::WriteFailed("disk full".into());
        assert!(err.to_string().contains("disk full"));
    }
}
