//! # Blob Store Trait

use serde::Serialize;

use super::errors::BlobResult;

/// Outcome of a blob deletion attempt
///
/// Deletion is best-effort: the report distinguishes a deleted blob from a
/// failed attempt and carries the resolved storage key when one could be
/// determined from the locator.
#[derive(Debug, Clone, Serialize)]
pub struct BlobDeleteReport {
    /// Whether the blob was removed from the backend
    pub deleted: bool,

    /// Storage key resolved from the locator, if any
    pub key: Option<String>,

    /// Failure detail when `deleted` is false
    pub error: Option<String>,
}

impl BlobDeleteReport {
    /// Blob removed under the given key
    pub fn deleted(key: String) -> Self {
        Self {
            deleted: true,
            key: Some(key),
            error: None,
        }
    }

    /// Backend refused or failed the delete for a known key
    pub fn failed(key: String, error: String) -> Self {
        Self {
            deleted: false,
            key: Some(key),
            error: Some(error),
        }
    }

    /// No storage key could be extracted from the locator
    pub fn unknown_key(locator: &str) -> Self {
        Self {
            deleted: false,
            key: None,
            error: Some(format!("could not determine storage key from locator: {}", locator)),
        }
    }
}

/// Backend trait for durable binary storage
pub trait BlobStore: Send + Sync + std::fmt::Debug {
    /// Persist `data` under `key` and return a public locator for it
    fn put(&self, key: &str, data: &[u8], content_type: &str) -> BlobResult<String>;

    /// Attempt to remove the blob behind `locator`
    ///
    /// Must never raise; failures are carried in the report.
    fn delete(&self, locator: &str) -> BlobDeleteReport;

    /// Public URL prefix under which locators are issued
    fn public_url(&self) -> &str;
}
