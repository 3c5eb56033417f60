//! # Local Filesystem Blob Backend
//!
//! Stores blobs as plain files under a root directory and issues locators
//! under a configured public URL. Suitable for single-node deployments; an
//! S3-compatible backend plugs in behind the same [`BlobStore`] trait.

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use super::backend::{BlobDeleteReport, BlobStore};
use super::errors::{BlobError, BlobResult};
use super::locator::extract_storage_key;

/// Local filesystem blob store
#[derive(Debug)]
pub struct LocalBlobStore {
    root: PathBuf,
    public_url: String,
}

impl LocalBlobStore {
    /// Create a backend rooted at `root`, issuing locators under `public_url`
    pub fn new(root: PathBuf, public_url: impl Into<String>) -> Self {
        Self {
            root,
            public_url: public_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn full_path(&self, key: &str) -> BlobResult<PathBuf> {
        // Keys are flat names derived from titles; anything trying to walk
        // out of the root is rejected outright.
        if key.is_empty() || key.split('/').any(|seg| seg == "..") || Path::new(key).is_absolute() {
            return Err(BlobError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }

    /// Hex sha256 of a payload, recorded next to the blob for audits
    pub fn checksum(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        format!("{:x}", hasher.finalize())
    }
}

impl BlobStore for LocalBlobStore {
    fn put(&self, key: &str, data: &[u8], _content_type: &str) -> BlobResult<String> {
        let path = self.full_path(key)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| BlobError::IoError(e.to_string()))?;
        }

        fs::write(&path, data).map_err(|e| BlobError::WriteFailed(e.to_string()))?;

        let checksum_path = path.with_extension("sha256");
        fs::write(&checksum_path, Self::checksum(data))
            .map_err(|e| BlobError::IoError(e.to_string()))?;

        Ok(format!("{}/{}", self.public_url, key))
    }

    fn delete(&self, locator: &str) -> BlobDeleteReport {
        let key = match extract_storage_key(locator, &self.public_url) {
            Some(key) => key,
            None => return BlobDeleteReport::unknown_key(locator),
        };

        let path = match self.full_path(&key) {
            Ok(path) => path,
            Err(e) => return BlobDeleteReport::failed(key, e.to_string()),
        };

        match fs::remove_file(&path) {
            Ok(()) => {
                let _ = fs::remove_file(path.with_extension("sha256"));
                BlobDeleteReport::deleted(key)
            }
            Err(e) => BlobDeleteReport::failed(key, e.to_string()),
        }
    }

    fn public_url(&self) -> &str {
        &self.public_url
    }
}
