//! # Blob Store
//!
//! Durable binary storage behind a flat key namespace. The adapter knows
//! nothing about documents: it takes a storage key and bytes, and hands back
//! a public locator. Deletion works the other way around, turning a locator
//! back into a key through a prioritized fallback chain.
//!
//! ## Invariants
//! - `put` either persists the whole payload or fails; no partial writes are
//!   reported as success.
//! - `delete` never raises. It returns a [`BlobDeleteReport`] so callers can
//!   proceed with metadata deletion regardless of the blob outcome.

pub mod backend;
pub mod errors;
pub mod local;
pub mod locator;

pub use backend::{BlobDeleteReport, BlobStore};
pub use errors::{BlobError, BlobResult};
pub use local::LocalBlobStore;
pub use locator::extract_storage_key;
