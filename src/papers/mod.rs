//! # Paper Lifecycle
//!
//! The document lifecycle and dual-store consistency layer: the upload
//! pipeline coupling a blob write with a metadata insert, the moderation
//! state machine, the compensating (not transactional) deletion path, the
//! atomic download accounting, and the bounded query/filter views.
//!
//! All operations hang off [`PaperService`], which takes its collaborators
//! as explicit dependencies, constructed once at process start.

pub mod deletion;
pub mod download;
pub mod errors;
pub mod filename;
pub mod moderation;
pub mod query;
pub mod stats;
pub mod submission;

use std::sync::Arc;

use crate::blob_store::BlobStore;
use crate::registry::DocumentRegistry;

pub use deletion::DeletionOutcome;
pub use download::DownloadGrant;
pub use errors::{PaperError, PaperResult};
pub use query::{DashboardView, FacetOptions, FilterParams};
pub use stats::{AdminOverview, HomeStats};
pub use submission::Submission;

/// Document lifecycle service
///
/// Stateless across calls; the registry is the only shared mutable resource.
pub struct PaperService {
    registry: Arc<DocumentRegistry>,
    blob_store: Arc<dyn BlobStore>,
}

impl PaperService {
    /// Wire the service to its stores
    pub fn new(registry: Arc<DocumentRegistry>, blob_store: Arc<dyn BlobStore>) -> Self {
        Self {
            registry,
            blob_store,
        }
    }

    /// The metadata store
    pub fn registry(&self) -> &DocumentRegistry {
        &self.registry
    }

    pub(crate) fn blob_store(&self) -> &dyn BlobStore {
        self.blob_store.as_ref()
    }
}
