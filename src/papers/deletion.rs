//! # Deletion Orchestrator
//!
//! The two stores are not transactional. Metadata deletion is authoritative
//! and unconditional: the document disappears from every listing even when
//! the underlying bytes cannot be reclaimed, trading storage cost for
//! availability. The blob step is best-effort and its outcome is always
//! surfaced, never swallowed.

use serde::Serialize;
use uuid::Uuid;

use crate::auth::AccessContext;
use crate::observability::{Logger, Severity};
use crate::registry::{Document, DocumentStatus};

use super::errors::{PaperError, PaperResult};
use super::PaperService;

/// Structured result of a dual-store deletion
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionOutcome {
    /// Always true when the call returns Ok
    pub metadata_deleted: bool,

    /// Whether the blob was reclaimed
    pub blob_deleted: bool,

    /// Storage key resolved from the locator, when one could be determined
    pub blob_key: Option<String>,

    /// Failure detail for the blob step
    pub blob_error: Option<String>,
}

impl PaperService {
    /// Delete any document (privileged)
    pub fn delete_document(&self, ctx: &AccessContext, id: Uuid) -> PaperResult<DeletionOutcome> {
        self.require_moderator(ctx)?;

        let doc = self
            .registry()
            .find_by_id(id)?
            .ok_or_else(PaperError::not_found)?;

        self.delete_both_stores(doc)
    }

    /// Delete one of the caller's own documents
    ///
    /// An unknown id and a document owned by someone else are
    /// indistinguishable to the caller. Approved documents stay; only a
    /// moderator may remove published material.
    pub fn delete_own_document(&self, ctx: &AccessContext, id: Uuid) -> PaperResult<DeletionOutcome> {
        let user_id = ctx.require_user_id().map_err(|_| PaperError::Unauthorized)?;

        let doc = self
            .registry()
            .find_by_id(id)?
            .filter(|doc| doc.uploaded_by == user_id)
            .ok_or_else(PaperError::not_found)?;

        if doc.status == DocumentStatus::Approved {
            return Err(PaperError::Forbidden(
                "Approved papers cannot be deleted by their uploader".to_string(),
            ));
        }

        self.delete_both_stores(doc)
    }

    /// Best-effort blob removal followed by unconditional metadata removal
    fn delete_both_stores(&self, doc: Document) -> PaperResult<DeletionOutcome> {
        let (blob_deleted, blob_key, blob_error) = match &doc.file_url {
            Some(locator) => {
                let report = self.blob_store().delete(locator);
                (report.deleted, report.key, report.error)
            }
            None => (false, None, Some("No file to delete".to_string())),
        };

        self.registry().delete_by_id(doc.id)?;

        if doc.file_url.is_some() && !blob_deleted {
            Logger::log(
                Severity::Warn,
                "blob_delete_failed",
                &[
                    ("paper_id", &doc.id.to_string()),
                    ("error", blob_error.as_deref().unwrap_or("unknown")),
                ],
            );
        }

        Logger::log(Severity::Info, "paper_deleted", &[("paper_id", &doc.id.to_string())]);

        Ok(DeletionOutcome {
            metadata_deleted: true,
            blob_deleted,
            blob_key,
            blob_error,
        })
    }
}
