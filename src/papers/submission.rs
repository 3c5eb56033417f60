//! # Upload Pipeline
//!
//! Couples the blob write with the metadata insert. Ordering rule: the blob
//! is written first, so no metadata record can ever reference a missing
//! blob. The inverse partial failure — a blob whose registry insert failed —
//! is accepted as a recoverable orphan and logged for out-of-band
//! reconciliation.

use chrono::Utc;

use crate::auth::AccessContext;
use crate::observability::{Logger, Severity};
use crate::registry::{Document, DocumentMeta};

use super::errors::{PaperError, PaperResult};
use super::filename;
use super::PaperService;

/// A submission as received from the boundary
#[derive(Debug, Clone)]
pub struct Submission {
    pub meta: DocumentMeta,
    pub payload: Vec<u8>,
    pub content_type: String,
}

impl PaperService {
    /// Accept a new submission into the moderation queue
    ///
    /// Validates before any store access, writes the blob, then inserts the
    /// pending metadata record and bumps the submitter's upload counter.
    pub fn submit_document(
        &self,
        ctx: &AccessContext,
        submission: Submission,
    ) -> PaperResult<Document> {
        let user_id = ctx.require_user_id().map_err(|_| PaperError::Unauthorized)?;

        if submission.payload.is_empty() {
            return Err(PaperError::Validation("No file uploaded".to_string()));
        }
        validate_meta(&submission.meta)?;

        let created_at = Utc::now();
        let key = filename::storage_key(&submission.meta.title, created_at);

        // Blob write comes first; a failure here aborts the upload with no
        // metadata record left behind.
        let locator = self
            .blob_store()
            .put(&key, &submission.payload, &submission.content_type)
            .map_err(|e| PaperError::Storage(e.to_string()))?;

        let doc = Document::new(submission.meta, key.clone(), Some(locator), user_id);
        let doc = match self.registry().insert(doc) {
            Ok(doc) => doc,
            Err(e) => {
                // The blob already exists; it is now an orphan until an
                // out-of-band sweep reclaims it.
                Logger::log(
                    Severity::Warn,
                    "orphan_blob",
                    &[("storage_key", key.as_str()), ("error", &e.to_string())],
                );
                return Err(e.into());
            }
        };

        if self.registry().increment_upload_count(user_id).is_err() {
            // Unknown uploader records are tolerated, matching the
            // fire-and-forget counter update at the boundary.
            Logger::log(
                Severity::Warn,
                "upload_count_skipped",
                &[("user_id", &user_id.to_string())],
            );
        }

        Logger::log(
            Severity::Info,
            "paper_submitted",
            &[
                ("paper_id", &doc.id.to_string()),
                ("storage_key", &doc.file_name),
            ],
        );
        Ok(doc)
    }
}

fn validate_meta(meta: &DocumentMeta) -> PaperResult<()> {
    let required = [
        ("title", &meta.title),
        ("subject", &meta.subject),
        ("class", &meta.class),
        ("semester", &meta.semester),
        ("year", &meta.year),
        ("examType", &meta.exam_type),
    ];

    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(PaperError::Validation(format!(
                "Please provide all the required fields: missing {}",
                field
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::papers::testutil::{member, service, submission};
    use crate::registry::{DocumentFilter, DocumentStatus};

    #[test]
    fn test_submission_creates_pending_document() {
        let (service, _temp) = service();
        let ctx = member(&service);

        let doc = service
            .submit_document(&ctx, submission("Data Structures Final 2024"))
            .unwrap();

        assert_eq!(doc.status, DocumentStatus::Pending);
        assert_eq!(doc.download_count, 0);
        assert!(doc.file_name.starts_with("data_structures_final_2024_"));
        assert!(doc.file_name.ends_with(".pdf"));
        assert_eq!(
            doc.file_url.as_deref().map(|u| u.starts_with("https://files.test.edu/")),
            Some(true)
        );
    }

    #[test]
    fn test_submission_bumps_upload_count() {
        let (service, _temp) = service();
        let ctx = member(&service);
        let user_id = ctx.user_id.unwrap();

        service.submit_document(&ctx, submission("First")).unwrap();
        service.submit_document(&ctx, submission("Second")).unwrap();

        let user = service.registry().find_user(user_id).unwrap().unwrap();
        assert_eq!(user.upload_count, 2);
    }

    #[test]
    fn test_anonymous_submission_rejected() {
        let (service, _temp) = service();
        let ctx = crate::auth::AccessContext::anonymous();

        let err = service.submit_document(&ctx, submission("X")).unwrap_err();
        assert!(matches!(err, PaperError::Unauthorized));
    }

    #[test]
    fn test_empty_field_rejected_before_store_access() {
        let (service, temp) = service();
        let ctx = member(&service);

        let mut bad = submission("Valid Title");
        bad.meta.subject = "  ".to_string();

        let err = service.submit_document(&ctx, bad).unwrap_err();
        assert!(matches!(err, PaperError::Validation(_)));

        // nothing persisted on either store
        assert!(std::fs::read_dir(temp.path()).unwrap().next().is_none());
        let all = service
            .registry()
            .find_many(&DocumentFilter::default(), Default::default(), usize::MAX)
            .unwrap();
        assert!(all.is_empty());
    }

    #[test]
    fn test_empty_payload_rejected() {
        let (service, _temp) = service();
        let ctx = member(&service);

        let mut bad = submission("Valid Title");
        bad.payload.clear();

        let err = service.submit_document(&ctx, bad).unwrap_err();
        assert!(matches!(err, PaperError::Validation(_)));
    }

    #[test]
    fn test_blob_write_failure_leaves_no_metadata() {
        use crate::blob_store::{BlobDeleteReport, BlobError, BlobResult, BlobStore};
        use crate::registry::DocumentRegistry;
        use std::sync::Arc;

        #[derive(Debug)]
        struct FailingBlobStore;

        impl BlobStore for FailingBlobStore {
            fn put(&self, _key: &str, _data: &[u8], _ct: &str) -> BlobResult<String> {
                Err(BlobError::WriteFailed("bucket unreachable".to_string()))
            }
            fn delete(&self, locator: &str) -> BlobDeleteReport {
                BlobDeleteReport::unknown_key(locator)
            }
            fn public_url(&self) -> &str {
                "https://files.test.edu"
            }
        }

        let registry = Arc::new(DocumentRegistry::new());
        let service = PaperService::new(Arc::clone(&registry), Arc::new(FailingBlobStore));
        let user = registry.register_user("Member").unwrap();
        let ctx = crate::auth::AccessContext::authenticated(user.id);

        let err = service.submit_document(&ctx, submission("Doomed")).unwrap_err();
        assert!(matches!(err, PaperError::Storage(_)));

        let all = registry
            .find_many(&DocumentFilter::default(), Default::default(), usize::MAX)
            .unwrap();
        assert!(all.is_empty());
        assert_eq!(registry.find_user(user.id).unwrap().unwrap().upload_count, 0);
    }
}
