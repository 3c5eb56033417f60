//! # Download Accountant
//!
//! Visibility gate plus atomic usage counting. The increment happens inside
//! the registry (fetch-and-increment), never as a read-then-write from this
//! layer, so concurrent downloads cannot lose updates.

use serde::Serialize;
use uuid::Uuid;

use crate::auth::AccessContext;
use crate::observability::{Logger, Severity};
use crate::registry::DocumentStatus;

use super::errors::{PaperError, PaperResult};
use super::PaperService;

/// A granted download: the locator plus the refreshed counter
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadGrant {
    pub file_url: String,

    /// Suggested client-side file name
    pub file_name: String,

    /// Post-increment value; callers refresh cached views from this instead
    /// of re-querying
    pub download_count: u64,
}

impl PaperService {
    /// Grant a download and count it
    ///
    /// Non-approved documents are only downloadable by privileged callers.
    pub fn download(&self, ctx: &AccessContext, id: Uuid) -> PaperResult<DownloadGrant> {
        let doc = self
            .registry()
            .find_by_id(id)?
            .ok_or_else(PaperError::not_found)?;

        if doc.status != DocumentStatus::Approved && !ctx.is_admin {
            return Err(PaperError::Forbidden(
                "Paper not available for download".to_string(),
            ));
        }

        let file_url = doc
            .file_url
            .clone()
            .ok_or_else(|| PaperError::NotFound("File URL not found".to_string()))?;

        let download_count = self.registry().increment_download_count(id)?;

        Logger::log(
            Severity::Info,
            "download_granted",
            &[
                ("paper_id", &id.to_string()),
                ("download_count", &download_count.to_string()),
            ],
        );

        Ok(DownloadGrant {
            file_url,
            file_name: format!("{}.pdf", doc.title),
            download_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::papers::testutil::{member, moderator, service, submission};

    #[test]
    fn test_download_counts_each_grant() {
        let (service, _temp) = service();
        let ctx = member(&service);
        let doc = service.submit_document(&ctx, submission("Counted")).unwrap();
        service.approve(&moderator(), doc.id).unwrap();

        for expected in 1..=3 {
            let grant = service.download(&AccessContext::anonymous(), doc.id).unwrap();
            assert_eq!(grant.download_count, expected);
        }

        let stored = service.registry().find_by_id(doc.id).unwrap().unwrap();
        assert_eq!(stored.download_count, 3);
    }

    #[test]
    fn test_grant_carries_locator_and_name() {
        let (service, _temp) = service();
        let ctx = member(&service);
        let doc = service.submit_document(&ctx, submission("Graph Theory")).unwrap();
        service.approve(&moderator(), doc.id).unwrap();

        let grant = service.download(&AccessContext::anonymous(), doc.id).unwrap();
        assert_eq!(grant.file_url, doc.file_url.unwrap());
        assert_eq!(grant.file_name, "Graph Theory.pdf");
    }

    #[test]
    fn test_pending_document_blocked_for_unprivileged() {
        let (service, _temp) = service();
        let ctx = member(&service);
        let doc = service.submit_document(&ctx, submission("Hidden")).unwrap();

        let err = service.download(&AccessContext::anonymous(), doc.id).unwrap_err();
        assert!(matches!(err, PaperError::Forbidden(_)));

        // the failed attempt must not count
        let stored = service.registry().find_by_id(doc.id).unwrap().unwrap();
        assert_eq!(stored.download_count, 0);
    }

    #[test]
    fn test_privileged_caller_downloads_any_status() {
        let (service, _temp) = service();
        let ctx = member(&service);
        let doc = service.submit_document(&ctx, submission("Hidden")).unwrap();

        let grant = service.download(&moderator(), doc.id).unwrap();
        assert_eq!(grant.download_count, 1);
    }

    #[test]
    fn test_missing_file_url_is_not_found() {
        use crate::registry::{Document, DocumentMeta, DocumentStatus};

        let (service, _temp) = service();
        let mut doc = Document::new(
            DocumentMeta {
                title: "No Blob".to_string(),
                subject: "Math".to_string(),
                class: "BSc".to_string(),
                semester: "1".to_string(),
                year: "2024".to_string(),
                exam_type: "final".to_string(),
                tags: Vec::new(),
            },
            "no_blob.pdf".to_string(),
            None,
            Uuid::new_v4(),
        );
        doc.status = DocumentStatus::Approved;
        let doc = service.registry().insert(doc).unwrap();

        let err = service.download(&AccessContext::anonymous(), doc.id).unwrap_err();
        assert!(matches!(err, PaperError::NotFound(_)));
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let (service, _temp) = service();
        let err = service
            .download(&AccessContext::anonymous(), Uuid::new_v4())
            .unwrap_err();
        assert!(matches!(err, PaperError::NotFound(_)));
    }
}
