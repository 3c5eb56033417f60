//! # Moderation State Machine
//!
//! `pending` is the only state transitions originate from; `approved` and
//! `rejected` are terminal. Both transitions run as a single conditional
//! update inside the registry, so concurrent moderation calls on the same
//! document cannot both succeed.

use uuid::Uuid;

use crate::auth::AccessContext;
use crate::observability::{Logger, Severity};
use crate::registry::{Document, DocumentStatus};

use super::errors::{PaperError, PaperResult};
use super::PaperService;

const DEFAULT_REJECTION_REASON: &str = "No reason provided";

impl PaperService {
    /// Approve a pending document, making it publicly visible
    ///
    /// Clears any rejection reason. Fails with Conflict naming the actual
    /// status when the document is no longer pending.
    pub fn approve(&self, ctx: &AccessContext, id: Uuid) -> PaperResult<Document> {
        self.require_moderator(ctx)?;

        let doc = self.registry().update_status(
            id,
            DocumentStatus::Pending,
            DocumentStatus::Approved,
            None,
        )?;

        Logger::log(Severity::Info, "paper_approved", &[("paper_id", &id.to_string())]);
        Ok(doc)
    }

    /// Reject a pending document with a reason
    ///
    /// An empty or missing reason is replaced with a fixed placeholder so a
    /// rejected document always carries one.
    pub fn reject(&self, ctx: &AccessContext, id: Uuid, reason: Option<String>) -> PaperResult<Document> {
        self.require_moderator(ctx)?;

        let reason = reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_REJECTION_REASON.to_string());

        let doc = self.registry().update_status(
            id,
            DocumentStatus::Pending,
            DocumentStatus::Rejected,
            Some(reason),
        )?;

        Logger::log(Severity::Info, "paper_rejected", &[("paper_id", &id.to_string())]);
        Ok(doc)
    }

    pub(crate) fn require_moderator(&self, ctx: &AccessContext) -> PaperResult<()> {
        if ctx.is_admin {
            Ok(())
        } else {
            Err(PaperError::Forbidden("Admin access required".to_string()))
        }
    }
}
