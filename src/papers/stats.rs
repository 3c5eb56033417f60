//! # Aggregate Views
//!
//! Moderation-queue health for admins and headline numbers for the public
//! landing page.

use serde::Serialize;

use crate::auth::AccessContext;
use crate::registry::{Document, DocumentFilter, DocumentStatus, SortOrder};

use super::errors::PaperResult;
use super::PaperService;

/// Recent-activity window for the admin overview
const RECENT_LIMIT: usize = 5;

/// Counts by status plus the most recent submissions
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview {
    pub total_papers: usize,
    pub pending_papers: usize,
    pub approved_papers: usize,
    pub rejected_papers: usize,
    pub total_users: usize,
    pub recent_activity: Vec<Document>,
}

/// Public landing-page numbers
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeStats {
    pub total_papers: usize,
    pub total_users: usize,
    pub total_downloads: u64,
}

impl PaperService {
    /// Aggregate counts and recent activity (privileged)
    pub fn admin_stats(&self, ctx: &AccessContext) -> PaperResult<AdminOverview> {
        self.require_moderator(ctx)?;
        let registry = self.registry();

        let by_status = |status: DocumentStatus| {
            registry.count_documents(&DocumentFilter::with_status(status))
        };

        Ok(AdminOverview {
            total_papers: registry.count_documents(&DocumentFilter::default())?,
            pending_papers: by_status(DocumentStatus::Pending)?,
            approved_papers: by_status(DocumentStatus::Approved)?,
            rejected_papers: by_status(DocumentStatus::Rejected)?,
            total_users: registry.count_users()?,
            recent_activity: registry.find_many(
                &DocumentFilter::default(),
                SortOrder::Newest,
                RECENT_LIMIT,
            )?,
        })
    }

    /// Headline numbers over approved documents (public)
    pub fn home_stats(&self) -> PaperResult<HomeStats> {
        let registry = self.registry();
        let approved = DocumentFilter::with_status(DocumentStatus::Approved);

        Ok(HomeStats {
            total_papers: registry.count_documents(&approved)?,
            total_users: registry.count_users()?,
            total_downloads: registry.sum_download_counts(&approved)?,
        })
    }
}
