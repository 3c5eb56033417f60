//! # Query/Filter Engine
//!
//! Bounded, filtered, sorted read views over the registry. Public paths are
//! always scoped to approved documents; the owner dashboard is the one read
//! that sees every status, and only for the owner's own records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AccessContext;
use crate::registry::{Document, DocumentFilter, DocumentStatus, FacetField, SortOrder};

use super::errors::{PaperError, PaperResult};
use super::PaperService;

/// Cap for the plain approved listing
const LIST_LIMIT: usize = 50;

/// Cap for the faceted filter path; prevents unbounded scans
const FILTER_LIMIT: usize = 100;

/// Optional predicates for the faceted filter path
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    pub search: Option<String>,
    pub subject: Option<String>,
    pub class: Option<String>,
    pub semester: Option<String>,
    pub exam_type: Option<String>,
    pub year: Option<String>,
    pub sort_by: Option<String>,
}

/// Distinct values available for each filter facet
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetOptions {
    pub subjects: Vec<String>,
    pub classes: Vec<String>,
    pub semesters: Vec<String>,
    pub exam_types: Vec<String>,
    /// Descending, most recent first
    pub years: Vec<String>,
}

/// Owner dashboard: tallies plus the owner's documents of every status
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub total_downloads: u64,
    pub papers: Vec<Document>,
}

impl PaperService {
    /// Approved documents, newest first
    pub fn list_approved(&self) -> PaperResult<Vec<Document>> {
        let filter = DocumentFilter::with_status(DocumentStatus::Approved);
        Ok(self.registry().find_many(&filter, SortOrder::Newest, LIST_LIMIT)?)
    }

    /// A single approved document
    ///
    /// Non-approved documents are reported as absent, not as forbidden.
    pub fn get_approved_by_id(&self, id: Uuid) -> PaperResult<Document> {
        self.registry()
            .find_by_id(id)?
            .filter(Document::is_visible)
            .ok_or_else(PaperError::not_found)
    }

    /// Faceted filter over approved documents
    pub fn filter_approved(&self, params: FilterParams) -> PaperResult<Vec<Document>> {
        let filter = DocumentFilter {
            status: Some(DocumentStatus::Approved),
            subject: non_empty(params.subject),
            class: non_empty(params.class),
            semester: non_empty(params.semester),
            exam_type: non_empty(params.exam_type),
            year: non_empty(params.year),
            search: non_empty(params.search),
            ..Default::default()
        };
        let sort = SortOrder::parse(params.sort_by.as_deref());

        Ok(self.registry().find_many(&filter, sort, FILTER_LIMIT)?)
    }

    /// Distinct facet values across approved documents
    pub fn list_facets(&self) -> PaperResult<FacetOptions> {
        let approved = DocumentFilter::with_status(DocumentStatus::Approved);
        let registry = self.registry();

        let mut years = registry.distinct(FacetField::Year, &approved)?;
        years.reverse();

        Ok(FacetOptions {
            subjects: registry.distinct(FacetField::Subject, &approved)?,
            classes: registry.distinct(FacetField::Class, &approved)?,
            semesters: registry.distinct(FacetField::Semester, &approved)?,
            exam_types: registry.distinct(FacetField::ExamType, &approved)?,
            years,
        })
    }

    /// Pending documents awaiting moderation (privileged)
    pub fn list_pending(&self, ctx: &AccessContext) -> PaperResult<Vec<Document>> {
        self.require_moderator(ctx)?;
        let filter = DocumentFilter::with_status(DocumentStatus::Pending);
        Ok(self.registry().find_many(&filter, SortOrder::Newest, usize::MAX)?)
    }

    /// Every document, optionally narrowed by status (privileged)
    pub fn list_all_for_admin(
        &self,
        ctx: &AccessContext,
        status: Option<DocumentStatus>,
    ) -> PaperResult<Vec<Document>> {
        self.require_moderator(ctx)?;
        let filter = DocumentFilter {
            status,
            ..Default::default()
        };
        Ok(self.registry().find_many(&filter, SortOrder::Newest, usize::MAX)?)
    }

    /// The caller's own documents with dashboard tallies
    ///
    /// Ownership replaces the approved scoping: the owner sees every status.
    pub fn my_documents(
        &self,
        ctx: &AccessContext,
        status: Option<DocumentStatus>,
    ) -> PaperResult<DashboardView> {
        let user_id = ctx.require_user_id().map_err(|_| PaperError::Unauthorized)?;

        let all_mine = DocumentFilter::owned_by(user_id);
        let papers = self.registry().find_many(
            &DocumentFilter {
                status,
                ..DocumentFilter::owned_by(user_id)
            },
            SortOrder::Newest,
            usize::MAX,
        )?;

        let count = |s: DocumentStatus| {
            self.registry().count_documents(&DocumentFilter {
                status: Some(s),
                ..DocumentFilter::owned_by(user_id)
            })
        };

        Ok(DashboardView {
            total: self.registry().count_documents(&all_mine)?,
            pending: count(DocumentStatus::Pending)?,
            approved: count(DocumentStatus::Approved)?,
            rejected: count(DocumentStatus::Rejected)?,
            total_downloads: self.registry().sum_download_counts(&all_mine)?,
            papers,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
