//! Admin Routes
//!
//! Moderation queue, approve/reject decisions, deletion and aggregate stats.
//! Privilege is enforced by the service layer; these handlers only carry the
//! caller's context through.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    routing::{delete, get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::papers::{AdminOverview, DeletionOutcome};
use crate::registry::{Document, DocumentStatus};

use super::paper_routes::{PapersData, PapersResponse};
use super::respond::{bad_request, caller, paper_error, parse_paper_id, ApiError};
use super::server::AppState;

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub data: AdminOverview,
}

#[derive(Debug, Serialize)]
pub struct ModerationResponse {
    pub success: bool,
    pub message: String,
    pub data: Document,
}

#[derive(Debug, Serialize)]
pub struct DeletionResponse {
    pub success: bool,
    pub message: String,
    pub details: DeletionOutcome,
}

#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    #[serde(default)]
    pub status: Option<String>,
}

/// Create the admin routes
pub fn admin_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/stats", get(stats_handler))
        .route("/pending-papers", get(pending_handler))
        .route("/papers", get(all_papers_handler))
        .route("/papers/:id/approve", put(approve_handler))
        .route("/papers/:id/reject", put(reject_handler))
        .route("/papers/:id", delete(delete_handler))
        .with_state(state)
}

async fn stats_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<StatsResponse>, ApiError> {
    let ctx = caller(&state.jwt, &headers);
    let overview = state.papers.admin_stats(&ctx).map_err(paper_error)?;
    Ok(Json(StatsResponse {
        success: true,
        data: overview,
    }))
}

async fn pending_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<PapersResponse>, ApiError> {
    let ctx = caller(&state.jwt, &headers);
    let papers = state.papers.list_pending(&ctx).map_err(paper_error)?;
    Ok(Json(PapersResponse {
        success: true,
        count: papers.len(),
        data: PapersData { papers },
    }))
}

async fn all_papers_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<StatusQuery>,
) -> Result<Json<PapersResponse>, ApiError> {
    let ctx = caller(&state.jwt, &headers);

    let status = match query.status.as_deref() {
        Some(raw) => Some(
            DocumentStatus::parse(raw).ok_or_else(|| bad_request("Unknown status filter"))?,
        ),
        None => None,
    };

    let papers = state
        .papers
        .list_all_for_admin(&ctx, status)
        .map_err(paper_error)?;
    Ok(Json(PapersResponse {
        success: true,
        count: papers.len(),
        data: PapersData { papers },
    }))
}

async fn approve_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<ModerationResponse>, ApiError> {
    let id = parse_paper_id(&id)?;
    let ctx = caller(&state.jwt, &headers);

    let paper = state.papers.approve(&ctx, id).map_err(paper_error)?;
    Ok(Json(ModerationResponse {
        success: true,
        message: "Paper approved successfully".to_string(),
        data: paper,
    }))
}

async fn reject_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<RejectRequest>,
) -> Result<Json<ModerationResponse>, ApiError> {
    let id = parse_paper_id(&id)?;
    let ctx = caller(&state.jwt, &headers);

    let paper = state
        .papers
        .reject(&ctx, id, request.reason)
        .map_err(paper_error)?;
    Ok(Json(ModerationResponse {
        success: true,
        message: "Paper rejected".to_string(),
        data: paper,
    }))
}

async fn delete_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<DeletionResponse>, ApiError> {
    let id = parse_paper_id(&id)?;
    let ctx = caller(&state.jwt, &headers);

    let details = state.papers.delete_document(&ctx, id).map_err(paper_error)?;
    Ok(Json(DeletionResponse {
        success: true,
        message: "Paper deletion completed".to_string(),
        details,
    }))
}
