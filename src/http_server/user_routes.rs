//! User Routes
//!
//! The owner dashboard and owner-initiated deletion.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::papers::{DashboardView, DeletionOutcome};
use crate::registry::DocumentStatus;

use super::respond::{bad_request, caller, paper_error, parse_paper_id, ApiError};
use super::server::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub success: bool,
    pub data: DashboardView,
}

#[derive(Debug, Serialize)]
pub struct OwnDeletionResponse {
    pub success: bool,
    pub message: String,
    pub details: DeletionOutcome,
}

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub status: Option<String>,
}

/// Create the user routes
pub fn user_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/dashboard", get(dashboard_handler))
        .route("/papers/:id", delete(delete_own_handler))
        .with_state(state)
}

async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let ctx = caller(&state.jwt, &headers);

    let status = match query.status.as_deref() {
        Some(raw) => Some(
            DocumentStatus::parse(raw).ok_or_else(|| bad_request("Unknown status filter"))?,
        ),
        None => None,
    };

    let dashboard = state.papers.my_documents(&ctx, status).map_err(paper_error)?;
    Ok(Json(DashboardResponse {
        success: true,
        data: dashboard,
    }))
}

async fn delete_own_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<OwnDeletionResponse>, ApiError> {
    let id = parse_paper_id(&id)?;
    let ctx = caller(&state.jwt, &headers);

    let details = state
        .papers
        .delete_own_document(&ctx, id)
        .map_err(paper_error)?;
    Ok(Json(OwnDeletionResponse {
        success: true,
        message: "Paper deleted successfully".to_string(),
        details,
    }))
}
