//! Home Routes
//!
//! Public landing-page statistics.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::papers::HomeStats;

use super::respond::{paper_error, ApiError};
use super::server::AppState;

#[derive(Debug, Serialize)]
pub struct HomeStatsResponse {
    pub success: bool,
    pub data: HomeStats,
}

/// Create the home routes
pub fn home_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/stats", get(home_stats_handler))
        .with_state(state)
}

async fn home_stats_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HomeStatsResponse>, ApiError> {
    let stats = state.papers.home_stats().map_err(paper_error)?;
    Ok(Json(HomeStatsResponse {
        success: true,
        data: stats,
    }))
}
