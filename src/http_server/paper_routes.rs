//! Public Paper Routes
//!
//! Listing, filtering, facet discovery, download accounting and multipart
//! submission.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::papers::{DownloadGrant, FacetOptions, FilterParams, Submission};
use crate::registry::{Document, DocumentMeta};

use super::respond::{bad_request, caller, paper_error, parse_paper_id, ApiError};
use super::server::AppState;

#[derive(Debug, Serialize)]
pub struct PapersResponse {
    pub success: bool,
    pub count: usize,
    pub data: PapersData,
}

#[derive(Debug, Serialize)]
pub struct PapersData {
    pub papers: Vec<Document>,
}

#[derive(Debug, Serialize)]
pub struct PaperResponse {
    pub success: bool,
    pub data: Document,
}

#[derive(Debug, Serialize)]
pub struct DownloadResponse {
    pub success: bool,
    pub message: String,
    pub data: DownloadGrant,
}

#[derive(Debug, Serialize)]
pub struct FacetsResponse {
    pub success: bool,
    pub data: FacetOptions,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    pub data: PaperData,
}

#[derive(Debug, Serialize)]
pub struct PaperData {
    pub paper: Document,
}

/// Create the public paper routes
pub fn paper_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(list_papers_handler))
        .route("/filters", get(filter_handler))
        .route("/filter-options", get(filter_options_handler))
        .route("/upload", post(upload_handler))
        .route("/:id/download", post(download_handler))
        .route("/:id", get(get_paper_handler))
        .with_state(state)
}

async fn list_papers_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PapersResponse>, ApiError> {
    let papers = state.papers.list_approved().map_err(paper_error)?;
    Ok(Json(PapersResponse {
        success: true,
        count: papers.len(),
        data: PapersData { papers },
    }))
}

async fn filter_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> Result<Json<PapersResponse>, ApiError> {
    let papers = state.papers.filter_approved(params).map_err(paper_error)?;
    Ok(Json(PapersResponse {
        success: true,
        count: papers.len(),
        data: PapersData { papers },
    }))
}

async fn filter_options_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FacetsResponse>, ApiError> {
    let facets = state.papers.list_facets().map_err(paper_error)?;
    Ok(Json(FacetsResponse {
        success: true,
        data: facets,
    }))
}

async fn get_paper_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PaperResponse>, ApiError> {
    let id = parse_paper_id(&id)?;
    let paper = state.papers.get_approved_by_id(id).map_err(paper_error)?;
    Ok(Json(PaperResponse {
        success: true,
        data: paper,
    }))
}

async fn download_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<DownloadResponse>, ApiError> {
    let id = parse_paper_id(&id)?;
    let ctx = caller(&state.jwt, &headers);

    let grant = state.papers.download(&ctx, id).map_err(paper_error)?;
    Ok(Json(DownloadResponse {
        success: true,
        message: "Download URL generated".to_string(),
        data: grant,
    }))
}

async fn upload_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    let ctx = caller(&state.jwt, &headers);

    let submission = read_submission(multipart).await?;
    let paper = state
        .papers
        .submit_document(&ctx, submission)
        .map_err(paper_error)?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            success: true,
            message: "Upload successful, waiting for approval".to_string(),
            data: PaperData { paper },
        }),
    ))
}

/// Collect the multipart form into a submission
async fn read_submission(mut multipart: Multipart) -> Result<Submission, ApiError> {
    let mut payload: Vec<u8> = Vec::new();
    let mut content_type = "application/octet-stream".to_string();
    let mut title = String::new();
    let mut subject = String::new();
    let mut class = String::new();
    let mut semester = String::new();
    let mut year = String::new();
    let mut exam_type = String::new();
    let mut tags: Vec<String> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                if let Some(ct) = field.content_type() {
                    content_type = ct.to_string();
                }
                payload = field
                    .bytes()
                    .await
                    .map_err(|e| bad_request(e.to_string()))?
                    .to_vec();
            }
            "title" => title = read_text(field).await?,
            "subject" => subject = read_text(field).await?,
            "class" => class = read_text(field).await?,
            "semester" => semester = read_text(field).await?,
            "year" => year = read_text(field).await?,
            "examType" => exam_type = read_text(field).await?,
            "tags" => {
                let raw = read_text(field).await?;
                tags = serde_json::from_str(&raw)
                    .map_err(|_| bad_request("tags must be a JSON array of strings"))?;
            }
            _ => {}
        }
    }

    Ok(Submission {
        meta: DocumentMeta {
            title,
            subject,
            class,
            semester,
            year,
            exam_type,
            tags,
        },
        payload,
        content_type,
    })
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field.text().await.map_err(|e| bad_request(e.to_string()))
}
