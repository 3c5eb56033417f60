//! Shared response shaping for route handlers

use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::auth::{AccessContext, JwtManager};
use crate::papers::PaperError;

/// Error envelope returned by every failing handler
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub code: u16,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map a lifecycle error onto its HTTP envelope
pub fn paper_error(err: PaperError) -> ApiError {
    let code = err.status_code();
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(ErrorResponse {
            success: false,
            error: err.to_string(),
            code,
        }),
    )
}

pub fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            success: false,
            error: message.into(),
            code: 400,
        }),
    )
}

/// Reject malformed ids before any lookup
pub fn parse_paper_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| bad_request("Invalid paper ID format"))
}

/// Identity of the caller, from the Authorization header
pub fn caller(jwt: &JwtManager, headers: &HeaderMap) -> AccessContext {
    let header = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok());
    AccessContext::from_bearer(jwt, header)
}
