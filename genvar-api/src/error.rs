//! Error types for genvar-api
//!
//! - [`VariantError`]: outcome of a failed variant assembly
//! - [`ApiError`]: HTTP surface; every variant renders as `{"error": "<message>"}`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::types::FetchError;

/// Why a variant lookup produced no record
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VariantError {
    /// Upstream has no record for the identifier
    #[error("Variant {0} not found upstream")]
    NotFound(String),

    /// Upstream unreachable, exhausted retries, or returned an unusable payload
    #[error("Variant {rsid} unavailable: {reason}")]
    Unavailable { rsid: String, reason: String },
}

impl VariantError {
    /// Classify a fetch failure for `rsid`
    pub fn from_fetch(rsid: &str, err: FetchError) -> Self {
        match err {
            FetchError::NotFound(_) => VariantError::NotFound(rsid.to_string()),
            FetchError::Transient(reason) | FetchError::Failure(reason) => {
                VariantError::Unavailable {
                    rsid: rsid.to_string(),
                    reason,
                }
            }
        }
    }
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("{0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("{0}")]
    BadRequest(String),
}

impl From<VariantError> for ApiError {
    fn from(err: VariantError) -> Self {
        // Unavailable is reported as 404 as well; the frontend only distinguishes found/not found
        match err {
            VariantError::NotFound(_) | VariantError::Unavailable { .. } => {
                ApiError::NotFound("Identifier not found in the Ensembl database".to_string())
            }
        }
    }
}

impl From<genvar_common::Error> for ApiError {
    fn from(err: genvar_common::Error) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
