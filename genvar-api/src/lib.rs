//! genvar-api library interface
//!
//! Fetches variant annotations from Ensembl, consolidates population frequencies and
//! associated genes, and serves the result as JSON.

pub mod api;
pub mod error;
pub mod models;
pub mod services;
pub mod types;
pub mod utils;

pub use crate::error::{ApiError, ApiResult, VariantError};
pub use crate::types::{AnnotationSource, FetchError};

use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
///
/// Holds only an immutable annotation source; lookups share no mutable state.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn AnnotationSource>,
}

impl AppState {
    pub fn new(source: Arc<dyn AnnotationSource>) -> Self {
        Self { source }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/", get(api::serve_index))
        .route("/api/variant/:rsid", get(api::get_variant))
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
