//! Variant lookup endpoint
//!
//! `GET /api/variant/:rsid`
//! - 200: consolidated [`VariantRecord`]
//! - 400: identifier is not `rs` followed by digits
//! - 404: unknown upstream, or upstream unavailable

use axum::{
    extract::{Path, State},
    Json,
};
use genvar_common::clean_rsid;

use crate::error::ApiResult;
use crate::models::variant::VariantRecord;
use crate::services::variant_assembler::assemble;
use crate::AppState;

/// GET /api/variant/:rsid
pub async fn get_variant(
    State(state): State<AppState>,
    Path(raw_rsid): Path<String>,
) -> ApiResult<Json<VariantRecord>> {
    let rsid = clean_rsid(&raw_rsid).map_err(|e| {
        tracing::warn!(input = %raw_rsid, "Rejected malformed rsID");
        e
    })?;

    let record = assemble(state.source.as_ref(), &rsid).await?;

    Ok(Json(record))
}
