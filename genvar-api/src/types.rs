//! Core types and trait definitions for genvar-api
//!
//! [`AnnotationSource`] is the seam between the consolidation pipeline and the network:
//! the assembler and gene resolver depend on it, and [`crate::services::EnsemblClient`]
//! implements it against the Ensembl REST API.

use thiserror::Error;

use crate::models::ensembl::{GenomicRegion, OverlapFeature, VariationPayload};

/// Outcome of a failed upstream request
///
/// Callers decide on retry and HTTP status by variant, never by message text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// Upstream answered 404; definitive, never retried
    #[error("Not found upstream: {0}")]
    NotFound(String),

    /// Timeout or connection-level failure; eligible for retry
    #[error("Transient network failure: {0}")]
    Transient(String),

    /// Unrecoverable: bad status, malformed body, or retries exhausted
    #[error("Upstream failure: {0}")]
    Failure(String),
}

impl FetchError {
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::Transient(_))
    }
}

/// Source of variant annotations
#[async_trait::async_trait]
pub trait AnnotationSource: Send + Sync {
    /// Full variation record for an rsID (populations, phenotypes, mappings)
    ///
    /// Implementations retry transient failures before giving up.
    async fn variation(&self, rsid: &str) -> Result<VariationPayload, FetchError>;

    /// Gene features overlapping a region
    ///
    /// Single attempt; callers treat any error as "no genes found".
    async fn overlapping_genes(
        &self,
        region: &GenomicRegion,
    ) -> Result<Vec<OverlapFeature>, FetchError>;
}
