//! Associated gene resolution
//!
//! Ordered fallback chain:
//! 1. Symbols from phenotype annotations (comma-separated `genes` field)
//! 2. Symbols from transcript-level annotations (`gene_symbol`)
//! 3. Only if 1 and 2 found nothing and a mapping exists: genes overlapping the variant
//!    region, tagged with [`OVERLAP_SUFFIX`]
//!
//! The overlap lookup is best-effort: its failures are logged and yield no genes.

use std::collections::BTreeSet;

use crate::models::ensembl::{Mapping, VariationPayload};
use crate::types::AnnotationSource;

/// Marks symbols that came from the region overlap lookup
pub const OVERLAP_SUFFIX: &str = " (overlap)";

/// Gene symbols annotated directly on the variant (steps 1 and 2)
pub fn direct_genes(payload: &VariationPayload) -> BTreeSet<String> {
    let phenotype_genes = payload
        .phenotypes
        .iter()
        .filter_map(|phenotype| phenotype.genes.as_deref())
        .flat_map(|genes| genes.split(','));

    let transcript_genes = payload
        .transcript_variations
        .iter()
        .filter_map(|transcript| transcript.gene_symbol.as_deref());

    phenotype_genes
        .chain(transcript_genes)
        .map(str::trim)
        .filter(|symbol| !symbol.is_empty())
        .map(str::to_string)
        .collect()
}

/// Resolve the sorted, deduplicated gene list for a variant
pub async fn resolve_genes(
    source: &dyn AnnotationSource,
    payload: &VariationPayload,
) -> Vec<String> {
    let genes = direct_genes(payload);
    if !genes.is_empty() {
        return genes.into_iter().collect();
    }

    match payload.mappings.first() {
        Some(mapping) => overlap_genes(source, mapping).await.into_iter().collect(),
        None => Vec::new(),
    }
}

async fn overlap_genes(source: &dyn AnnotationSource, mapping: &Mapping) -> BTreeSet<String> {
    let region = mapping.region();
    tracing::info!(region = %region, "No direct gene annotation, querying region overlap");

    match source.overlapping_genes(&region).await {
        Ok(features) => features
            .into_iter()
            .filter_map(|feature| feature.external_name)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .map(|name| format!("{}{}", name, OVERLAP_SUFFIX))
            .collect(),
        Err(e) => {
            tracing::warn!(region = %region, error = %e, "Region overlap lookup failed");
            BTreeSet::new()
        }
    }
}
