//! Variant assembly
//!
//! Orchestrates a single lookup:
//! 1. Fetch the variation record (retrying transient failures)
//! 2. Consolidate population frequencies
//! 3. Take coordinates from the first mapping, with placeholders when unmapped
//! 4. Resolve associated genes (may trigger the overlap lookup)
//! 5. Humanize the most severe consequence
//!
//! Either a complete [`VariantRecord`] is returned or a [`VariantError`]; never a partial record.

use crate::error::VariantError;
use crate::models::ensembl::{Mapping, VariationPayload};
use crate::models::variant::{VariantRecord, NOT_AVAILABLE};
use crate::services::frequency_consolidator::consolidate;
use crate::services::gene_resolver::resolve_genes;
use crate::types::AnnotationSource;

/// `missense_variant` → `missense variant`; absent → `N/A`
pub fn humanize_consequence(consequence: Option<&str>) -> String {
    match consequence {
        Some(term) => term.replace('_', " "),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Fetch and consolidate everything known about `rsid`
///
/// `rsid` must already be sanitized.
pub async fn assemble(
    source: &dyn AnnotationSource,
    rsid: &str,
) -> Result<VariantRecord, VariantError> {
    tracing::info!(rsid = %rsid, "Starting variant lookup");

    let payload = source.variation(rsid).await.map_err(|e| {
        let err = VariantError::from_fetch(rsid, e);
        match &err {
            VariantError::NotFound(_) => tracing::info!(rsid = %rsid, "Variant not found upstream"),
            VariantError::Unavailable { reason, .. } => {
                tracing::error!(rsid = %rsid, reason = %reason, "Variant lookup failed")
            }
        }
        err
    })?;

    let record = build_record(source, rsid, payload).await;

    tracing::info!(
        rsid = %record.rsid,
        chromosome = %record.chromosome,
        position = record.position,
        populations = record.pop_frequencies.len(),
        genes = record.genes.len(),
        "Variant mapped"
    );

    Ok(record)
}

/// Derive the record from an already fetched payload
pub async fn build_record(
    source: &dyn AnnotationSource,
    rsid: &str,
    payload: VariationPayload,
) -> VariantRecord {
    let consolidation = consolidate(&payload.populations);
    let genes = resolve_genes(source, &payload).await;
    let mapping = payload.mappings.first().cloned().unwrap_or_default();
    let consequence = humanize_consequence(payload.most_severe_consequence.as_deref());

    let Mapping {
        seq_region_name,
        start,
        allele_string,
        ..
    } = mapping;

    VariantRecord {
        rsid: payload.name.unwrap_or_else(|| rsid.to_string()),
        chromosome: seq_region_name,
        position: start,
        alleles: allele_string,
        minor_allele_freq: consolidation.highest_maf.display(),
        maf_1000g: consolidation.maf_1000g,
        pop_frequencies: consolidation.frequencies,
        genes,
        consequence,
        highest_maf: consolidation.highest_maf,
    }
}
