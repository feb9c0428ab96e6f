//! Ensembl REST payload schema
//!
//! Every field the pipeline reads has a default baked in here, so downstream code never
//! has to handle absent keys. Arrays that arrive as `null` are treated as empty.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::variant::NOT_AVAILABLE;

/// Response of `GET /variation/human/{rsid}?pops=1;phenotypes=1;alt_alleles=1`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct VariationPayload {
    /// Variant name as reported upstream (normally the rsID)
    pub name: Option<String>,
    /// Genomic mappings; the first one is used for coordinates
    #[serde(deserialize_with = "null_as_default")]
    pub mappings: Vec<Mapping>,
    /// Per-population allele frequencies
    #[serde(deserialize_with = "null_as_default")]
    pub populations: Vec<PopulationRecord>,
    /// Phenotype associations
    #[serde(deserialize_with = "null_as_default")]
    pub phenotypes: Vec<Phenotype>,
    /// Transcript-level consequences
    #[serde(deserialize_with = "null_as_default")]
    pub transcript_variations: Vec<TranscriptVariation>,
    /// SO term such as `missense_variant`
    pub most_severe_consequence: Option<String>,
}

/// One genomic mapping (GRCh38 on the public endpoint)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Mapping {
    pub seq_region_name: String,
    pub start: i64,
    pub end: i64,
    pub allele_string: String,
}

impl Default for Mapping {
    fn default() -> Self {
        Self {
            seq_region_name: NOT_AVAILABLE.to_string(),
            start: 0,
            end: 0,
            allele_string: NOT_AVAILABLE.to_string(),
        }
    }
}

impl Mapping {
    /// Region spanned by this mapping
    ///
    /// Insertions are reported with `end = start - 1`; the span is widened to at least
    /// one base so the overlap query stays well-formed.
    pub fn region(&self) -> GenomicRegion {
        GenomicRegion {
            chromosome: self.seq_region_name.clone(),
            start: self.start,
            end: self.end.max(self.start),
        }
    }
}

/// Raw allele frequency record for one population
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PopulationRecord {
    pub population: String,
    pub allele: String,
    pub frequency: f64,
}

/// Phenotype annotation; `genes` is a comma-separated symbol list
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Phenotype {
    pub genes: Option<String>,
}

/// Transcript-level annotation
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TranscriptVariation {
    pub gene_symbol: Option<String>,
}

/// Element of `GET /overlap/region/human/{region}?feature=gene`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OverlapFeature {
    pub external_name: Option<String>,
}

/// `chromosome:start-end` span used for the overlap query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenomicRegion {
    pub chromosome: String,
    pub start: i64,
    pub end: i64,
}

impl fmt::Display for GenomicRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chromosome, self.start, self.end)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
