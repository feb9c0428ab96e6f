//! Data models
//!
//! - [`ensembl`]: upstream payload schema, defaults applied at parse time
//! - [`variant`]: derived records served to the frontend

pub mod ensembl;
pub mod variant;

pub use ensembl::{
    GenomicRegion, Mapping, OverlapFeature, Phenotype, PopulationRecord, TranscriptVariation,
    VariationPayload,
};
pub use variant::{HighestMafTieSet, PopulationFrequency, VariantRecord, NOT_AVAILABLE};
