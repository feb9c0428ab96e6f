//! Variant consolidation services
//!
//! Dependency order, leaves first:
//! - [`geo_lookup`]: population → map coordinates
//! - [`ensembl_client`]: upstream REST access with retry
//! - [`frequency_consolidator`]: per-population MAF and highest-MAF tie set
//! - [`gene_resolver`]: associated genes with overlap fallback
//! - [`variant_assembler`]: combines the above into a [`crate::models::VariantRecord`]

pub mod ensembl_client;
pub mod frequency_consolidator;
pub mod gene_resolver;
pub mod geo_lookup;
pub mod variant_assembler;

pub use ensembl_client::EnsemblClient;
pub use frequency_consolidator::{consolidate, Consolidation};
pub use gene_resolver::resolve_genes;
pub use variant_assembler::assemble;
