//! In-process stand-in for the Ensembl REST API
//!
//! Serves a caller-supplied axum router on an ephemeral local port.

use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Serve `router` on 127.0.0.1:0 and return its base URL
pub async fn spawn_upstream(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// rs699 (AGT): mapped, with phenotype genes and three 1000 Genomes populations
pub fn rs699_payload() -> Value {
    json!({
        "name": "rs699",
        "mappings": [{
            "seq_region_name": "1",
            "start": 230710048,
            "end": 230710048,
            "allele_string": "A/G"
        }],
        "populations": [
            {"population": "1000GENOMES:phase_3:ALL", "allele": "A", "frequency": 0.7051},
            {"population": "1000GENOMES:phase_3:ALL", "allele": "G", "frequency": 0.2949},
            {"population": "1000GENOMES:phase_3:YRI", "allele": "G", "frequency": 0.9},
            {"population": "1000GENOMES:phase_3:YRI", "allele": "A", "frequency": 0.1},
            {"population": "1000GENOMES:phase_3:EUR", "allele": "A", "frequency": 0.58},
            {"population": "1000GENOMES:phase_3:EUR", "allele": "G", "frequency": 0.42}
        ],
        "phenotypes": [
            {"genes": "AGT"},
            {"genes": null}
        ],
        "transcript_variations": [
            {"gene_symbol": "AGT"}
        ],
        "most_severe_consequence": "missense_variant"
    })
}

/// Mapped variant with no gene annotation, forcing the overlap lookup
pub fn geneless_payload(rsid: &str) -> Value {
    json!({
        "name": rsid,
        "mappings": [{
            "seq_region_name": "7",
            "start": 117559590,
            "end": 117559592,
            "allele_string": "ATCT/A"
        }],
        "populations": [],
        "phenotypes": null,
        "most_severe_consequence": "intergenic_variant"
    })
}
