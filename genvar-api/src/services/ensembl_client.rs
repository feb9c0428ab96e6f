//! Ensembl REST API client
//!
//! Fetches variation records (with bounded retry on transient network failures) and
//! gene features overlapping a genomic region (single attempt).
//!
//! Endpoints:
//! - `GET {base}/variation/human/{rsid}?pops=1;phenotypes=1;alt_alleles=1`
//! - `GET {base}/overlap/region/human/{chrom}:{start}-{end}?feature=gene`

use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use std::time::Duration;

use genvar_common::config::EnsemblConfig;

use crate::models::ensembl::{GenomicRegion, OverlapFeature, VariationPayload};
use crate::types::{AnnotationSource, FetchError};
use crate::utils::http_retry::{retry_transient, RetryPolicy};

const USER_AGENT: &str = concat!("genvar-api/", env!("CARGO_PKG_VERSION"));

/// Ensembl API client
///
/// Holds only immutable settings and a connection-pooling HTTP client, so a single
/// instance is shared by all concurrent requests.
#[derive(Debug, Clone)]
pub struct EnsemblClient {
    http_client: Client,
    base_url: String,
    retry: RetryPolicy,
}

impl EnsemblClient {
    /// Build a client from the `[ensembl]` config section
    pub fn new(config: &EnsemblConfig) -> Result<Self, FetchError> {
        Self::with_settings(
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
            RetryPolicy::from_config(config),
        )
    }

    /// Build a client with explicit settings
    pub fn with_settings(
        base_url: &str,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, FetchError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| FetchError::Failure(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    pub fn variation_url(&self, rsid: &str) -> String {
        format!(
            "{}/variation/human/{}?pops=1;phenotypes=1;alt_alleles=1",
            self.base_url, rsid
        )
    }

    pub fn overlap_url(&self, region: &GenomicRegion) -> String {
        format!(
            "{}/overlap/region/human/{}?feature=gene",
            self.base_url, region
        )
    }

    /// GET `url` with retry on transient failures
    pub async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        retry_transient("ensembl fetch", &self.retry, |attempt| async move {
            tracing::info!(url = %url, attempt, "Requesting Ensembl endpoint");
            let result = self.get_json(url).await;
            if result.is_ok() {
                tracing::info!(url = %url, attempt, "Ensembl request succeeded");
            }
            result
        })
        .await
    }

    /// Single GET of `url`, classifying the outcome
    ///
    /// - 404 → [`FetchError::NotFound`]
    /// - timeout / connection error → [`FetchError::Transient`]
    /// - any other status or an unparseable body → [`FetchError::Failure`]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            tracing::info!(url = %url, "Ensembl returned 404");
            return Err(FetchError::NotFound(url.to_string()));
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(url = %url, status = status.as_u16(), "Ensembl returned error status");
            return Err(FetchError::Failure(format!(
                "HTTP {}: {}",
                status.as_u16(),
                truncate(&error_text, 200)
            )));
        }

        let body = response.text().await.map_err(classify_transport_error)?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(url = %url, error = %e, "Malformed Ensembl payload");
            FetchError::Failure(format!("Malformed payload: {}", e))
        })
    }
}

fn classify_transport_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() || err.is_connect() {
        FetchError::Transient(err.to_string())
    } else {
        FetchError::Failure(err.to_string())
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[async_trait::async_trait]
impl AnnotationSource for EnsemblClient {
    async fn variation(&self, rsid: &str) -> Result<VariationPayload, FetchError> {
        self.fetch(&self.variation_url(rsid)).await
    }

    async fn overlapping_genes(
        &self,
        region: &GenomicRegion,
    ) -> Result<Vec<OverlapFeature>, FetchError> {
        self.get_json(&self.overlap_url(region)).await
    }
}
