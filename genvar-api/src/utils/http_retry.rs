//! HTTP Retry Logic
//!
//! Retries upstream requests that failed with a transient network error
//! (timeout, refused or reset connection) using linearly growing backoff.
//!
//! **Algorithm:**
//! 1. Attempt operation
//! 2. If successful, return result
//! 3. If transient error:
//!    a. If attempts remain: log WARN, sleep `attempt * backoff_step`, retry
//!    b. Otherwise: log ERROR, return [`FetchError::Failure`]
//! 4. If any other error: return it immediately (no retry)
//!
//! With the defaults (3 attempts, 2s step) the waits are 2s then 4s.

use std::future::Future;
use std::time::Duration;

use genvar_common::config::EnsemblConfig;

use crate::types::FetchError;

/// Attempt bound and backoff step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, first try included (values below 1 act as 1)
    pub max_attempts: u32,
    /// Backoff after failed attempt `n` is `n * backoff_step`
    pub backoff_step: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff_step: Duration) -> Self {
        Self {
            max_attempts,
            backoff_step,
        }
    }

    /// Single attempt, no waiting
    pub fn none() -> Self {
        Self::new(1, Duration::ZERO)
    }

    pub fn from_config(config: &EnsemblConfig) -> Self {
        Self::new(
            config.max_attempts,
            Duration::from_secs(config.backoff_step_secs),
        )
    }

    /// Wait after `attempt` (1-based) has failed
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        self.backoff_step * attempt
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&EnsemblConfig::default())
    }
}

/// Run `operation` until it succeeds, fails non-transiently, or attempts run out
///
/// # Arguments
/// * `operation_name` - Name for logging (e.g., "variation lookup")
/// * `policy` - Attempt bound and backoff step
/// * `operation` - Async closure receiving the 1-based attempt number
pub async fn retry_transient<F, Fut, T>(
    operation_name: &str,
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, FetchError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;

        match operation(attempt).await {
            Ok(result) => {
                if attempt > 1 {
                    tracing::debug!(
                        operation = operation_name,
                        attempt,
                        "Upstream request succeeded after retry"
                    );
                }
                return Ok(result);
            }
            Err(err) if err.is_transient() => {
                if attempt >= max_attempts {
                    tracing::error!(
                        operation = operation_name,
                        attempt,
                        error = %err,
                        "Upstream request failed: retries exhausted"
                    );
                    return Err(FetchError::Failure(format!(
                        "{} failed after {} attempts: {}",
                        operation_name, attempt, err
                    )));
                }

                let backoff = policy.backoff_after(attempt);

                tracing::warn!(
                    operation = operation_name,
                    attempt,
                    max_attempts,
                    backoff_ms = backoff.as_millis() as u64,
                    error = %err,
                    "Transient upstream failure, retrying after backoff"
                );

                tokio::time::sleep(backoff).await;
            }
            Err(err) => return Err(err),
        }
    }
}
