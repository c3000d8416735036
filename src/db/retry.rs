//! Bounded retry with exponential backoff for transient store failures.
//!
//! Only errors marked retryable
//! ([`crate::db::repository::RepositoryError::is_retryable`]) are retried;
//! everything else surfaces to the caller on the first attempt. Store
//! unavailability is therefore a recoverable error, never a crash.

use std::future::Future;
use std::time::Duration;

use super::repository::RepositoryResult;

/// Retry policy: attempt count and backoff base.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Additional attempts after the first failure.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each subsequent one.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(100),
        }
    }
}

/// Run `op` with bounded retry under `policy`.
///
/// `op` is a closure producing a fresh future per attempt.
pub async fn with_retry<T, F, Fut>(
    operation: &str,
    policy: RetryPolicy,
    mut op: F,
) -> RepositoryResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = RepositoryResult<T>>,
{
    let mut delay = policy.base_delay;
    let mut attempt: u32 = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt < policy.max_retries => {
                attempt += 1;
                log::warn!(
                    "{} failed (attempt {}/{}), retrying in {:?}: {}",
                    operation,
                    attempt,
                    policy.max_retries,
                    delay,
                    err
                );
                tokio::time::sleep(delay).await;
                delay = delay.saturating_mul(2);
            }
            Err(err) => return Err(err.with_operation(operation)),
        }
    }
}

/// Run `op` with the default retry policy.
pub async fn with_default_retry<T, F, Fut>(operation: &str, op: F) -> RepositoryResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = RepositoryResult<T>>,
{
    with_retry(operation, RetryPolicy::default(), op).await
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod retry_tests;
