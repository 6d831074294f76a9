//! Fixed-delay retry around venue requests.
//!
//! The venue is assumed to recover eventually, so by default retryable
//! failures are retried forever at a fixed cadence with no backoff. Tests
//! cap the attempt count instead of waiting on the clock.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{ClientError, Result};

/// How retryable failures are paced.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Pause between attempts.
    pub delay: Duration,
    /// `None` retries forever; tests set a cap.
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(5),
            max_attempts: None,
        }
    }
}

impl RetryPolicy {
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }
}

/// Run `op` until it succeeds, fails non-retryably, or exhausts the cap.
///
/// The closure is re-invoked from scratch each attempt, so operations that
/// embed freshness (auth timestamps) recompute it naturally.
pub async fn retry<T, F, Fut>(policy: &RetryPolicy, operation: &str, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match op().await {
            Ok(value) => {
                debug!(operation, attempt, "Attempt succeeded");
                return Ok(value);
            }
            Err(err) if err.retryable() => {
                if let Some(max) = policy.max_attempts {
                    if attempt >= max {
                        return Err(err);
                    }
                }
                warn!(
                    operation,
                    attempt,
                    error = %err,
                    delay_secs = policy.delay.as_secs_f64(),
                    "Attempt failed, retrying"
                );
                tokio::time::sleep(policy.delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}
