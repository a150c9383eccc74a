//! Bounded retry with fixed backoff.
//!
//! One policy value is reused by any retried operation instead of
//! hand-rolled loops per call site. Only errors classified as transient
//! by [`Error::is_transient`] are retried; everything else propagates on
//! first receipt.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::Error;

/// Default number of attempts for ticket retrieval.
const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// Default wait between attempts, absorbing transient network failures.
const DEFAULT_BACKOFF: Duration = Duration::from_secs(2);

/// A bounded retry schedule: total attempt count and a fixed backoff
/// slept before every attempt after the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Duration,
}

impl RetryPolicy {
    /// Creates a policy with the given attempt bound and backoff.
    #[must_use]
    pub const fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self { max_attempts, backoff }
    }

    /// Runs `op`, retrying transient failures up to the attempt bound.
    ///
    /// The backoff is slept before each retry. The last error is returned
    /// unchanged once attempts are exhausted.
    ///
    /// # Errors
    ///
    /// Returns the first non-transient error, or the final transient error
    /// after the attempt bound is reached.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, Error>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, Error>>,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < self.max_attempts => {
                    warn!(attempt, max_attempts = self.max_attempts, "retrying after transient failure: {err}");
                    attempt += 1;
                    tokio::time::sleep(self.backoff).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_BACKOFF)
    }
}
