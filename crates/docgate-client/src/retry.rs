//! Fixed-interval retry for a single network call
//!
//! Every error is retried; the policy does not try to tell transient failures
//! from permanent ones. A malformed request therefore costs the full attempt
//! budget before its error is returned.

use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Attempts made before giving up
pub const DEFAULT_MAX_ATTEMPTS: u32 = 20;

/// Pause between attempts
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_millis(100);

/// Bounded retry with a fixed pause between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval: DEFAULT_RETRY_INTERVAL,
        }
    }
}

impl RetryPolicy {
    /// Create a policy; `max_attempts` of zero is treated as one
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            interval,
        }
    }

    /// Single attempt, no sleeping
    pub fn none() -> Self {
        Self::new(1, Duration::ZERO)
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run `call` until it succeeds or the attempts are used up
    ///
    /// Returns the first success, or the error from the final attempt.
    pub async fn invoke<F, Fut, T, E>(&self, mut call: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut remaining = self.max_attempts;
        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    remaining -= 1;
                    if remaining == 0 {
                        warn!(
                            attempts = self.max_attempts,
                            error = %err,
                            "Giving up after final attempt"
                        );
                        return Err(err);
                    }
                    debug!(
                        remaining,
                        interval_ms = self.interval.as_millis() as u64,
                        error = %err,
                        "Attempt failed, retrying"
                    );
                    tokio::time::sleep(self.interval).await;
                }
            }
        }
    }
}
