//! Retry with bounded backoff for idempotent read calls
//!
//! The remote service throttles status and list queries under load. Reads
//! are safe to repeat, so they go through a retry wrapper; mutating calls
//! (submit, stop) never do.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

/// Backoff schedule between retry attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Same delay before every retry
    Constant(Duration),
    /// Delay doubles after each failed attempt, starting at `initial`
    Exponential { initial: Duration },
}

/// Retry policy for idempotent read calls
///
/// Performs exactly `max_retries + 1` attempts when every attempt fails
/// with a retryable error, and returns the original error unchanged once
/// the budget is spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Backoff,
}

impl RetryPolicy {
    /// Retry up to `max_retries` times with a constant delay
    pub fn constant(max_retries: u32, delay: Duration) -> Self {
        Self {
            max_retries,
            backoff: Backoff::Constant(delay),
        }
    }

    /// Retry up to `max_retries` times with exponential backoff
    pub fn exponential(max_retries: u32, initial: Duration) -> Self {
        Self {
            max_retries,
            backoff: Backoff::Exponential { initial },
        }
    }

    /// Delay to sleep after the attempt with the given zero-based index
    fn delay_for(&self, attempt: u32) -> Duration {
        match self.backoff {
            Backoff::Constant(delay) => delay,
            Backoff::Exponential { initial } => initial.saturating_mul(1 << attempt.min(16)),
        }
    }

    /// Invoke `op`, retrying while `is_retryable` classifies the error as
    /// transient and the retry budget is not exhausted
    ///
    /// The sleep between attempts blocks only the calling task. Errors
    /// classified as non-retryable are returned from the first attempt
    /// that produced them.
    pub async fn run<T, E, F, Fut, P>(&self, mut op: F, is_retryable: P) -> std::result::Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        P: Fn(&E) -> bool,
    {
        let mut attempt = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.max_retries && is_retryable(&err) => {
                    let delay = self.delay_for(attempt);
                    debug!(attempt, ?delay, "retrying transient failure");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::constant(3, Duration::from_secs(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn zero_backoff(max_retries: u32) -> RetryPolicy {
        RetryPolicy::constant(max_retries, Duration::ZERO)
    }

    #[tokio::test]
    async fn test_success_makes_one_attempt() {
        let calls = AtomicUsize::new(0);
        let result: Result<u32, &str> = zero_backoff(3)
            .run(
                || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Ok(7) }
                },
                |_| true,
            )
            .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_persistent_failure_makes_max_retries_plus_one_attempts() {
        let calls = AtomicUsize::new(0);
        let result: Result<u32, &str> = zero_backoff(3)
            .run(
                || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Err("throttled") }
                },
                |_| true,
            )
            .await;
        assert_eq!(result.unwrap_err(), "throttled");
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_transient_failure_then_success() {
        let calls = AtomicUsize::new(0);
        let result: Result<u32, &str> = zero_backoff(3)
            .run(
                || {
                    let n = calls.fetch_add(1, Ordering::SeqCst);
                    async move { if n == 0 { Err("throttled") } else { Ok(1) } }
                },
                |_| true,
            )
            .await;
        assert_eq!(result.unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_non_retryable_error_fails_fast() {
        let calls = AtomicUsize::new(0);
        let result: Result<u32, &str> = zero_backoff(3)
            .run(
                || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Err("validation") }
                },
                |e| *e != "validation",
            )
            .await;
        assert_eq!(result.unwrap_err(), "validation");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_exponential_delay_doubles() {
        let policy = RetryPolicy::exponential(5, Duration::from_secs(1));
        assert_eq!(policy.delay_for(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for(2), Duration::from_secs(4));
    }
}
