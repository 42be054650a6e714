//! Bounded retries with exponential backoff for remote configuration fetches.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Attempt budget and backoff curve for a retried request.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Total attempts, the first one included. Must be at least 1.
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    /// Doubling backoff capped at one second.
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
            max_delay: Duration::from_secs(1),
            backoff_multiplier: 2.0,
        }
    }

    /// Remote configuration fetch: 3 attempts, waits of 250ms then 500ms.
    pub fn config_fetch() -> Self {
        Self::new(3, Duration::from_millis(250))
    }

    /// A single attempt, no retries.
    pub fn once() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Wait before `attempt` (0-indexed); the first attempt never waits.
    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let delay_ms = self.initial_delay.as_millis() as f64
            * self.backoff_multiplier.powi((attempt - 1) as i32);
        Duration::from_millis(delay_ms as u64).min(self.max_delay)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::config_fetch()
    }
}

/// Run `operation` until it succeeds, `should_retry` rejects the error, or
/// the attempt budget is spent. The last error is returned.
///
/// # Panics
/// Panics if `config.max_attempts` is 0. `PaymentOrchestrator::connect`
/// rejects such configurations up front.
pub async fn with_retry_if<T, E, F, Fut, P>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
    should_retry: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: Fn(&E) -> bool,
{
    assert!(
        config.max_attempts >= 1,
        "RetryConfig.max_attempts must be >= 1, got {}",
        config.max_attempts
    );

    let mut last_error: Option<E> = None;

    for attempt in 0..config.max_attempts {
        let delay = config.delay_for_attempt(attempt);
        if !delay.is_zero() {
            debug!(
                "{}: Retry attempt {}/{} after {:?}",
                operation_name,
                attempt + 1,
                config.max_attempts,
                delay
            );
            sleep(delay).await;
        }

        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!(
                        "{}: Succeeded on attempt {}/{}",
                        operation_name,
                        attempt + 1,
                        config.max_attempts
                    );
                }
                return Ok(result);
            }
            Err(e) => {
                if !should_retry(&e) {
                    debug!(
                        "{}: Error is not retryable, failing immediately: {}",
                        operation_name, e
                    );
                    return Err(e);
                }

                let remaining = config.max_attempts - attempt - 1;
                if remaining > 0 {
                    warn!(
                        "{}: Attempt {}/{} failed ({}), {} retries remaining",
                        operation_name,
                        attempt + 1,
                        config.max_attempts,
                        e,
                        remaining
                    );
                } else {
                    warn!(
                        "{}: All {} attempts failed. Last error: {}",
                        operation_name, config.max_attempts, e
                    );
                }
                last_error = Some(e);
            }
        }
    }

    Err(last_error.expect("At least one attempt should have been made"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_retry_config_defaults() {
        let config = RetryConfig::default();
        assert_eq!(config, RetryConfig::config_fetch());
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.initial_delay, Duration::from_millis(250));
    }

    #[test]
    fn test_retry_config_once() {
        let config = RetryConfig::once();
        assert_eq!(config.max_attempts, 1);
        assert_eq!(config.delay_for_attempt(0), Duration::ZERO);
    }

    #[test]
    fn test_config_fetch_backoff() {
        let config = RetryConfig::config_fetch();

        assert_eq!(config.delay_for_attempt(0), Duration::ZERO);
        assert_eq!(config.delay_for_attempt(1), Duration::from_millis(250));
        assert_eq!(config.delay_for_attempt(2), Duration::from_millis(500));
    }

    #[test]
    fn test_delay_is_capped() {
        let config = RetryConfig::new(10, Duration::from_millis(300));

        // 300ms * 2^3 would be 2.4s
        assert_eq!(config.delay_for_attempt(4), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_succeeds_first_attempt() {
        let config = RetryConfig::new(3, Duration::from_millis(10));
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result: Result<u32, &str> = with_retry_if(
            &config,
            "test",
            || {
                let c = counter_clone.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Ok(42)
                }
            },
            |_| true,
        )
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_succeeds_after_retryable_failures() {
        let config = RetryConfig::new(3, Duration::from_millis(10));
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result: Result<u32, &str> = with_retry_if(
            &config,
            "test",
            || {
                let c = counter_clone.clone();
                async move {
                    let attempt = c.fetch_add(1, Ordering::SeqCst);
                    if attempt < 2 {
                        Err("server error 503")
                    } else {
                        Ok(42)
                    }
                }
            },
            |e: &&str| e.contains("503"),
        )
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_non_retryable_error_fails_immediately() {
        let config = RetryConfig::new(3, Duration::from_millis(10));
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result: Result<u32, &str> = with_retry_if(
            &config,
            "test",
            || {
                let c = counter_clone.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err("client error 404")
                }
            },
            |e: &&str| !e.contains("404"),
        )
        .await;

        assert_eq!(result.unwrap_err(), "client error 404");
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_all_attempts_fail() {
        let config = RetryConfig::new(3, Duration::from_millis(10));
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result: Result<u32, &str> = with_retry_if(
            &config,
            "test",
            || {
                let c = counter_clone.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err("server error 500")
                }
            },
            |_| true,
        )
        .await;

        assert_eq!(result.unwrap_err(), "server error 500");
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_once_makes_single_attempt() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result: Result<u32, &str> = with_retry_if(
            &RetryConfig::once(),
            "test",
            || {
                let c = counter_clone.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err("down")
                }
            },
            |_| true,
        )
        .await;

        assert!(result.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    #[should_panic(expected = "max_attempts must be >= 1")]
    async fn test_zero_attempts_panics() {
        let config = RetryConfig::new(0, Duration::from_millis(10));
        let _: Result<u32, &str> = with_retry_if(&config, "test", || async { Ok(1) }, |_| true).await;
    }
}
