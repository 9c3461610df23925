/// Bounded retry with exponential backoff around remote calls
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::RemoteError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Delay before the second attempt
    pub initial_delay: Duration,
    /// Factor applied to the delay before each further attempt
    pub backoff_multiplier: f64,
    /// Upper bound on any single backoff delay
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1000),
            backoff_multiplier: 1.5,
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Delay before attempt `attempt` (1-based): `initial_delay * multiplier^(attempt - 2)`,
    /// capped at `max_delay`
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt < 2 {
            return Duration::ZERO;
        }
        let exponent = i32::try_from(attempt - 2).unwrap_or(i32::MAX);
        let secs = self.initial_delay.as_secs_f64() * self.backoff_multiplier.powi(exponent);
        if secs.is_nan() || secs <= 0.0 {
            return Duration::ZERO;
        }
        Duration::try_from_secs_f64(secs)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

/// Runs remote calls under a [`RetryPolicy`] with a per-attempt timeout
///
/// Only transient failures and malformed responses are retried. Client errors
/// return on the first attempt. Backoff sleeps suspend the calling task only.
#[derive(Debug, Clone)]
pub struct RetryExecutor {
    policy: RetryPolicy,
    attempt_timeout: Duration,
}

impl RetryExecutor {
    pub fn new(policy: RetryPolicy, attempt_timeout: Duration) -> Self {
        Self {
            policy,
            attempt_timeout,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Executes `call` until it succeeds, fails permanently or runs out of attempts
    pub async fn execute<F, Fut, T>(&self, operation: &'static str, mut call: F) -> Result<T, RemoteError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, RemoteError>>,
    {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let outcome = match tokio::time::timeout(self.attempt_timeout, call()).await {
                Ok(result) => result,
                Err(_) => Err(RemoteError::Transient(format!(
                    "attempt timed out after {:?}",
                    self.attempt_timeout
                ))),
            };

            match outcome {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(operation, attempt, "Remote call succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(e) if !e.is_retryable() => {
                    warn!(operation, attempt, error = %e, "Remote call failed, not retrying");
                    return Err(e);
                }
                Err(e) if attempt >= max_attempts => {
                    warn!(operation, attempts = attempt, error = %e, "Remote call retries exhausted");
                    return Err(RemoteError::RemoteCallFailed {
                        attempts: attempt,
                        last: Box::new(e),
                    });
                }
                Err(e) => {
                    let delay = self.policy.delay_before(attempt + 1);
                    warn!(
                        operation,
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Retrying remote call"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use tokio_test::{assert_err, assert_ok};

    fn fast_executor(max_attempts: u32) -> RetryExecutor {
        RetryExecutor::new(
            RetryPolicy {
                max_attempts,
                initial_delay: Duration::from_millis(1),
                backoff_multiplier: 2.0,
                max_delay: Duration::from_millis(50),
            },
            Duration::from_secs(5),
        )
    }

    #[test]
    fn test_delay_schedule() {
        let policy = RetryPolicy {
            max_attempts: 4,
            initial_delay: Duration::from_millis(100),
            backoff_multiplier: 1.5,
            max_delay: Duration::from_secs(30),
        };
        assert_eq!(policy.delay_before(1), Duration::ZERO);
        assert_eq!(policy.delay_before(2), Duration::from_millis(100));
        assert_eq!(policy.delay_before(3), Duration::from_millis(150));
        assert_eq!(policy.delay_before(4), Duration::from_millis(225));
    }

    #[test]
    fn test_large_backoff_is_capped() {
        let policy = RetryPolicy {
            max_attempts: 40,
            initial_delay: Duration::from_secs(1),
            backoff_multiplier: 10.0,
            max_delay: Duration::from_secs(30),
        };
        assert_eq!(policy.delay_before(3), Duration::from_secs(10));
        assert_eq!(policy.delay_before(4), Duration::from_secs(30));
        assert_eq!(policy.delay_before(30), Duration::from_secs(30));
        assert_eq!(policy.delay_before(u32::MAX), Duration::from_secs(30));
    }

    #[test]
    fn test_degenerate_multiplier_does_not_panic() {
        let policy = RetryPolicy {
            backoff_multiplier: f64::INFINITY,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.delay_before(3), policy.max_delay);

        let policy = RetryPolicy {
            backoff_multiplier: f64::NAN,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.delay_before(3), Duration::ZERO);

        let policy = RetryPolicy {
            backoff_multiplier: -2.0,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.delay_before(3), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_success_on_first_attempt() {
        let counter = Arc::new(AtomicU32::new(0));
        let calls = counter.clone();

        let result = fast_executor(3)
            .execute("test", move || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok::<_, RemoteError>(42) }
            })
            .await;

        assert_eq!(assert_ok!(result), 42);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_success_on_kth_attempt() {
        let counter = Arc::new(AtomicU32::new(0));
        let calls = counter.clone();

        let result = fast_executor(4)
            .execute("test", move || {
                let attempt = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if attempt < 3 {
                        Err(RemoteError::Transient("connection refused".to_string()))
                    } else {
                        Ok(attempt)
                    }
                }
            })
            .await;

        assert_eq!(assert_ok!(result), 3);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_transient_failures_exhaust_attempts() {
        let counter = Arc::new(AtomicU32::new(0));
        let calls = counter.clone();

        let result = fast_executor(3)
            .execute("test", move || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(RemoteError::Transient("503".to_string())) }
            })
            .await;

        let err = assert_err!(result);
        assert!(matches!(err, RemoteError::RemoteCallFailed { attempts: 3, .. }));
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_client_error_is_attempted_once() {
        let counter = Arc::new(AtomicU32::new(0));
        let calls = counter.clone();

        let result = fast_executor(5)
            .execute("test", move || {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    Err::<(), _>(RemoteError::ClientRequest {
                        status: 400,
                        message: "bad payload".to_string(),
                    })
                }
            })
            .await;

        let err = assert_err!(result);
        assert!(matches!(err, RemoteError::ClientRequest { status: 400, .. }));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_malformed_response_is_retried() {
        let counter = Arc::new(AtomicU32::new(0));
        let calls = counter.clone();

        let result = fast_executor(2)
            .execute("test", move || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(RemoteError::MalformedResponse("{}".to_string())) }
            })
            .await;

        assert_err!(result);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_timed_out_attempt_counts_as_transient() {
        let counter = Arc::new(AtomicU32::new(0));
        let calls = counter.clone();
        let executor = RetryExecutor::new(
            RetryPolicy {
                max_attempts: 2,
                initial_delay: Duration::from_millis(1),
                backoff_multiplier: 1.0,
                max_delay: Duration::from_millis(1),
            },
            Duration::from_millis(20),
        );

        let result = executor
            .execute("test", move || {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Ok::<_, RemoteError>(())
                }
            })
            .await;

        let err = assert_err!(result);
        match err {
            RemoteError::RemoteCallFailed { attempts, last } => {
                assert_eq!(attempts, 2);
                assert!(matches!(*last, RemoteError::Transient(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_zero_attempts_still_calls_once() {
        let counter = Arc::new(AtomicU32::new(0));
        let calls = counter.clone();

        let _ = fast_executor(0)
            .execute("test", move || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(RemoteError::Transient("down".to_string())) }
            })
            .await;

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
