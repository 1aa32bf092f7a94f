use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::error::GatewayError;

/// How often a failed gateway call is repeated before the failure is surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first one
    pub max_retries: u32,
    /// Fixed pause between attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            delay: Duration::ZERO,
        }
    }
}

impl RetryPolicy {
    /// Policy that never retries
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            delay: Duration::ZERO,
        }
    }

    /// Total number of attempts, first one included
    pub fn attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Run `operation` until it succeeds or the attempts are used up.
    ///
    /// Every failure is retried; the last error is returned once the
    /// budget is exhausted.
    pub async fn run<T, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, GatewayError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, GatewayError>>,
    {
        let mut attempt = 1;
        loop {
            match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!("{} succeeded on attempt {}", label, attempt);
                    }
                    return Ok(value);
                }
                Err(e) if attempt <= self.max_retries => {
                    warn!("{} (attempt {}/{}): {}", label, attempt, self.attempts(), e);
                    if !self.delay.is_zero() {
                        tokio::time::sleep(self.delay).await;
                    }
                    attempt += 1;
                }
                Err(e) => {
                    error!("{} after {} attempts: {}", label, attempt, e);
                    return Err(e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_succeeds_on_third_attempt() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result = RetryPolicy::default()
            .run("create course", move || async move {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 3 {
                    Err(GatewayError::Transient(format!("failure {}", n)))
                } else {
                    Ok(n)
                }
            })
            .await;

        assert_eq!(result, Ok(3));
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_surfaces_last_error_after_three_attempts() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), _> = RetryPolicy::default()
            .run("delete course", move || async move {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                Err(GatewayError::Transient(format!("failure {}", n)))
            })
            .await;

        assert_eq!(result, Err(GatewayError::Transient("failure 3".to_string())));
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_no_retry_policy_runs_once() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), _> = RetryPolicy::none()
            .run("update category", move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(GatewayError::Unknown)
            })
            .await;

        assert!(result.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_between_attempts() {
        let policy = RetryPolicy {
            max_retries: 2,
            delay: Duration::from_millis(100),
        };
        let started = tokio::time::Instant::now();
        let _: Result<(), _> = policy
            .run("create category", || async { Err(GatewayError::Unknown) })
            .await;

        assert!(started.elapsed() >= Duration::from_millis(200));
    }
}
