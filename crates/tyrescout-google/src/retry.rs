//! Retry with exponential back-off and jitter for the Google clients.
//!
//! Only transient failures are retried. Quota and authorization failures are
//! returned immediately so a run does not burn through its daily allowance.

use std::future::Future;
use std::time::Duration;

use crate::error::GoogleError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - Network-level failures: timeout, connection reset.
/// - HTTP 429 and 5xx responses.
/// - Places `UNKNOWN_ERROR`, which the provider documents as a server-side
///   hiccup.
///
/// **Not retriable:** any other API status (`REQUEST_DENIED`,
/// `OVER_QUERY_LIMIT`, `INVALID_REQUEST`, ...), 4xx responses, malformed
/// bodies and configuration errors.
pub(crate) fn is_retriable(err: &GoogleError) -> bool {
    match err {
        GoogleError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        GoogleError::UnexpectedStatus { status, .. } => *status == 429 || *status >= 500,
        GoogleError::Api { status, .. } => status == "UNKNOWN_ERROR",
        GoogleError::Deserialize { .. } | GoogleError::InvalidBaseUrl(_) => false,
    }
}

/// How many times a failed Places call is repeated and how long to wait
/// between attempts.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_base_ms: u64,
}

impl RetryPolicy {
    const MAX_DELAY_MS: u64 = 30_000;

    /// Un-jittered delay before retry number `attempt` (1-based):
    /// `backoff_base_ms × 2^(attempt-1)`, capped at 30 s.
    pub(crate) fn base_delay_ms(self, attempt: u32) -> u64 {
        let exp = attempt.saturating_sub(1).min(10);
        self.backoff_base_ms
            .saturating_mul(1u64 << exp)
            .min(Self::MAX_DELAY_MS)
    }

    /// Spreads the delay over ±25 % so callers sharing a key do not retry in
    /// lockstep.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn jittered(delay_ms: u64) -> Duration {
        let factor = rand::random::<f64>() * 0.5 + 0.75;
        Duration::from_millis((delay_ms as f64 * factor) as u64)
    }

    /// Calls `operation` until it succeeds, fails with a non-transient error,
    /// or `max_retries` extra attempts have been spent.
    pub(crate) async fn run<T, F, Fut>(
        self,
        endpoint: &str,
        mut operation: F,
    ) -> Result<T, GoogleError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, GoogleError>>,
    {
        let mut attempt = 0u32;
        loop {
            let err = match operation().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };
            if attempt >= self.max_retries || !is_retriable(&err) {
                return Err(err);
            }
            attempt += 1;
            let delay = Self::jittered(self.base_delay_ms(attempt));
            tracing::warn!(
                endpoint,
                attempt,
                max_retries = self.max_retries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %err,
                "places request failed, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            backoff_base_ms: 0,
        }
    }

    fn api_error(status: &str) -> GoogleError {
        GoogleError::Api {
            endpoint: "textsearch".to_owned(),
            status: status.to_owned(),
            message: String::new(),
        }
    }

    #[test]
    fn request_denied_is_not_retriable() {
        assert!(!is_retriable(&api_error("REQUEST_DENIED")));
    }

    #[test]
    fn over_query_limit_is_not_retriable() {
        assert!(!is_retriable(&api_error("OVER_QUERY_LIMIT")));
    }

    #[test]
    fn unknown_error_is_retriable() {
        assert!(is_retriable(&api_error("UNKNOWN_ERROR")));
    }

    #[test]
    fn server_errors_and_429_are_retriable() {
        for status in [429_u16, 500, 503] {
            assert!(is_retriable(&GoogleError::UnexpectedStatus {
                status,
                endpoint: "textsearch".to_owned(),
            }));
        }
        assert!(!is_retriable(&GoogleError::UnexpectedStatus {
            status: 403,
            endpoint: "textsearch".to_owned(),
        }));
    }

    #[test]
    fn delay_doubles_per_attempt_and_is_capped() {
        let p = RetryPolicy {
            max_retries: 5,
            backoff_base_ms: 1_000,
        };
        assert_eq!(p.base_delay_ms(1), 1_000);
        assert_eq!(p.base_delay_ms(2), 2_000);
        assert_eq!(p.base_delay_ms(3), 4_000);
        assert_eq!(p.base_delay_ms(6), 30_000);
        assert_eq!(p.base_delay_ms(40), 30_000);
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = policy(3)
            .run("textsearch", || {
                let c = Arc::clone(&c);
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Ok::<u32, GoogleError>(7)
                }
            })
            .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_transient_error_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = policy(3)
            .run("textsearch", || {
                let c = Arc::clone(&c);
                async move {
                    let n = c.fetch_add(1, Ordering::SeqCst);
                    if n < 2 {
                        Err(api_error("UNKNOWN_ERROR"))
                    } else {
                        Ok::<u32, GoogleError>(1)
                    }
                }
            })
            .await;
        assert_eq!(result.unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = policy(2)
            .run("textsearch", || {
                let c = Arc::clone(&c);
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err::<u32, _>(api_error("UNKNOWN_ERROR"))
                }
            })
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(matches!(result, Err(GoogleError::Api { .. })));
    }

    #[tokio::test]
    async fn does_not_retry_request_denied() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = policy(3)
            .run("textsearch", || {
                let c = Arc::clone(&c);
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err::<u32, _>(api_error("REQUEST_DENIED"))
                }
            })
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(result.is_err());
    }
}
