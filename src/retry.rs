//! Retry logic for API calls with error classification and exponential backoff.

use std::time::Duration;

use log::{debug, warn};
use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;

use crate::error::{ApiResult, AppError};

/// Maximum number of attempts per logical call (1 initial + 2 retries).
pub const MAX_ATTEMPTS: u32 = 3;

/// Base delay before the first retry, doubled on each subsequent one.
pub const INITIAL_RETRY_DELAY_MS: u64 = 1000;

/// Bounds for the retry loop; immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            initial_delay: Duration::from_millis(INITIAL_RETRY_DELAY_MS),
        }
    }
}

/// Exponential backoff delay before retrying after the given attempt.
/// Attempts are numbered starting at 1, so the waits for a three-attempt
/// budget are `initial` and `2 * initial`.
pub fn retry_delay(initial: Duration, attempt: u32) -> Duration {
    initial * 2u32.saturating_pow(attempt.saturating_sub(1))
}

/// Maps a non-success HTTP status to a classified error.
pub fn classify_status(status: StatusCode) -> AppError {
    let status_text = status.canonical_reason().unwrap_or("Unknown status");
    match status {
        StatusCode::UNAUTHORIZED => {
            AppError::network("Authentication failed", false).with_details("Invalid API key")
        }
        StatusCode::TOO_MANY_REQUESTS => {
            AppError::network("Rate limit exceeded", true).with_details("Too many requests")
        }
        StatusCode::BAD_REQUEST => AppError::validation("Invalid request").with_details(status_text),
        StatusCode::INTERNAL_SERVER_ERROR
        | StatusCode::BAD_GATEWAY
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::GATEWAY_TIMEOUT => {
            AppError::network("Server error", true).with_details(status_text)
        }
        other => AppError::network("Request failed", true)
            .with_details(format!("{}: {}", other.as_u16(), status_text)),
    }
}

/// Executes an async operation with bounded retries and exponential backoff.
///
/// Non-retryable failures return immediately with no delay. When every
/// attempt fails, the *last* classification encountered is surfaced.
/// Cancelling the token aborts an in-flight attempt or backoff wait and
/// returns a cancellation failure promptly.
pub async fn with_retry<F, Fut, T>(
    operation_name: &str,
    policy: &RetryPolicy,
    cancel: &CancellationToken,
    operation: F,
) -> ApiResult<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = ApiResult<T>>,
{
    let mut last_error = None;

    for attempt in 1..=policy.max_attempts {
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("{}: cancelled on attempt {}", operation_name, attempt);
                return Err(AppError::cancelled());
            }
            result = operation() => result,
        };

        match result {
            Ok(value) => return Ok(value),
            Err(error) => {
                if !error.retryable {
                    debug!("{}: non-retryable error: {}", operation_name, error);
                    return Err(error);
                }

                if attempt < policy.max_attempts {
                    let delay = retry_delay(policy.initial_delay, attempt);
                    warn!(
                        "{}: attempt {}/{} failed ({}), retrying in {}ms...",
                        operation_name,
                        attempt,
                        policy.max_attempts,
                        error,
                        delay.as_millis()
                    );
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => {
                            debug!("{}: cancelled during backoff", operation_name);
                            return Err(AppError::cancelled());
                        }
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
                last_error = Some(error);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| {
        AppError::processing(format!(
            "{}: failed after {} attempts",
            operation_name, policy.max_attempts
        ))
    }))
}
