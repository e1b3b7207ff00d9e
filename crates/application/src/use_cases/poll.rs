//! Polling helper for eventually-consistent endpoints.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;

/// Error returned when a condition never holds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollError {
    /// The timeout elapsed first.
    #[error("async operation timeout after {timeout_ms}ms ({attempts} attempts)")]
    Timeout {
        /// The configured timeout.
        timeout_ms: u64,
        /// How many times the condition was evaluated.
        attempts: u32,
    },
}

/// Timing for [`wait_until`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// Give up once this much time has passed.
    pub timeout: Duration,
    /// Pause between attempts.
    pub interval: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            interval: Duration::from_millis(500),
        }
    }
}

impl PollOptions {
    /// Sets the timeout, keeping the default interval.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }
}

/// Re-evaluates `condition` until it yields a value or the timeout passes.
///
/// The condition always runs at least once; the timeout is checked after
/// each unsuccessful attempt.
///
/// # Errors
///
/// Returns `PollError::Timeout` when the timeout elapses first.
#[allow(clippy::cast_possible_truncation)]
pub async fn wait_until<F, Fut, T>(mut condition: F, options: PollOptions) -> Result<T, PollError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    let start = Instant::now();
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        if let Some(value) = condition().await {
            tracing::debug!(attempts, "condition satisfied");
            return Ok(value);
        }
        if start.elapsed() > options.timeout {
            return Err(PollError::Timeout {
                timeout_ms: options.timeout.as_millis() as u64,
                attempts,
            });
        }
        tokio::time::sleep(options.interval).await;
    }
}
