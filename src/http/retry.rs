//! Retry policy for transient HTTP failures

use std::time::Duration;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BACKOFF_STEP: Duration = Duration::from_millis(1000);

/// Bounded linear backoff.
///
/// Transport errors and 5xx responses are retried until `max_attempts`
/// requests in total have been sent. 4xx responses are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_step: DEFAULT_BACKOFF_STEP,
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `retry` (1-based): 1s, 2s, ...
    ///
    /// No jitter: many clients failing together will retry in lockstep.
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.backoff_step * retry
    }

    /// Whether another attempt is allowed after `attempts` have been made
    pub fn allows_retry(&self, attempts: u32) -> bool {
        attempts < self.max_attempts
    }

    pub fn is_retryable_status(status: u16) -> bool {
        status >= 500
    }
}
