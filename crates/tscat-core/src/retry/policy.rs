use std::time::Duration;

use super::ErrorKind;

/// How many times a segment is attempted and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts per segment, including the first.
    pub max_attempts: u32,
    /// Wait before the second attempt; doubles after each further failure.
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::single_attempt()
    }
}

impl RetryPolicy {
    /// One attempt per segment: any failure aborts the crawl.
    pub fn single_attempt() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(30),
        }
    }

    /// Wait before the next attempt after attempt number `attempt` (1-based)
    /// failed with `kind`, or `None` to give up.
    pub fn decide(&self, attempt: u32, kind: ErrorKind) -> Option<Duration> {
        if attempt >= self.max_attempts || !kind.is_transient() {
            return None;
        }
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        Some(self.base_delay.saturating_mul(factor).min(self.max_delay))
    }
}
