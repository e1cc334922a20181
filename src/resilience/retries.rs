//! Retry policy for bounded polling.
//!
//! # Responsibilities
//! - Hold the attempt budget and delay schedule of a polling loop
//! - Compute the delay that follows a given attempt
//!
//! # Design Decisions
//! - Fixed interval by default; capped exponential backoff is opt-in
//! - The policy never decides *whether* to retry; callers own that

use std::time::Duration;

use crate::config::PollConfig;
use crate::resilience::backoff::calculate_backoff;

/// Attempt budget and delay schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first one.
    pub max_attempts: u32,
    /// Delay between attempts (the base delay when backing off).
    pub interval: Duration,
    /// Upper bound for exponential backoff; `None` keeps the interval fixed.
    pub max_backoff: Option<Duration>,
}

impl RetryPolicy {
    /// A fixed-interval policy.
    pub fn fixed(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
            max_backoff: None,
        }
    }

    /// Switch to capped exponential backoff starting at `interval`.
    pub fn with_backoff(mut self, max_backoff: Duration) -> Self {
        self.max_backoff = Some(max_backoff);
        self
    }

    /// Delay to wait after the 1-based `attempt` before the next one.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        match self.max_backoff {
            None => self.interval,
            Some(max) => calculate_backoff(attempt, self.interval, max),
        }
    }
}

impl Default for RetryPolicy {
    /// 300 attempts one second apart.
    fn default() -> Self {
        Self::fixed(300, Duration::from_secs(1))
    }
}

impl From<&PollConfig> for RetryPolicy {
    fn from(config: &PollConfig) -> Self {
        let policy = Self::fixed(config.max_attempts, config.interval());
        match config.backoff_max_ms {
            Some(max_ms) => policy.with_backoff(Duration::from_millis(max_ms)),
            None => policy,
        }
    }
}
