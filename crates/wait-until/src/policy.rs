use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Budget used when a caller does not provide one.
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 500;

/// Delay between the starts of two consecutive attempts.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

const MIN_POLL_INTERVAL_MS: u64 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollPolicy {
    pub interval_ms: u64,
    pub timeout_ms: u64,
}

impl PollPolicy {
    pub fn new(interval_ms: u64, timeout_ms: u64) -> Self {
        Self {
            interval_ms,
            timeout_ms,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_interval_ms(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(MIN_POLL_INTERVAL_MS))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_POLL_INTERVAL_MS,
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
        }
    }
}
