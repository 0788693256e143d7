use serde::{Deserialize, Serialize};
use wait_until::{PollPolicy, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct WaitSelectedPolicyView {
    /// Budget used when a call carries no numeric timeout.
    pub waitfor_timeout_ms: u64,
    pub waitfor_interval_ms: u64,
}

impl WaitSelectedPolicyView {
    /// Budget as reported back to the caller.
    pub fn effective_timeout_ms(&self, requested: Option<i64>) -> i64 {
        requested.unwrap_or_else(|| i64::try_from(self.waitfor_timeout_ms).unwrap_or(i64::MAX))
    }

    /// Negative budgets poll with a zero deadline.
    pub fn poll_policy(&self, requested: Option<i64>) -> PollPolicy {
        let timeout_ms = u64::try_from(self.effective_timeout_ms(requested)).unwrap_or(0);
        PollPolicy::new(self.waitfor_interval_ms, timeout_ms)
    }
}

impl Default for WaitSelectedPolicyView {
    fn default() -> Self {
        Self {
            waitfor_timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            waitfor_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}
