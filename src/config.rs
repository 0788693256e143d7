//! Configuration for the wait commands
//!
//! Values come from a YAML file and may be overridden through the
//! environment (`SELWAIT_WAITFOR_TIMEOUT_MS`, `SELWAIT_WAITFOR_INTERVAL_MS`).

use serde::{Deserialize, Serialize};
use tool_wait_selected::policy::WaitSelectedPolicyView;
use tracing::{info, warn};
use wait_until::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS};

pub const ENV_WAITFOR_TIMEOUT: &str = "SELWAIT_WAITFOR_TIMEOUT_MS";
pub const ENV_WAITFOR_INTERVAL: &str = "SELWAIT_WAITFOR_INTERVAL_MS";

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default budget for wait commands called without a timeout
    pub waitfor_timeout_ms: u64,

    /// Delay between two state queries
    pub waitfor_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            waitfor_timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            waitfor_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl Config {
    pub fn from_yaml_str(raw: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(raw)
    }

    pub fn policy(&self) -> WaitSelectedPolicyView {
        WaitSelectedPolicyView {
            waitfor_timeout_ms: self.waitfor_timeout_ms,
            waitfor_interval_ms: self.waitfor_interval_ms,
        }
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup`; unparsable values are logged and skipped.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(ms) = parse_override(&lookup, ENV_WAITFOR_TIMEOUT) {
            info!(key = ENV_WAITFOR_TIMEOUT, ms, "Overriding wait timeout");
            self.waitfor_timeout_ms = ms;
        }
        if let Some(ms) = parse_override(&lookup, ENV_WAITFOR_INTERVAL) {
            info!(key = ENV_WAITFOR_INTERVAL, ms, "Overriding poll interval");
            self.waitfor_interval_ms = ms;
        }
    }
}

fn parse_override<F>(lookup: &F, key: &str) -> Option<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(ms) => Some(ms),
        Err(err) => {
            warn!(key, value = %raw, ?err, "ignoring invalid override");
            None
        }
    }
}
