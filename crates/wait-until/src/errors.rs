//! Error types for the poller

use std::time::Duration;

use thiserror::Error;

/// Why a poll ended without the condition holding.
#[derive(Debug, Error)]
pub enum WaitError<E> {
    /// The deadline passed before the condition held.
    #[error("condition not met within {}ms", .timeout.as_millis())]
    Timeout { timeout: Duration, attempts: u32 },

    /// The condition itself failed; polling stopped at that attempt.
    #[error(transparent)]
    Condition(E),
}

impl<E> WaitError<E> {
    pub fn is_timeout(&self) -> bool {
        matches!(self, WaitError::Timeout { .. })
    }

    /// Timeout the poll was started with, if this is a timeout.
    pub fn timeout(&self) -> Option<Duration> {
        match self {
            WaitError::Timeout { timeout, .. } => Some(*timeout),
            WaitError::Condition(_) => None,
        }
    }

    pub fn into_condition_error(self) -> Option<E> {
        match self {
            WaitError::Condition(err) => Some(err),
            WaitError::Timeout { .. } => None,
        }
    }
}

/// Classifies a poll failure as a timeout.
pub fn is_timeout_error<E>(err: &WaitError<E>) -> bool {
    err.is_timeout()
}
