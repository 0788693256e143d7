use selwait_core_types::DriverError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WaitSelectedError {
    #[error("element ({selector}) still {}selected after {timeout_ms}ms", negation(.reverse))]
    StillUnchanged {
        selector: String,
        reverse: bool,
        timeout_ms: i64,
    },
    #[error("state port is required")]
    MissingStatePort,
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
}

// A forward wait that timed out means the element is still *not* selected.
fn negation(reverse: &bool) -> &'static str {
    if *reverse {
        ""
    } else {
        "not "
    }
}

impl From<WaitSelectedError> for DriverError {
    fn from(err: WaitSelectedError) -> Self {
        match err {
            WaitSelectedError::StillUnchanged { .. } => DriverError::wait_timeout(err.to_string()),
            other => DriverError::new(other.to_string()),
        }
    }
}
