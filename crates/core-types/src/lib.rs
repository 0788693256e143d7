use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Error shared by the state-query collaborators and the wait tools.
///
/// Values are cloned and compared as-is: a tool that does not own an error
/// hands the exact value it received back to its caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DriverError {
    #[error("{message}")]
    Message { message: String },

    /// The remote exchange with the browser failed.
    #[error("transport error: {message}")]
    Transport { message: String },

    /// A wait command gave up after its budget elapsed.
    #[error("{message}")]
    WaitTimeout { message: String },
}

impl DriverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn wait_timeout(message: impl Into<String>) -> Self {
        Self::WaitTimeout {
            message: message.into(),
        }
    }

    pub fn is_wait_timeout(&self) -> bool {
        matches!(self, DriverError::WaitTimeout { .. })
    }

    /// Short label used for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DriverError::Message { .. } => "message",
            DriverError::Transport { .. } => "transport",
            DriverError::WaitTimeout { .. } => "wait_timeout",
        }
    }
}

#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ActionId(pub String);

impl ActionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for ActionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Loosely-typed arguments as they arrive from a tool call.
#[cfg(feature = "serde-full")]
pub type ToolPayload = serde_json::Value;

#[cfg(not(feature = "serde-full"))]
pub type ToolPayload = ();

#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToolCall {
    pub call_id: Option<String>,
    pub tool: String,
    pub payload: ToolPayload,
}
