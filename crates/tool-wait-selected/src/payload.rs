//! Normalization of loosely-typed tool-call arguments
//!
//! Accepted shapes:
//! - positional `[selector, ms, reverse]`
//! - positional `[selector, reverse]` (second argument boolean)
//! - element-bound `[ms]` and `[ms, reverse]` (first argument numeric)
//! - object `{ "selector": .., "ms": .., "reverse": .. }`
//!
//! A `reverse` that is not a boolean counts as `false`. An `ms` that is not a
//! number is dropped so the configured default applies. Negative budgets are
//! kept as given; fractions truncate.

use selwait_core_types::{ToolCall, ToolPayload};
use serde_json::Value;

use crate::errors::WaitSelectedError;
use crate::model::WaitSelectedParams;

pub const TOOL_NAME: &str = "waitForSelected";

impl WaitSelectedParams {
    pub fn from_args(args: &[Value]) -> Self {
        if let Some(ms) = args.first().filter(|first| first.is_number()) {
            return Self {
                selector: None,
                timeout_ms: timeout_arg(ms),
                reverse: reverse_arg(args.get(1)),
            };
        }

        let selector = args.first().and_then(selector_arg);
        let (ms, reverse) = match args.get(1) {
            Some(Value::Bool(reverse)) => (None, *reverse),
            ms => (ms, reverse_arg(args.get(2))),
        };
        Self {
            selector,
            timeout_ms: ms.and_then(timeout_arg),
            reverse,
        }
    }

    pub fn from_payload(payload: &ToolPayload) -> Result<Self, WaitSelectedError> {
        match payload {
            Value::Array(args) => Ok(Self::from_args(args)),
            Value::Object(fields) => Ok(Self {
                selector: fields.get("selector").and_then(selector_arg),
                timeout_ms: fields.get("ms").and_then(timeout_arg),
                reverse: reverse_arg(fields.get("reverse")),
            }),
            Value::String(selector) => Ok(Self::new(selector.clone())),
            Value::Null => Ok(Self::default()),
            other => Err(WaitSelectedError::InvalidArguments(format!(
                "unsupported payload: {}",
                other
            ))),
        }
    }

    pub fn from_tool_call(call: &ToolCall) -> Result<Self, WaitSelectedError> {
        if call.tool != TOOL_NAME {
            return Err(WaitSelectedError::InvalidArguments(format!(
                "tool {} is not {}",
                call.tool, TOOL_NAME
            )));
        }
        Self::from_payload(&call.payload)
    }
}

fn selector_arg(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

fn reverse_arg(value: Option<&Value>) -> bool {
    value.and_then(Value::as_bool).unwrap_or(false)
}

fn timeout_arg(value: &Value) -> Option<i64> {
    if let Some(ms) = value.as_i64() {
        return Some(ms);
    }
    value.as_f64().map(|ms| ms as i64)
}
