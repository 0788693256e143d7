//! Poll-until-condition primitive
//!
//! Evaluates an asynchronous condition at a fixed interval until it holds,
//! fails, or the timeout elapses. Commands that wait on page state build a
//! [`Condition`] and hand it to [`wait_until`] or [`wait_until_with`].

pub mod condition;
pub mod errors;
pub mod policy;
mod poll;

pub use condition::{condition_fn, Condition, FnCondition};
pub use errors::{is_timeout_error, WaitError};
pub use policy::{PollPolicy, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS};
pub use poll::{wait_until, wait_until_with, PollOutcome};
