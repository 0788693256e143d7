//! selwait library
//!
//! Configuration, replayed state source and CLI wiring for the
//! wait-for-selected command.

pub mod cli;
pub mod config;
pub mod replay;

pub use config::Config;
pub use replay::{ReplayStatePort, SelectionTimeline};
