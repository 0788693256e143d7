pub mod api;
pub mod errors;
pub mod model;
pub mod payload;
pub mod policy;
pub mod ports;

mod condition;
mod metrics;
mod runner;

pub use api::{WaitSelectedTool, WaitSelectedToolBuilder};
pub use condition::SelectionCondition;
pub use metrics::NoopMetrics;
pub use model::{ActionReport, ExecCtx, LastResult, SelectionQuery, WaitSelectedParams};
pub use runner::{execute, RuntimeDeps};
