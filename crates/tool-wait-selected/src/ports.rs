use async_trait::async_trait;
use selwait_core_types::DriverError;

use crate::model::SelectionQuery;

/// Remote state query for the selection/check state of matched elements.
#[async_trait]
pub trait StatePort: Send + Sync {
    /// `None` queries the element the current command chain is bound to.
    async fn is_selected(&self, selector: Option<&str>) -> Result<SelectionQuery, DriverError>;
}

pub trait MetricsPort: Send + Sync {
    fn record_ok(&self, latency_ms: u128, attempts: u32);
    fn record_timeout(&self, reverse: bool);
    fn record_fail(&self, kind: &str);
}

pub fn polarity_label(reverse: bool) -> &'static str {
    if reverse {
        "unselected"
    } else {
        "selected"
    }
}
