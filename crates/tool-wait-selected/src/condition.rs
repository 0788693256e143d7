use async_trait::async_trait;
use selwait_core_types::DriverError;
use tracing::trace;
use wait_until::Condition;

use crate::ports::StatePort;

/// One poll attempt: query the state port and apply the aggregation rule.
pub struct SelectionCondition<'a> {
    state: &'a dyn StatePort,
    selector: Option<&'a str>,
    reverse: bool,
}

impl<'a> SelectionCondition<'a> {
    pub fn new(state: &'a dyn StatePort, selector: Option<&'a str>, reverse: bool) -> Self {
        Self {
            state,
            selector,
            reverse,
        }
    }
}

#[async_trait]
impl<'a> Condition for SelectionCondition<'a> {
    type Error = DriverError;

    async fn check(&self) -> Result<bool, DriverError> {
        let query = self.state.is_selected(self.selector).await?;
        let met = query.satisfies(self.reverse);
        trace!(?query, reverse = self.reverse, met, "selection state polled");
        Ok(met)
    }
}
