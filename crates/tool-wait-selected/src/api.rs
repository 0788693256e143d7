use std::sync::Arc;

use async_trait::async_trait;
use selwait_core_types::DriverError;

use crate::errors::WaitSelectedError;
use crate::metrics::NoopMetrics;
use crate::model::{ActionReport, ExecCtx, WaitSelectedParams};
use crate::policy::WaitSelectedPolicyView;
use crate::ports::{MetricsPort, StatePort};
use crate::runner::{execute, RuntimeDeps};

#[async_trait]
pub trait WaitSelectedTool: Send + Sync {
    async fn run(
        &self,
        ctx: ExecCtx,
        params: WaitSelectedParams,
    ) -> Result<ActionReport, DriverError>;

    /// `waitForSelected(selector, ms, reverse)`.
    async fn wait_for_selected(
        &self,
        ctx: ExecCtx,
        selector: &str,
        timeout_ms: Option<i64>,
        reverse: bool,
    ) -> Result<ActionReport, DriverError> {
        let mut params = WaitSelectedParams::new(selector).reversed(reverse);
        params.timeout_ms = timeout_ms;
        self.run(ctx, params).await
    }

    /// `element.waitForSelected(ms, reverse)` on an already resolved element.
    async fn wait_for_selected_bound(
        &self,
        ctx: ExecCtx,
        timeout_ms: Option<i64>,
        reverse: bool,
    ) -> Result<ActionReport, DriverError> {
        let mut params = WaitSelectedParams::bound(reverse);
        params.timeout_ms = timeout_ms;
        self.run(ctx, params).await
    }
}

pub struct WaitSelectedToolBuilder {
    policy: WaitSelectedPolicyView,
    state: Option<Arc<dyn StatePort>>,
    metrics: Option<Arc<dyn MetricsPort>>,
}

impl WaitSelectedToolBuilder {
    pub fn new(policy: WaitSelectedPolicyView) -> Self {
        Self {
            policy,
            state: None,
            metrics: None,
        }
    }

    pub fn with_state(mut self, port: Arc<dyn StatePort>) -> Self {
        self.state = Some(port);
        self
    }

    pub fn with_metrics(mut self, port: Arc<dyn MetricsPort>) -> Self {
        self.metrics = Some(port);
        self
    }

    pub fn build(self) -> Result<Arc<dyn WaitSelectedTool>, DriverError> {
        let state = self.state.ok_or(WaitSelectedError::MissingStatePort)?;
        Ok(Arc::new(WaitSelectedToolImpl {
            policy: self.policy,
            state,
            metrics: self
                .metrics
                .unwrap_or_else(|| Arc::new(NoopMetrics) as Arc<dyn MetricsPort>),
        }))
    }
}

struct WaitSelectedToolImpl {
    policy: WaitSelectedPolicyView,
    state: Arc<dyn StatePort>,
    metrics: Arc<dyn MetricsPort>,
}

#[async_trait]
impl WaitSelectedTool for WaitSelectedToolImpl {
    async fn run(
        &self,
        ctx: ExecCtx,
        params: WaitSelectedParams,
    ) -> Result<ActionReport, DriverError> {
        let runtime = RuntimeDeps {
            state: self.state.as_ref(),
            metrics: self.metrics.as_ref(),
            policy: &self.policy,
        };

        execute(&ctx, params, runtime).await
    }
}
