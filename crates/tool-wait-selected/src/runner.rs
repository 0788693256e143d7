use std::time::Instant;

use selwait_core_types::DriverError;
use tracing::{info, instrument, warn};
use wait_until::{wait_until_with, WaitError};

use crate::condition::SelectionCondition;
use crate::errors::WaitSelectedError;
use crate::model::{ActionReport, ExecCtx, WaitSelectedParams};
use crate::policy::WaitSelectedPolicyView;
use crate::ports::{polarity_label, MetricsPort, StatePort};

const UNKNOWN_SELECTOR: &str = "unknown";

pub struct RuntimeDeps<'a> {
    pub state: &'a dyn StatePort,
    pub metrics: &'a dyn MetricsPort,
    pub policy: &'a WaitSelectedPolicyView,
}

#[instrument(skip_all, fields(action = %ctx.action_id, reverse = params.reverse))]
pub async fn execute(
    ctx: &ExecCtx,
    params: WaitSelectedParams,
    deps: RuntimeDeps<'_>,
) -> Result<ActionReport, DriverError> {
    let poll = deps.policy.poll_policy(params.timeout_ms);
    let timeout_ms = deps.policy.effective_timeout_ms(params.timeout_ms);
    let mut report = ActionReport::new(Instant::now());

    info!(
        selector = params.selector.as_deref().unwrap_or(""),
        timeout_ms,
        interval_ms = poll.interval_ms,
        awaiting = polarity_label(params.reverse),
        "waiting for selection state"
    );

    let condition =
        SelectionCondition::new(deps.state, params.selector.as_deref(), params.reverse);

    match wait_until_with(&condition, &poll).await {
        Ok(outcome) => {
            report.ok = true;
            report.attempts = outcome.attempts;
            let report = report.finish(Instant::now());
            deps.metrics.record_ok(report.latency_ms, report.attempts);
            info!(
                attempts = report.attempts,
                latency_ms = report.latency_ms as u64,
                "selection state reached"
            );
            Ok(report)
        }
        Err(WaitError::Timeout { attempts, .. }) => {
            deps.metrics.record_timeout(params.reverse);
            let selector = describe_selector(params.selector.as_deref(), ctx);
            warn!(%selector, attempts, timeout_ms, "wait for selection state timed out");
            Err(WaitSelectedError::StillUnchanged {
                selector,
                reverse: params.reverse,
                timeout_ms,
            }
            .into())
        }
        Err(WaitError::Condition(err)) => {
            deps.metrics.record_fail(err.kind());
            warn!(error = %err, "selection state query failed");
            Err(err)
        }
    }
}

/// Selector named in the timeout message: the call's own selector, else the
/// one held by the previous result in the chain.
fn describe_selector(selector: Option<&str>, ctx: &ExecCtx) -> String {
    selector
        .filter(|selector| !selector.is_empty())
        .or_else(|| ctx.last_selector())
        .unwrap_or(UNKNOWN_SELECTOR)
        .to_string()
}
