use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tool_wait_selected::{ActionReport, ExecCtx, WaitSelectedParams, WaitSelectedToolBuilder};
use tracing::info;

use super::output::OutputFormat;
use crate::cli::context::CliContext;
use crate::replay::{ReplayStatePort, SelectionTimeline};

#[derive(Args, Clone, Debug)]
pub struct WaitSelectedArgs {
    /// Recorded selection timeline (YAML or JSON)
    #[arg(long, value_name = "FILE")]
    pub states: PathBuf,

    /// Selector to wait on; omit to wait on the element bound by the previous result
    #[arg(long)]
    pub selector: Option<String>,

    /// Timeout in milliseconds (defaults to waitfor_timeout_ms)
    #[arg(long, allow_negative_numbers = true)]
    pub ms: Option<i64>,

    /// Wait for the unselected/unchecked state instead
    #[arg(long)]
    pub reverse: bool,

    /// Selector held by the previous command result
    #[arg(long, value_name = "SELECTOR")]
    pub last_selector: Option<String>,
}

#[derive(Debug, Serialize)]
struct WaitSummary {
    ok: bool,
    attempts: u32,
    latency_ms: u128,
}

impl From<&ActionReport> for WaitSummary {
    fn from(report: &ActionReport) -> Self {
        Self {
            ok: report.ok,
            attempts: report.attempts,
            latency_ms: report.latency_ms,
        }
    }
}

pub async fn cmd_wait_selected(
    args: WaitSelectedArgs,
    ctx: &CliContext,
    output: &OutputFormat,
) -> Result<()> {
    let timeline = SelectionTimeline::load(&args.states)
        .await
        .with_context(|| format!("Failed to load states from {}", args.states.display()))?;
    info!(frames = timeline.frames.len(), "Replaying selection timeline");

    let tool = WaitSelectedToolBuilder::new(ctx.config().policy())
        .with_state(Arc::new(ReplayStatePort::new(timeline)))
        .build()?;

    let mut exec_ctx = ExecCtx::default();
    if let Some(last) = args.last_selector {
        exec_ctx = exec_ctx.with_last_result(last);
    }
    let params = WaitSelectedParams {
        selector: args.selector,
        timeout_ms: args.ms,
        reverse: args.reverse,
    };

    let report = tool.run(exec_ctx, params).await?;
    let summary = WaitSummary::from(&report);
    match output.render(&summary)? {
        Some(rendered) => println!("{}", rendered),
        None => println!(
            "selection state reached after {} attempt(s) in {}ms",
            summary.attempts, summary.latency_ms
        ),
    }
    Ok(())
}
