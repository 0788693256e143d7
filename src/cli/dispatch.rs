use super::config::cmd_config;
use super::env::CliArgs;
use super::wait::cmd_wait_selected;
use crate::cli::commands::Commands;
use crate::cli::context::CliContext;
use anyhow::Result;

pub async fn dispatch(cli: &CliArgs, ctx: &CliContext) -> Result<()> {
    match cli.command.clone() {
        Commands::WaitSelected(args) => cmd_wait_selected(args, ctx, &cli.output).await,
        Commands::Config(args) => cmd_config(args, ctx, &cli.output).await,
    }
}
