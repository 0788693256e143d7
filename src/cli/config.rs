use anyhow::Result;
use clap::{Args, Subcommand};

use super::output::OutputFormat;
use crate::cli::context::CliContext;

#[derive(Args, Clone, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Clone, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration (file + environment overrides)
    Show,

    /// Print the configuration file path in use
    Path,
}

pub async fn cmd_config(args: ConfigArgs, ctx: &CliContext, output: &OutputFormat) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            let config = ctx.config();
            match output.render(config)? {
                Some(rendered) => println!("{}", rendered),
                None => {
                    println!("Current configuration ({}):", ctx.config_path().display());
                    println!("{}", serde_yaml::to_string(config)?);
                }
            }
        }
        ConfigAction::Path => {
            println!("{}", ctx.config_path().display());
        }
    }
    Ok(())
}
