use clap::Subcommand;

use super::config::ConfigArgs;
use super::wait::WaitSelectedArgs;

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Wait for an option/radio/checkbox to become (un)selected
    WaitSelected(WaitSelectedArgs),

    /// Inspect the effective configuration
    Config(ConfigArgs),
}
