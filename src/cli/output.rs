use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Renders `value` as JSON or YAML; `None` for human output, which each
    /// command formats itself.
    pub fn render<T: Serialize>(&self, value: &T) -> Result<Option<String>> {
        match self {
            OutputFormat::Human => Ok(None),
            OutputFormat::Json => Ok(Some(serde_json::to_string_pretty(value)?)),
            OutputFormat::Yaml => Ok(Some(serde_yaml::to_string(value)?)),
        }
    }
}
