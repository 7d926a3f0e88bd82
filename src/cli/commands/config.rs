//! Implementation of the `mission-relay config` command.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::load_config;
use crate::domain::models::Config;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Configuration file (defaults to mission-relay.yaml layering)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Effective configuration as YAML, or pretty JSON with `--json`.
fn render(config: &Config, json_mode: bool) -> Result<String> {
    if json_mode {
        Ok(serde_json::to_string_pretty(config)?)
    } else {
        Ok(serde_yaml::to_string(config)?)
    }
}

pub async fn execute(args: ConfigArgs, json_mode: bool) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    println!("{}", render(&config, json_mode)?);
    Ok(())
}
