//! Ohmage condition command-line tool
//!
//! Validates condition sentences and survey files, and evaluates
//! conditions against JSON response bindings. Results are printed to
//! stdout as JSON; logs go to stderr.

mod command;
mod config;

use crate::command::Command;
use crate::config::CliConfig;
use anyhow::Result;
use ohmage_sdk::ConditionEngine;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let config = CliConfig::load()?;
    init_tracing(&config)?;
    tracing::debug!("Loaded configuration: {:?}", config);

    let command = Command::parse_args(std::env::args().skip(1))?;
    let engine = ConditionEngine::new(config.engine_config())?;

    let output = command.run(&engine)?;
    println!("{}", output);

    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing(config: &CliConfig) -> Result<()> {
    let default_filter = format!(
        "ohmage_condition={level},ohmage_sdk={level},ohmage_runtime={level},ohmage_parser={level}",
        level = config.log_level
    );

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
