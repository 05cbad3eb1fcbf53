//! Arena - headless bot-vs-bot runner for pursuit games
//!
//! Plays a batch of games on the demo board with the chosen evader and
//! seeker policies, then prints a JSON summary of the outcomes.

use anyhow::Result;
use clap::Parser;
use pursuit_ai::AiConfig;
use pursuit_core::GameRules;
use std::path::Path;
use tracing::info;

mod arena;
mod config;
mod stats;

use crate::arena::Arena;
use crate::config::{Config, CENTRAL_CONFIG};

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    let rules = GameRules::from_config(&CENTRAL_CONFIG.rules);
    let ai = AiConfig::from_central(&CENTRAL_CONFIG);
    let output = config.output.clone();

    let mut arena = Arena::new(config, rules, ai, CENTRAL_CONFIG.belief.distance_weight)?;
    let snapshot = arena.run();

    if let Some(path) = output {
        stats::write_stats(&snapshot, Path::new(&path));
    }
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
