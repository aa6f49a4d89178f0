mod cli;
mod request;

use std::io;

use anyhow::Context;
use kairos_core::config::load_config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

use crate::request::LayoutRequest;

fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let args = cli::parse(std::env::args().skip(1))?;
    let config = load_config()?;

    tracing::debug!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping info");
    }

    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let request: LayoutRequest =
        serde_json::from_str(&text).context("Failed to parse layout request")?;

    tracing::info!(input = %args.input.display(), mode = ?args.mode, "Running layout request");

    let output = request.run(&config.scheduler, args.mode)?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
