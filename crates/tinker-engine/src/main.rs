//! # Tinker
//!
//! Headless entry point: loads configuration and the item catalog, then runs
//! the scripted demo session.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use std::sync::Arc;

use anyhow::{Context, Result};
use tinker_engine::catalog_loader::load_or_builtin;
use tinker_engine::config::EngineConfig;
use tinker_engine::demo;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Main entry point.
fn main() -> Result<()> {
    let config = EngineConfig::load();

    // Initialize tracing
    let env_directives = std::env::var("RUST_LOG").ok();
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_new(config.log_directives(env_directives.as_deref()))?)
        .init();

    info!("Tinker starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let catalog = load_or_builtin(&config.catalog_path)
        .with_context(|| format!("loading catalog {}", config.catalog_path.display()))?;
    let report = demo::run(&config, Arc::new(catalog))?;

    info!(
        "Demo finished after {} frames: {} collected, craft {:?}, {} dropped",
        report.frames, report.collected, report.craft, report.dropped
    );
    for (event, count) in &report.events {
        info!("  {event}: {count}");
    }

    info!("Tinker shutdown complete");
    Ok(())
}
