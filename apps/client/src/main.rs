mod app;
mod cli;
mod clipboard;
mod config;
mod errors;
mod form;
mod page;
mod sanitize;
mod service;
mod upload;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configuration first: production without API_URL stops here
    let config = Config::from_env().context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(
        "Cover letter client v{} ({:?}, backend {})",
        config.version, config.environment, config.api_base_url
    );

    if config.features.debug {
        debug!("Debug features enabled: {:?}", config);
    }

    cli::run(cli, &config).await
}
