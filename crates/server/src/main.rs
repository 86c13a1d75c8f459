//! Issue Tracker REST API Server
//!
//! Keeps issues in memory for the lifetime of the process and serves them
//! over HTTP.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use issues::{CommandExecutor, InMemoryStorage};
use issues_server::cli::Cli;
use issues_server::create_app;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    info!("Starting issues API server...");

    let executor = Arc::new(CommandExecutor::new(InMemoryStorage::new()));
    let app = create_app(executor, config.response_mode());

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    info!(
        "Server listening on http://{} (strict status: {})",
        config.bind, config.strict_status
    );

    axum::serve(listener, app).await?;

    Ok(())
}
