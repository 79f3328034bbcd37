//! Best-execution quoting server.
//!
//! Loads configuration, installs tracing, builds the enabled price sources
//! and serves the REST API until interrupted.

use anyhow::Context;
use best_execution::api::rest::{AppState, create_router};
use best_execution::application::services::BestExecutionService;
use best_execution::config::AppConfig;
use best_execution::infrastructure::sources::{self, CancelHandle};
use best_execution::telemetry;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Best-execution price quoting across exchanges.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults to `best-execution.toml` if present.
    #[arg(short, long, env = "BEST_EXECUTION_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    telemetry::init(&config.log).context("failed to initialize logging")?;

    let sources = sources::from_config(&config.sources);
    let names: Vec<String> = sources.iter().map(|s| s.name().to_string()).collect();
    let service = Arc::new(BestExecutionService::new(sources, config.quoting.fan_out));
    let fan_out = service.fan_out();

    let shutdown = Arc::new(CancelHandle::new());
    let state = Arc::new(AppState::new(
        service,
        config.quoting.request_timeout(),
        Arc::clone(&shutdown),
    ));
    let router = create_router(state);

    let address = config.server.address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;

    tracing::info!(
        %address,
        sources = ?names,
        %fan_out,
        request_timeout_ms = config.quoting.request_timeout_ms,
        "best-execution server listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal(handle: Arc<CancelHandle>) {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested, cancelling in-flight quotes");
    handle.cancel();
}
