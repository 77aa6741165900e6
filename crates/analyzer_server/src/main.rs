//! Entry point for the crypto analyzer server.

use std::sync::Arc;

use analyzer_constant::app::{DISPLAY_NAME, VERSION};
use analyzer_llms::{InferenceConfig, InferenceProvider};
use analyzer_observability::ObservabilityConfig;
use analyzer_server::cli::Cli;
use analyzer_server::{AppState, ServerConfig, build_app};
use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env in the working directory or any parent; real env vars win.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut obs = ObservabilityConfig::from_env().with_version(VERSION);
    if cli.verbose {
        obs = obs.with_log_level("debug");
    }
    analyzer_observability::init(obs).context("failed to initialise tracing")?;

    let config = match ServerConfig::from_env() {
        Ok(config) => config.with_cli_overrides(&cli),
        Err(e) => {
            tracing::error!(error = %e, "Refusing to start");
            return Err(e.into());
        }
    };

    let provider = InferenceProvider::new(
        InferenceConfig::new(config.api_key.clone())
            .with_base_url(config.endpoint.clone())
            .with_model(config.model.clone())
            .with_default_deadline(config.timeout),
    )
    .context("failed to create inference provider")?;

    let addr = config.listen_addr();
    let variant = config.variant;
    let model = config.model.clone();

    let state = AppState::new(config, Arc::new(provider));
    let shutdown = state.shutdown.clone();
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        variant = variant.as_str(),
        model = %model,
        "{DISPLAY_NAME} running at http://{addr}"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .context("server error")?;

    analyzer_observability::shutdown();
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM and cancels in-flight inference calls.
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, cancelling in-flight calls…");
    shutdown.cancel();
}
