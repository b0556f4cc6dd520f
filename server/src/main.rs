//! `chimera-server` entry point.
//!
//! Seeds settings from the environment, binds the listener, and serves
//! the adapter until ctrl-c. Settings changed at runtime live only in
//! memory; a restart falls back to the environment values.

use anyhow::Context;
use clap::Parser;

use chimera_server::settings::{Settings, SettingsStore};
use chimera_server::{AppState, router};

#[derive(Debug, Parser)]
#[command(name = "chimera-server", about = "Task dashboard backend")]
struct Cli {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before clap reads PORT from the environment.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_env();
    if settings.configured() {
        tracing::info!("asana configured from environment");
    } else {
        tracing::warn!("asana not configured; configure via the settings page");
    }

    let state = AppState::new(SettingsStore::new(settings), chimera_asana::ASANA_API_URL);
    let app = router(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], cli.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("chimera backend listening on {addr}");
    tracing::info!("health check: http://localhost:{}/api/health", cli.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("signal received, shutting down");
        })
        .await
        .context("server exited unexpectedly")
}
