use anyhow::Context;
use payload_server::{ServerConfig, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const CONFIG_PATH_ENV: &str = "PAYLOAD_SERVER_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "payload-server.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let config_path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = ServerConfig::load_or_default(&config_path)
        .with_context(|| format!("failed to load server config from {config_path}"))?;

    info!(
        bind_addr = %config.bind_addr,
        view_data_key = %config.view_data_key,
        "starting payload server"
    );

    let app = create_router(&config);
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!("server is ready, press Ctrl+C to shut down");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received, stopping server");
}

fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}
