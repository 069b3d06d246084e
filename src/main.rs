use inventory_status_service::{
    config::Config, metrics::LoggingMetrics, server, state::AppState,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = Config::load(".env")?;
    info!(
        host = %config.host,
        port = config.port,
        shutdown_timeout_secs = config.shutdown_timeout.as_secs(),
        "Configuration loaded"
    );

    let app_state = AppState::new(Arc::new(LoggingMetrics));

    server::run(&config, app_state).await?;

    Ok(())
}
