use crate::{config::Config, routes::create_router, state::AppState};
use std::{
    future::{Future, IntoFuture},
    io,
    time::Duration,
};
use tokio::{net::TcpListener, sync::oneshot, time::sleep};
use tracing::{info, warn};

pub async fn run(config: &Config, app_state: AppState) -> io::Result<()> {
    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!(addr = %listener.local_addr()?, "Listening for inventory requests");

    serve(listener, app_state, shutdown_signal(), config.shutdown_timeout).await?;

    info!("Server stopped");
    Ok(())
}

/// Serves on `listener` until `shutdown` resolves, then waits at most
/// `drain_timeout` for in-flight connections before returning.
pub async fn serve<F>(
    listener: TcpListener,
    app_state: AppState,
    shutdown: F,
    drain_timeout: Duration,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (signalled_tx, signalled_rx) = oneshot::channel::<()>();
    let shutdown = async move {
        shutdown.await;
        let _ = signalled_tx.send(());
    };

    let server = axum::serve(listener, create_router(app_state))
        .with_graceful_shutdown(shutdown)
        .into_future();
    tokio::pin!(server);

    let drain_deadline = async move {
        match signalled_rx.await {
            Ok(()) => sleep(drain_timeout).await,
            Err(_) => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        result = &mut server => result,
        _ = drain_deadline => {
            warn!(
                timeout_secs = drain_timeout.as_secs(),
                "Connections still open after drain timeout, dropping them"
            );
            Ok(())
        }
    }
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
