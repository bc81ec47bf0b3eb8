/// Axum webserver lifecycle: bind, serve, graceful shutdown on Ctrl+C
use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use super::routes::build_router;
use super::state::AppState;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Start the webserver
///
/// This function blocks until the server is shut down
pub async fn start_server(addr: SocketAddr, state: AppState) -> Result<(), ServerError> {
    let app = build_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Webserver stopped");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    tracing::info!("Shutdown signal received");
}
