//! Plain HTTP server.

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;

use crate::TRACING_TARGET_SERVER_STARTUP;
use crate::config::ServerConfig;
use crate::server::lifecycle::serve_with_shutdown;
use crate::server::{ServerError, ServerResult, shutdown_signal};

/// Starts an HTTP server with graceful shutdown.
///
/// Validates the configuration, binds to the configured address and serves
/// until Ctrl+C or SIGTERM, then waits up to the shutdown timeout for
/// in-flight requests.
pub async fn serve_http(app: Router, server_config: ServerConfig) -> ServerResult<()> {
    if let Err(validation_error) = server_config.validate() {
        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            error = %validation_error,
            "Invalid server configuration"
        );
        return Err(ServerError::invalid_config(&validation_error));
    }

    let server_addr = server_config.server_addr();
    let listener = TcpListener::bind(server_addr).await.map_err(|err| {
        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            addr = %server_addr,
            error = %err,
            "Failed to bind to address"
        );
        ServerError::bind_error(server_addr, err)
    })?;

    let (signalled_tx, mut signalled_rx) = watch::channel(false);
    let shutdown_timeout = server_config.shutdown_timeout();
    let graceful = async move {
        shutdown_signal(shutdown_timeout).await;
        let _ = signalled_tx.send(true);
    };
    let drained = async move {
        let _ = signalled_rx.wait_for(|signalled| *signalled).await;
    };

    let serve = async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(graceful)
            .await
    };

    serve_with_shutdown(&server_config, serve, drained).await
}
