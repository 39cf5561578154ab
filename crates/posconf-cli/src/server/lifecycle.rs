use std::future::Future;
use std::io;
use std::time::Duration;

use crate::config::ServerConfig;
use crate::server::{ServerError, ServerResult};
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Runs a server future, bounding the drain phase by the shutdown timeout.
///
/// `drained` must resolve once the shutdown signal has been received, so the
/// timeout only starts counting after the server stopped accepting connections.
pub(crate) async fn serve_with_shutdown<F, D>(
    server_config: &ServerConfig,
    serve: F,
    drained: D,
) -> ServerResult<()>
where
    F: Future<Output = io::Result<()>>,
    D: Future<Output = ()>,
{
    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        addr = %server_config.server_addr(),
        "Server is ready and listening for connections"
    );

    if server_config.binds_to_all_interfaces() {
        tracing::warn!(
            target: TRACING_TARGET_SERVER_STARTUP,
            "Server is bound to all interfaces. Ensure firewall rules are properly configured."
        );
    }

    let shutdown_timeout = server_config.shutdown_timeout();
    let result = tokio::select! {
        result = serve => result,
        () = deadline(drained, shutdown_timeout) => {
            tracing::warn!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                timeout_secs = shutdown_timeout.as_secs(),
                "In-flight requests did not finish before the shutdown timeout"
            );
            Ok(())
        }
    };

    result.map_err(|err| {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %err,
            "Server encountered an error"
        );
        ServerError::Runtime(err)
    })?;

    tracing::info!(target: TRACING_TARGET_SERVER_SHUTDOWN, "Server shut down gracefully");
    Ok(())
}

async fn deadline(drained: impl Future<Output = ()>, timeout: Duration) {
    drained.await;
    tokio::time::sleep(timeout).await;
}
