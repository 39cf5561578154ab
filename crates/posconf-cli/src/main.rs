#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod account;
mod config;
mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use posconf_server::handler::routes;
use posconf_server::middleware::{RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt};
use posconf_server::service::ServiceState;

use crate::config::{Cli, Command, MiddlewareConfig, ServeArgs};

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "posconf_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "posconf_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "posconf_cli::config";
pub const TRACING_TARGET_ACCOUNT: &str = "posconf_cli::account";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    Cli::log_build_info();

    match cli.into_command()? {
        Command::Serve(args) => serve(args).await,
        Command::CreateAccount(args) => account::create_account(args).await,
    }
}

/// Connects to the database and runs the HTTP server until shutdown.
async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        "starting posconf server"
    );

    args.validate()?;
    args.log();

    let state = ServiceState::new(&args.service)
        .await
        .context("failed to create service state")?;
    let router = create_router(state, &args.middleware);

    server::serve_http(router, args.server).await?;
    Ok(())
}

/// Creates the router with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// recovery wraps observability, which wraps security and the routes.
fn create_router(state: ServiceState, middleware: &MiddlewareConfig) -> Router {
    routes(state.clone())
        .with_state(state)
        .with_security(&middleware.cors)
        .with_observability()
        .with_recovery(&middleware.recovery)
}
