//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── serve (default)
//! │   ├── server: ServerConfig         # Host, port, shutdown
//! │   ├── middleware: MiddlewareConfig # CORS, recovery/timeouts
//! │   └── service: ServiceConfig       # Database, signing keys, cookies
//! └── create-account
//!     ├── --username / --password
//!     └── postgres: PgConfig
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.

mod middleware;
mod server;

use std::process;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
pub use middleware::MiddlewareConfig;
use posconf_postgres::PgConfig;
use posconf_server::service::ServiceConfig;
use serde::{Deserialize, Serialize};
pub use server::ServerConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

/// Command-line interface of the `posconf` binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "posconf")]
#[command(about = "POS configuration checklist server")]
#[command(version)]
pub struct Cli {
    /// Subcommand to run; `serve` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Runs migrations and serves the HTTP API.
    Serve(ServeArgs),
    /// Creates an operator account.
    CreateAccount(CreateAccountArgs),
}

/// Configuration of the `serve` subcommand.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct ServeArgs {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// HTTP middleware configuration (CORS, timeouts).
    #[clap(flatten)]
    pub middleware: MiddlewareConfig,

    /// Database, signing keys and cookie configuration.
    #[clap(flatten)]
    pub service: ServiceConfig,
}

/// Arguments of the `create-account` subcommand.
#[derive(Debug, Clone, Args)]
pub struct CreateAccountArgs {
    /// Account username, at least 3 characters after trimming.
    #[arg(long)]
    pub username: String,

    /// Account password, at least 6 characters.
    #[arg(long)]
    pub password: String,

    /// Database connection configuration.
    #[clap(flatten)]
    pub postgres: PgConfig,
}

/// Parser used when no subcommand is given: everything comes from the
/// environment and defaults.
#[derive(Debug, Parser)]
#[command(name = "posconf")]
struct EnvServe {
    #[clap(flatten)]
    args: ServeArgs,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// .env files are loaded before clap parses arguments so that their
    /// values act as `env` defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    /// Returns the subcommand to run, resolving `serve` from the environment
    /// when none was given.
    pub fn into_command(self) -> anyhow::Result<Command> {
        match self.command {
            Some(command) => Ok(command),
            None => {
                let EnvServe { args } = EnvServe::try_parse_from(["posconf"])
                    .context("missing serve configuration in the environment")?;
                Ok(Command::Serve(args))
            }
        }
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }

    /// Logs build information at debug level.
    pub fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }
}

impl ServeArgs {
    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;
        self.service
            .postgres_config
            .validate()
            .context("invalid database configuration")?;
        Ok(())
    }

    /// Logs configuration at info level (no sensitive information).
    pub fn log(&self) {
        self.server.log();
        self.middleware.log();

        let postgres = &self.service.postgres_config;
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            postgres_url = %postgres.database_url_masked(),
            postgres_max_connections = postgres.postgres_max_connections,
            postgres_connection_timeout_secs = ?postgres.postgres_connection_timeout_secs,
            postgres_idle_timeout_secs = ?postgres.postgres_idle_timeout_secs,
            secure_cookies = self.service.session_cookie.secure,
            "Service configuration"
        );
    }
}
