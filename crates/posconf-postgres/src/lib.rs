#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Embeds all migrations into the final binary.
pub(crate) const MIGRATIONS: diesel_migrations::EmbeddedMigrations =
    diesel_migrations::embed_migrations!("./migrations");

// Tracing target constants for consistent logging.

/// Tracing target for client initialization and configuration.
pub const TRACING_TARGET_CLIENT: &str = "posconf_postgres::client";

/// Tracing target for query execution.
pub const TRACING_TARGET_QUERY: &str = "posconf_postgres::query";

/// Tracing target for migration application.
pub const TRACING_TARGET_MIGRATION: &str = "posconf_postgres::migrations";

/// Tracing target for connection pool events.
pub const TRACING_TARGET_CONNECTION: &str = "posconf_postgres::connection";

mod client;
mod error;
pub mod model;
pub mod query;
mod schema;
pub mod types;

pub use diesel_async::AsyncPgConnection as PgConnection;

pub use crate::client::{ConnectionPool, PgClient, PgConfig, PgConn, PooledConnection};
pub use crate::error::{BoxError, PgError, PgResult};
