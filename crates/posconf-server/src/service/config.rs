use derive_builder::Builder;
use posconf_postgres::{PgClient, PgConfig};
use serde::{Deserialize, Serialize};

use crate::service::{SessionCookie, SessionKeys, SessionKeysConfig};
use crate::{Error, Result};

/// Tracing target for service assembly.
const TRACING_TARGET: &str = "posconf_server::service::config";

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[cfg_attr(feature = "config", derive(clap::Args))]
#[must_use = "config does nothing unless you use it"]
#[builder(
    pattern = "owned",
    setter(into, prefix = "with"),
    build_fn(validate = "Self::validate", error = "Error")
)]
pub struct ServiceConfig {
    /// PostgreSQL connection and pool settings.
    #[cfg_attr(feature = "config", command(flatten))]
    pub postgres_config: PgConfig,

    /// Session token signing keys.
    #[cfg_attr(feature = "config", command(flatten))]
    pub session_keys: SessionKeysConfig,

    /// Session cookie settings.
    #[cfg_attr(feature = "config", command(flatten))]
    #[builder(default)]
    pub session_cookie: SessionCookie,
}

impl ServiceConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Creates the connection pool and applies pending migrations.
    pub async fn connect_postgres(&self) -> Result<PgClient> {
        let pg_client = self.postgres_config.clone().build().map_err(|e| {
            Error::database("failed to create database client").with_source(e)
        })?;

        let applied = pg_client.run_pending_migrations().await.map_err(|e| {
            Error::database("failed to apply database migrations").with_source(e)
        })?;

        tracing::info!(
            target: TRACING_TARGET,
            applied = applied.len(),
            "database ready"
        );

        Ok(pg_client)
    }

    /// Loads the session signing keys from the configured paths.
    pub async fn load_session_keys(&self) -> Result<SessionKeys> {
        let keys = SessionKeys::from_config(&self.session_keys).await?;
        keys.validate_keys()?;
        Ok(keys)
    }
}

impl ServiceConfigBuilder {
    fn validate(builder: &ServiceConfigBuilder) -> Result<(), String> {
        if let Some(postgres_config) = &builder.postgres_config {
            postgres_config.validate().map_err(|e| e.to_string())?;
        }

        Ok(())
    }
}

impl From<derive_builder::UninitializedFieldError> for Error {
    fn from(error: derive_builder::UninitializedFieldError) -> Self {
        Error::config(format!("missing service configuration: {}", error.field_name()))
    }
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Error::config(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn builds_with_required_fields() -> anyhow::Result<()> {
        let config = ServiceConfig::builder()
            .with_postgres_config(PgConfig::new("postgresql://localhost/posconf"))
            .with_session_keys(SessionKeysConfig::new("./public.pem", "./private.pem"))
            .build()?;

        assert!(!config.session_cookie.secure);
        Ok(())
    }

    #[test]
    fn missing_keys_fail_to_build() {
        let error = ServiceConfig::builder()
            .with_postgres_config(PgConfig::new("postgresql://localhost/posconf"))
            .build()
            .expect_err("session keys are required");

        assert_eq!(error.kind(), ErrorKind::Config);
        assert!(error.message().contains("session_keys"));
    }

    #[test]
    fn rejects_non_postgres_url() {
        let error = ServiceConfig::builder()
            .with_postgres_config(PgConfig::new("mysql://localhost/posconf"))
            .with_session_keys(SessionKeysConfig::new("./public.pem", "./private.pem"))
            .build()
            .expect_err("only postgres urls are accepted");

        assert_eq!(error.kind(), ErrorKind::Config);
    }
}
