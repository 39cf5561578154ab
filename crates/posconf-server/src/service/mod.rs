//! Application state and dependency injection.

mod config;
mod security;

use posconf_postgres::PgClient;

pub use crate::service::config::{ServiceConfig, ServiceConfigBuilder};
pub use crate::service::security::{
    PasswordHasher, SessionCookie, SessionKeys, SessionKeysConfig,
};
#[cfg(test)]
pub(crate) use crate::service::security::test_keys;
// Re-export error types from crate root for convenience
pub use crate::{Error, Result};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    // External services:
    pub postgres: PgClient,

    // Internal services:
    pub password_hasher: PasswordHasher,
    pub session_keys: SessionKeys,
    pub session_cookie: SessionCookie,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Connects to the database, applies migrations and loads the signing keys.
    pub async fn new(service_config: &ServiceConfig) -> Result<Self> {
        let service_state = Self {
            postgres: service_config.connect_postgres().await?,

            password_hasher: PasswordHasher::new(),
            session_keys: service_config.load_session_keys().await?,
            session_cookie: service_config.session_cookie,
        };

        Ok(service_state)
    }

    /// Assembles state from already constructed parts.
    pub fn from_parts(
        postgres: PgClient,
        session_keys: SessionKeys,
        session_cookie: SessionCookie,
    ) -> Self {
        Self {
            postgres,
            password_hasher: PasswordHasher::new(),
            session_keys,
            session_cookie,
        }
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

// External services:
impl_di!(postgres: PgClient);

// Internal services:
impl_di!(password_hasher: PasswordHasher);
impl_di!(session_keys: SessionKeys);
impl_di!(session_cookie: SessionCookie);
