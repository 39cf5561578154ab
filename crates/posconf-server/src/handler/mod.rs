//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use posconf_server::handler::routes;
//! use posconf_server::service::{ServiceConfig, ServiceState};
//!
//! # async fn example(config: ServiceConfig) -> anyhow::Result<()> {
//! let state = ServiceState::new(&config).await?;
//! let app: axum::Router = routes(state.clone()).with_state(state);
//! # Ok(())
//! # }
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod authentication;
mod configurations;
mod error;
mod forms;
mod monitors;
pub mod request;
pub mod response;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::response::ErrorResponse;
use crate::middleware::RouterAuthExt;
use crate::service::ServiceState;

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with all routes that require a session.
fn private_routes() -> Router<ServiceState> {
    Router::new()
        .merge(configurations::routes())
        .merge(forms::routes())
}

/// Returns a [`Router`] with all public routes.
///
/// `/auth/verify` is public: it answers unauthenticated callers itself.
fn public_routes() -> Router<ServiceState> {
    Router::new()
        .merge(authentication::routes())
        .merge(monitors::routes())
}

/// Returns a [`Router`] with all routes.
pub fn routes(state: ServiceState) -> Router<ServiceState> {
    // Private routes with authentication middleware
    let private_router = private_routes().with_authentication(state);

    Router::new()
        .merge(private_router)
        .merge(public_routes())
        .fallback(handler)
}

#[cfg(test)]
pub(crate) mod test {
    use axum::http::header::AUTHORIZATION;
    use axum::http::{HeaderName, HeaderValue};
    use axum_test::TestServer;
    use posconf_postgres::model::NewAccount;
    use posconf_postgres::query::AccountRepository;
    use posconf_postgres::{PgClient, PgConfig};
    use uuid::Uuid;

    use crate::extract::AuthClaims;
    use crate::handler::routes;
    use crate::service::{PasswordHasher, ServiceState, SessionCookie, test_keys};

    /// Returns state whose pool never connects unless a handler asks for a connection.
    pub fn create_test_state() -> anyhow::Result<ServiceState> {
        let postgres = PgClient::new(PgConfig::new("postgresql://localhost/posconf_test"))?;
        Ok(ServiceState::from_parts(
            postgres,
            test_keys(),
            SessionCookie::default(),
        ))
    }

    /// Returns a new [`TestServer`] with the default router and the given state.
    pub fn create_test_server_with_state(state: ServiceState) -> anyhow::Result<TestServer> {
        let app = routes(state.clone()).with_state(state);
        Ok(TestServer::new(app)?)
    }

    /// Returns a new [`TestServer`] that does not need a database.
    pub fn create_test_server() -> anyhow::Result<TestServer> {
        create_test_server_with_state(create_test_state()?)
    }

    /// Returns an `Authorization` header for a fresh token.
    pub fn bearer(username: &str) -> anyhow::Result<(HeaderName, HeaderValue)> {
        bearer_for(Uuid::new_v4(), username)
    }

    fn bearer_for(account_id: Uuid, username: &str) -> anyhow::Result<(HeaderName, HeaderValue)> {
        let token = AuthClaims::new(account_id, username)?.encode(&test_keys())?;
        let value = HeaderValue::from_str(&format!("Bearer {token}"))?;
        Ok((AUTHORIZATION, value))
    }

    /// Account created in the test database.
    pub struct TestAccount {
        pub id: Uuid,
        pub username: String,
        pub password: String,
    }

    impl TestAccount {
        /// Returns an `Authorization` header for this account.
        pub fn bearer(&self) -> anyhow::Result<(HeaderName, HeaderValue)> {
            bearer_for(self.id, &self.username)
        }
    }

    /// Returns a [`TestServer`] backed by `POSTGRES_URL` and a freshly created account.
    pub async fn create_db_test_server() -> anyhow::Result<(TestServer, TestAccount)> {
        let url = std::env::var("POSTGRES_URL")?;
        let postgres = PgConfig::new(url).build()?;
        postgres.run_pending_migrations().await?;

        let password = "correct-horse".to_owned();
        let password_hash = PasswordHasher::new().hash_password(&password)?;
        let username = format!("cashier-{}", Uuid::new_v4().simple());

        let mut conn = postgres.get_connection().await?;
        let account = conn
            .create_account(NewAccount {
                username,
                password_hash,
            })
            .await?;

        let state = ServiceState::from_parts(postgres, test_keys(), SessionCookie::default());
        let server = create_test_server_with_state(state)?;
        let account = TestAccount {
            id: account.id,
            username: account.username,
            password,
        };

        Ok((server, account))
    }

    #[tokio::test]
    async fn handlers() -> anyhow::Result<()> {
        let server = create_test_server()?;
        assert!(server.is_running());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() -> anyhow::Result<()> {
        let server = create_test_server()?;
        let response = server.get("/does-not-exist").await;
        response.assert_status_not_found();
        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "not_found");
        Ok(())
    }
}
