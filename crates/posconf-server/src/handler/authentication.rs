//! Login and session verification handlers.
//!
//! Unknown usernames and wrong passwords are indistinguishable to the client:
//! both yield the same `401 Invalid credentials`, and a dummy hash
//! verification runs when the account does not exist.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum_extra::extract::CookieJar;
use posconf_postgres::PgClient;
use posconf_postgres::query::AccountRepository;

use crate::extract::{AuthClaims, AuthState, Json, ValidateJson};
use crate::handler::request::LoginRequest;
use crate::handler::response::{LoginResponse, UnauthenticatedResponse, VerifyResponse};
use crate::handler::{Error, ErrorKind, Result};
use crate::service::{PasswordHasher, ServiceState, SessionCookie, SessionKeys};

/// Tracing target for authentication operations.
const TRACING_TARGET: &str = "posconf_server::handler::authentication";

/// Login reports internal failures with a shorter message than other routes.
fn login_failure(error: Error<'static>) -> Error<'static> {
    match error.kind() {
        ErrorKind::InternalServerError => error.with_message("Internal server error"),
        _ => error,
    }
}

/// Checks a username/password pair and issues a session token.
#[tracing::instrument(skip_all)]
async fn login(
    State(pg_client): State<PgClient>,
    State(password_hasher): State<PasswordHasher>,
    State(session_keys): State<SessionKeys>,
    State(session_cookie): State<SessionCookie>,
    jar: CookieJar,
    ValidateJson(request): ValidateJson<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    tracing::trace!(
        target: TRACING_TARGET,
        username = %request.username(),
        "login attempt"
    );

    let mut conn = pg_client.get_connection().await.map_err(|e| login_failure(e.into()))?;
    let account = conn
        .find_account_by_username(request.username())
        .await
        .map_err(|e| login_failure(e.into()))?;

    let Some(account) = account else {
        // Keeps response timing independent of whether the account exists.
        password_hasher.verify_dummy_password(request.password());

        tracing::warn!(
            target: TRACING_TARGET,
            username = %request.username(),
            account_exists = false,
            "login failed"
        );
        return Err(ErrorKind::InvalidCredentials.into_error());
    };

    if let Err(error) = password_hasher.verify_password(request.password(), &account.password_hash)
    {
        tracing::warn!(
            target: TRACING_TARGET,
            account_id = %account.id,
            account_exists = true,
            "login failed"
        );
        return Err(login_failure(error));
    }

    let token = AuthClaims::new(account.id, &account.username)
        .and_then(|claims| claims.encode(&session_keys))
        .map_err(login_failure)?;

    tracing::info!(
        target: TRACING_TARGET,
        account_id = %account.id,
        "login successful"
    );

    let jar = jar.add(session_cookie.build(token.clone()));
    let response = LoginResponse::new(account.id, account.username, token);
    Ok((jar, Json(response)))
}

/// Reports whether the request carries a valid session.
#[tracing::instrument(skip_all, fields(authenticated = auth_state.is_some()))]
async fn verify(auth_state: Option<AuthState>) -> Response {
    match auth_state {
        Some(auth_state) => Json(VerifyResponse::from(&auth_state.0)).into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(UnauthenticatedResponse::default()),
        )
            .into_response(),
    }
}

/// Returns a [`Router`] with all related routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/verify", get(verify))
}

#[cfg(test)]
mod tests {
    use axum::body::Bytes;
    use axum::http::header::AUTHORIZATION;
    use axum::http::{HeaderValue, StatusCode};
    use serde_json::{Value, json};
    use uuid::Uuid;

    use super::*;
    use crate::handler::test::{create_db_test_server, create_test_server};
    use crate::service::test_keys;

    #[tokio::test]
    async fn login_requires_both_fields() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server
            .post("/auth/login")
            .json(&json!({ "username": "cashier" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Username and password are required");

        let response = server
            .post("/auth/login")
            .json(&json!({ "username": "", "password": "secret" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn login_rejects_malformed_json() -> anyhow::Result<()> {
        let server = create_test_server()?;
        let response = server
            .post("/auth/login")
            .bytes(Bytes::from_static(b"{\"username\":"))
            .content_type("application/json")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn verify_without_token_is_unauthorized() -> anyhow::Result<()> {
        let server = create_test_server()?;
        let response = server.get("/auth/verify").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        response.assert_json(&json!({ "error": "Unauthorized", "authenticated": false }));
        Ok(())
    }

    #[tokio::test]
    async fn verify_accepts_bearer_token() -> anyhow::Result<()> {
        let server = create_test_server()?;
        let account_id = Uuid::new_v4();
        let token = AuthClaims::new(account_id, "manager")?.encode(&test_keys())?;

        let response = server
            .get("/auth/verify")
            .add_header(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}"))?)
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["authenticated"], true);
        assert_eq!(body["user"]["userId"], account_id.to_string());
        assert_eq!(body["user"]["username"], "manager");
        Ok(())
    }

    #[tokio::test]
    async fn verify_rejects_tampered_token() -> anyhow::Result<()> {
        let server = create_test_server()?;
        let response = server
            .get("/auth/verify")
            .add_header(AUTHORIZATION, HeaderValue::from_static("Bearer not.a.token"))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn login_then_verify_round_trip() -> anyhow::Result<()> {
        let (server, account) = create_db_test_server().await?;

        let response = server
            .post("/auth/login")
            .json(&json!({ "username": account.username, "password": account.password }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["message"], "Login successful");
        assert_eq!(body["user"]["username"], account.username.as_str());

        let cookie = response.cookie(SessionCookie::NAME);
        assert!(cookie.http_only().unwrap_or(false));
        assert_eq!(cookie.value(), body["token"].as_str().unwrap_or_default());

        let response = server.get("/auth/verify").add_cookie(cookie).await;
        response.assert_status_ok();
        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn unknown_user_and_wrong_password_look_the_same() -> anyhow::Result<()> {
        let (server, account) = create_db_test_server().await?;

        let wrong_password = server
            .post("/auth/login")
            .json(&json!({ "username": account.username, "password": "not-the-password" }))
            .await;
        let unknown_user = server
            .post("/auth/login")
            .json(&json!({ "username": format!("{}-missing", account.username), "password": "x" }))
            .await;

        wrong_password.assert_status(StatusCode::UNAUTHORIZED);
        unknown_user.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_password.json::<Value>(), unknown_user.json::<Value>());
        assert_eq!(wrong_password.json::<Value>()["error"], "Invalid credentials");
        Ok(())
    }
}
