//! Form checklist handlers.
//!
//! Forms carry one or more non-SA credentials and, unlike configurations,
//! record the submitting client's address and user agent.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum_extra::TypedHeader;
use axum_extra::headers::UserAgent;
use posconf_postgres::PgClient;
use posconf_postgres::query::SubmissionRepository;
use posconf_postgres::types::{OffsetPagination, SubmissionKind};

use crate::extract::{AuthState, ClientAddress, Json, Query, ValidateJson};
use crate::handler::Result;
use crate::handler::request::{FormRequest, PaginationRequest};
use crate::handler::response::{Form, FormCreated, FormsPage, PageInfo};
use crate::service::ServiceState;

/// Tracing target for form operations.
const TRACING_TARGET: &str = "posconf_server::handler::forms";

/// Stores a form checklist owned by the caller.
#[tracing::instrument(skip_all, fields(account_id = %auth_state.account_id))]
async fn submit_form(
    State(pg_client): State<PgClient>,
    AuthState(auth_state): AuthState,
    client_address: ClientAddress,
    user_agent: Option<TypedHeader<UserAgent>>,
    ValidateJson(request): ValidateJson<FormRequest>,
) -> Result<(StatusCode, Json<FormCreated>)> {
    let user_agent = user_agent.map(|TypedHeader(user_agent)| user_agent.to_string());
    let new_submission = request.into_model(
        auth_state.account_id,
        &auth_state.username,
        client_address.into_inner(),
        user_agent,
    )?;

    let mut conn = pg_client.get_connection().await?;
    let submission = conn.create_submission(new_submission).await?;

    tracing::info!(
        target: TRACING_TARGET,
        submission_id = %submission.id,
        "form submitted"
    );

    Ok((StatusCode::CREATED, Json(FormCreated::from(&submission))))
}

/// Lists the caller's forms, newest first.
#[tracing::instrument(skip_all, fields(account_id = %auth_state.account_id))]
async fn list_forms(
    State(pg_client): State<PgClient>,
    AuthState(auth_state): AuthState,
    Query(pagination): Query<PaginationRequest>,
) -> Result<Json<FormsPage>> {
    let pagination = OffsetPagination::from(pagination);

    let mut conn = pg_client.get_connection().await?;
    let page = conn
        .list_submissions(auth_state.account_id, SubmissionKind::Form, pagination)
        .await?;

    tracing::debug!(
        target: TRACING_TARGET,
        count = page.items.len(),
        total = page.total,
        "forms listed"
    );

    let info = PageInfo::new(&page, &pagination);
    let forms = page
        .items
        .into_iter()
        .map(Form::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(FormsPage {
        forms,
        pagination: info,
    }))
}

/// Returns a [`Router`] with all related routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/form/submit", post(submit_form))
        .route("/form/list", get(list_forms))
}

#[cfg(test)]
mod tests {
    use axum::http::header::USER_AGENT;
    use axum::http::{HeaderName, HeaderValue, StatusCode};
    use serde_json::{Value, json};

    use crate::handler::test::{bearer, create_db_test_server, create_test_server};

    fn payload() -> Value {
        json!({
            "restaurantName": "Harbor Grill",
            "outletName": "Pier 4",
            "saPassword": "sa-pass",
            "nonSaCredentials": [
                { "username": "pos_reader", "password": "r3ad" },
                { "username": "pos_writer", "password": "wr1te" },
            ],
            "remarks": "Firewall rules pending on the kitchen PC",
            "firewallOnAllPcs": true,
        })
    }

    async fn rejection(body: Value) -> anyhow::Result<String> {
        let server = create_test_server()?;
        let (name, value) = bearer("cashier")?;
        let response = server
            .post("/form/submit")
            .add_header(name, value)
            .json(&body)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        Ok(body["error"].as_str().unwrap_or_default().to_owned())
    }

    #[tokio::test]
    async fn empty_credentials_are_rejected() -> anyhow::Result<()> {
        let mut body = payload();
        body["nonSaCredentials"] = json!([]);
        assert_eq!(
            rejection(body).await?,
            "At least one Non-SA credential is required"
        );
        Ok(())
    }

    #[tokio::test]
    async fn blank_credential_password_cites_position() -> anyhow::Result<()> {
        let mut body = payload();
        body["nonSaCredentials"] = json!([{ "username": "a", "password": "" }]);
        assert_eq!(
            rejection(body).await?,
            "Non-SA credential #1: Password is required"
        );
        Ok(())
    }

    #[tokio::test]
    async fn required_fields_are_checked_in_order() -> anyhow::Result<()> {
        let body = json!({ "outletName": "", "nonSaCredentials": [] });
        assert_eq!(rejection(body).await?, "restaurantName is required");
        Ok(())
    }

    #[tokio::test]
    async fn list_requires_session() -> anyhow::Result<()> {
        let server = create_test_server()?;
        server
            .get("/form/list")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        Ok(())
    }

    #[tokio::test]
    async fn list_rejects_numeric_prefix() -> anyhow::Result<()> {
        let server = create_test_server()?;
        let (name, value) = bearer("cashier")?;
        let response = server
            .get("/form/list")
            .add_query_param("page", "2abc")
            .add_header(name, value)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Invalid query parameter");
        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn stored_fields_round_trip() -> anyhow::Result<()> {
        let (server, account) = create_db_test_server().await?;
        let (name, value) = account.bearer()?;

        let response = server
            .post("/form/submit")
            .add_header(name.clone(), value.clone())
            .add_header(
                HeaderName::from_static("x-forwarded-for"),
                HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
            )
            .add_header(USER_AGENT, HeaderValue::from_static("checklist-tests/1.0"))
            .json(&payload())
            .await;
        response.assert_status(StatusCode::CREATED);
        let created: Value = response.json();
        assert_eq!(created["message"], "Form submitted successfully");

        let response = server.get("/form/list").add_header(name, value).await;
        response.assert_status_ok();
        let listed: Value = response.json();
        let form = &listed["forms"][0];

        assert_eq!(form["id"], created["form"]["id"]);
        assert_eq!(form["username"], account.username.as_str());
        assert_eq!(form["nonSaCredentials"], payload()["nonSaCredentials"]);
        assert_eq!(form["remarks"], payload()["remarks"]);
        assert_eq!(form["firewallOnAllPcs"], true);
        assert_eq!(form["anydeskUsername"], "");
        assert_eq!(form["ipAddress"], "203.0.113.7");
        assert_eq!(form["userAgent"], "checklist-tests/1.0");
        Ok(())
    }
}
