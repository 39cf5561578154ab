//! Configuration checklist handlers.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use posconf_postgres::PgClient;
use posconf_postgres::query::SubmissionRepository;
use posconf_postgres::types::{OffsetPagination, SubmissionKind};

use crate::extract::{AuthState, Json, Query, ValidateJson};
use crate::handler::Result;
use crate::handler::request::{ConfigurationRequest, PaginationRequest};
use crate::handler::response::{
    Configuration, ConfigurationCreated, ConfigurationsPage, PageInfo,
};
use crate::service::ServiceState;

/// Tracing target for configuration operations.
const TRACING_TARGET: &str = "posconf_server::handler::configurations";

/// Stores a configuration checklist owned by the caller.
#[tracing::instrument(skip_all, fields(account_id = %auth_state.account_id))]
async fn submit_configuration(
    State(pg_client): State<PgClient>,
    AuthState(auth_state): AuthState,
    ValidateJson(request): ValidateJson<ConfigurationRequest>,
) -> Result<(StatusCode, Json<ConfigurationCreated>)> {
    let new_submission = request.into_model(auth_state.account_id, &auth_state.username)?;

    let mut conn = pg_client.get_connection().await?;
    let submission = conn.create_submission(new_submission).await?;

    tracing::info!(
        target: TRACING_TARGET,
        submission_id = %submission.id,
        "configuration submitted"
    );

    Ok((
        StatusCode::CREATED,
        Json(ConfigurationCreated::from(&submission)),
    ))
}

/// Lists the caller's configurations, newest first.
#[tracing::instrument(skip_all, fields(account_id = %auth_state.account_id))]
async fn list_configurations(
    State(pg_client): State<PgClient>,
    AuthState(auth_state): AuthState,
    Query(pagination): Query<PaginationRequest>,
) -> Result<Json<ConfigurationsPage>> {
    let pagination = OffsetPagination::from(pagination);

    let mut conn = pg_client.get_connection().await?;
    let page = conn
        .list_submissions(
            auth_state.account_id,
            SubmissionKind::Configuration,
            pagination,
        )
        .await?;

    tracing::debug!(
        target: TRACING_TARGET,
        count = page.items.len(),
        total = page.total,
        "configurations listed"
    );

    let info = PageInfo::new(&page, &pagination);
    let configurations = page
        .items
        .into_iter()
        .map(Configuration::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(ConfigurationsPage {
        configurations,
        pagination: info,
    }))
}

/// Returns a [`Router`] with all related routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/configuration/submit", post(submit_configuration))
        .route("/configuration/list", get(list_configurations))
}
