//! Database error to HTTP error conversion.
//!
//! Every database failure is logged in full and surfaces to the client as a
//! generic error. Constraint violations that a client can cause map to 4xx.

use posconf_postgres::PgError;
use posconf_postgres::types::ConstraintViolation;
use posconf_postgres::types::constraints::{AccountConstraints, SubmissionConstraints};

use crate::handler::{Error, ErrorKind};

/// Tracing target for database error conversion.
const TRACING_TARGET: &str = "posconf_server::handler::postgres";

impl From<AccountConstraints> for Error<'static> {
    fn from(c: AccountConstraints) -> Self {
        match c {
            AccountConstraints::UsernameUnique => ErrorKind::Conflict
                .with_message("Account already exists")
                .with_resource("account"),
            AccountConstraints::UsernameLength => ErrorKind::BadRequest
                .with_message("Username must be at least 3 characters long")
                .with_resource("account"),
            AccountConstraints::PasswordHashNotEmpty | AccountConstraints::UpdatedAfterCreated => {
                ErrorKind::InternalServerError.into_error()
            }
        }
    }
}

impl From<SubmissionConstraints> for Error<'static> {
    fn from(c: SubmissionConstraints) -> Self {
        let error = match c {
            SubmissionConstraints::RestaurantNameNotEmpty => {
                ErrorKind::BadRequest.with_message("restaurantName is required")
            }
            SubmissionConstraints::OutletNameNotEmpty => {
                ErrorKind::BadRequest.with_message("outletName is required")
            }
            SubmissionConstraints::SaPasswordNotEmpty => {
                ErrorKind::BadRequest.with_message("saPassword is required")
            }
            SubmissionConstraints::CredentialsNotEmpty => {
                ErrorKind::BadRequest.with_message("At least one Non-SA credential is required")
            }
            SubmissionConstraints::UpdatedAfterCreated => {
                return ErrorKind::InternalServerError.into_error();
            }
        };

        error.with_resource("submission")
    }
}

impl From<ConstraintViolation> for Error<'static> {
    fn from(constraint: ConstraintViolation) -> Self {
        match constraint {
            ConstraintViolation::Account(c) => c.into(),
            ConstraintViolation::Submission(c) => c.into(),
        }
    }
}

impl From<PgError> for Error<'static> {
    fn from(error: PgError) -> Self {
        match error {
            PgError::Config(config_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %config_error,
                    "database configuration error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Timeout(timeout) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    timeout = ?timeout,
                    "database timeout",
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Connection(connection_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %connection_error,
                    "database connection error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Migration(migration_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %migration_error,
                    "database migration error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Query(ref query_error) => {
                if let Some(constraint) = error.constraint_violation() {
                    tracing::warn!(
                        target: TRACING_TARGET,
                        constraint = %constraint,
                        error = %query_error,
                        "query error (constraint violation)"
                    );
                    return constraint.into();
                }

                tracing::error!(
                    target: TRACING_TARGET,
                    error = %query_error,
                    "query error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Decode(decode_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %decode_error,
                    "stored value could not be decoded"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Unexpected(unexpected_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %unexpected_error,
                    "unexpected database error"
                );
                ErrorKind::InternalServerError.into_error()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_username_is_conflict() {
        let error: Error = ConstraintViolation::Account(AccountConstraints::UsernameUnique).into();
        assert_eq!(error.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn chronological_violations_are_internal() {
        let error: Error =
            ConstraintViolation::Submission(SubmissionConstraints::UpdatedAfterCreated).into();
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert!(error.message().is_none());
    }

    #[test]
    fn connection_failures_are_internal() {
        let error: Error = PgError::Unexpected("pool closed".into()).into();
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert!(error.message().is_none());
    }

    #[test]
    fn undecodable_rows_are_internal() -> anyhow::Result<()> {
        let Err(decode_error) = serde_json::from_str::<Vec<u8>>("{}") else {
            anyhow::bail!("object must not decode as a list");
        };
        let error: Error = PgError::Decode(decode_error).into();
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert!(error.message().is_none());
        Ok(())
    }
}
