//! JSON extractor that runs [`Validate`] after deserializing.

use axum::extract::{FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::Json;
use crate::handler::{Error, ErrorKind};

/// Tracing target for validation failures.
const TRACING_TARGET: &str = "posconf_server::extract::validation";

/// JSON extractor with validation.
///
/// Request types report at most one error at a time, in field order, and the
/// error's message is sent to the client as is.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateJson<T>(pub T);

impl<T> ValidateJson<T> {
    /// Returns the inner validated value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;
        data.validate()?;
        Ok(Self(data))
    }
}

impl From<ValidationErrors> for Error<'static> {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .into_values()
            .flat_map(|field_errors| field_errors.iter())
            .find_map(|error| error.message.clone())
            .unwrap_or_else(|| "Validation failed".into());

        tracing::debug!(
            target: TRACING_TARGET,
            message = %message,
            "request validation failed"
        );

        ErrorKind::BadRequest.with_message(message)
    }
}
