//! Non-SA credential pairs stored as a JSONB array.

use serde::{Deserialize, Serialize};

use crate::PgResult;

/// A secondary database account recorded on a submission.
///
/// Stored inside the `non_sa_credentials` JSONB column as
/// `[{"username": ..., "password": ...}]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonSaCredential {
    /// Account name on the POS database server.
    pub username: String,
    /// Account password, stored as entered.
    pub password: String,
}

impl NonSaCredential {
    /// Creates a new credential pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Encodes a credential list into the JSONB column representation.
    pub fn to_json(credentials: &[Self]) -> PgResult<serde_json::Value> {
        Ok(serde_json::to_value(credentials)?)
    }

    /// Decodes the JSONB column representation.
    ///
    /// # Errors
    ///
    /// Returns [`PgError::Decode`] if the value is not an array of
    /// `{username, password}` objects.
    ///
    /// [`PgError::Decode`]: crate::PgError::Decode
    pub fn from_json(value: &serde_json::Value) -> PgResult<Vec<Self>> {
        Ok(Vec::<Self>::deserialize(value)?)
    }
}
