//! Authentication response types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::extract::AuthClaims;

/// Account summary returned after login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginUser {
    pub id: Uuid,
    pub username: String,
}

/// Response returned after a successful login.
///
/// The token is also set as the `token` cookie.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: LoginUser,
    pub token: String,
}

impl LoginResponse {
    /// Builds the login response for an issued token.
    pub fn new(id: Uuid, username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            message: "Login successful".to_owned(),
            user: LoginUser {
                id,
                username: username.into(),
            },
            token: token.into(),
        }
    }
}

/// Identity carried by a verified token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedUser {
    pub user_id: Uuid,
    pub username: String,
}

/// Response of the session verification endpoint.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub authenticated: bool,
    pub user: VerifiedUser,
}

impl From<&AuthClaims> for VerifyResponse {
    fn from(claims: &AuthClaims) -> Self {
        Self {
            authenticated: true,
            user: VerifiedUser {
                user_id: claims.account_id,
                username: claims.username.clone(),
            },
        }
    }
}

/// Body returned by the verification endpoint when no valid session exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnauthenticatedResponse {
    pub error: String,
    pub authenticated: bool,
}

impl Default for UnauthenticatedResponse {
    fn default() -> Self {
        Self {
            error: "Unauthorized".to_owned(),
            authenticated: false,
        }
    }
}
