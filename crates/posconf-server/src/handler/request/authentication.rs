//! Authentication request types.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use super::validations::rejection;

/// Request payload for login.
///
/// Both fields must be present and non-empty; they are not trimmed.
#[must_use]
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Username of the account.
    pub username: Option<String>,
    /// Password of the account.
    pub password: Option<String>,
}

impl LoginRequest {
    /// Message returned when either field is missing.
    pub const REQUIRED: &str = "Username and password are required";

    /// Creates a login request.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    /// Returns the username, empty when absent.
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or_default()
    }

    /// Returns the password, empty when absent.
    pub fn password(&self) -> &str {
        self.password.as_deref().unwrap_or_default()
    }
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        if self.username().is_empty() {
            return Err(rejection("username", Self::REQUIRED));
        }

        if self.password().is_empty() {
            return Err(rejection("password", Self::REQUIRED));
        }

        Ok(())
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_both_fields() {
        assert!(LoginRequest::default().validate().is_err());
        assert!(LoginRequest::new("cashier", "").validate().is_err());
        assert!(LoginRequest::new("", "secret").validate().is_err());
        assert!(LoginRequest::new("cashier", "secret").validate().is_ok());
    }

    #[test]
    fn whitespace_is_not_trimmed() {
        assert!(LoginRequest::new(" ", " ").validate().is_ok());
    }

    #[test]
    fn debug_hides_password() {
        let debug = format!("{:?}", LoginRequest::new("cashier", "hunter22"));
        assert!(debug.contains("cashier"));
        assert!(!debug.contains("hunter22"));
    }
}
