//! The `token` cookie set on login.

use axum_extra::extract::cookie::{Cookie, SameSite};
#[cfg(feature = "config")]
use clap::Args;
use cookie::time::Duration;
use serde::{Deserialize, Serialize};

/// Settings for the session cookie issued on login.
///
/// The cookie is always `HttpOnly`, `SameSite=Strict`, scoped to `/` and
/// lives as long as the token it carries. `Secure` is opt-in so the service
/// can run behind plain HTTP during development.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct SessionCookie {
    /// Marks the session cookie as `Secure` (HTTPS only).
    #[cfg_attr(feature = "config", arg(long = "secure-cookies", env = "SECURE_COOKIES"))]
    pub secure: bool,
}

impl SessionCookie {
    /// Name of the cookie that carries the session token.
    pub const NAME: &str = "token";
    /// Cookie lifetime in seconds (7 days).
    pub const MAX_AGE_SECS: i64 = 7 * 24 * 60 * 60;

    /// Creates cookie settings.
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    /// Builds the cookie carrying `token`.
    pub fn build(&self, token: impl Into<String>) -> Cookie<'static> {
        Cookie::build((Self::NAME, token.into()))
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Strict)
            .max_age(Duration::seconds(Self::MAX_AGE_SECS))
            .path("/")
            .build()
    }
}
