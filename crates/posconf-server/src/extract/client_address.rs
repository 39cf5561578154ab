use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use derive_more::{Deref, Display};

/// Best-effort client address taken from proxy headers.
///
/// Looks at the first entry of `x-forwarded-for`, then `x-real-ip`, then
/// `cf-connecting-ip`. The value is recorded as sent and never parsed as an
/// IP address; `"unknown"` is used when no header carries one.
#[derive(Debug, Clone, PartialEq, Eq, Deref, Display)]
pub struct ClientAddress(pub String);

impl ClientAddress {
    /// Placeholder recorded when no forwarding header is present.
    pub const UNKNOWN: &str = "unknown";

    /// Resolves the client address from request headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
        };

        let forwarded_for = header("x-forwarded-for")
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|value| !value.is_empty());

        let address = forwarded_for
            .or_else(|| header("x-real-ip"))
            .or_else(|| header("cf-connecting-ip"))
            .unwrap_or(Self::UNKNOWN);

        Self(address.to_owned())
    }

    /// Returns the inner address.
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl<S> FromRequestParts<S> for ClientAddress
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
