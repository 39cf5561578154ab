//! Request authorizer.
//!
//! [`AuthState`] pulls the session token from the `token` cookie, falling back
//! to `Authorization: Bearer <token>`, verifies it and caches the verified
//! claims in the request extensions so later extractors in the same request
//! do not verify again.

use axum::extract::{FromRef, FromRequestParts, OptionalFromRequestParts};
use axum::http::HeaderMap;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use derive_more::Deref;

use super::AuthClaims;
use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind, Result};
use crate::service::{SessionCookie, SessionKeys};

/// Verified identity of the caller.
///
/// Dereferences to the token's [`AuthClaims`].
#[derive(Debug, Clone, Deref, PartialEq, Eq)]
pub struct AuthState(pub AuthClaims);

impl AuthState {
    /// Returns the raw session token carried by the request, if any.
    ///
    /// A non-empty `token` cookie wins over the `Authorization` header.
    pub fn find_token(headers: &HeaderMap) -> Option<String> {
        let jar = CookieJar::from_headers(headers);
        if let Some(cookie) = jar.get(SessionCookie::NAME)
            && !cookie.value().is_empty()
        {
            return Some(cookie.value().to_owned());
        }

        headers
            .typed_get::<Authorization<Bearer>>()
            .map(|bearer| bearer.token().to_owned())
            .filter(|token| !token.is_empty())
    }

    /// Authorizes a request from its headers.
    pub fn from_headers(headers: &HeaderMap, keys: &SessionKeys) -> Result<Self> {
        let Some(token) = Self::find_token(headers) else {
            tracing::debug!(
                target: TRACING_TARGET_AUTHENTICATION,
                "no session token on request"
            );
            return Err(ErrorKind::Unauthorized.into_error());
        };

        let claims = AuthClaims::decode(&token, keys)?;
        Ok(Self(claims))
    }

    /// Returns the inner claims.
    #[inline]
    pub fn into_claims(self) -> AuthClaims {
        self.0
    }
}

impl<S> FromRequestParts<S> for AuthState
where
    S: Sync + Send,
    SessionKeys: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth_state) = parts.extensions.get::<Self>() {
            return Ok(auth_state.clone());
        }

        let keys = SessionKeys::from_ref(state);
        let auth_state = Self::from_headers(&parts.headers, &keys)?;

        tracing::trace!(
            target: TRACING_TARGET_AUTHENTICATION,
            account_id = %auth_state.account_id,
            "request authorized"
        );

        parts.extensions.insert(auth_state.clone());
        Ok(auth_state)
    }
}

impl<S> OptionalFromRequestParts<S> for AuthState
where
    S: Sync + Send,
    SessionKeys: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        let result = <Self as FromRequestParts<S>>::from_request_parts(parts, state).await;
        Ok(result.ok())
    }
}
