//! Session token claims and the token codec.
//!
//! Tokens are EdDSA-signed JWTs valid for seven days. There is no server-side
//! session; a token is valid as long as its signature verifies and it has not
//! expired.

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::errors::Error as JwtError;
use jsonwebtoken::{Algorithm, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind, Result};
use crate::service::SessionKeys;

/// JWT claims of a session token.
///
/// | Claim | Field | Description |
/// |-------|-------|-------------|
/// | `iss` | `issued_by` | Token issuer identifier |
/// | `aud` | `audience` | Token audience identifier |
/// | `jti` | `token_id` | Unique token identifier |
/// | `sub` | `account_id` | Account the token represents |
/// | `usr` | `username` | Username at issuance |
/// | `iat` | `issued_at` | Issuance time (seconds) |
/// | `exp` | `expires_at` | Expiration time (seconds) |
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct AuthClaims {
    #[serde(rename = "iss")]
    issued_by: String,
    #[serde(rename = "aud")]
    audience: String,

    #[serde(rename = "jti")]
    pub token_id: Uuid,
    #[serde(rename = "sub")]
    pub account_id: Uuid,
    #[serde(rename = "usr")]
    pub username: String,

    #[serde(rename = "iat", with = "jiff::fmt::serde::timestamp::second::required")]
    pub issued_at: Timestamp,
    #[serde(rename = "exp", with = "jiff::fmt::serde::timestamp::second::required")]
    pub expires_at: Timestamp,
}

impl AuthClaims {
    /// JWT audience identifier.
    const JWT_AUDIENCE: &str = "posconf:server";
    /// JWT issuer identifier.
    const JWT_ISSUER: &str = "posconf";
    /// Token lifetime.
    pub const SESSION_TTL: SignedDuration = SignedDuration::from_hours(7 * 24);

    /// Creates claims for an account, valid for [`Self::SESSION_TTL`] from now.
    pub fn new(account_id: Uuid, username: impl Into<String>) -> Result<Self> {
        Self::issued_at(account_id, username, Timestamp::now())
    }

    /// Creates claims with an explicit issuance time.
    pub fn issued_at(
        account_id: Uuid,
        username: impl Into<String>,
        issued_at: Timestamp,
    ) -> Result<Self> {
        let expires_at = issued_at.checked_add(Self::SESSION_TTL).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET_AUTHENTICATION,
                error = %e,
                "token expiry out of range"
            );
            ErrorKind::InternalServerError.into_error()
        })?;

        Ok(Self {
            issued_by: Self::JWT_ISSUER.to_owned(),
            audience: Self::JWT_AUDIENCE.to_owned(),
            token_id: Uuid::new_v4(),
            account_id,
            username: username.into(),
            issued_at,
            expires_at,
        })
    }

    /// Returns whether the token has expired.
    #[inline]
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Timestamp::now()
    }

    /// Signs the claims into a compact JWT.
    pub fn encode(&self, keys: &SessionKeys) -> Result<String> {
        let header = Header::new(Algorithm::EdDSA);
        encode(&header, self, keys.encoding_key()).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET_AUTHENTICATION,
                error = %e,
                account_id = %self.account_id,
                "failed to encode session token"
            );
            ErrorKind::InternalServerError.into_error()
        })
    }

    /// Verifies a compact JWT and returns its claims.
    ///
    /// Any failure (malformed, unsigned, mis-signed, wrong issuer or audience,
    /// expired) yields the same [`ErrorKind::Unauthorized`] error.
    pub fn decode(token: &str, keys: &SessionKeys) -> Result<Self> {
        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.set_audience(&[Self::JWT_AUDIENCE]);
        validation.set_issuer(&[Self::JWT_ISSUER]);
        validation.set_required_spec_claims(&["iss", "aud", "sub", "iat", "exp"]);

        let claims = decode::<Self>(token, keys.decoding_key(), &validation)?.claims;

        if claims.is_expired() {
            tracing::debug!(
                target: TRACING_TARGET_AUTHENTICATION,
                token_id = %claims.token_id,
                expires_at = %claims.expires_at,
                "session token expired"
            );
            return Err(ErrorKind::Unauthorized.into_error());
        }

        Ok(claims)
    }
}

impl From<JwtError> for Error<'static> {
    fn from(error: JwtError) -> Self {
        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            reason = ?error.kind(),
            "session token rejected"
        );
        ErrorKind::Unauthorized.into_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::test_keys;

    #[test]
    fn round_trip() -> anyhow::Result<()> {
        let keys = test_keys();
        let account_id = Uuid::new_v4();
        let claims = AuthClaims::new(account_id, "cashier")?;

        let token = claims.encode(&keys)?;
        let decoded = AuthClaims::decode(&token, &keys)?;

        assert_eq!(decoded.account_id, account_id);
        assert_eq!(decoded.username, "cashier");
        assert_eq!(decoded.expires_at, claims.expires_at);
        assert_eq!(
            decoded.expires_at.as_second() - decoded.issued_at.as_second(),
            604_800
        );
        Ok(())
    }

    #[test]
    fn rejects_tokens_older_than_a_week() -> anyhow::Result<()> {
        let keys = test_keys();
        let issued_at = Timestamp::now().checked_sub(SignedDuration::from_hours(8 * 24))?;
        let token = AuthClaims::issued_at(Uuid::new_v4(), "cashier", issued_at)?.encode(&keys)?;

        let error = AuthClaims::decode(&token, &keys).expect_err("expired token");
        assert_eq!(error.kind(), ErrorKind::Unauthorized);
        Ok(())
    }

    #[test]
    fn rejects_garbage_and_tampering() -> anyhow::Result<()> {
        let keys = test_keys();
        let token = AuthClaims::new(Uuid::new_v4(), "cashier")?.encode(&keys)?;

        let (signed, signature) = token.rsplit_once('.').expect("three segments");
        let mut chars = signature.chars();
        let first = if chars.next() == Some('A') { 'B' } else { 'A' };
        let tampered = format!("{signed}.{first}{}", chars.as_str());

        for candidate in ["", "not-a-token", "a.b.c", tampered.as_str()] {
            let error = AuthClaims::decode(candidate, &keys).expect_err("invalid token");
            assert_eq!(error.kind(), ErrorKind::Unauthorized);
        }
        Ok(())
    }

    #[test]
    fn rejects_unsigned_tokens() -> anyhow::Result<()> {
        let keys = test_keys();
        let token = AuthClaims::new(Uuid::new_v4(), "cashier")?.encode(&keys)?;
        let payload = token.split('.').nth(1).expect("payload segment");

        // {"alg":"none","typ":"JWT"}
        let unsigned = format!("eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.{payload}.");

        let error = AuthClaims::decode(&unsigned, &keys).expect_err("unsigned token");
        assert_eq!(error.kind(), ErrorKind::Unauthorized);
        Ok(())
    }
}
