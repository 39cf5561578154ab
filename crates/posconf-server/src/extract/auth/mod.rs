//! Session tokens and request authorization.
//!
//! - [`AuthClaims`] - JWT claims and the token codec
//! - [`AuthState`] - verified caller identity extracted from the request

mod auth_claims;
mod auth_state;

pub use self::auth_claims::AuthClaims;
pub use self::auth_state::AuthState;
