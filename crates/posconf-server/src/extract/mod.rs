//! HTTP request extractors with consistent error bodies.
//!
//! ## Authentication
//!
//! - [`AuthClaims`] - session token claims and the token codec
//! - [`AuthState`] - verified caller identity
//!
//! ## Request Data Extraction
//!
//! - [`Json`] - JSON body rejecting malformed input with `400`
//! - [`ValidateJson`] - JSON body followed by field validation
//! - [`Query`] - query string parameters
//!
//! ## Connection Metadata
//!
//! - [`ClientAddress`] - best-effort client address from forwarding headers

// Authentication
pub mod auth;

// Request Data Extraction
pub mod reject;

// Connection Metadata
mod client_address;

pub use crate::extract::auth::{AuthClaims, AuthState};
pub use crate::extract::client_address::ClientAddress;
pub use crate::extract::reject::{Json, Query, ValidateJson};
