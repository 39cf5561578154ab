//! Middleware for `axum::Router` and HTTP request processing.
//!
//! - Authentication: [`require_authentication`]
//! - Security: CORS and response headers
//! - Observability: request ids and request tracing
//! - Recovery: panics and timeouts
//!
//! ```rust,no_run
//! use axum::Router;
//! use posconf_server::middleware::{
//!     CorsConfig, RecoveryConfig, RouterObservabilityExt, RouterRecoveryExt,
//!     RouterSecurityExt,
//! };
//!
//! let app: Router = Router::new()
//!     .with_security(&CorsConfig::default())
//!     .with_recovery(&RecoveryConfig::default())
//!     .with_observability();
//! ```

mod authentication;
mod observability;
mod recovery;
mod security;

pub use authentication::RouterAuthExt;
pub use observability::RouterObservabilityExt;
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use security::{CorsConfig, RouterSecurityExt};
