//! Request extractors that reject with [`handler::Error`] bodies.
//!
//! [`handler::Error`]: crate::handler::Error

pub mod enhanced_json;
pub mod enhanced_query;
pub mod validated_json;

pub use self::enhanced_json::Json;
pub use self::enhanced_query::Query;
pub use self::validated_json::ValidateJson;
