use serde::{Deserialize, Serialize};

/// Liveness probe response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    /// A healthy instance.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_owned(),
        }
    }
}
