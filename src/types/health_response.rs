use serde::{Deserialize, Serialize};

/// Version reported when the backend omits one.
const DEFAULT_VERSION: &str = "1.0.0";

/// Body returned by `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Liveness status, `"ok"` when healthy.
    pub status: String,

    /// The model the agent is configured with.
    pub model: String,

    /// The backend's version string.
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}
