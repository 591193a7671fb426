use serde::{Deserialize, Serialize};

/// Body returned by `GET /sessions/new`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSessionResponse {
    /// The freshly allocated session identifier.
    pub session_id: String,
}
