use serde::{Deserialize, Serialize};

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The session the message belongs to.
    pub session_id: String,

    /// The user's message.
    pub message: String,

    /// Whether the agent may search the web while answering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_search: Option<bool>,

    /// Whether the backend should stream tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

impl ChatRequest {
    /// Create a new `ChatRequest` leaving both flags to the backend's defaults.
    pub fn new(session_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            message: message.into(),
            use_search: None,
            stream: None,
        }
    }

    /// Set whether web search is allowed.
    pub fn with_use_search(mut self, use_search: bool) -> Self {
        self.use_search = Some(use_search);
        self
    }

    /// Set whether the reply should be streamed.
    pub fn with_stream(mut self, stream: bool) -> Self {
        self.stream = Some(stream);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn chat_request_minimal() {
        let request = ChatRequest::new("sess-1", "hello");
        assert_eq!(
            to_value(&request).unwrap(),
            json!({
                "session_id": "sess-1",
                "message": "hello"
            })
        );
    }

    #[test]
    fn chat_request_with_flags() {
        let request = ChatRequest::new("sess-1", "hello")
            .with_use_search(true)
            .with_stream(false);
        assert_eq!(
            to_value(&request).unwrap(),
            json!({
                "session_id": "sess-1",
                "message": "hello",
                "use_search": true,
                "stream": false
            })
        );
    }
}
