use serde::{Deserialize, Serialize};

/// Body returned by `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The session the reply belongs to.
    #[serde(default)]
    pub session_id: String,

    /// The agent's reply.
    pub reply: String,

    /// References the agent consulted, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,

    /// Identifiers of tools the agent invoked, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<String>>,
}

impl ChatResponse {
    /// Create a new `ChatResponse` with no sources or tool calls.
    pub fn new(session_id: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            reply: reply.into(),
            sources: None,
            tool_calls: None,
        }
    }

    /// Set the sources.
    pub fn with_sources(mut self, sources: Vec<String>) -> Self {
        self.sources = Some(sources);
        self
    }

    /// Set the tool calls.
    pub fn with_tool_calls(mut self, tool_calls: Vec<String>) -> Self {
        self.tool_calls = Some(tool_calls);
        self
    }

    /// The sources, or an empty slice when the backend sent none.
    pub fn sources(&self) -> &[String] {
        self.sources.as_deref().unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reply_only_deserializes() {
        let response: ChatResponse = serde_json::from_value(json!({
            "reply": "hi there"
        }))
        .unwrap();
        assert_eq!(response.reply, "hi there");
        assert!(response.sources().is_empty());
        assert!(response.tool_calls.is_none());
    }

    #[test]
    fn null_sources_are_empty() {
        let response: ChatResponse = serde_json::from_value(json!({
            "session_id": "sess-1",
            "reply": "ok",
            "sources": null,
            "tool_calls": null
        }))
        .unwrap();
        assert_eq!(response.session_id, "sess-1");
        assert!(response.sources().is_empty());
    }

    #[test]
    fn sources_preserve_order() {
        let response = ChatResponse::new("sess-1", "ok")
            .with_sources(vec!["a".to_string(), "b".to_string()])
            .with_tool_calls(vec!["web_search".to_string()]);
        assert_eq!(response.sources(), ["a".to_string(), "b".to_string()]);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "session_id": "sess-1",
                "reply": "ok",
                "sources": ["a", "b"],
                "tool_calls": ["web_search"]
            })
        );
    }
}
