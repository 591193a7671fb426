use std::fmt;

use serde::{Deserialize, Serialize};

/// The author of a message in a session's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Text typed by the person using the client.
    User,
    /// A reply produced by the agent.
    Assistant,
    /// Instructions injected by the backend.
    System,
}

impl Role {
    /// The wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single message stored by the backend for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who wrote the message.
    pub role: Role,

    /// The message text.
    pub content: String,

    /// When the backend recorded the message.
    ///
    /// This is passed through exactly as the backend formats it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Message {
    /// Create a new `Message` without a timestamp.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: None,
        }
    }

    /// Set the timestamp.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn message_without_timestamp() {
        let message = Message::new(Role::User, "hello");
        assert_eq!(
            to_value(&message).unwrap(),
            json!({
                "role": "user",
                "content": "hello"
            })
        );
    }

    #[test]
    fn message_deserialization() {
        let message: Message = serde_json::from_value(json!({
            "role": "assistant",
            "content": "hi there",
            "timestamp": "2025-01-01T12:00:00.123456"
        }))
        .unwrap();
        assert_eq!(
            message,
            Message::new(Role::Assistant, "hi there").with_timestamp("2025-01-01T12:00:00.123456")
        );
    }

    #[test]
    fn unknown_role_rejected() {
        let result = serde_json::from_value::<Message>(json!({
            "role": "tool",
            "content": "x"
        }));
        assert!(result.is_err());
    }
}
