use serde::{Deserialize, Serialize};

use crate::types::Message;

/// Body returned by `GET /sessions/{id}/history`.
///
/// Messages are in the order the backend returned them, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryResponse {
    /// The session the history belongs to.
    pub session_id: String,

    /// The stored messages.
    #[serde(default)]
    pub messages: Vec<Message>,

    /// The number of messages the backend reports.
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;
    use serde_json::json;

    #[test]
    fn history_keeps_backend_order() {
        let history: HistoryResponse = serde_json::from_value(json!({
            "session_id": "sess-1",
            "messages": [
                {"role": "user", "content": "first"},
                {"role": "assistant", "content": "second", "timestamp": "2025-01-01T00:00:00"}
            ],
            "total": 2
        }))
        .unwrap();
        assert_eq!(history.total, 2);
        assert_eq!(history.messages[0], Message::new(Role::User, "first"));
        assert_eq!(history.messages[1].role, Role::Assistant);
        assert_eq!(history.messages[1].content, "second");
    }

    #[test]
    fn empty_history() {
        let history: HistoryResponse = serde_json::from_value(json!({
            "session_id": "sess-1",
            "messages": [],
            "total": 0
        }))
        .unwrap();
        assert!(history.messages.is_empty());
    }
}
