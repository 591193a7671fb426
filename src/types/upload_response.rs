use serde::{Deserialize, Serialize};

/// Body returned by `POST /chat/upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    /// The session the file was attached to.
    pub session_id: String,

    /// The name the backend recorded for the file.
    pub file_name: String,

    /// A short status line from the backend.
    pub message: String,

    /// The agent's summary of the file.
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn upload_response_deserialization() {
        let response: UploadResponse = serde_json::from_value(json!({
            "session_id": "sess-1",
            "file_name": "notes.txt",
            "message": "Successfully processed TXT file.",
            "summary": "A list of notes."
        }))
        .unwrap();
        assert_eq!(response.file_name, "notes.txt");
        assert_eq!(response.message, "Successfully processed TXT file.");
    }
}
