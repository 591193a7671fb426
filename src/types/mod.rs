// Public modules
pub mod chat_request;
pub mod chat_response;
pub mod health_response;
pub mod history_response;
pub mod message;
pub mod new_session_response;
pub mod upload_response;

// Re-exports
pub use chat_request::ChatRequest;
pub use chat_response::ChatResponse;
pub use health_response::HealthResponse;
pub use history_response::HistoryResponse;
pub use message::{Message, Role};
pub use new_session_response::NewSessionResponse;
pub use upload_response::UploadResponse;
