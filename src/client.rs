use std::env;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::client_logger::ClientLogger;
use crate::error::{Error, Result};
use crate::observability::{
    CLIENT_REQUEST_DURATION, CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS, CLIENT_UPLOAD_BYTES,
};
use crate::types::{
    ChatRequest, ChatResponse, HealthResponse, HistoryResponse, NewSessionResponse, UploadResponse,
};

/// Backend origin used when neither an explicit URL nor `API_BASE_URL` is given.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";
/// Environment variable that selects the backend origin.
pub const API_BASE_URL_ENV: &str = "API_BASE_URL";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_UPLOAD_NAME: &str = "document";

/// The operations the interactive shell needs from the backend.
///
/// [`KimiClient`] is the HTTP implementation.  Every method is a single
/// request/response round trip; nothing is retried or cached.
#[async_trait::async_trait]
pub trait AgentApi: Send + Sync {
    /// Check that the backend is alive and report its model.
    async fn health(&self) -> Result<HealthResponse>;

    /// Send one chat turn.
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse>;

    /// Allocate a new session and return its identifier.
    async fn new_session(&self) -> Result<String>;

    /// Upload a local file into a session.
    async fn upload_file(&self, session_id: &str, file_path: &Path) -> Result<UploadResponse>;

    /// Fetch the stored messages of a session.
    async fn get_history(&self, session_id: &str) -> Result<HistoryResponse>;

    /// Clear the stored messages of a session.
    async fn clear_session(&self, session_id: &str) -> Result<()>;
}

/// Pick the backend origin: an explicit value wins, then the environment,
/// then [`DEFAULT_API_URL`].
pub fn resolve_base_url(explicit: Option<String>, from_env: Option<String>) -> String {
    let nonblank = |url: &String| !url.trim().is_empty();
    explicit
        .filter(nonblank)
        .or_else(|| from_env.filter(nonblank))
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Client for the Kimi agent HTTP API.
#[derive(Clone)]
pub struct KimiClient {
    client: ReqwestClient,
    base_url: Url,
    timeout: Duration,
    logger: Option<Arc<dyn ClientLogger>>,
}

impl KimiClient {
    /// Create a new client.
    ///
    /// The base URL can be provided directly or read from the `API_BASE_URL`
    /// environment variable; it falls back to `http://localhost:8000`.
    pub fn new(base_url: Option<String>) -> Result<Self> {
        Self::with_options(base_url, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(base_url: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = resolve_base_url(base_url, env::var(API_BASE_URL_ENV).ok());
        let base_url = Url::parse(base_url.trim())?;
        if base_url.cannot_be_a_base() {
            return Err(Error::url(
                format!("{base_url} cannot be used as a base URL"),
                None,
            ));
        }

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            base_url,
            timeout,
            logger: None,
        })
    }

    /// Attach a logger that observes every request.
    pub fn with_logger(mut self, logger: Arc<dyn ClientLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// The backend origin requests are sent to.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Create and return default headers for API requests.
    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Build the URL for an endpoint by appending path segments to the base URL.
    ///
    /// Segments are percent-encoded, so session identifiers can be passed as-is.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                Error::url(
                    format!("{} cannot be used as a base URL", self.base_url),
                    None,
                )
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// Process API response errors and convert to our Error type
    async fn process_error_response(response: Response) -> Error {
        let status = response.status();

        // FastAPI reports failures as {"detail": ...}
        #[derive(Deserialize)]
        struct ErrorResponse {
            detail: Option<serde_json::Value>,
        }

        let error_body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };

        let detail = serde_json::from_str::<ErrorResponse>(&error_body)
            .ok()
            .and_then(|e| e.detail)
            .map(|detail| match detail {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            });
        let trimmed = error_body.trim();
        let message = detail
            .or_else(|| (!trimmed.is_empty()).then(|| trimmed.to_string()))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });

        Error::request(status.as_u16(), message)
    }

    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::timeout(
                format!("Request timed out: {}", e),
                Some(self.timeout.as_secs_f64()),
            )
        } else if e.is_connect() {
            Error::connection(e.to_string(), Some(Box::new(e)))
        } else {
            Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
        }
    }

    fn record_failure(&self, method: &Method, url: &str, err: &Error) {
        CLIENT_REQUEST_ERRORS.click();
        if let Some(logger) = &self.logger {
            logger.log_failure(method.as_str(), url, err);
        }
    }

    /// Send one request and hand back the response if its status is 2xx.
    async fn execute<F>(&self, method: Method, url: Url, build: F) -> Result<Response>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder + Send,
    {
        let url_str = url.to_string();
        CLIENT_REQUESTS.click();
        if let Some(logger) = &self.logger {
            logger.log_request(method.as_str(), &url_str);
        }

        let start = Instant::now();
        let request = build(
            self.client
                .request(method.clone(), url)
                .headers(self.default_headers()),
        );
        let result = match request.send().await {
            Ok(response) => {
                let status = response.status();
                if let Some(logger) = &self.logger {
                    logger.log_response(method.as_str(), &url_str, status.as_u16(), start.elapsed());
                }
                if status.is_success() {
                    Ok(response)
                } else {
                    Err(Self::process_error_response(response).await)
                }
            }
            Err(e) => Err(self.transport_error(e)),
        };
        CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());

        if let Err(err) = &result {
            self.record_failure(&method, &url_str, err);
        }
        result
    }

    /// Decode a successful response body.
    async fn decode<T: DeserializeOwned>(
        &self,
        method: &Method,
        response: Response,
    ) -> Result<T> {
        let url = response.url().to_string();
        response.json::<T>().await.map_err(|e| {
            let err = Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            );
            self.record_failure(method, &url, &err);
            err
        })
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.endpoint(segments)?;
        let response = self.execute(Method::GET, url, |req| req).await?;
        self.decode(&Method::GET, response).await
    }
}

#[async_trait::async_trait]
impl AgentApi for KimiClient {
    /// Any failure here means the backend is not usable, so every error is
    /// reported as a connection error.
    async fn health(&self) -> Result<HealthResponse> {
        self.get(&["health"]).await.map_err(|err| match err {
            Error::Connection { .. } => err,
            other => Error::connection(
                format!("health check failed: {other}"),
                Some(Box::new(other)),
            ),
        })
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let url = self.endpoint(&["chat"])?;
        let response = self
            .execute(Method::POST, url, |req| req.json(&request))
            .await?;
        self.decode(&Method::POST, response).await
    }

    async fn new_session(&self) -> Result<String> {
        let response: NewSessionResponse = self.get(&["sessions", "new"]).await?;
        Ok(response.session_id)
    }

    async fn upload_file(&self, session_id: &str, file_path: &Path) -> Result<UploadResponse> {
        let bytes = tokio::fs::read(file_path)
            .await
            .map_err(|err| Error::file_not_found(file_path, err))?;
        let file_name = file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_UPLOAD_NAME.to_string());
        CLIENT_UPLOAD_BYTES.count(bytes.len() as u64);

        let form = Form::new()
            .text("session_id", session_id.to_string())
            .part("file", Part::bytes(bytes).file_name(file_name));

        let url = self.endpoint(&["chat", "upload"])?;
        let response = self
            .execute(Method::POST, url, |req| req.multipart(form))
            .await?;
        self.decode(&Method::POST, response).await
    }

    async fn get_history(&self, session_id: &str) -> Result<HistoryResponse> {
        self.get(&["sessions", session_id, "history"]).await
    }

    async fn clear_session(&self, session_id: &str) -> Result<()> {
        let url = self.endpoint(&["sessions", session_id])?;
        self.execute(Method::DELETE, url, |req| req).await?;
        Ok(())
    }
}

impl fmt::Debug for KimiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KimiClient")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = KimiClient::new(Some("http://backend.example.com:9000".to_string())).unwrap();
        assert_eq!(client.base_url(), "http://backend.example.com:9000/");
        assert_eq!(client.timeout(), DEFAULT_TIMEOUT);

        let client = KimiClient::with_options(
            Some("https://agent.example.com/api".to_string()),
            Some(Duration::from_secs(30)),
        )
        .unwrap();
        assert_eq!(client.base_url(), "https://agent.example.com/api");
        assert_eq!(client.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn resolve_prefers_explicit_then_env() {
        assert_eq!(resolve_base_url(None, None), DEFAULT_API_URL);
        assert_eq!(
            resolve_base_url(None, Some("http://env:1".to_string())),
            "http://env:1"
        );
        assert_eq!(
            resolve_base_url(
                Some("http://explicit:2".to_string()),
                Some("http://env:1".to_string())
            ),
            "http://explicit:2"
        );
        assert_eq!(resolve_base_url(None, Some("  ".to_string())), DEFAULT_API_URL);
    }

    #[test]
    fn blank_explicit_url_falls_through_to_env() {
        assert_eq!(
            resolve_base_url(Some(String::new()), Some("http://env:1".to_string())),
            "http://env:1"
        );
        assert_eq!(resolve_base_url(Some("   ".to_string()), None), DEFAULT_API_URL);
    }

    #[test]
    fn invalid_base_url_rejected() {
        let err = KimiClient::new(Some("not a url".to_string())).unwrap_err();
        assert!(matches!(err, Error::Url { .. }));

        let err = KimiClient::new(Some("mailto:someone@example.com".to_string())).unwrap_err();
        assert!(matches!(err, Error::Url { .. }));
    }

    #[test]
    fn endpoint_appends_segments() {
        let client = KimiClient::new(Some("http://localhost:8000".to_string())).unwrap();
        assert_eq!(
            client.endpoint(&["health"]).unwrap().as_str(),
            "http://localhost:8000/health"
        );
        assert_eq!(
            client
                .endpoint(&["sessions", "sess-1", "history"])
                .unwrap()
                .as_str(),
            "http://localhost:8000/sessions/sess-1/history"
        );
    }

    #[test]
    fn endpoint_keeps_path_prefix() {
        let client = KimiClient::new(Some("http://proxy.local/kimi/".to_string())).unwrap();
        assert_eq!(
            client.endpoint(&["chat", "upload"]).unwrap().as_str(),
            "http://proxy.local/kimi/chat/upload"
        );

        let client = KimiClient::new(Some("http://proxy.local/kimi".to_string())).unwrap();
        assert_eq!(
            client.endpoint(&["sessions", "new"]).unwrap().as_str(),
            "http://proxy.local/kimi/sessions/new"
        );
    }

    #[test]
    fn endpoint_encodes_session_ids() {
        let client = KimiClient::new(Some("http://localhost:8000".to_string())).unwrap();
        assert_eq!(
            client.endpoint(&["sessions", "a/b c"]).unwrap().as_str(),
            "http://localhost:8000/sessions/a%2Fb%20c"
        );
    }
}
