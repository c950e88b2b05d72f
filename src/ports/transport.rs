//! Transport Port - Interface for the raw network call.
//!
//! A transport turns an [`OutboundRequest`] into `{ status, body }` or a
//! [`TransportError`]. It does not interpret status codes; a 401 comes back as
//! an ordinary [`ApiResponse`]. All policy lives in the Auth Gateway.
//!
//! # Example
//!
//! ```ignore
//! struct EchoTransport;
//!
//! #[async_trait]
//! impl Transport for EchoTransport {
//!     async fn execute(&self, request: &OutboundRequest) -> Result<ApiResponse, TransportError> {
//!         Ok(ApiResponse::new(200, request.path()))
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::domain::foundation::ValidationError;
use crate::domain::gateway::RequestHeaders;

/// Port for performing the actual network call.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request with exactly the headers it carries.
    ///
    /// Every completed HTTP exchange is `Ok`, whatever its status. Only
    /// failures to obtain a response are `Err`.
    async fn execute(&self, request: &OutboundRequest) -> Result<ApiResponse, TransportError>;
}

// ----- Request -----

/// HTTP method of an outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One call from a domain caller, consumed once by the gateway.
///
/// Headers start empty and are attached by the gateway right before each
/// attempt, so a retry always sees the current session.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    id: Uuid,
    method: HttpMethod,
    path: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    anonymous: bool,
    headers: RequestHeaders,
}

impl OutboundRequest {
    /// Creates a request for a path relative to the API base URL.
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            anonymous: false,
            headers: RequestHeaders::default(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Marks the request as intentionally unauthenticated.
    pub fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }

    /// Serializes a JSON body.
    pub fn with_json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ValidationError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ValidationError::invalid_format("body", e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Sets an already-built JSON body.
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Appends a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Appends a query parameter only when a value is present.
    pub fn with_optional_query<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with_query(key, value),
            None => self,
        }
    }

    /// Correlation id, shared by the first attempt and its retry.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    pub fn is_anonymous(&self) -> bool {
        self.anonymous
    }

    pub fn headers(&self) -> &RequestHeaders {
        &self.headers
    }

    /// Replaces the header set for the next attempt.
    pub fn attach_headers(&mut self, headers: RequestHeaders) {
        self.headers = headers;
    }

    /// One-shot copy for the retry attempt, with headers reset.
    pub fn retry_copy(&self) -> Self {
        Self {
            headers: RequestHeaders::default(),
            ..self.clone()
        }
    }
}

// ----- Response -----

/// Completed HTTP exchange, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    status: u16,
    body: String,
}

/// Error body shape returned by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Convenience constructor serializing a JSON body.
    pub fn json_body(status: u16, body: &serde_json::Value) -> Self {
        Self::new(status, body.to_string())
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Deserializes the body; a body that does not match is a malformed response.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, TransportError> {
        serde_json::from_str(&self.body).map_err(|e| {
            TransportError::malformed(format!("status {} body did not parse: {}", self.status, e))
        })
    }

    /// The backend's `message` field, if the body carries one.
    pub fn error_message(&self) -> Option<String> {
        serde_json::from_str::<ApiErrorBody>(&self.body)
            .ok()
            .and_then(|b| b.message)
    }
}

// ----- Errors -----

/// Failure to obtain a response at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Overall per-call timeout elapsed.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Could not connect to the backend.
    #[error("connection failed: {0}")]
    Connect(String),

    /// Any other network-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// A response arrived but could not be read or decoded.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The request could not be built (bad URL, bad header value).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl TransportError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// True for failures a later attempt might not hit. The gateway never
    /// retries these itself; this is for callers.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            TransportError::Timeout { .. } | TransportError::Connect(_) | TransportError::Network(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_collects_query_and_body() {
        let request = OutboundRequest::post("bookings")
            .with_query("canceled", true)
            .with_optional_query("limit", None::<u32>)
            .with_optional_query("page", Some(2))
            .with_json(&json!({"eventHash": "ev-1"}))
            .unwrap();

        assert_eq!(request.method(), HttpMethod::Post);
        assert_eq!(request.path(), "bookings");
        assert_eq!(
            request.query(),
            &[
                ("canceled".to_string(), "true".to_string()),
                ("page".to_string(), "2".to_string())
            ]
        );
        assert_eq!(request.body(), Some(&json!({"eventHash": "ev-1"})));
        assert!(!request.is_anonymous());
    }

    #[test]
    fn retry_copy_keeps_identity_and_resets_headers() {
        let mut request = OutboundRequest::get("users/u-1/bookings");
        request.attach_headers(crate::domain::gateway::HeaderBuilder::default().build(true, None));

        let retry = request.retry_copy();

        assert_eq!(retry.id(), request.id());
        assert_eq!(retry.path(), request.path());
        assert!(retry.headers().is_empty());
    }

    #[test]
    fn response_status_predicates() {
        assert!(ApiResponse::new(204, "").is_success());
        assert!(!ApiResponse::new(401, "").is_success());
        assert!(ApiResponse::new(401, "").is_unauthorized());
        assert!(!ApiResponse::new(403, "").is_unauthorized());
    }

    #[test]
    fn response_json_maps_parse_errors_to_malformed() {
        let response = ApiResponse::new(200, "not json");
        let result: Result<serde_json::Value, _> = response.json();
        assert!(matches!(result, Err(TransportError::MalformedResponse(_))));
    }

    #[test]
    fn error_message_reads_backend_message_field() {
        let response = ApiResponse::json_body(422, &json!({"code": "E1", "message": "Slot taken"}));
        assert_eq!(response.error_message(), Some("Slot taken".to_string()));
        assert_eq!(ApiResponse::new(500, "<html>").error_message(), None);
    }

    #[test]
    fn transient_classification() {
        assert!(TransportError::Timeout { timeout_ms: 30_000 }.is_transient());
        assert!(TransportError::Connect("refused".into()).is_transient());
        assert!(!TransportError::malformed("bad").is_transient());
        assert!(!TransportError::InvalidRequest("bad url".into()).is_transient());
    }

    #[test]
    fn transport_trait_is_object_safe_and_send_sync() {
        fn _assert_trait_object(_: &dyn Transport) {}
        fn _assert_send_sync<T: Send + Sync + ?Sized>() {}
        _assert_send_sync::<std::sync::Arc<dyn Transport>>();
    }
}
