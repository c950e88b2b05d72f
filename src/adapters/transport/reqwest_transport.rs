//! Reqwest Transport - Implementation of Transport over HTTP.
//!
//! Joins the configured base URL with each request's relative path, applies
//! the per-call timeout, and hands back `{ status, body }` for every HTTP
//! status. Status codes are not interpreted here.
//!
//! # Configuration
//!
//! ```ignore
//! let config = ReqwestTransportConfig::new("https://mobile-api.manager-demo.nak-sports.com/v1/")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let transport = ReqwestTransport::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Method};
use std::time::Duration;

use crate::ports::{ApiResponse, HttpMethod, OutboundRequest, Transport, TransportError};

/// Configuration for the reqwest transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransportConfig {
    /// Base URL every relative path is appended to.
    pub base_url: String,
    /// Overall per-call timeout.
    pub timeout: Duration,
}

impl ReqwestTransportConfig {
    /// Creates a configuration with the default 30 second timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    config: ReqwestTransportConfig,
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with the given configuration.
    pub fn new(config: ReqwestTransportConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::InvalidRequest(format!("HTTP client setup: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the absolute URL for a relative path.
    fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn method_for(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    fn timed_out(&self) -> TransportError {
        TransportError::Timeout {
            timeout_ms: u64::try_from(self.config.timeout.as_millis()).unwrap_or(u64::MAX),
        }
    }

    fn map_send_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            self.timed_out()
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else if e.is_builder() {
            TransportError::InvalidRequest(e.to_string())
        } else {
            TransportError::network(e.to_string())
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: &OutboundRequest) -> Result<ApiResponse, TransportError> {
        let url = self.url_for(request.path());

        tracing::debug!(
            request_id = %request.id(),
            method = %request.method(),
            %url,
            "Sending request"
        );

        let mut builder = self
            .client
            .request(Self::method_for(request.method()), &url);

        for (name, value) in request.headers().iter() {
            builder = builder.header(name, value);
        }
        if !request.query().is_empty() {
            builder = builder.query(request.query());
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| self.map_send_error(e))?;
        let status = response.status().as_u16();

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                self.timed_out()
            } else {
                TransportError::malformed(format!("Failed to read body: {}", e))
            }
        })?;

        tracing::debug!(request_id = %request.id(), status, "Received response");

        Ok(ApiResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base_url: &str) -> ReqwestTransport {
        ReqwestTransport::new(ReqwestTransportConfig::new(base_url)).unwrap()
    }

    #[test]
    fn config_builder_works() {
        let config = ReqwestTransportConfig::new("https://api.example.com/v1/")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.base_url, "https://api.example.com/v1/");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn default_timeout_is_thirty_seconds() {
        let config = ReqwestTransportConfig::new("https://api.example.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn url_joins_without_double_slashes() {
        let t = transport("https://api.example.com/v1/");
        assert_eq!(t.url_for("bookings"), "https://api.example.com/v1/bookings");
        assert_eq!(t.url_for("/bookings"), "https://api.example.com/v1/bookings");

        let t = transport("https://api.example.com/v1");
        assert_eq!(
            t.url_for("users/u-1/bookings"),
            "https://api.example.com/v1/users/u-1/bookings"
        );
    }

    #[test]
    fn methods_map_to_reqwest() {
        assert_eq!(ReqwestTransport::method_for(HttpMethod::Get), Method::GET);
        assert_eq!(ReqwestTransport::method_for(HttpMethod::Patch), Method::PATCH);
        assert_eq!(ReqwestTransport::method_for(HttpMethod::Delete), Method::DELETE);
    }

    #[test]
    fn sub_second_timeout_is_reported_in_milliseconds() {
        let t = ReqwestTransport::new(
            ReqwestTransportConfig::new("https://api.example.com")
                .with_timeout(Duration::from_millis(200)),
        )
        .unwrap();

        let err = t.timed_out();

        assert_eq!(err, TransportError::Timeout { timeout_ms: 200 });
        assert_eq!(err.to_string(), "request timed out after 200ms");
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_failure() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let t = ReqwestTransport::new(
            ReqwestTransportConfig::new("http://127.0.0.1:9").with_timeout(Duration::from_secs(2)),
        )
        .unwrap();

        let result = t.execute(&OutboundRequest::get("ping")).await;

        assert!(result.is_err());
        assert!(result.unwrap_err().is_transient());
    }
}
