//! Mock Transport for testing.
//!
//! Routes are keyed by relative path. Each route is a responder that sees the
//! full outbound request, so a test can answer by credential ("401 for A1,
//! 200 for A2"). Unrouted paths answer 404.
//!
//! # Features
//!
//! - Per-route responders and fixed replies
//! - Simulated latency per reply for concurrency tests
//! - Call recording and per-path hit counts for verification
//!
//! # Example
//!
//! ```ignore
//! let transport = MockTransport::new()
//!     .with_route("auth/token", |_| MockReply::json(200, json!({"accessToken": "A2"})))
//!     .with_route("bookings", |req| match req.headers().authorization() {
//!         Some("Bearer A2") => MockReply::json(200, json!([])),
//!         _ => MockReply::status(401),
//!     });
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{ApiResponse, OutboundRequest, Transport, TransportError};

/// A scripted reply.
#[derive(Debug, Clone)]
pub struct MockReply {
    outcome: Result<ApiResponse, TransportError>,
    delay: Duration,
}

impl MockReply {
    /// Reply with a status and an empty body.
    pub fn status(status: u16) -> Self {
        Self::body(status, "")
    }

    /// Reply with a status and raw body.
    pub fn body(status: u16, body: impl Into<String>) -> Self {
        Self {
            outcome: Ok(ApiResponse::new(status, body)),
            delay: Duration::ZERO,
        }
    }

    /// Reply with a status and JSON body.
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            outcome: Ok(ApiResponse::json_body(status, &body)),
            delay: Duration::ZERO,
        }
    }

    /// Fail at the transport level.
    pub fn error(error: TransportError) -> Self {
        Self {
            outcome: Err(error),
            delay: Duration::ZERO,
        }
    }

    /// Delay this reply.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

type Responder = Arc<dyn Fn(&OutboundRequest) -> MockReply + Send + Sync>;

/// Mock transport for testing.
#[derive(Clone, Default)]
pub struct MockTransport {
    routes: Arc<Mutex<HashMap<String, Responder>>>,
    calls: Arc<Mutex<Vec<OutboundRequest>>>,
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("calls", &lock(&self.calls).len())
            .finish()
    }
}

// A panicking responder only poisons test state; recover the data regardless.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes a path to a responder.
    pub fn with_route<F>(self, path: impl Into<String>, responder: F) -> Self
    where
        F: Fn(&OutboundRequest) -> MockReply + Send + Sync + 'static,
    {
        lock(&self.routes).insert(path.into(), Arc::new(responder));
        self
    }

    /// Routes a path to the same reply every time.
    pub fn with_reply(self, path: impl Into<String>, reply: MockReply) -> Self {
        self.with_route(path, move |_| reply.clone())
    }

    /// Total number of calls made.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Number of calls made to one path.
    pub fn hits(&self, path: &str) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|c| c.path() == path)
            .count()
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<OutboundRequest> {
        lock(&self.calls).clone()
    }

    /// Recorded calls to one path, in order.
    pub fn calls_to(&self, path: &str) -> Vec<OutboundRequest> {
        lock(&self.calls)
            .iter()
            .filter(|c| c.path() == path)
            .cloned()
            .collect()
    }

    fn reply_for(&self, request: &OutboundRequest) -> MockReply {
        let responder = lock(&self.routes).get(request.path()).cloned();
        match responder {
            Some(responder) => responder(request),
            None => MockReply::json(404, serde_json::json!({"message": "Not found"})),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: &OutboundRequest) -> Result<ApiResponse, TransportError> {
        lock(&self.calls).push(request.clone());

        let reply = self.reply_for(request);
        if !reply.delay.is_zero() {
            sleep(reply.delay).await;
        }
        reply.outcome
    }
}
