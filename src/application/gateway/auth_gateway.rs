//! AuthGateway - the authenticated HTTP client.
//!
//! Every domain call goes through [`AuthGateway::send`], which:
//!
//! 1. Fails fast when an authenticated call is made without a session
//! 2. Attaches headers built from the current session and locale
//! 3. On a 401 for a non-anonymous call, obtains a renewed session through the
//!    shared [`RefreshCoordinator`] and replays the call exactly once
//! 4. Surfaces a second 401 as a terminal `AuthorizationFailed`
//!
//! Transport failures are never retried. Any status other than 401 resolves
//! as an [`ApiResponse`]; callers decide what an error status means to them.

use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

use crate::application::error::{ClientError, SessionExpiredReason};
use crate::domain::foundation::StateMachine;
use crate::domain::gateway::{GatewayPhase, HeaderBuilder, RequestHeaders, DEFAULT_LOCALE};
use crate::domain::session::{AccessCredential, Session, SessionEvent};
use crate::ports::{ApiResponse, OutboundRequest, SessionStore, Transport};

use super::refresh::{RefreshCoordinator, RefreshOutcome};

/// Default relative path of the refresh endpoint.
pub const DEFAULT_REFRESH_PATH: &str = "auth/token";

const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Gateway settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewaySettings {
    /// Initial value of the locale header.
    pub locale: String,
    /// Relative path of the refresh endpoint.
    pub refresh_path: String,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            refresh_path: DEFAULT_REFRESH_PATH.to_string(),
        }
    }
}

/// Authenticated gateway over a [`Transport`] and a [`SessionStore`].
pub struct AuthGateway {
    transport: Arc<dyn Transport>,
    store: Arc<dyn SessionStore>,
    headers: RwLock<HeaderBuilder>,
    refresher: RefreshCoordinator,
    events: broadcast::Sender<SessionEvent>,
}

impl AuthGateway {
    pub fn new(
        transport: Arc<dyn Transport>,
        store: Arc<dyn SessionStore>,
        settings: GatewaySettings,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let refresher = RefreshCoordinator::new(
            Arc::clone(&transport),
            Arc::clone(&store),
            events.clone(),
            settings.refresh_path,
        );

        Self {
            transport,
            store,
            headers: RwLock::new(HeaderBuilder::new(settings.locale)),
            refresher,
            events,
        }
    }

    /// Sends a request through the authorization protocol.
    pub async fn send(&self, mut request: OutboundRequest) -> Result<ApiResponse, ClientError> {
        let mut phase = GatewayPhase::Sending;
        let session = self.store.get().await?;

        if !request.is_anonymous() && session.is_none() {
            tracing::debug!(
                request_id = %request.id(),
                path = request.path(),
                "No session for authenticated request"
            );
            return Err(ClientError::session_expired(
                SessionExpiredReason::NotAuthenticated,
            ));
        }

        let sent_with: Option<AccessCredential> = session
            .as_ref()
            .filter(|_| !request.is_anonymous())
            .map(|s| s.access().clone());

        let headers = self
            .headers
            .read()
            .await
            .build(request.is_anonymous(), session.as_ref());
        request.attach_headers(headers);

        tracing::debug!(
            request_id = %request.id(),
            method = %request.method(),
            path = request.path(),
            anonymous = request.is_anonymous(),
            access_fp = ?sent_with.as_ref().map(|c| c.fingerprint()),
            "Sending request"
        );

        let response = match self.transport.execute(&request).await {
            Ok(response) => response,
            Err(e) => {
                advance(&mut phase, GatewayPhase::TransportFailed, &request);
                return Err(e.into());
            }
        };

        if !response.is_unauthorized() {
            advance(&mut phase, GatewayPhase::Completed, &request);
            return Ok(response);
        }
        advance(&mut phase, GatewayPhase::AuthFailed, &request);

        let Some(rejected) = sent_with else {
            advance(&mut phase, GatewayPhase::Rejected, &request);
            tracing::warn!(
                request_id = %request.id(),
                path = request.path(),
                "Anonymous request was refused"
            );
            return Err(authorization_failed(&response));
        };

        // Cheap look before queueing on the coordinator; it re-checks under its lock.
        let current = self.store.get().await?;
        let renewed = match current {
            None => {
                advance(&mut phase, GatewayPhase::LoggedOut, &request);
                return Err(ClientError::session_expired(
                    SessionExpiredReason::NotAuthenticated,
                ));
            }
            Some(current) if current.access() != &rejected => {
                advance(&mut phase, GatewayPhase::Retrying, &request);
                current
            }
            Some(_) => {
                advance(&mut phase, GatewayPhase::Refreshing, &request);
                let headers = self.anonymous_headers().await;
                match self.refresher.refresh(Some(&rejected), headers).await {
                    RefreshOutcome::Renewed(session) => {
                        advance(&mut phase, GatewayPhase::Retrying, &request);
                        session
                    }
                    RefreshOutcome::Failed(err) => {
                        if err.requires_reauthentication() {
                            advance(&mut phase, GatewayPhase::LoggedOut, &request);
                        }
                        return Err(err);
                    }
                }
            }
        };

        let mut retry = request.retry_copy();
        let headers = self.headers.read().await.build(false, Some(&renewed));
        retry.attach_headers(headers);

        tracing::debug!(
            request_id = %retry.id(),
            path = retry.path(),
            access_fp = %renewed.access().fingerprint(),
            "Retrying with renewed credential"
        );

        match self.transport.execute(&retry).await {
            Ok(response) if response.is_unauthorized() => {
                advance(&mut phase, GatewayPhase::Rejected, &retry);
                tracing::warn!(
                    request_id = %retry.id(),
                    path = retry.path(),
                    "Request refused again after refresh"
                );
                Err(authorization_failed(&response))
            }
            Ok(response) => {
                advance(&mut phase, GatewayPhase::Completed, &retry);
                Ok(response)
            }
            Err(e) => {
                advance(&mut phase, GatewayPhase::TransportFailed, &retry);
                Err(e.into())
            }
        }
    }

    pub async fn get(&self, path: impl Into<String>) -> Result<ApiResponse, ClientError> {
        self.send(OutboundRequest::get(path)).await
    }

    pub async fn post<T: serde::Serialize + ?Sized>(
        &self,
        path: impl Into<String>,
        body: &T,
    ) -> Result<ApiResponse, ClientError> {
        self.send(OutboundRequest::post(path).with_json(body)?).await
    }

    pub async fn put<T: serde::Serialize + ?Sized>(
        &self,
        path: impl Into<String>,
        body: &T,
    ) -> Result<ApiResponse, ClientError> {
        self.send(OutboundRequest::put(path).with_json(body)?).await
    }

    pub async fn patch<T: serde::Serialize + ?Sized>(
        &self,
        path: impl Into<String>,
        body: &T,
    ) -> Result<ApiResponse, ClientError> {
        self.send(OutboundRequest::patch(path).with_json(body)?).await
    }

    pub async fn delete(&self, path: impl Into<String>) -> Result<ApiResponse, ClientError> {
        self.send(OutboundRequest::delete(path)).await
    }

    /// Runs the refresh protocol on demand.
    ///
    /// Joins a refresh that is already in flight instead of starting another.
    pub async fn refresh_session(&self) -> Result<Session, ClientError> {
        match self.refresher.refresh(None, self.anonymous_headers().await).await {
            RefreshOutcome::Renewed(session) => Ok(session),
            RefreshOutcome::Failed(err) => Err(err),
        }
    }

    /// Changes the locale header for subsequent requests.
    pub async fn set_locale(&self, locale: impl Into<String>) {
        let builder = HeaderBuilder::new(locale);
        tracing::debug!(locale = builder.locale(), "Locale changed");
        *self.headers.write().await = builder;
    }

    pub async fn locale(&self) -> String {
        self.headers.read().await.locale().to_string()
    }

    /// Subscribes to session lifecycle events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Publishes a session event to subscribers.
    pub(crate) fn publish(&self, event: SessionEvent) {
        // No subscribers is not an error.
        let _ = self.events.send(event);
    }

    pub fn session_store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    async fn anonymous_headers(&self) -> RequestHeaders {
        self.headers.read().await.build(true, None)
    }
}

impl std::fmt::Debug for AuthGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGateway").finish_non_exhaustive()
    }
}

fn authorization_failed(response: &ApiResponse) -> ClientError {
    ClientError::AuthorizationFailed {
        status: response.status(),
        message: response.error_message(),
    }
}

fn advance(phase: &mut GatewayPhase, next: GatewayPhase, request: &OutboundRequest) {
    debug_assert!(
        phase.can_transition_to(&next),
        "invalid gateway transition {} -> {}",
        phase,
        next
    );
    tracing::debug!(request_id = %request.id(), from = %phase, to = %next, "Gateway phase");
    *phase = next;
}
