//! RefreshCoordinator - single-flight session refresh.
//!
//! Refresh credentials may be single-use, so the backend must never see two
//! refresh calls for the same session. The first caller to need a refresh
//! starts it; every caller arriving while it is in flight awaits the same
//! shared future and observes the same outcome.
//!
//! A caller whose rejected credential is no longer the stored one does not
//! refresh at all: someone else already renewed the session. That check runs
//! under the same lock that guards the in-flight slot, and a finished refresh
//! stores the new session before releasing the slot, so a late 401 can never
//! start a second refresh for a credential that was already replaced.

use futures::future::{BoxFuture, FutureExt, Shared};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};

use crate::application::error::{ClientError, SessionExpiredReason};
use crate::domain::auth::AuthToken;
use crate::domain::gateway::RequestHeaders;
use crate::domain::session::{AccessCredential, LogoutReason, Session, SessionEvent};
use crate::ports::{OutboundRequest, SessionStore, Transport};

/// Result of one refresh attempt, shared by every caller that waited on it.
#[derive(Debug, Clone)]
pub enum RefreshOutcome {
    /// The store now holds this session.
    Renewed(Session),
    /// The refresh could not produce a session. For every reason other than
    /// a store failure the store has been cleared.
    Failed(ClientError),
}

type InFlight = Shared<BoxFuture<'static, RefreshOutcome>>;

/// Everything one refresh run needs, cheap to move into a `'static` future.
#[derive(Clone)]
struct RefreshContext {
    transport: Arc<dyn Transport>,
    store: Arc<dyn SessionStore>,
    events: broadcast::Sender<SessionEvent>,
    refresh_path: Arc<str>,
}

/// De-duplicates concurrent refreshes of the same session.
pub struct RefreshCoordinator {
    ctx: RefreshContext,
    in_flight: Arc<Mutex<Option<InFlight>>>,
}

impl RefreshCoordinator {
    pub fn new(
        transport: Arc<dyn Transport>,
        store: Arc<dyn SessionStore>,
        events: broadcast::Sender<SessionEvent>,
        refresh_path: impl Into<String>,
    ) -> Self {
        let refresh_path: String = refresh_path.into();
        Self {
            ctx: RefreshContext {
                transport,
                store,
                events,
                refresh_path: Arc::from(refresh_path),
            },
            in_flight: Arc::new(Mutex::new(None)),
        }
    }

    /// Obtains a renewed session.
    ///
    /// `rejected` is the access credential the backend just refused. When it
    /// no longer matches the store, the stored session is returned without a
    /// refresh call. Pass `None` to refresh unconditionally (still joining a
    /// refresh that is already in flight).
    ///
    /// `headers` are the anonymous headers for the refresh call.
    pub async fn refresh(
        &self,
        rejected: Option<&AccessCredential>,
        headers: RequestHeaders,
    ) -> RefreshOutcome {
        let in_flight = {
            let mut slot = self.in_flight.lock().await;

            if let Some(current) = slot.as_ref() {
                tracing::debug!("Joining in-flight refresh");
                current.clone()
            } else {
                if let Some(rejected) = rejected {
                    match self.ctx.store.get().await {
                        Err(e) => return RefreshOutcome::Failed(e.into()),
                        Ok(None) => {
                            return RefreshOutcome::Failed(ClientError::session_expired(
                                SessionExpiredReason::NotAuthenticated,
                            ))
                        }
                        Ok(Some(session)) if session.access() != rejected => {
                            tracing::debug!(
                                access_fp = %session.access().fingerprint(),
                                "Credential already renewed, skipping refresh"
                            );
                            return RefreshOutcome::Renewed(session);
                        }
                        Ok(Some(_)) => {}
                    }
                }

                let run = self.ctx.clone().run(headers);
                let slot_handle = Arc::clone(&self.in_flight);
                let shared = async move {
                    let outcome = run.await;
                    *slot_handle.lock().await = None;
                    outcome
                }
                .boxed()
                .shared();

                *slot = Some(shared.clone());
                shared
            }
        };

        in_flight.await
    }

    /// True while a refresh call is outstanding.
    pub async fn is_refreshing(&self) -> bool {
        self.in_flight.lock().await.is_some()
    }
}

impl RefreshContext {
    async fn run(self, headers: RequestHeaders) -> RefreshOutcome {
        let session = match self.store.get().await {
            Ok(Some(session)) => session,
            Ok(None) => {
                return RefreshOutcome::Failed(ClientError::session_expired(
                    SessionExpiredReason::NotAuthenticated,
                ))
            }
            Err(e) => return RefreshOutcome::Failed(e.into()),
        };

        let Some(refresh) = session.refresh().cloned() else {
            return self
                .expire(
                    LogoutReason::MissingRefreshCredential,
                    SessionExpiredReason::MissingRefreshCredential,
                )
                .await;
        };

        let mut request = OutboundRequest::post(self.refresh_path.as_ref())
            .anonymous()
            .with_body(json!({ "refresh_token": refresh.expose() }));
        request.attach_headers(headers);

        tracing::debug!(
            request_id = %request.id(),
            refresh_fp = %refresh.fingerprint(),
            "Refreshing session"
        );

        let response = match self.transport.execute(&request).await {
            Ok(response) => response,
            Err(e) => {
                return self
                    .expire(
                        LogoutReason::RefreshFailed,
                        SessionExpiredReason::RefreshUnreachable(e),
                    )
                    .await
            }
        };

        if !response.is_success() {
            return self
                .expire(
                    LogoutReason::RefreshFailed,
                    SessionExpiredReason::RefreshRejected {
                        status: response.status(),
                    },
                )
                .await;
        }

        let credentials = response
            .json::<AuthToken>()
            .map_err(|e| e.to_string())
            .and_then(|token| token.credentials().map_err(|e| e.to_string()));
        let (access, new_refresh) = match credentials {
            Ok(credentials) => credentials,
            Err(reason) => {
                return self
                    .expire(
                        LogoutReason::RefreshFailed,
                        SessionExpiredReason::MalformedRefreshResponse(reason),
                    )
                    .await
            }
        };

        // A logout or a new login that landed while the refresh was in flight
        // wins; the renewal is only written over the session it was made for.
        match self.store.get().await {
            Ok(Some(current)) if current == session => {}
            Ok(Some(current)) if current.identity() == session.identity() => {
                tracing::debug!(
                    access_fp = %current.access().fingerprint(),
                    "Session replaced during refresh, keeping stored session"
                );
                return RefreshOutcome::Renewed(current);
            }
            Ok(Some(current)) => {
                tracing::info!(
                    identity = %current.identity(),
                    "Different user signed in during refresh, discarding renewal"
                );
                return RefreshOutcome::Failed(ClientError::session_expired(
                    SessionExpiredReason::NotAuthenticated,
                ));
            }
            Ok(None) => {
                return RefreshOutcome::Failed(ClientError::session_expired(
                    SessionExpiredReason::NotAuthenticated,
                ))
            }
            Err(e) => return RefreshOutcome::Failed(e.into()),
        }

        let renewed = session.renewed(access, new_refresh);
        if let Err(e) = self.store.set(renewed.clone()).await {
            return RefreshOutcome::Failed(e.into());
        }

        tracing::info!(
            identity = %renewed.identity(),
            access_fp = %renewed.access().fingerprint(),
            rotated = renewed.refresh() != Some(&refresh),
            "Session renewed"
        );
        self.publish(SessionEvent::renewed(
            renewed.identity().clone(),
            renewed.access().fingerprint(),
        ));

        RefreshOutcome::Renewed(renewed)
    }

    /// Clears the store and reports the session as expired.
    async fn expire(&self, logout: LogoutReason, reason: SessionExpiredReason) -> RefreshOutcome {
        tracing::warn!(%reason, "Refresh failed, clearing session");

        if let Err(e) = self.store.clear().await {
            return RefreshOutcome::Failed(e.into());
        }
        self.publish(SessionEvent::logged_out(logout));

        RefreshOutcome::Failed(ClientError::session_expired(reason))
    }

    fn publish(&self, event: SessionEvent) {
        // No subscribers is not an error.
        let _ = self.events.send(event);
    }
}
