//! Client errors - the one failure type returned by the gateway and services.
//!
//! Callers branch on the kind:
//! - `SessionExpired` - send the user back to login; the store is already cleared
//! - `AuthorizationFailed` - the backend refused the call even with a fresh credential
//! - `Transport` - no response at all; never retried by the gateway
//! - `Validation` - rejected before any network call
//! - `Rejected` - a non-2xx status a service chose to treat as an error

use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::ports::{ApiResponse, SessionStoreError, TransportError};

/// Why a session was considered expired.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionExpiredReason {
    /// No access credential was stored when an authenticated call was made.
    #[error("not authenticated")]
    NotAuthenticated,

    /// An authorization failure occurred and no refresh credential was stored.
    #[error("no refresh credential available")]
    MissingRefreshCredential,

    /// The refresh endpoint answered with a non-2xx status.
    #[error("refresh rejected with status {status}")]
    RefreshRejected { status: u16 },

    /// The refresh call never produced a response.
    #[error("refresh call failed: {0}")]
    RefreshUnreachable(TransportError),

    /// The refresh endpoint answered 2xx with an unusable body.
    #[error("refresh response unusable: {0}")]
    MalformedRefreshResponse(String),
}

/// Errors returned by the authenticated client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Terminal authorization failure: after the single retry, or straight
    /// away for anonymous calls and the refresh call itself.
    #[error("authorization failed (status {status})")]
    AuthorizationFailed {
        status: u16,
        message: Option<String>,
    },

    /// The session is gone and the user must authenticate again.
    #[error("session expired: {0}")]
    SessionExpired(SessionExpiredReason),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The backend answered with an error status.
    #[error("request rejected with status {status}: {}", message.as_deref().unwrap_or("no message"))]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    #[error("session store error: {0}")]
    SessionStore(#[from] SessionStoreError),
}

impl ClientError {
    pub fn session_expired(reason: SessionExpiredReason) -> Self {
        Self::SessionExpired(reason)
    }

    /// Builds a `Rejected` error from a response, keeping the backend message.
    pub fn rejected(response: &ApiResponse) -> Self {
        Self::Rejected {
            status: response.status(),
            message: response.error_message(),
        }
    }

    /// Returns true if the surrounding application must force re-authentication.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, ClientError::SessionExpired(_))
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        match self {
            ClientError::Transport(e) => e.is_transient(),
            _ => false,
        }
    }

    /// The HTTP status behind this error, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::AuthorizationFailed { status, .. } | ClientError::Rejected { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

impl ApiResponse {
    /// Turns a non-2xx response into [`ClientError::Rejected`].
    pub fn error_for_status(self) -> Result<Self, ClientError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ClientError::rejected(&self))
        }
    }
}
