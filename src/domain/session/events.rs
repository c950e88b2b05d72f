//! Session lifecycle events.
//!
//! Published by the gateway whenever the Session Store changes hands:
//! - `Established` - a login stored a fresh session
//! - `Renewed` - the refresh protocol replaced the access credential
//! - `LoggedOut` - the store was cleared (user action or hard logout)

use chrono::{DateTime, Utc};

use crate::domain::foundation::UserHash;

// ════════════════════════════════════════════════════════════════════════════
// LogoutReason
// ════════════════════════════════════════════════════════════════════════════

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutReason {
    /// The user logged out explicitly.
    UserInitiated,
    /// An authorization failure occurred and no refresh credential was stored.
    MissingRefreshCredential,
    /// The refresh call failed (network error or non-2xx status).
    RefreshFailed,
}

impl LogoutReason {
    /// True when the surrounding application must force re-authentication
    /// without the user having asked for it.
    pub fn is_forced(&self) -> bool {
        !matches!(self, LogoutReason::UserInitiated)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SessionEvent
// ════════════════════════════════════════════════════════════════════════════

/// A change in the session's lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Established {
        identity: UserHash,
        occurred_at: DateTime<Utc>,
    },
    Renewed {
        identity: UserHash,
        /// Fingerprint of the new access credential.
        access_fingerprint: String,
        occurred_at: DateTime<Utc>,
    },
    LoggedOut {
        reason: LogoutReason,
        occurred_at: DateTime<Utc>,
    },
}

impl SessionEvent {
    pub fn established(identity: UserHash) -> Self {
        SessionEvent::Established {
            identity,
            occurred_at: Utc::now(),
        }
    }

    pub fn renewed(identity: UserHash, access_fingerprint: impl Into<String>) -> Self {
        SessionEvent::Renewed {
            identity,
            access_fingerprint: access_fingerprint.into(),
            occurred_at: Utc::now(),
        }
    }

    pub fn logged_out(reason: LogoutReason) -> Self {
        SessionEvent::LoggedOut {
            reason,
            occurred_at: Utc::now(),
        }
    }

    /// Returns true if this is a hard logout the application must react to.
    pub fn is_hard_logout(&self) -> bool {
        matches!(self, SessionEvent::LoggedOut { reason, .. } if reason.is_forced())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forced_reasons_are_hard_logouts() {
        assert!(SessionEvent::logged_out(LogoutReason::RefreshFailed).is_hard_logout());
        assert!(SessionEvent::logged_out(LogoutReason::MissingRefreshCredential).is_hard_logout());
        assert!(!SessionEvent::logged_out(LogoutReason::UserInitiated).is_hard_logout());
    }

    #[test]
    fn renewal_is_not_a_logout() {
        let event = SessionEvent::renewed(UserHash::new("u-1").unwrap(), "abcd1234");
        assert!(!event.is_hard_logout());
    }
}
