//! The authenticated session held by the Session Store.

use super::{AccessCredential, RefreshCredential};
use crate::domain::foundation::UserHash;

/// Current holder's credential pair plus identity reference.
///
/// A session always carries a non-empty access credential, so "a session is
/// present" and "an access credential is present" are the same fact. Absence
/// is modeled as `Option<Session>` by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    access: AccessCredential,
    refresh: Option<RefreshCredential>,
    identity: UserHash,
}

impl Session {
    /// Creates a session after a successful login.
    pub fn new(
        access: AccessCredential,
        refresh: Option<RefreshCredential>,
        identity: UserHash,
    ) -> Self {
        Self {
            access,
            refresh,
            identity,
        }
    }

    pub fn access(&self) -> &AccessCredential {
        &self.access
    }

    pub fn refresh(&self) -> Option<&RefreshCredential> {
        self.refresh.as_ref()
    }

    pub fn identity(&self) -> &UserHash {
        &self.identity
    }

    /// Returns the session after a successful refresh.
    ///
    /// The refresh credential is only replaced when the backend returned a
    /// new one; otherwise the previous one is kept.
    pub fn renewed(&self, access: AccessCredential, refresh: Option<RefreshCredential>) -> Self {
        Self {
            access,
            refresh: refresh.or_else(|| self.refresh.clone()),
            identity: self.identity.clone(),
        }
    }
}
