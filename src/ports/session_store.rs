//! Session Store Port - owner of the current credentials.
//!
//! Holds the access credential, optional refresh credential and identity
//! reference. Only the store mutates the session; the gateway and domain
//! callers go through these operations. No network access.
//!
//! # Contract
//!
//! Implementations must:
//! - Replace the whole session on `set`
//! - Return `None` from `get` once cleared
//! - Make `clear` idempotent (clearing an empty store is `Ok`)

use async_trait::async_trait;

use crate::domain::session::Session;

/// Errors from a session store backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionStoreError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Failed to serialize session: {0}")]
    SerializationFailed(String),

    #[error("Persisted session is corrupt: {0}")]
    Corrupt(String),
}

/// Port for reading and writing the current session.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Stores a session, replacing any previous one.
    async fn set(&self, session: Session) -> Result<(), SessionStoreError>;

    /// Returns a snapshot of the current session, if any.
    async fn get(&self) -> Result<Option<Session>, SessionStoreError>;

    /// Removes the session entirely.
    async fn clear(&self) -> Result<(), SessionStoreError>;

    /// True iff an access credential is present.
    ///
    /// Local check only; says nothing about whether the backend still
    /// accepts the credential.
    async fn is_authenticated(&self) -> Result<bool, SessionStoreError> {
        Ok(self.get().await?.is_some())
    }
}
