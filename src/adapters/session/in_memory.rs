//! In-Memory Session Store Adapter
//!
//! Keeps the session for the lifetime of the process only. The default store
//! when no storage path is configured, and the substitute used in tests.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::session::Session;
use crate::ports::{SessionStore, SessionStoreError};

/// Process-local session storage
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    session: Arc<RwLock<Option<Session>>>,
}

impl InMemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with an existing session
    pub fn with_session(session: Session) -> Self {
        Self {
            session: Arc::new(RwLock::new(Some(session))),
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn set(&self, session: Session) -> Result<(), SessionStoreError> {
        *self.session.write().await = Some(session);
        Ok(())
    }

    async fn get(&self) -> Result<Option<Session>, SessionStoreError> {
        Ok(self.session.read().await.clone())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        self.session.write().await.take();
        Ok(())
    }
}
