//! File-backed Session Store Adapter
//!
//! Persists the session as a small YAML document so credentials survive a
//! restart. The file is read once in [`FileSessionStore::open`]; afterwards
//! reads are served from memory and every mutation writes through.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;

use crate::domain::foundation::UserHash;
use crate::domain::session::{AccessCredential, RefreshCredential, Session};
use crate::ports::{SessionStore, SessionStoreError};

/// On-disk shape of a session.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedSession {
    access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
    user_hash: String,
}

impl PersistedSession {
    fn from_session(session: &Session) -> Self {
        Self {
            access_token: session.access().expose().to_string(),
            refresh_token: session.refresh().map(|r| r.expose().to_string()),
            user_hash: session.identity().as_str().to_string(),
        }
    }

    fn into_session(self) -> Result<Session, SessionStoreError> {
        let corrupt = |e: crate::domain::foundation::ValidationError| {
            SessionStoreError::Corrupt(e.to_string())
        };
        let access = AccessCredential::new(self.access_token).map_err(corrupt)?;
        let refresh = self
            .refresh_token
            .map(RefreshCredential::new)
            .transpose()
            .map_err(corrupt)?;
        let identity = UserHash::new(self.user_hash).map_err(corrupt)?;
        Ok(Session::new(access, refresh, identity))
    }
}

/// Session store persisted to a single file
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
    cached: Arc<RwLock<Option<Session>>>,
}

impl FileSessionStore {
    /// Open the store, loading a previously persisted session if present
    ///
    /// # Example
    /// ```ignore
    /// let store = FileSessionStore::open("./data/session.yaml").await?;
    /// ```
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self, SessionStoreError> {
        let path = path.as_ref().to_path_buf();
        let cached = Self::load(&path).await?;

        if cached.is_some() {
            tracing::debug!("Restored persisted session from {}", path.display());
        }

        Ok(Self {
            path,
            cached: Arc::new(RwLock::new(cached)),
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(path: &Path) -> Result<Option<Session>, SessionStoreError> {
        let yaml = match fs::read_to_string(path).await {
            Ok(yaml) => yaml,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionStoreError::Io(e.to_string())),
        };

        let persisted: PersistedSession =
            serde_yaml::from_str(&yaml).map_err(|e| SessionStoreError::Corrupt(e.to_string()))?;

        persisted.into_session().map(Some)
    }

    async fn persist(&self, session: &Session) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| SessionStoreError::Io(e.to_string()))?;
            }
        }

        let yaml = serde_yaml::to_string(&PersistedSession::from_session(session))
            .map_err(|e| SessionStoreError::SerializationFailed(e.to_string()))?;

        fs::write(&self.path, yaml)
            .await
            .map_err(|e| SessionStoreError::Io(e.to_string()))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn set(&self, session: Session) -> Result<(), SessionStoreError> {
        let mut cached = self.cached.write().await;
        self.persist(&session).await?;
        *cached = Some(session);
        Ok(())
    }

    async fn get(&self) -> Result<Option<Session>, SessionStoreError> {
        Ok(self.cached.read().await.clone())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        let mut cached = self.cached.write().await;

        // The cache only drops the session once the file is gone.
        match fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(SessionStoreError::Io(e.to_string())),
        }

        cached.take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_session(refresh: Option<&str>) -> Session {
        Session::new(
            AccessCredential::new("A1").unwrap(),
            refresh.map(|r| RefreshCredential::new(r).unwrap()),
            UserHash::new("user-1").unwrap(),
        )
    }

    #[tokio::test]
    async fn open_missing_file_yields_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::open(dir.path().join("session.yaml"))
            .await
            .unwrap();

        assert_eq!(store.get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn session_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("session.yaml");

        let store = FileSessionStore::open(&path).await.unwrap();
        store.set(test_session(Some("R1"))).await.unwrap();

        let reopened = FileSessionStore::open(&path).await.unwrap();
        let session = reopened.get().await.unwrap().unwrap();

        assert_eq!(session.access().expose(), "A1");
        assert_eq!(session.refresh().map(|r| r.expose()), Some("R1"));
        assert_eq!(session.identity().as_str(), "user-1");
    }

    #[tokio::test]
    async fn session_without_refresh_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.yaml");

        let store = FileSessionStore::open(&path).await.unwrap();
        store.set(test_session(None)).await.unwrap();

        let yaml = std::fs::read_to_string(&path).unwrap();
        assert!(!yaml.contains("refresh_token"));

        let reopened = FileSessionStore::open(&path).await.unwrap();
        assert!(reopened.get().await.unwrap().unwrap().refresh().is_none());
    }

    #[tokio::test]
    async fn clear_removes_file_and_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.yaml");

        let store = FileSessionStore::open(&path).await.unwrap();
        store.set(test_session(Some("R1"))).await.unwrap();
        assert!(path.exists());

        store.clear().await.unwrap();
        assert!(!path.exists());
        store.clear().await.unwrap();

        assert_eq!(store.get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn failed_removal_keeps_session_in_memory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.yaml");

        let store = FileSessionStore::open(&path).await.unwrap();
        store.set(test_session(Some("R1"))).await.unwrap();

        // A directory in place of the file makes remove_file fail.
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        let result = store.clear().await;

        assert!(matches!(result, Err(SessionStoreError::Io(_))));
        assert!(store.get().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.yaml");
        std::fs::write(&path, "access_token: ''\nuser_hash: u-1\n").unwrap();

        let result = FileSessionStore::open(&path).await;

        assert!(matches!(result, Err(SessionStoreError::Corrupt(_))));
    }
}
