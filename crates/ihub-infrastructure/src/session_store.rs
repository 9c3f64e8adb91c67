//! File-backed session store.
//!
//! Persists the bearer token to `session.json` so a session survives a
//! full application restart. The token is cached in memory; the file is
//! only touched on set/clear.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use ihub_core::error::{IhubError, Result};
use ihub_core::session::SessionStore;

use crate::paths::IhubPaths;
use crate::storage::AtomicJsonFile;

/// The single record persisted to `session.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionRecord {
    access_token: String,
}

/// Session store backed by an atomic JSON file.
///
/// The constructor reads the persisted token back, so a client restarted
/// after a successful login starts with an active session. A corrupt or
/// unreadable session file is treated as "no session" rather than a fatal
/// error; token validity is decided reactively by the remote service.
#[derive(Clone)]
pub struct FileSessionStore {
    token: Arc<Mutex<Option<String>>>,
    file: Arc<AtomicJsonFile<SessionRecord>>,
}

impl FileSessionStore {
    /// Creates a store at the default location (`~/.config/ihub/session.json`).
    pub fn new() -> Result<Self> {
        let path = IhubPaths::session_file()
            .map_err(|e| IhubError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Creates a store at a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        let file = AtomicJsonFile::<SessionRecord>::new(path);

        let initial = match file.load() {
            Ok(record) => record.map(|r| r.access_token),
            Err(e) => {
                tracing::warn!("Ignoring unreadable session file: {}", e);
                None
            }
        };

        Self {
            token: Arc::new(Mutex::new(initial)),
            file: Arc::new(file),
        }
    }
}

#[async_trait::async_trait]
impl SessionStore for FileSessionStore {
    async fn current_token(&self) -> Option<String> {
        self.token.lock().await.clone()
    }

    async fn set_token(&self, token: String) -> Result<()> {
        let file = self.file.clone();
        let record = SessionRecord {
            access_token: token.clone(),
        };
        tokio::task::spawn_blocking(move || -> Result<()> {
            file.save(&record)?;

            // The file holds a live credential; keep it user-only on Unix.
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let permissions = std::fs::Permissions::from_mode(0o600);
                std::fs::set_permissions(file.path(), permissions)
                    .map_err(|e| IhubError::io(e.to_string()))?;
            }

            Ok(())
        })
        .await
        .map_err(|e| IhubError::internal(format!("Failed to join task: {}", e)))??;

        let mut guard = self.token.lock().await;
        *guard = Some(token);
        tracing::info!("Session token stored");
        Ok(())
    }

    async fn clear_token(&self) -> Result<()> {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            file.remove()?;
            Ok(())
        })
        .await
        .map_err(|e| IhubError::internal(format!("Failed to join task: {}", e)))??;

        let mut guard = self.token.lock().await;
        *guard = None;
        tracing::info!("Session token cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn starts_empty_without_a_session_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::with_path(temp_dir.path().join("session.json"));
        assert!(store.current_token().await.is_none());
    }

    #[tokio::test]
    async fn set_token_makes_it_current() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::with_path(temp_dir.path().join("session.json"));

        store.set_token("tok-abc".to_string()).await.unwrap();
        assert_eq!(store.current_token().await.as_deref(), Some("tok-abc"));
    }

    #[tokio::test]
    async fn token_survives_a_restart() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        let store = FileSessionStore::with_path(path.clone());
        store.set_token("tok-abc".to_string()).await.unwrap();
        drop(store);

        // A fresh instance simulates a full application restart.
        let reopened = FileSessionStore::with_path(path);
        assert_eq!(reopened.current_token().await.as_deref(), Some("tok-abc"));
    }

    #[tokio::test]
    async fn clear_token_removes_memory_and_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        let store = FileSessionStore::with_path(path.clone());
        store.set_token("tok-abc".to_string()).await.unwrap();
        store.clear_token().await.unwrap();

        assert!(store.current_token().await.is_none());
        assert!(!path.exists());

        let reopened = FileSessionStore::with_path(path);
        assert!(reopened.current_token().await.is_none());
    }

    #[tokio::test]
    async fn corrupt_session_file_is_treated_as_absent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = FileSessionStore::with_path(path);
        assert!(store.current_token().await.is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn session_file_is_user_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        let store = FileSessionStore::with_path(path.clone());
        store.set_token("tok-abc".to_string()).await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
