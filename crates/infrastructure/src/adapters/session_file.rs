//! File-based stored-session reader.
//!
//! The login flow of a previous session persists its identifiers as
//! `session.json` in the profile directory. The bootstrap only ever reads
//! the file; writing belongs to the excluded login flow.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use beacon_application::ports::{SessionStore, SessionStoreError};
use beacon_domain::StoredSessionVars;
use tokio::fs;

/// Read-only session store over `session.json`:
/// ```json
/// {
///   "hs_url": "https://matrix.example.com",
///   "is_url": "https://id.example.com",
///   "user_id": "@alice:example.com"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Creates a store rooted at a profile directory.
    #[must_use]
    pub fn new(profile_dir: &Path) -> Self {
        Self {
            path: profile_dir.join("session.json"),
        }
    }

    /// Returns the path the session is read from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn stored_session(&self) -> Result<StoredSessionVars, SessionStoreError> {
        if !self.path.exists() {
            // A user who never logged in has no session file.
            return Ok(StoredSessionVars::default());
        }

        let content = fs::read(&self.path)
            .await
            .map_err(|e| SessionStoreError::Read(e.to_string()))?;
        serde_json::from_slice(&content).map_err(|e| SessionStoreError::Read(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn missing_file_yields_empty_vars() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        let vars = store.stored_session().await.unwrap();
        assert_eq!(vars, StoredSessionVars::default());
    }

    #[tokio::test]
    async fn reads_persisted_session() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("session.json"),
            r#"{"hs_url": "https://matrix.example.com", "user_id": "@alice:example.com"}"#,
        )
        .unwrap();

        let store = FileSessionStore::new(dir.path());
        let vars = store.stored_session().await.unwrap();
        assert_eq!(vars.hs_url.as_deref(), Some("https://matrix.example.com"));
        assert_eq!(vars.user_id.as_deref(), Some("@alice:example.com"));
        assert_eq!(vars.is_url, None);
        assert!(vars.supports_fallback());
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("session.json"), "{not json").unwrap();

        let store = FileSessionStore::new(dir.path());
        let err = store.stored_session().await.unwrap_err();
        assert!(matches!(err, SessionStoreError::Read(_)));
    }
}
