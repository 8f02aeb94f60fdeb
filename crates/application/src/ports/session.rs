//! Stored session port.

use async_trait::async_trait;
use beacon_domain::StoredSessionVars;

/// Errors that can occur while reading the stored session.
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    /// The persisted session could not be read.
    #[error("failed to read stored session: {0}")]
    Read(String),
}

/// Read-only port over the session a prior login left behind.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the persisted session identifiers.
    ///
    /// A user who never logged in yields empty vars, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error when the store exists but cannot be read.
    async fn stored_session(&self) -> Result<StoredSessionVars, SessionStoreError>;
}
