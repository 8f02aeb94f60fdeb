//! Branding metadata port.

use async_trait::async_trait;
use beacon_domain::{AppMetadata, ServerListEntry};

/// Errors that can occur while fetching remote metadata.
#[derive(Debug, thiserror::Error)]
pub enum MetadataClientError {
    /// The gateway could not be reached.
    #[error("metadata request failed: {0}")]
    Network(String),

    /// The response body did not match the expected record shape.
    #[error("metadata response is malformed: {0}")]
    Malformed(String),
}

/// Port for the branding/server-list reads that go through the gateway.
#[async_trait]
pub trait MetadataClient: Send + Sync {
    /// Fetches the branding record.
    ///
    /// # Errors
    ///
    /// Returns an error when the gateway is unreachable or the record does
    /// not parse.
    async fn app_metadata(&self) -> Result<AppMetadata, MetadataClientError>;

    /// Fetches the server list.
    ///
    /// # Errors
    ///
    /// Returns an error when the gateway is unreachable or the list does
    /// not parse.
    async fn server_list(&self) -> Result<Vec<ServerListEntry>, MetadataClientError>;
}
