//! Server discovery port.

use async_trait::async_trait;
use beacon_domain::{DiscoveryDocument, DiscoveryResult};

/// Errors that can occur during a discovery attempt.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryClientError {
    /// The discovery endpoint could not be reached.
    #[error("discovery request failed: {0}")]
    Network(String),

    /// The discovery document does not follow the expected schema.
    #[error("discovery document is malformed: {0}")]
    Malformed(String),
}

/// Port for `.well-known`-style server discovery.
///
/// This trait abstracts the chat SDK's autodiscovery, allowing the
/// application layer to be independent of the protocol library.
#[async_trait]
pub trait DiscoveryClient: Send + Sync {
    /// Resolves server base URLs from a bare server name.
    ///
    /// A server that publishes no usable discovery data yields an *empty*
    /// result rather than an error; the resolver uses that distinction for
    /// its one documented retry.
    ///
    /// # Errors
    ///
    /// Returns an error only for transport-level failures.
    async fn discover_by_name(
        &self,
        server_name: &str,
    ) -> Result<DiscoveryResult, DiscoveryClientError>;

    /// Resolves server base URLs from a pre-supplied discovery document.
    ///
    /// This is a syntactic validation step; the servers named by the
    /// document are not contacted.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryClientError::Malformed`] when the document's URLs
    /// do not validate.
    async fn from_document(
        &self,
        document: &DiscoveryDocument,
    ) -> Result<DiscoveryResult, DiscoveryClientError>;
}
