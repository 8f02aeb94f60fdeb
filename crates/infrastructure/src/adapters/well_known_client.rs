//! `.well-known` discovery client using reqwest.
//!
//! This adapter implements the `DiscoveryClient` port. By-name discovery
//! fetches `/.well-known/matrix/client` from the named server; document
//! validation is purely syntactic, matching the bootstrap's "care about
//! syntax, not liveness" contract.

use std::time::Duration;

use async_trait::async_trait;
use beacon_application::ports::{DiscoveryClient, DiscoveryClientError};
use beacon_domain::{DiscoveryDocument, DiscoveryResult, ServerEndpoint};
use reqwest::{Client, StatusCode, Url};

/// Timeout for the well-known fetch.
const DISCOVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Discovery client implementation over HTTP.
pub struct WellKnownDiscoveryClient {
    client: Client,
}

impl WellKnownDiscoveryClient {
    /// Creates a discovery client with a bounded request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be created.
    pub fn new() -> Result<Self, DiscoveryClientError> {
        let client = Client::builder()
            .user_agent(concat!("Beacon/", env!("CARGO_PKG_VERSION")))
            .timeout(DISCOVERY_TIMEOUT)
            .build()
            .map_err(|e| DiscoveryClientError::Network(e.to_string()))?;
        Ok(Self { client })
    }

    /// Creates a discovery client over a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Syntactically validates one endpoint's base URL.
    fn validate_endpoint(endpoint: &ServerEndpoint) -> Result<String, DiscoveryClientError> {
        let raw = endpoint.base_url.trim();
        if raw.is_empty() {
            return Err(DiscoveryClientError::Malformed(
                "empty base_url in discovery document".into(),
            ));
        }
        let url = Url::parse(raw)
            .map_err(|e| DiscoveryClientError::Malformed(format!("{e}: {raw}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DiscoveryClientError::Malformed(format!(
                "unsupported scheme in base_url: {raw}"
            )));
        }
        Ok(raw.trim_end_matches('/').to_owned())
    }
}

#[async_trait]
impl DiscoveryClient for WellKnownDiscoveryClient {
    async fn discover_by_name(
        &self,
        server_name: &str,
    ) -> Result<DiscoveryResult, DiscoveryClientError> {
        let url = Url::parse(&format!("https://{server_name}/.well-known/matrix/client"))
            .map_err(|e| DiscoveryClientError::Malformed(format!("{e}: {server_name}")))?;

        tracing::debug!(%url, "fetching well-known discovery document");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DiscoveryClientError::Network(e.to_string()))?;

        // A server that publishes nothing yields an empty result; the
        // resolver decides whether a retry path exists.
        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(server_name, "server publishes no well-known document");
            return Ok(DiscoveryResult::default());
        }
        if !response.status().is_success() {
            return Err(DiscoveryClientError::Network(format!(
                "well-known fetch returned {}",
                response.status()
            )));
        }

        let document: DiscoveryDocument = response
            .json()
            .await
            .map_err(|e| DiscoveryClientError::Malformed(e.to_string()))?;
        self.from_document(&document).await
    }

    async fn from_document(
        &self,
        document: &DiscoveryDocument,
    ) -> Result<DiscoveryResult, DiscoveryClientError> {
        let homeserver_base_url = Self::validate_endpoint(&document.homeserver)?;
        let identity_server_base_url = document
            .identity_server
            .as_ref()
            .map(Self::validate_endpoint)
            .transpose()?;

        Ok(DiscoveryResult {
            homeserver_base_url: Some(homeserver_base_url),
            identity_server_base_url,
        })
    }
}
