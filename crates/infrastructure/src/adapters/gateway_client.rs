//! Metadata client over the credential-hiding gateway.
//!
//! This adapter implements the `MetadataClient` port against the gateway's
//! two read endpoints, unwrapping the `{ "data": ... }` envelope the
//! content API uses.

use std::time::Duration;

use async_trait::async_trait;
use beacon_application::ports::{MetadataClient, MetadataClientError};
use beacon_domain::{AppMetadata, Envelope, ServerListEntry};
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

/// Timeout for gateway reads.
const GATEWAY_TIMEOUT: Duration = Duration::from_secs(10);

/// Metadata client talking to the gateway.
pub struct GatewayMetadataClient {
    client: Client,
    base_url: Url,
}

impl GatewayMetadataClient {
    /// Creates a client against the gateway root URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be created.
    pub fn new(base_url: Url) -> Result<Self, MetadataClientError> {
        let client = Client::builder()
            .user_agent(concat!("Beacon/", env!("CARGO_PKG_VERSION")))
            .timeout(GATEWAY_TIMEOUT)
            .build()
            .map_err(|e| MetadataClientError::Network(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    /// Creates a client over a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Fetches one enveloped record from the gateway.
    async fn get_enveloped<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, MetadataClientError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| MetadataClientError::Malformed(format!("{e}: {path}")))?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| MetadataClientError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MetadataClientError::Network(format!(
                "gateway returned {} for {url}",
                response.status()
            )));
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| MetadataClientError::Malformed(e.to_string()))?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl MetadataClient for GatewayMetadataClient {
    async fn app_metadata(&self) -> Result<AppMetadata, MetadataClientError> {
        self.get_enveloped("api/metadata").await
    }

    async fn server_list(&self) -> Result<Vec<ServerListEntry>, MetadataClientError> {
        self.get_enveloped("api/servers").await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn endpoint_urls_resolve_against_gateway_root() {
        let base = Url::parse("http://localhost:4000").unwrap();
        assert_eq!(
            base.join("api/metadata").unwrap().as_str(),
            "http://localhost:4000/api/metadata"
        );
        assert_eq!(
            base.join("api/servers").unwrap().as_str(),
            "http://localhost:4000/api/servers"
        );
    }
}
