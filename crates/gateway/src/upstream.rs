//! Upstream content-API client.
//!
//! Builds the two read queries against the content API and attaches the
//! bearer credential. Responses are captured as raw bytes so handlers can
//! pass them through without re-serialization.

use std::time::Duration;

use bytes::Bytes;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::config::GatewayConfig;
use crate::error::GatewayError;

/// Timeout for upstream calls.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport-level upstream failures.
///
/// Upstream's own non-2xx responses are not errors; they pass through to
/// the caller unchanged.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The request could not be sent or the body could not be read.
    #[error("upstream request failed: {0}")]
    Transport(String),

    /// The upstream query string could not be encoded.
    #[error("failed to encode upstream query: {0}")]
    Query(String),
}

/// A captured upstream response.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    /// Upstream HTTP status code.
    pub status: u16,
    /// Upstream content type, defaulted when absent.
    pub content_type: String,
    /// Raw upstream body.
    pub body: Bytes,
}

/// Query parameters forwarded to the server-list collection.
#[derive(Debug, Clone)]
pub struct ServerListQuery {
    /// Maximum number of entries.
    pub limit: String,
    /// Fields projection.
    pub fields: String,
    /// Meta projection.
    pub meta: String,
}

impl Default for ServerListQuery {
    fn default() -> Self {
        Self {
            limit: "100".to_owned(),
            fields: "domain,is_default".to_owned(),
            meta: "filter_count".to_owned(),
        }
    }
}

#[derive(Serialize)]
struct ServerListUpstreamQuery<'a> {
    #[serde(rename = "filter[app_id]")]
    app_id: &'a str,
    #[serde(rename = "filter[status]")]
    status: &'a str,
    limit: &'a str,
    fields: &'a str,
    meta: &'a str,
}

#[derive(Serialize)]
struct MetadataUpstreamQuery<'a> {
    fields: &'a str,
    #[serde(rename = "deep[translation][_filter][language_code]")]
    language_code: &'a str,
}

/// Client holding the one process-wide credential.
///
/// Read-only after startup; shared across concurrent requests.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: Url,
    app_id: String,
    app_token: String,
    metadata_language: String,
}

impl UpstreamClient {
    /// Creates the client from validated gateway configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the upstream URL does not parse or the HTTP
    /// client cannot be created.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let base_url = config.upstream_base()?;
        let client = Client::builder()
            .user_agent(concat!("beacon-gateway/", env!("CARGO_PKG_VERSION")))
            .timeout(UPSTREAM_TIMEOUT)
            .build()
            .map_err(|e| GatewayError::InvalidConfig(format!("http client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            app_id: config.app_id.clone(),
            app_token: config.app_token.clone(),
            metadata_language: config.metadata_language.clone(),
        })
    }

    /// Fetches the published server list filtered by the application id.
    ///
    /// # Errors
    ///
    /// Returns an error only for transport-level failures.
    pub async fn server_list(&self, query: &ServerListQuery) -> Result<UpstreamResponse, UpstreamError> {
        let mut url = self.endpoint("items/connect_server")?;
        let encoded = serde_urlencoded::to_string(ServerListUpstreamQuery {
            app_id: &self.app_id,
            status: "published",
            limit: &query.limit,
            fields: &query.fields,
            meta: &query.meta,
        })
        .map_err(|e| UpstreamError::Query(e.to_string()))?;
        url.set_query(Some(&encoded));

        self.fetch(url).await
    }

    /// Fetches the application's branding record with its translations
    /// pinned to the configured locale.
    ///
    /// # Errors
    ///
    /// Returns an error only for transport-level failures.
    pub async fn app_metadata(&self) -> Result<UpstreamResponse, UpstreamError> {
        let mut url = self.endpoint(&format!("items/app/{}", self.app_id))?;
        let encoded = serde_urlencoded::to_string(MetadataUpstreamQuery {
            fields: "*,translation.*",
            language_code: &self.metadata_language,
        })
        .map_err(|e| UpstreamError::Query(e.to_string()))?;
        url.set_query(Some(&encoded));

        self.fetch(url).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, UpstreamError> {
        self.base_url
            .join(path)
            .map_err(|e| UpstreamError::Query(format!("{e}: {path}")))
    }

    async fn fetch(&self, url: Url) -> Result<UpstreamResponse, UpstreamError> {
        tracing::debug!(path = url.path(), "forwarding to upstream");
        let response = self
            .client
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(&self.app_token)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("application/json")
            .to_owned();
        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn server_list_query_encodes_filters() {
        let encoded = serde_urlencoded::to_string(ServerListUpstreamQuery {
            app_id: "af9508c5",
            status: "published",
            limit: "5",
            fields: "domain,is_default",
            meta: "filter_count",
        })
        .unwrap();
        assert_eq!(
            encoded,
            "filter%5Bapp_id%5D=af9508c5&filter%5Bstatus%5D=published&limit=5&fields=domain%2Cis_default&meta=filter_count"
        );
    }

    #[test]
    fn metadata_query_pins_translation_language() {
        let encoded = serde_urlencoded::to_string(MetadataUpstreamQuery {
            fields: "*,translation.*",
            language_code: "en-US",
        })
        .unwrap();
        assert!(encoded.contains("language_code%5D=en-US"));
    }

    #[test]
    fn default_query_matches_documented_defaults() {
        let query = ServerListQuery::default();
        assert_eq!(query.limit, "100");
        assert_eq!(query.fields, "domain,is_default");
        assert_eq!(query.meta, "filter_count");
    }
}
