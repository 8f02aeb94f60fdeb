//! Server configuration types.
//!
//! Covers the three static ways an operator can pin a homeserver, the
//! `.well-known`-shaped discovery document, and the validated configuration
//! the bootstrap hands to the rest of the client.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

/// A single server endpoint inside a discovery document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerEndpoint {
    /// Base URL of the endpoint.
    pub base_url: String,
}

impl ServerEndpoint {
    /// Creates an endpoint from a base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

/// A `.well-known`-shaped discovery document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryDocument {
    /// The homeserver entry.
    #[serde(rename = "m.homeserver")]
    pub homeserver: ServerEndpoint,
    /// The optional identity-server entry.
    #[serde(
        rename = "m.identity_server",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub identity_server: Option<ServerEndpoint>,
}

impl DiscoveryDocument {
    /// Synthesizes a document from explicit base URLs, bypassing remote
    /// discovery.
    #[must_use]
    pub fn from_urls(hs_url: &str, is_url: Option<&str>) -> Self {
        Self {
            homeserver: ServerEndpoint::new(hs_url),
            identity_server: is_url.map(ServerEndpoint::new),
        }
    }
}

/// The three mutually-exclusive static server inputs.
///
/// At most one of the explicit URL, the discovery document, and the server
/// name may drive resolution; combining the explicit URL with either of the
/// other two is an operator error rather than a precedence choice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawServerOptions {
    /// Explicit homeserver base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hs_url: Option<String>,
    /// Explicit identity-server base URL, only meaningful next to `hs_url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_url: Option<String>,
    /// Server name to resolve through remote discovery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,
    /// Pre-supplied discovery document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discovery: Option<DiscoveryDocument>,
}

impl RawServerOptions {
    /// True when none of the three sources is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.hs_url.is_none() && self.server_name.is_none() && self.discovery.is_none()
    }

    /// True when the explicit URL is combined with the document or the
    /// server name.
    #[must_use]
    pub const fn has_mixed_sources(&self) -> bool {
        self.hs_url.is_some() && (self.server_name.is_some() || self.discovery.is_some())
    }
}

/// What a single discovery attempt yielded.
///
/// Both URLs are optional: a by-name lookup can legitimately come back
/// empty, which triggers the one documented retry against a synthesized
/// document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryResult {
    /// Resolved homeserver base URL, if any.
    pub homeserver_base_url: Option<String>,
    /// Resolved identity-server base URL, if any.
    pub identity_server_base_url: Option<String>,
}

/// The resolved, trusted server configuration.
///
/// Created exactly once per bootstrap by resolution or session fallback and
/// never mutated afterwards (apart from the orchestrator marking it as the
/// default before the handoff).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedServerConfig {
    /// Homeserver base URL.
    pub hs_url: Url,
    /// Homeserver server name, shown to the user.
    pub hs_name: String,
    /// Whether the server name differs from the URL host.
    pub hs_name_is_different: bool,
    /// Identity-server base URL, optional per session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_url: Option<Url>,
    /// Whether this configuration is the process-wide default.
    pub is_default: bool,
}

impl ValidatedServerConfig {
    /// Builds a validated configuration from a discovery result.
    ///
    /// The server name falls back to the URL host when discovery was not
    /// driven by name.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingHomeserver`] when the result carries no
    /// homeserver base URL and [`DomainError::InvalidUrl`] /
    /// [`DomainError::UnsupportedScheme`] when a base URL does not parse as
    /// an http(s) URL.
    pub fn from_discovery(
        server_name: Option<&str>,
        result: &DiscoveryResult,
    ) -> DomainResult<Self> {
        let hs_url = result
            .homeserver_base_url
            .as_deref()
            .ok_or(DomainError::MissingHomeserver)?;
        Self::from_static_urls(
            server_name,
            hs_url,
            result.identity_server_base_url.as_deref(),
        )
    }

    /// Builds a validated configuration directly from base URLs.
    ///
    /// Used both for synthesized discovery documents and for trusting
    /// previously-validated session URLs.
    ///
    /// # Errors
    ///
    /// Returns an error when a URL does not parse or is not http(s).
    pub fn from_static_urls(
        server_name: Option<&str>,
        hs_url: &str,
        is_url: Option<&str>,
    ) -> DomainResult<Self> {
        let hs_url = parse_base_url(hs_url)?;
        let is_url = is_url.map(parse_base_url).transpose()?;

        let host = hs_url.host_str().unwrap_or_default().to_owned();
        let hs_name = server_name.map_or_else(|| host.clone(), ToOwned::to_owned);
        let hs_name_is_different = hs_name != host;

        Ok(Self {
            hs_url,
            hs_name,
            hs_name_is_different,
            is_url,
            is_default: false,
        })
    }
}

/// Parses and normalizes a base URL, rejecting non-http(s) schemes and
/// trailing slashes beyond the root path.
fn parse_base_url(raw: &str) -> DomainResult<Url> {
    let trimmed = raw.trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|e| DomainError::InvalidUrl(format!("{e}: {raw}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(DomainError::UnsupportedScheme(other.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn synthesized_document_carries_identity_server() {
        let doc = DiscoveryDocument::from_urls("https://hs.example.com", Some("https://is.example.com"));
        assert_eq!(doc.homeserver.base_url, "https://hs.example.com");
        assert_eq!(
            doc.identity_server,
            Some(ServerEndpoint::new("https://is.example.com"))
        );
    }

    #[test]
    fn discovery_document_uses_well_known_keys() {
        let doc = DiscoveryDocument::from_urls("https://hs.example.com", None);
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            json["m.homeserver"]["base_url"],
            serde_json::json!("https://hs.example.com")
        );
    }

    #[test]
    fn mixed_sources_detected() {
        let options = RawServerOptions {
            hs_url: Some("https://hs.example.com".into()),
            server_name: Some("example.com".into()),
            ..RawServerOptions::default()
        };
        assert!(options.has_mixed_sources());
        assert!(!options.is_empty());
    }

    #[test]
    fn empty_options_detected() {
        let options = RawServerOptions {
            is_url: Some("https://is.example.com".into()),
            ..RawServerOptions::default()
        };
        assert!(options.is_empty());
    }

    #[test]
    fn validated_config_from_discovery() {
        let result = DiscoveryResult {
            homeserver_base_url: Some("https://matrix.example.com/".into()),
            identity_server_base_url: None,
        };
        let config = ValidatedServerConfig::from_discovery(Some("example.com"), &result).unwrap();
        assert_eq!(config.hs_url.as_str(), "https://matrix.example.com/");
        assert_eq!(config.hs_name, "example.com");
        assert!(config.hs_name_is_different);
        assert!(!config.is_default);
    }

    #[test]
    fn validated_config_falls_back_to_host_name() {
        let result = DiscoveryResult {
            homeserver_base_url: Some("https://matrix.example.com".into()),
            identity_server_base_url: Some("https://id.example.com".into()),
        };
        let config = ValidatedServerConfig::from_discovery(None, &result).unwrap();
        assert_eq!(config.hs_name, "matrix.example.com");
        assert!(!config.hs_name_is_different);
        assert!(config.is_url.is_some());
    }

    #[test]
    fn missing_homeserver_is_rejected() {
        let result = DiscoveryResult::default();
        let err = ValidatedServerConfig::from_discovery(None, &result).unwrap_err();
        assert_eq!(err, DomainError::MissingHomeserver);
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let err = ValidatedServerConfig::from_static_urls(None, "ftp://example.com", None)
            .unwrap_err();
        assert_eq!(err, DomainError::UnsupportedScheme("ftp".into()));
    }
}
