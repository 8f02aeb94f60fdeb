//! Gateway configuration.
//!
//! Read once at process start from `BEACON_*` environment variables. The
//! application id and bearer token authenticate the gateway to the content
//! API and must never reach a client; their absence is startup-fatal.

use config::{Config, Environment};
use serde::Deserialize;
use url::Url;

use crate::error::GatewayError;

/// How an endpoint hands the upstream body back to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    /// Byte-for-byte upstream body, preserving upstream formatting.
    #[default]
    Raw,
    /// Parse and re-serialize JSON bodies; non-JSON passes through.
    Reserialize,
}

const fn default_port() -> u16 {
    4000
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

fn default_cors_origin() -> String {
    "*".to_owned()
}

fn default_metadata_language() -> String {
    "en-US".to_owned()
}

const fn reserialize() -> ResponseMode {
    ResponseMode::Reserialize
}

/// Process-wide gateway configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Application id the upstream records are filtered by.
    #[serde(default)]
    pub app_id: String,
    /// Bearer credential presented to the content API.
    #[serde(default)]
    pub app_token: String,
    /// Base URL of the content API.
    #[serde(default)]
    pub upstream_url: String,
    /// Listen host.
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origin; `*` allows any origin.
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
    /// Locale the metadata record's translations are pinned to.
    #[serde(default = "default_metadata_language")]
    pub metadata_language: String,
    /// Body handling for `/api/servers`.
    #[serde(default)]
    pub servers_response_mode: ResponseMode,
    /// Body handling for `/api/metadata`.
    #[serde(default = "reserialize")]
    pub metadata_response_mode: ResponseMode,
}

impl GatewayConfig {
    /// Loads the configuration from `BEACON_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MissingVariable`] when the application id,
    /// token, or upstream URL is unset, and [`GatewayError::InvalidConfig`]
    /// when a value does not validate.
    pub fn from_env() -> Result<Self, GatewayError> {
        Self::from_source(Environment::with_prefix("BEACON"))
    }

    /// Loads the configuration from an explicit source.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::from_env`].
    pub fn from_source(source: Environment) -> Result<Self, GatewayError> {
        let settings = Config::builder().add_source(source).build()?;
        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// The parsed upstream base URL.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidConfig`] when the URL does not parse.
    pub fn upstream_base(&self) -> Result<Url, GatewayError> {
        Url::parse(self.upstream_url.trim_end_matches('/'))
            .map_err(|e| GatewayError::InvalidConfig(format!("upstream_url: {e}")))
    }

    fn validate(&self) -> Result<(), GatewayError> {
        if self.app_id.trim().is_empty() {
            return Err(GatewayError::MissingVariable("BEACON_APP_ID"));
        }
        if self.app_token.trim().is_empty() {
            return Err(GatewayError::MissingVariable("BEACON_APP_TOKEN"));
        }
        if self.upstream_url.trim().is_empty() {
            return Err(GatewayError::MissingVariable("BEACON_UPSTREAM_URL"));
        }
        self.upstream_base().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        Environment::default().source(Some(map))
    }

    #[test]
    fn complete_environment_loads_with_defaults() {
        let config = GatewayConfig::from_source(env(&[
            ("app_id", "af9508c5"),
            ("app_token", "secret"),
            ("upstream_url", "https://cms.example.com"),
        ]))
        .unwrap();

        assert_eq!(config.port, 4000);
        assert_eq!(config.cors_origin, "*");
        assert_eq!(config.metadata_language, "en-US");
        assert_eq!(config.servers_response_mode, ResponseMode::Raw);
        assert_eq!(config.metadata_response_mode, ResponseMode::Reserialize);
    }

    #[test]
    fn missing_token_is_fatal_and_named() {
        let err = GatewayConfig::from_source(env(&[
            ("app_id", "af9508c5"),
            ("upstream_url", "https://cms.example.com"),
        ]))
        .unwrap_err();
        assert!(matches!(err, GatewayError::MissingVariable("BEACON_APP_TOKEN")));
    }

    #[test]
    fn missing_app_id_is_fatal_and_named() {
        let err = GatewayConfig::from_source(env(&[
            ("app_token", "secret"),
            ("upstream_url", "https://cms.example.com"),
        ]))
        .unwrap_err();
        assert!(matches!(err, GatewayError::MissingVariable("BEACON_APP_ID")));
    }

    #[test]
    fn malformed_upstream_url_is_rejected() {
        let err = GatewayConfig::from_source(env(&[
            ("app_id", "af9508c5"),
            ("app_token", "secret"),
            ("upstream_url", "not a url"),
        ]))
        .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidConfig(_)));
    }
}
