//! Static operator configuration.
//!
//! The JSON document an operator ships next to the client. It seeds the
//! process configuration and carries the static server options resolution
//! starts from.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::process_config::{ProcessConfig, SsoRedirectPolicy};
use crate::server_config::{DiscoveryDocument, RawServerOptions};

/// The operator-supplied configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticConfig {
    /// Build-time brand; the metadata overlay replaces it at runtime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Pre-supplied discovery document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_server_config: Option<DiscoveryDocument>,
    /// Server name to resolve through remote discovery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_server_name: Option<String>,
    /// Explicit homeserver base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_hs_url: Option<String>,
    /// Explicit identity-server base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_is_url: Option<String>,
    /// SSO redirect policy flags.
    #[serde(default)]
    pub sso_redirect_options: SsoRedirectPolicy,
    /// Base URL of the metadata gateway.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_url: Option<Url>,
    /// Base URL icon assets are resolved against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_base_url: Option<Url>,
    /// Default device display name for new logins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_device_display_name: Option<String>,
}

impl StaticConfig {
    /// Extracts the static server options resolution starts from.
    #[must_use]
    pub fn server_options(&self) -> RawServerOptions {
        RawServerOptions {
            hs_url: self.default_hs_url.clone(),
            is_url: self.default_is_url.clone(),
            server_name: self.default_server_name.clone(),
            discovery: self.default_server_config.clone(),
        }
    }

    /// Seeds a fresh process configuration for this page load.
    #[must_use]
    pub fn seed_process_config(&self) -> ProcessConfig {
        ProcessConfig {
            brand: self.brand.clone().unwrap_or_default(),
            gateway_url: self.gateway_url.clone(),
            asset_base_url: self.asset_base_url.clone(),
            sso_redirect_options: self.sso_redirect_options,
            default_device_display_name: self.default_device_display_name.clone(),
            ..ProcessConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_operator_file() {
        let json = r#"{
            "brand": "Beacon",
            "default_server_name": "example.com",
            "sso_redirect_options": {"on_welcome_page": true},
            "gateway_url": "http://localhost:4000"
        }"#;
        let config: StaticConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.brand.as_deref(), Some("Beacon"));
        assert!(config.sso_redirect_options.on_welcome_page);
        assert!(!config.sso_redirect_options.immediate);

        let options = config.server_options();
        assert_eq!(options.server_name.as_deref(), Some("example.com"));
        assert!(options.hs_url.is_none());

        let process = config.seed_process_config();
        assert_eq!(process.brand, "Beacon");
        assert!(process.validated_server_config.is_none());
    }
}
