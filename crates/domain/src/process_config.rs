//! The process-wide configuration object.
//!
//! Built once per bootstrap: seeded from static operator configuration,
//! extended by server resolution and the metadata overlay, then handed to
//! the UI layer read-only. Nothing here survives a page load.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::server_config::ValidatedServerConfig;

/// Room-directory configuration, seeded from the remote server list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDirectoryConfig {
    /// Server domains offered in the directory picker.
    #[serde(default)]
    pub servers: Vec<String>,
}

/// Mobile app store links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MobileBuilds {
    /// Google Play link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub android: Option<String>,
    /// F-Droid link; the upstream record only carries one Android URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fdroid: Option<String>,
    /// App Store link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ios: Option<String>,
}

/// The default homeserver seeded from the flagged server-list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultServerConfig {
    /// Homeserver base URL.
    pub base_url: String,
    /// Homeserver server name.
    pub server_name: String,
}

impl DefaultServerConfig {
    /// Builds the default entry from a server-list domain.
    #[must_use]
    pub fn from_domain(domain: &str) -> Self {
        Self {
            base_url: format!("https://{domain}"),
            server_name: domain.to_owned(),
        }
    }
}

/// SSO redirect policy flags from static configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SsoRedirectPolicy {
    /// Redirect unconditionally.
    #[serde(default)]
    pub immediate: bool,
    /// Redirect when landing on the welcome or root path.
    #[serde(default)]
    pub on_welcome_page: bool,
    /// Redirect when landing on the explicit login screen.
    #[serde(default)]
    pub on_login_page: bool,
}

/// Classification of the current navigation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    /// The welcome screen, the bare root, or an empty fragment.
    WelcomeOrRoot,
    /// The explicit login screen.
    Login,
    /// Any other screen.
    Other,
}

impl PathClass {
    /// Classifies a URL fragment the way the router does.
    #[must_use]
    pub fn from_fragment(fragment: Option<&str>) -> Self {
        match fragment.unwrap_or_default() {
            "" | "/" | "/welcome" => Self::WelcomeOrRoot,
            "/login" => Self::Login,
            _ => Self::Other,
        }
    }
}

/// The process-wide configuration handed to the UI layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessConfig {
    /// Display brand; overwritten by the metadata overlay.
    pub brand: String,
    /// Base URL of the metadata gateway.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_url: Option<Url>,
    /// Base URL icon assets are resolved against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_base_url: Option<Url>,
    /// SSO redirect policy.
    #[serde(default)]
    pub sso_redirect_options: SsoRedirectPolicy,
    /// Room-directory servers.
    #[serde(default)]
    pub room_directory: RoomDirectoryConfig,
    /// Default homeserver from the flagged server-list entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_server_config: Option<DefaultServerConfig>,
    /// Mobile app store links.
    #[serde(default)]
    pub mobile_builds: MobileBuilds,
    /// Default theme, a CSS color from the branding record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_theme: Option<String>,
    /// Default country code derived from the record's language tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_country_code: Option<String>,
    /// Default device display name for new logins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_device_display_name: Option<String>,
    /// The server configuration resolution settled on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validated_server_config: Option<ValidatedServerConfig>,
}
