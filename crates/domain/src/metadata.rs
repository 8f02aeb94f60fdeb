//! Remote branding and server-list records.
//!
//! These mirror the shape of the content API's published records. The
//! remote service is the source of truth; nothing here is persisted
//! locally.

use serde::{Deserialize, Serialize};

/// The `{ "data": ... }` envelope the content API wraps every record in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// The wrapped record.
    pub data: T,
}

/// A per-language variant of the branding record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    /// BCP 47-style language tag, e.g. `en-US`.
    pub language_code: String,
    /// Localized display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Localized short name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    /// Localized description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Localized tagline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
}

/// The remote branding record for the application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMetadata {
    /// Display name, also used as the brand.
    pub name: String,
    /// Short name, e.g. for home-screen installs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    /// Top-level description in the record's own language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Marketing tagline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    /// Asset id of the vector icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Asset id of the raster (webp) icon, preferred for head tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_raster_webp: Option<String>,
    /// Theme color, a CSS color value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_color: Option<String>,
    /// Default language tag, doubles as the default country source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_language: Option<String>,
    /// Google Play store link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_store_url: Option<String>,
    /// Apple App Store link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_store_url: Option<String>,
    /// Per-language variants.
    #[serde(default)]
    pub translation: Vec<Translation>,
}

/// One entry of the remote server list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerListEntry {
    /// Server domain, e.g. `example.com`.
    pub domain: String,
    /// Whether this entry seeds the process-wide default homeserver.
    #[serde(default)]
    pub is_default: bool,
}
