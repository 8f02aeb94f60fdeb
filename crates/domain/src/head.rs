//! Document-head metadata computation.
//!
//! The head mutation itself is presentation-layer work; this module only
//! computes the tag values so the applying adapter stays swappable.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::metadata::AppMetadata;

/// Computed document-head values derived from the branding record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadMetadata {
    /// Document title.
    pub title: String,
    /// Best-matching localized description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Theme color for the `theme-color` meta tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_color: Option<String>,
    /// Favicon asset URL; mirrored into the `og:image` tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon_url: Option<Url>,
}

impl HeadMetadata {
    /// Computes head values from the branding record.
    ///
    /// The favicon prefers the raster icon asset over the vector one and is
    /// resolved against `asset_base` when one is configured.
    #[must_use]
    pub fn from_metadata(metadata: &AppMetadata, language: &str, asset_base: Option<&Url>) -> Self {
        let favicon_url = asset_base.and_then(|base| {
            let asset = metadata
                .icon_raster_webp
                .as_deref()
                .or(metadata.icon.as_deref())?;
            base.join(&format!("assets/{asset}")).ok()
        });

        Self {
            title: metadata.name.clone(),
            description: select_description(metadata, language),
            theme_color: metadata.theme_color.clone(),
            favicon_url,
        }
    }
}

/// Selects the best-matching localized description.
///
/// Priority: exact language-tag match, then primary-subtag match, then the
/// record's own top-level description, then the first available translation.
#[must_use]
pub fn select_description(metadata: &AppMetadata, language: &str) -> Option<String> {
    let exact = metadata
        .translation
        .iter()
        .find(|t| t.language_code.eq_ignore_ascii_case(language))
        .and_then(|t| t.description.clone());
    if exact.is_some() {
        return exact;
    }

    let prefix = primary_subtag(language);
    let by_prefix = metadata
        .translation
        .iter()
        .find(|t| primary_subtag(&t.language_code).eq_ignore_ascii_case(prefix))
        .and_then(|t| t.description.clone());
    if by_prefix.is_some() {
        return by_prefix;
    }

    if metadata.description.is_some() {
        return metadata.description.clone();
    }

    metadata
        .translation
        .iter()
        .find_map(|t| t.description.clone())
}

/// Returns the part of a language tag before the first `-`.
fn primary_subtag(tag: &str) -> &str {
    tag.split('-').next().unwrap_or(tag)
}
