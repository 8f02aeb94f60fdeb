//! Metadata overlay.
//!
//! Fetches the branding record and server list through the gateway and
//! merges the derived fields onto the process configuration. The UI layer
//! must never render with a half-populated brand, so fetch failures here
//! are fatal to the whole bootstrap.

use beacon_domain::{
    DefaultServerConfig, HeadMetadata, MobileBuilds, ProcessConfig, ValidatedServerConfig,
};

use crate::error::{BootstrapError, BootstrapResult};
use crate::ports::{HeadSink, MetadataClient};

/// Use case overlaying remote branding onto the process configuration.
pub struct OverlayMetadata<M, H> {
    metadata: M,
    head: H,
    language: String,
}

impl<M: MetadataClient, H: HeadSink> OverlayMetadata<M, H> {
    /// Creates the overlay over a metadata client and a head sink.
    ///
    /// `language` is the UI language used to pick the localized
    /// description.
    pub fn new(metadata: M, head: H, language: impl Into<String>) -> Self {
        Self {
            metadata,
            head,
            language: language.into(),
        }
    }

    /// Fetches metadata and merges the derived fields into `config`.
    ///
    /// The server-list entry flagged as default seeds the process-wide
    /// default homeserver; when several are flagged, the first match wins.
    ///
    /// # Errors
    ///
    /// - [`BootstrapError::MetadataFetchFailed`] when either fetch fails.
    /// - [`BootstrapError::NoDefaultServer`] when no entry is flagged as
    ///   default.
    pub async fn execute(
        &self,
        server_config: ValidatedServerConfig,
        config: &mut ProcessConfig,
    ) -> BootstrapResult<()> {
        let (metadata, servers) = tokio::try_join!(
            self.metadata.app_metadata(),
            self.metadata.server_list()
        )
        .map_err(|e| BootstrapError::MetadataFetchFailed(e.to_string()))?;

        let default_entry = servers
            .iter()
            .find(|entry| entry.is_default)
            .ok_or(BootstrapError::NoDefaultServer)?;

        tracing::debug!(
            brand = %metadata.name,
            default_server = %default_entry.domain,
            servers = servers.len(),
            "overlaying remote metadata onto process configuration"
        );

        config.validated_server_config = Some(server_config);
        config.brand.clone_from(&metadata.name);
        config.room_directory.servers = servers.iter().map(|entry| entry.domain.clone()).collect();
        config.default_server_config = Some(DefaultServerConfig::from_domain(&default_entry.domain));
        config.mobile_builds = MobileBuilds {
            android: metadata.play_store_url.clone(),
            fdroid: metadata.play_store_url.clone(),
            ios: metadata.app_store_url.clone(),
        };
        config.default_theme.clone_from(&metadata.theme_color);
        config.default_country_code.clone_from(&metadata.default_language);
        config.default_device_display_name = Some(metadata.name.clone());

        let head = HeadMetadata::from_metadata(
            &metadata,
            &self.language,
            config.asset_base_url.as_ref(),
        );
        // Presentation failure must not abort a fully-resolved bootstrap.
        if let Err(e) = self.head.apply(&head) {
            tracing::warn!(error = %e, "failed to apply document head metadata");
        }

        Ok(())
    }
}
