//! Server configuration resolution.
//!
//! Reconciles the three static server sources into one validated
//! configuration. All three are put through `.well-known`-style validation;
//! whether the named servers are actually online is not checked here.

use beacon_domain::{DiscoveryDocument, RawServerOptions, ValidatedServerConfig};

use crate::error::{BootstrapError, BootstrapResult};
use crate::ports::DiscoveryClient;

/// Use case resolving static server options into a validated configuration.
pub struct ResolveServerConfig<D> {
    discovery: D,
}

impl<D: DiscoveryClient> ResolveServerConfig<D> {
    /// Creates the resolver over a discovery client.
    pub const fn new(discovery: D) -> Self {
        Self { discovery }
    }

    /// Resolves the options into a validated server configuration.
    ///
    /// Exactly one discovery path is taken per resolution, with one
    /// documented exception: a by-name lookup that comes back without a
    /// homeserver base URL retries against the synthesized document when
    /// one exists.
    ///
    /// # Errors
    ///
    /// - [`BootstrapError::InvalidConfiguration`] when the explicit URL is
    ///   combined with a document or server name.
    /// - [`BootstrapError::NoConfiguration`] when none of the three sources
    ///   is set.
    /// - [`BootstrapError::DiscoveryFailed`] when discovery or validation
    ///   fails.
    pub async fn execute(
        &self,
        options: &RawServerOptions,
    ) -> BootstrapResult<ValidatedServerConfig> {
        if options.has_mixed_sources() {
            return Err(BootstrapError::InvalidConfiguration);
        }
        if options.is_empty() {
            return Err(BootstrapError::NoConfiguration);
        }

        // An explicit URL bypasses remote discovery via a synthesized
        // document.
        let document = options.hs_url.as_ref().map_or_else(
            || options.discovery.clone(),
            |hs_url| Some(DiscoveryDocument::from_urls(hs_url, options.is_url.as_deref())),
        );

        let result = if let Some(server_name) = &options.server_name {
            tracing::debug!(server_name, "resolving server configuration by name");
            let by_name = self
                .discovery
                .discover_by_name(server_name)
                .await
                .map_err(|e| BootstrapError::DiscoveryFailed(e.to_string()))?;

            match &document {
                Some(doc) if by_name.homeserver_base_url.is_none() => self
                    .discovery
                    .from_document(doc)
                    .await
                    .map_err(|e| BootstrapError::DiscoveryFailed(e.to_string()))?,
                _ => by_name,
            }
        } else if let Some(doc) = &document {
            tracing::debug!("resolving server configuration from discovery document");
            self.discovery
                .from_document(doc)
                .await
                .map_err(|e| BootstrapError::DiscoveryFailed(e.to_string()))?
        } else {
            return Err(BootstrapError::NoConfiguration);
        };

        ValidatedServerConfig::from_discovery(options.server_name.as_deref(), &result)
            .map_err(|e| BootstrapError::DiscoveryFailed(e.to_string()))
    }
}
