//! Single-sign-on redirect port.

use async_trait::async_trait;
use beacon_domain::ValidatedServerConfig;

/// Errors that can occur while initiating the SSO redirect.
#[derive(Debug, thiserror::Error)]
pub enum SsoRedirectError {
    /// The redirect could not be composed or initiated.
    #[error("{0}")]
    Failed(String),
}

/// Port that short-circuits the page load into an SSO redirect.
///
/// Initiating the redirect is the terminal action for the page load; the
/// UI layer is never constructed afterwards.
#[async_trait]
pub trait SsoRedirector: Send + Sync {
    /// Starts single sign-on against the resolved homeserver, returning to
    /// `after_path` once the identity provider hands control back.
    ///
    /// # Errors
    ///
    /// Returns an error when the redirect cannot be initiated.
    async fn start_single_sign_on(
        &self,
        server: &ValidatedServerConfig,
        after_path: &str,
    ) -> Result<(), SsoRedirectError>;
}
