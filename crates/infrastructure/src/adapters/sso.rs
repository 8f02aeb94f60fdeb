//! Single-sign-on redirect adapter.

use std::sync::Mutex;

use async_trait::async_trait;
use beacon_application::ports::{SsoRedirectError, SsoRedirector};
use beacon_domain::ValidatedServerConfig;
use url::Url;

/// Path of the homeserver's SSO redirect endpoint.
const SSO_REDIRECT_PATH: &str = "_matrix/client/v3/login/sso/redirect";

/// Redirector that composes the homeserver SSO URL and records it.
///
/// In the browser build the recorded URL becomes a real location change;
/// here initiating the redirect means logging it and remembering it as the
/// page load's terminal action.
#[derive(Debug, Default)]
pub struct LoggingSsoRedirector {
    redirected_to: Mutex<Option<Url>>,
}

impl LoggingSsoRedirector {
    /// Creates the redirector.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            redirected_to: Mutex::new(None),
        }
    }

    /// The redirect initiated by this page load, if any.
    #[must_use]
    pub fn last_redirect(&self) -> Option<Url> {
        self.redirected_to.lock().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl SsoRedirector for LoggingSsoRedirector {
    async fn start_single_sign_on(
        &self,
        server: &ValidatedServerConfig,
        after_path: &str,
    ) -> Result<(), SsoRedirectError> {
        let mut url = server
            .hs_url
            .join(SSO_REDIRECT_PATH)
            .map_err(|e| SsoRedirectError::Failed(e.to_string()))?;
        url.query_pairs_mut().append_pair("redirectUrl", after_path);

        tracing::info!(%url, homeserver = %server.hs_name, "starting single sign-on redirect");
        let mut guard = self
            .redirected_to
            .lock()
            .map_err(|_| SsoRedirectError::Failed("redirect state poisoned".into()))?;
        *guard = Some(url);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn composes_redirect_url_against_homeserver() {
        let server =
            ValidatedServerConfig::from_static_urls(None, "https://matrix.example.com", None)
                .unwrap();
        let redirector = LoggingSsoRedirector::new();
        redirector.start_single_sign_on(&server, "/welcome").await.unwrap();

        assert_eq!(
            redirector.last_redirect().as_ref().map(Url::as_str),
            Some(
                "https://matrix.example.com/_matrix/client/v3/login/sso/redirect?redirectUrl=%2Fwelcome"
            )
        );
    }
}
