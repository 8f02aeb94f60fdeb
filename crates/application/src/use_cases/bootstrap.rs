//! The bootstrap orchestrator.
//!
//! Single pass per page load: resolve the server configuration, fall back
//! to the stored session on failure, overlay remote metadata, evaluate the
//! SSO gate, then strip delegated-auth parameters from the visible URL and
//! hand off. Overlay must precede the SSO decision because the redirect
//! targets the resolved homeserver, and resolution must precede overlay
//! because branding is only applied on top of a valid server identity.

use beacon_domain::{
    PathClass, ProcessConfig, RawServerOptions, StoredSessionVars, ValidatedServerConfig,
};
use url::Url;

use crate::error::{BootstrapError, BootstrapResult};
use crate::navigation::{after_login_path, has_login_token, strip_delegated_auth_params};
use crate::ports::{
    DiscoveryClient, HeadSink, MetadataClient, Navigator, SessionStore, SsoRedirector,
};
use crate::use_cases::{
    OverlayMetadata, ResolveServerConfig, SsoGateInput, resolve_from_session, should_redirect,
};

/// What the UI layer receives once bootstrap completes.
#[derive(Debug, Clone)]
pub struct UiHandoff {
    /// The frozen process configuration.
    pub config: ProcessConfig,
    /// The resolved server configuration.
    pub server_config: ValidatedServerConfig,
    /// The visible URL after delegated-auth parameters were stripped.
    pub visible_url: Url,
}

/// Terminal state of a bootstrap run.
#[derive(Debug, Clone)]
pub enum BootstrapOutcome {
    /// The page load was short-circuited into an SSO redirect; the UI layer
    /// is never constructed.
    Redirected,
    /// Bootstrap completed; hand the configuration to the UI layer.
    ProceedToUi(UiHandoff),
}

/// The bootstrap orchestrator.
pub struct Bootstrap<D, S, M, R, H, N> {
    resolver: ResolveServerConfig<D>,
    sessions: S,
    overlay: OverlayMetadata<M, H>,
    sso: R,
    navigator: N,
}

impl<D, S, M, R, H, N> Bootstrap<D, S, M, R, H, N>
where
    D: DiscoveryClient,
    S: SessionStore,
    M: MetadataClient,
    R: SsoRedirector,
    H: HeadSink,
    N: Navigator,
{
    /// Wires the orchestrator from its ports.
    ///
    /// `language` is the UI language used for localized branding fields.
    pub fn new(
        discovery: D,
        sessions: S,
        metadata: M,
        sso: R,
        head: H,
        navigator: N,
        language: impl Into<String>,
    ) -> Self {
        Self {
            resolver: ResolveServerConfig::new(discovery),
            sessions,
            overlay: OverlayMetadata::new(metadata, head, language),
            sso,
            navigator,
        }
    }

    /// Runs the pipeline to completion or to its first failure.
    ///
    /// # Errors
    ///
    /// Propagates the first [`BootstrapError`] a stage produced; no partial
    /// configuration is ever handed off.
    pub async fn run(
        &self,
        options: &RawServerOptions,
        mut config: ProcessConfig,
    ) -> BootstrapResult<BootstrapOutcome> {
        let stored = match self.sessions.stored_session().await {
            Ok(vars) => vars,
            Err(e) => {
                tracing::warn!(error = %e, "stored session unreadable, treating as absent");
                StoredSessionVars::default()
            }
        };

        tracing::debug!("resolving server configuration");
        let mut server_config = match self.resolver.execute(options).await {
            Ok(resolved) => resolved,
            Err(original) => {
                tracing::debug!(error = %original, "resolution failed, attempting session fallback");
                resolve_from_session(&stored, original)?
            }
        };
        server_config.is_default = true;

        tracing::debug!("overlaying metadata");
        self.overlay.execute(server_config.clone(), &mut config).await?;

        tracing::debug!("evaluating single sign-on gate");
        let current = self.navigator.current_url();
        let gate = SsoGateInput {
            has_stored_session: stored.user_id.is_some(),
            returning_from_sso: has_login_token(&current),
            policy: config.sso_redirect_options,
            path_class: PathClass::from_fragment(current.fragment()),
        };
        if should_redirect(&gate) {
            tracing::info!("bypassing UI load to redirect to single sign-on");
            self.sso
                .start_single_sign_on(&server_config, &after_login_path(&current))
                .await
                .map_err(|e| BootstrapError::SsoRedirectFailed(e.to_string()))?;
            return Ok(BootstrapOutcome::Redirected);
        }

        let visible_url = strip_delegated_auth_params(&current);
        if visible_url != current {
            tracing::debug!(url = %visible_url, "dropping delegated-auth params from visible URL");
            self.navigator.replace_url(visible_url.clone());
        }

        Ok(BootstrapOutcome::ProceedToUi(UiHandoff {
            config,
            server_config,
            visible_url,
        }))
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use beacon_domain::{
        AppMetadata, DiscoveryDocument, DiscoveryResult, HeadMetadata, ServerListEntry,
        SsoRedirectPolicy,
    };
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use crate::ports::{
        DiscoveryClientError, HeadSinkError, MetadataClientError, SessionStoreError,
        SsoRedirectError,
    };

    use super::*;

    #[derive(Default)]
    struct StubDiscovery {
        fail: bool,
    }

    #[async_trait]
    impl DiscoveryClient for &StubDiscovery {
        async fn discover_by_name(
            &self,
            _server_name: &str,
        ) -> Result<DiscoveryResult, DiscoveryClientError> {
            if self.fail {
                return Err(DiscoveryClientError::Network("unreachable".into()));
            }
            Ok(DiscoveryResult {
                homeserver_base_url: Some("https://matrix.example.com".into()),
                identity_server_base_url: None,
            })
        }

        async fn from_document(
            &self,
            document: &DiscoveryDocument,
        ) -> Result<DiscoveryResult, DiscoveryClientError> {
            if self.fail {
                return Err(DiscoveryClientError::Malformed("bad document".into()));
            }
            Ok(DiscoveryResult {
                homeserver_base_url: Some(document.homeserver.base_url.clone()),
                identity_server_base_url: None,
            })
        }
    }

    struct StubSessions(StoredSessionVars);

    #[async_trait]
    impl SessionStore for &StubSessions {
        async fn stored_session(&self) -> Result<StoredSessionVars, SessionStoreError> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct StubMetadata {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MetadataClient for &StubMetadata {
        async fn app_metadata(&self) -> Result<AppMetadata, MetadataClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(AppMetadata {
                name: "Beacon".into(),
                ..AppMetadata::default()
            })
        }

        async fn server_list(&self) -> Result<Vec<ServerListEntry>, MetadataClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![ServerListEntry {
                domain: "example.com".into(),
                is_default: true,
            }])
        }
    }

    #[derive(Default)]
    struct RecordingSso {
        started: AtomicBool,
        after: Mutex<Option<String>>,
    }

    #[async_trait]
    impl SsoRedirector for &RecordingSso {
        async fn start_single_sign_on(
            &self,
            _server: &ValidatedServerConfig,
            after_path: &str,
        ) -> Result<(), SsoRedirectError> {
            self.started.store(true, Ordering::SeqCst);
            *self.after.lock().unwrap() = Some(after_path.to_owned());
            Ok(())
        }
    }

    struct NullHead;

    impl HeadSink for NullHead {
        fn apply(&self, _head: &HeadMetadata) -> Result<(), HeadSinkError> {
            Ok(())
        }
    }

    struct FixedNavigator {
        url: Url,
        replaced: Mutex<Option<Url>>,
    }

    impl FixedNavigator {
        fn new(url: &str) -> Self {
            Self {
                url: Url::parse(url).unwrap(),
                replaced: Mutex::new(None),
            }
        }
    }

    impl Navigator for &FixedNavigator {
        fn current_url(&self) -> Url {
            self.url.clone()
        }

        fn replace_url(&self, url: Url) {
            *self.replaced.lock().unwrap() = Some(url);
        }
    }

    fn name_options() -> RawServerOptions {
        RawServerOptions {
            server_name: Some("example.com".into()),
            ..RawServerOptions::default()
        }
    }

    fn logged_in() -> StoredSessionVars {
        StoredSessionVars {
            hs_url: Some("https://stored.example.com".into()),
            is_url: None,
            user_id: Some("@alice:example.com".into()),
        }
    }

    #[allow(clippy::type_complexity)]
    fn bootstrap<'a>(
        discovery: &'a StubDiscovery,
        sessions: &'a StubSessions,
        metadata: &'a StubMetadata,
        sso: &'a RecordingSso,
        navigator: &'a FixedNavigator,
    ) -> Bootstrap<&'a StubDiscovery, &'a StubSessions, &'a StubMetadata, &'a RecordingSso, NullHead, &'a FixedNavigator>
    {
        Bootstrap::new(discovery, sessions, metadata, sso, NullHead, navigator, "en-US")
    }

    #[tokio::test]
    async fn happy_path_hands_off_overlaid_config() {
        let discovery = StubDiscovery::default();
        let sessions = StubSessions(logged_in());
        let metadata = StubMetadata::default();
        let sso = RecordingSso::default();
        let navigator = FixedNavigator::new("https://chat.example.com/#/welcome");

        let outcome = bootstrap(&discovery, &sessions, &metadata, &sso, &navigator)
            .run(&name_options(), ProcessConfig::default())
            .await
            .unwrap();

        let BootstrapOutcome::ProceedToUi(handoff) = outcome else {
            panic!("expected UI handoff");
        };
        assert_eq!(handoff.config.brand, "Beacon");
        assert!(handoff.server_config.is_default);
        assert_eq!(handoff.server_config.hs_name, "example.com");
        assert_eq!(
            handoff.config.validated_server_config.as_ref().map(|c| c.hs_name.as_str()),
            Some("example.com")
        );
        assert!(!sso.started.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn failed_resolution_falls_back_to_stored_session() {
        let discovery = StubDiscovery { fail: true };
        let sessions = StubSessions(logged_in());
        let metadata = StubMetadata::default();
        let sso = RecordingSso::default();
        let navigator = FixedNavigator::new("https://chat.example.com/");

        let outcome = bootstrap(&discovery, &sessions, &metadata, &sso, &navigator)
            .run(&name_options(), ProcessConfig::default())
            .await
            .unwrap();

        let BootstrapOutcome::ProceedToUi(handoff) = outcome else {
            panic!("expected UI handoff");
        };
        assert_eq!(handoff.server_config.hs_url.as_str(), "https://stored.example.com/");
    }

    #[tokio::test]
    async fn failed_resolution_without_session_aborts_before_overlay() {
        let discovery = StubDiscovery { fail: true };
        let sessions = StubSessions(StoredSessionVars::default());
        let metadata = StubMetadata::default();
        let sso = RecordingSso::default();
        let navigator = FixedNavigator::new("https://chat.example.com/");

        let err = bootstrap(&discovery, &sessions, &metadata, &sso, &navigator)
            .run(&name_options(), ProcessConfig::default())
            .await
            .unwrap_err();

        assert!(matches!(err, BootstrapError::DiscoveryFailed(_)));
        // Overlay never ran.
        assert_eq!(metadata.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn immediate_policy_redirects_instead_of_handing_off() {
        let discovery = StubDiscovery::default();
        let sessions = StubSessions(StoredSessionVars::default());
        let metadata = StubMetadata::default();
        let sso = RecordingSso::default();
        let navigator = FixedNavigator::new("https://chat.example.com/#/register");

        let config = ProcessConfig {
            sso_redirect_options: SsoRedirectPolicy {
                immediate: true,
                ..SsoRedirectPolicy::default()
            },
            ..ProcessConfig::default()
        };

        let outcome = bootstrap(&discovery, &sessions, &metadata, &sso, &navigator)
            .run(&name_options(), config)
            .await
            .unwrap();

        assert!(matches!(outcome, BootstrapOutcome::Redirected));
        assert!(sso.started.load(Ordering::SeqCst));
        assert_eq!(sso.after.lock().unwrap().as_deref(), Some("/register"));
        // The SSO decision ran after the overlay.
        assert_eq!(metadata.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn returning_from_sso_suppresses_redirect_and_strips_params() {
        let discovery = StubDiscovery::default();
        let sessions = StubSessions(StoredSessionVars::default());
        let metadata = StubMetadata::default();
        let sso = RecordingSso::default();
        let navigator =
            FixedNavigator::new("https://chat.example.com/?loginToken=abc&state=xyz#/welcome");

        let config = ProcessConfig {
            sso_redirect_options: SsoRedirectPolicy {
                immediate: true,
                ..SsoRedirectPolicy::default()
            },
            ..ProcessConfig::default()
        };

        let outcome = bootstrap(&discovery, &sessions, &metadata, &sso, &navigator)
            .run(&name_options(), config)
            .await
            .unwrap();

        let BootstrapOutcome::ProceedToUi(handoff) = outcome else {
            panic!("expected UI handoff");
        };
        assert!(!sso.started.load(Ordering::SeqCst));
        assert_eq!(handoff.visible_url.query(), None);
        assert_eq!(
            navigator.replaced.lock().unwrap().as_ref().map(Url::as_str),
            Some("https://chat.example.com/#/welcome")
        );
    }

    #[tokio::test]
    async fn clean_url_is_not_rewritten() {
        let discovery = StubDiscovery::default();
        let sessions = StubSessions(logged_in());
        let metadata = StubMetadata::default();
        let sso = RecordingSso::default();
        let navigator = FixedNavigator::new("https://chat.example.com/#/welcome");

        bootstrap(&discovery, &sessions, &metadata, &sso, &navigator)
            .run(&name_options(), ProcessConfig::default())
            .await
            .unwrap();

        assert!(navigator.replaced.lock().unwrap().is_none());
    }
}
