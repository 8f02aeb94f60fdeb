//! Session fallback for failed resolution.

use beacon_domain::{StoredSessionVars, ValidatedServerConfig};

use crate::error::{BootstrapError, BootstrapResult};

/// Builds a validated configuration from a previously stored session.
///
/// Invoked only when resolution fails. Requires both a stored homeserver
/// URL and a stored user id; otherwise the original resolution error is
/// returned unchanged, since a user who never logged in has no session to
/// fall back to. The stored URLs were validated by a prior login, so remote
/// discovery is not re-run.
///
/// # Errors
///
/// Returns `original` when no usable session exists, or
/// [`BootstrapError::DiscoveryFailed`] when the stored URLs no longer
/// validate.
pub fn resolve_from_session(
    vars: &StoredSessionVars,
    original: BootstrapError,
) -> BootstrapResult<ValidatedServerConfig> {
    let (Some(hs_url), Some(user_id)) = (&vars.hs_url, &vars.user_id) else {
        return Err(original);
    };

    tracing::info!(user_id, "falling back to stored session configuration");
    ValidatedServerConfig::from_static_urls(None, hs_url, vars.is_url.as_deref())
        .map_err(|e| BootstrapError::DiscoveryFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn discovery_failed() -> BootstrapError {
        BootstrapError::DiscoveryFailed("well-known unreachable".into())
    }

    #[test]
    fn missing_user_id_reraises_original_error() {
        let vars = StoredSessionVars {
            hs_url: Some("https://hs.example.com".into()),
            ..StoredSessionVars::default()
        };
        let err = resolve_from_session(&vars, discovery_failed()).unwrap_err();
        assert_eq!(err, discovery_failed());
    }

    #[test]
    fn missing_hs_url_reraises_original_error() {
        let vars = StoredSessionVars {
            user_id: Some("@alice:example.com".into()),
            ..StoredSessionVars::default()
        };
        let err = resolve_from_session(&vars, discovery_failed()).unwrap_err();
        assert_eq!(err, discovery_failed());
    }

    #[test]
    fn complete_session_builds_config_without_discovery() {
        let vars = StoredSessionVars {
            hs_url: Some("https://hs.example.com".into()),
            is_url: Some("https://is.example.com".into()),
            user_id: Some("@alice:example.com".into()),
        };
        let config = resolve_from_session(&vars, discovery_failed()).unwrap();
        assert_eq!(config.hs_url.as_str(), "https://hs.example.com/");
        assert_eq!(
            config.is_url.as_ref().map(url::Url::as_str),
            Some("https://is.example.com/")
        );
    }

    #[test]
    fn malformed_stored_url_fails_as_discovery_error() {
        let vars = StoredSessionVars {
            hs_url: Some("not a url".into()),
            user_id: Some("@alice:example.com".into()),
            ..StoredSessionVars::default()
        };
        let err = resolve_from_session(&vars, discovery_failed()).unwrap_err();
        assert!(matches!(err, BootstrapError::DiscoveryFailed(_)));
    }
}
