//! Previously persisted session identifiers.

use serde::{Deserialize, Serialize};

/// The triplet a prior login session left behind.
///
/// Written by the login flow of a previous page load; strictly read-only to
/// the bootstrap core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSessionVars {
    /// Homeserver base URL of the stored session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hs_url: Option<String>,
    /// Identity-server base URL of the stored session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_url: Option<String>,
    /// User id of the stored session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl StoredSessionVars {
    /// True when the stored vars are enough to rebuild a server
    /// configuration without re-running discovery.
    #[must_use]
    pub const fn supports_fallback(&self) -> bool {
        self.hs_url.is_some() && self.user_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_needs_both_url_and_user_id() {
        let empty = StoredSessionVars::default();
        assert!(!empty.supports_fallback());

        let url_only = StoredSessionVars {
            hs_url: Some("https://hs.example.com".into()),
            ..StoredSessionVars::default()
        };
        assert!(!url_only.supports_fallback());

        let complete = StoredSessionVars {
            hs_url: Some("https://hs.example.com".into()),
            user_id: Some("@alice:example.com".into()),
            ..StoredSessionVars::default()
        };
        assert!(complete.supports_fallback());
    }
}
