//! URL helpers for the bootstrap's navigation side effects.

use url::Url;

/// Query parameters a delegated-auth flow leaves behind.
///
/// `loginToken` from token login, `state`/`code` from an OIDC authorization
/// code flow, and the legacy universal-links flag.
const DELEGATED_AUTH_PARAMS: [&str; 4] = ["loginToken", "state", "code", "no_universal_links"];

/// True when the navigation carries a login token, i.e. we are returning
/// from an SSO redirect.
#[must_use]
pub fn has_login_token(url: &Url) -> bool {
    url.query_pairs().any(|(key, _)| key == "loginToken")
}

/// Removes delegated-auth parameters from a URL.
///
/// Applied through a history replace after bootstrap so a page reload does
/// not repeat token consumption. All other parameters are preserved.
#[must_use]
pub fn strip_delegated_auth_params(url: &Url) -> Url {
    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !DELEGATED_AUTH_PARAMS.contains(&key.as_ref()))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut stripped = url.clone();
    if retained.is_empty() {
        stripped.set_query(None);
    } else {
        stripped
            .query_pairs_mut()
            .clear()
            .extend_pairs(retained.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }
    stripped
}

/// The screen path SSO should return to, derived from the URL fragment.
#[must_use]
pub fn after_login_path(url: &Url) -> String {
    format!("/{}", url.fragment().unwrap_or_default().trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn strips_all_delegated_auth_params() {
        let url = Url::parse(
            "https://chat.example.com/?loginToken=abc&state=xyz&code=123&no_universal_links=1",
        )
        .unwrap();
        let stripped = strip_delegated_auth_params(&url);
        assert_eq!(stripped.query(), None);
        assert_eq!(stripped.as_str(), "https://chat.example.com/");
    }

    #[test]
    fn preserves_unrelated_params() {
        let url = Url::parse("https://chat.example.com/?loginToken=abc&theme=dark").unwrap();
        let stripped = strip_delegated_auth_params(&url);
        assert_eq!(stripped.query(), Some("theme=dark"));
    }

    #[test]
    fn untouched_url_stays_identical() {
        let url = Url::parse("https://chat.example.com/?theme=dark#/welcome").unwrap();
        assert_eq!(strip_delegated_auth_params(&url), url);
    }

    #[test]
    fn login_token_detection() {
        let with = Url::parse("https://chat.example.com/?loginToken=abc").unwrap();
        let without = Url::parse("https://chat.example.com/?theme=dark").unwrap();
        assert!(has_login_token(&with));
        assert!(!has_login_token(&without));
    }

    #[test]
    fn after_login_path_from_fragment() {
        let url = Url::parse("https://chat.example.com/#/register").unwrap();
        assert_eq!(after_login_path(&url), "/register");

        let bare = Url::parse("https://chat.example.com/").unwrap();
        assert_eq!(after_login_path(&bare), "/");
    }
}
