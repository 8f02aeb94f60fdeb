//! The single-sign-on gate.

use beacon_domain::{PathClass, SsoRedirectPolicy};

/// Everything the gate decision depends on.
#[derive(Debug, Clone, Copy)]
pub struct SsoGateInput {
    /// Whether a stored user id suggests a prior session exists.
    pub has_stored_session: bool,
    /// Whether the navigation already carries a login token.
    pub returning_from_sso: bool,
    /// The operator's redirect policy.
    pub policy: SsoRedirectPolicy,
    /// Classification of the current navigation path.
    pub path_class: PathClass,
}

/// Decides whether this page load should short-circuit into an SSO
/// redirect before any UI is constructed.
///
/// True only when no prior session is known, we are not already returning
/// from SSO, and a policy flag matches the current path class.
#[must_use]
pub fn should_redirect(input: &SsoGateInput) -> bool {
    let mut auto_redirect = input.policy.immediate;
    if !auto_redirect && input.policy.on_welcome_page {
        auto_redirect = input.path_class == PathClass::WelcomeOrRoot;
    }
    if !auto_redirect && input.policy.on_login_page {
        auto_redirect = input.path_class == PathClass::Login;
    }
    !input.has_stored_session && !input.returning_from_sso && auto_redirect
}
