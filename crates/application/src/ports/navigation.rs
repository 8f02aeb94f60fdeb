//! Navigation port.

use url::Url;

/// Port over the current navigation state.
///
/// `replace_url` is a history replace, not a navigation: the page does not
/// reload, only the visible URL changes.
pub trait Navigator: Send + Sync {
    /// Returns the URL the page load started from.
    fn current_url(&self) -> Url;

    /// Replaces the visible URL without navigating.
    fn replace_url(&self, url: Url);
}
