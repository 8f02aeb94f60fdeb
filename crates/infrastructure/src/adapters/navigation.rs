//! Navigation adapter.

use std::sync::Mutex;

use beacon_application::ports::Navigator;
use url::Url;

/// Navigator over the URL the process was launched with.
///
/// The headless stand-in for the browser's history: a replace is recorded
/// and logged instead of mutating a location bar.
#[derive(Debug)]
pub struct RecordingNavigator {
    launch_url: Url,
    replaced: Mutex<Option<Url>>,
}

impl RecordingNavigator {
    /// Creates a navigator for the given launch URL.
    #[must_use]
    pub const fn new(launch_url: Url) -> Self {
        Self {
            launch_url,
            replaced: Mutex::new(None),
        }
    }

    /// The URL currently visible: the last replacement, or the launch URL.
    #[must_use]
    pub fn visible_url(&self) -> Url {
        self.replaced
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
            .unwrap_or_else(|| self.launch_url.clone())
    }
}

impl Navigator for RecordingNavigator {
    fn current_url(&self) -> Url {
        self.launch_url.clone()
    }

    fn replace_url(&self, url: Url) {
        tracing::info!(%url, "replacing visible URL");
        if let Ok(mut guard) = self.replaced.lock() {
            *guard = Some(url);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn replacement_updates_visible_url_only() {
        let launch = Url::parse("https://chat.example.com/?loginToken=abc").unwrap();
        let navigator = RecordingNavigator::new(launch.clone());
        assert_eq!(navigator.visible_url(), launch);

        let clean = Url::parse("https://chat.example.com/").unwrap();
        navigator.replace_url(clean.clone());
        assert_eq!(navigator.visible_url(), clean);
        // The load URL itself is untouched; a replace is not a navigation.
        assert_eq!(navigator.current_url(), launch);
    }
}
