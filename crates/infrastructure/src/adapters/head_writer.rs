//! Document-head adapters.
//!
//! `HtmlHeadWriter` is the non-browser rendition of the DOM head mutation:
//! it upserts the computed tags into an on-disk HTML document. The
//! computation itself lives in the domain layer so this adapter stays
//! swappable.

use std::path::PathBuf;

use beacon_application::ports::{HeadSink, HeadSinkError};
use beacon_domain::HeadMetadata;
use regex::{NoExpand, Regex};

/// Head sink that rewrites an HTML file in place.
///
/// Each tag is applied idempotently: an existing tag is updated, a missing
/// one is inserted before `</head>`. Running the same apply twice leaves
/// the document unchanged.
#[derive(Debug, Clone)]
pub struct HtmlHeadWriter {
    path: PathBuf,
}

impl HtmlHeadWriter {
    /// Creates a writer over the served HTML document.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl HeadSink for HtmlHeadWriter {
    fn apply(&self, head: &HeadMetadata) -> Result<(), HeadSinkError> {
        if !self.path.exists() {
            tracing::warn!(path = %self.path.display(), "head document missing, skipping head update");
            return Ok(());
        }

        let mut html = std::fs::read_to_string(&self.path)
            .map_err(|e| HeadSinkError::Apply(e.to_string()))?;

        html = upsert(
            &html,
            r"<title>[^<]*</title>",
            &format!("<title>{}</title>", escape(&head.title)),
        )?;
        if let Some(description) = &head.description {
            html = upsert(
                &html,
                r#"<meta name="description" content="[^"]*"\s*/?>"#,
                &format!(r#"<meta name="description" content="{}">"#, escape(description)),
            )?;
        }
        if let Some(theme_color) = &head.theme_color {
            html = upsert(
                &html,
                r#"<meta name="theme-color" content="[^"]*"\s*/?>"#,
                &format!(r#"<meta name="theme-color" content="{}">"#, escape(theme_color)),
            )?;
        }
        if let Some(favicon) = &head.favicon_url {
            let href = escape(favicon.as_str());
            html = upsert(
                &html,
                r#"<link rel="icon" href="[^"]*"\s*/?>"#,
                &format!(r#"<link rel="icon" href="{href}">"#),
            )?;
            // The og:image mirrors the favicon.
            html = upsert(
                &html,
                r#"<meta property="og:image" content="[^"]*"\s*/?>"#,
                &format!(r#"<meta property="og:image" content="{href}">"#),
            )?;
        }

        std::fs::write(&self.path, html).map_err(|e| HeadSinkError::Apply(e.to_string()))
    }
}

/// Head sink that applies nothing, for headless runs and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHeadSink;

impl HeadSink for NullHeadSink {
    fn apply(&self, head: &HeadMetadata) -> Result<(), HeadSinkError> {
        tracing::debug!(title = %head.title, "discarding head metadata (null sink)");
        Ok(())
    }
}

/// Replaces the first tag matching `pattern`, or inserts the tag before
/// `</head>` when no match exists.
fn upsert(html: &str, pattern: &str, tag: &str) -> Result<String, HeadSinkError> {
    let regex = Regex::new(pattern).map_err(|e| HeadSinkError::Apply(e.to_string()))?;
    if regex.is_match(html) {
        return Ok(regex.replace(html, NoExpand(tag)).into_owned());
    }
    if html.contains("</head>") {
        return Ok(html.replacen("</head>", &format!("    {tag}\n</head>"), 1));
    }
    Err(HeadSinkError::Apply("document has no <head> section".into()))
}

/// Minimal HTML attribute/text escaping.
fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
