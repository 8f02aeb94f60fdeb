//! Document-head presentation port.

use beacon_domain::HeadMetadata;

/// Errors that can occur while applying head metadata.
#[derive(Debug, thiserror::Error)]
pub enum HeadSinkError {
    /// The presentation target could not be updated.
    #[error("failed to apply head metadata: {0}")]
    Apply(String),
}

/// Port that applies computed head metadata to the presentation layer.
///
/// Implementations must be idempotent: applying the same values twice
/// updates tags in place rather than duplicating them.
pub trait HeadSink: Send + Sync {
    /// Applies the computed head values.
    ///
    /// # Errors
    ///
    /// Returns an error when the target cannot be written.
    fn apply(&self, head: &HeadMetadata) -> Result<(), HeadSinkError>;
}
