//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The URL uses a scheme other than http or https.
    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    /// A discovery result carried no homeserver base URL.
    #[error("discovery produced no homeserver base URL")]
    MissingHomeserver,
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
