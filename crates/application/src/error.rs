//! Bootstrap error taxonomy.

use thiserror::Error;

/// Every way the bootstrap pipeline can fail.
///
/// All failures propagate to the orchestrator; there is no partial
/// rendering. Session fallback re-surfaces the original resolution error
/// rather than introducing a variant of its own.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BootstrapError {
    /// An explicit homeserver URL was combined with a discovery document or
    /// a server name. Operator error, not recoverable by precedence.
    #[error("invalid configuration: a homeserver URL cannot be combined with a discovery document or server name")]
    InvalidConfiguration,

    /// None of the three static server sources is set.
    #[error("invalid configuration: no homeserver URL, discovery document, or server name is set")]
    NoConfiguration,

    /// Remote discovery was unreachable or produced an unusable result.
    #[error("server discovery failed: {0}")]
    DiscoveryFailed(String),

    /// The branding metadata or server list could not be fetched.
    #[error("metadata fetch failed: {0}")]
    MetadataFetchFailed(String),

    /// The remote server list has no entry flagged as the default.
    #[error("server list has no entry flagged as default")]
    NoDefaultServer,

    /// The single-sign-on redirect could not be initiated.
    #[error("failed to start single sign-on: {0}")]
    SsoRedirectFailed(String),
}

/// Result type alias for bootstrap operations.
pub type BootstrapResult<T> = Result<T, BootstrapError>;
