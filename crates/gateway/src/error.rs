//! Gateway error types.

use thiserror::Error;

/// Errors that can occur while configuring or running the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A required environment variable is unset or empty. Startup-fatal.
    #[error("missing required environment variable: {0}")]
    MissingVariable(&'static str),

    /// A configuration value does not validate.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration sources could not be read.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Binding or serving the listener failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
