//! Beacon Application - Bootstrap orchestration
//!
//! This crate sequences the startup configuration-resolution pipeline:
//! resolve the server configuration, fall back to a stored session on
//! failure, overlay remote branding metadata, evaluate the single-sign-on
//! gate, and hand a frozen configuration to the UI layer.

pub mod error;
pub mod navigation;
pub mod ports;
pub mod use_cases;

pub use error::{BootstrapError, BootstrapResult};
pub use navigation::{after_login_path, has_login_token, strip_delegated_auth_params};
pub use use_cases::{
    Bootstrap, BootstrapOutcome, OverlayMetadata, ResolveServerConfig, SsoGateInput, UiHandoff,
    resolve_from_session, should_redirect,
};
