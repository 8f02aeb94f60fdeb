//! Beacon Domain - Core bootstrap types
//!
//! This crate defines the domain model for the Beacon startup core.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod head;
pub mod metadata;
pub mod process_config;
pub mod server_config;
pub mod session;
pub mod static_config;

pub use error::{DomainError, DomainResult};
pub use head::{HeadMetadata, select_description};
pub use metadata::{AppMetadata, Envelope, ServerListEntry, Translation};
pub use process_config::{
    DefaultServerConfig, MobileBuilds, PathClass, ProcessConfig, RoomDirectoryConfig,
    SsoRedirectPolicy,
};
pub use server_config::{
    DiscoveryDocument, DiscoveryResult, RawServerOptions, ServerEndpoint, ValidatedServerConfig,
};
pub use session::StoredSessionVars;
pub use static_config::StaticConfig;
