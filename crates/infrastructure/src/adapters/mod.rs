//! Port adapters.

mod gateway_client;
mod head_writer;
mod navigation;
mod session_file;
mod sso;
mod well_known_client;

pub use gateway_client::GatewayMetadataClient;
pub use head_writer::{HtmlHeadWriter, NullHeadSink};
pub use navigation::RecordingNavigator;
pub use session_file::FileSessionStore;
pub use sso::LoggingSsoRedirector;
pub use well_known_client::WellKnownDiscoveryClient;
