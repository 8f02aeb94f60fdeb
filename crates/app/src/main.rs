//! Beacon - Bootstrap Entry Point
//!
//! Headless composition root: resolves the server configuration, overlays
//! remote branding, evaluates the SSO gate, and emits the frozen
//! configuration for the (out-of-process) UI layer.

use std::path::PathBuf;

use beacon_application::ports::{HeadSink, HeadSinkError};
use beacon_application::{Bootstrap, BootstrapOutcome};
use beacon_domain::{HeadMetadata, StaticConfig};
use beacon_infrastructure::{
    FileSessionStore, GatewayMetadataClient, HtmlHeadWriter, LoggingSsoRedirector, NullHeadSink,
    RecordingNavigator, WellKnownDiscoveryClient,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

/// Head sink selected at startup: a served HTML document when one is
/// configured, otherwise discard.
enum HeadTarget {
    File(HtmlHeadWriter),
    Discard(NullHeadSink),
}

impl HeadSink for HeadTarget {
    fn apply(&self, head: &HeadMetadata) -> Result<(), HeadSinkError> {
        match self {
            Self::File(writer) => writer.apply(head),
            Self::Discard(sink) => sink.apply(head),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_owned())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = env_or("BEACON_CONFIG", "config.json");
    let profile_dir = PathBuf::from(env_or("BEACON_PROFILE_DIR", ".beacon"));
    let launch_url = Url::parse(&env_or("BEACON_LAUNCH_URL", "http://localhost:8080/"))?;
    let language = env_or("BEACON_LANGUAGE", "en-US");

    let static_config: StaticConfig =
        serde_json::from_str(&std::fs::read_to_string(&config_path)?)?;
    let gateway_url = static_config
        .gateway_url
        .clone()
        .ok_or("gateway_url missing from static configuration")?;

    let head = match std::env::var("BEACON_INDEX_HTML") {
        Ok(path) => HeadTarget::File(HtmlHeadWriter::new(PathBuf::from(path))),
        Err(_) => HeadTarget::Discard(NullHeadSink),
    };

    let bootstrap = Bootstrap::new(
        WellKnownDiscoveryClient::new()?,
        FileSessionStore::new(&profile_dir),
        GatewayMetadataClient::new(gateway_url)?,
        LoggingSsoRedirector::new(),
        head,
        RecordingNavigator::new(launch_url),
        language,
    );

    let options = static_config.server_options();
    let process_config = static_config.seed_process_config();

    match bootstrap.run(&options, process_config).await? {
        BootstrapOutcome::Redirected => {
            tracing::info!("single sign-on redirect initiated; UI layer not loaded");
        }
        BootstrapOutcome::ProceedToUi(handoff) => {
            let payload = serde_json::json!({
                "config": handoff.config,
                "validated_server_config": handoff.server_config,
                "visible_url": handoff.visible_url,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }

    Ok(())
}
