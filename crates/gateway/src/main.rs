//! Beacon Gateway binary.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Starting Beacon Gateway v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Refuse to accept connections without the upstream credential.
    let config = match beacon_gateway::GatewayConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(error = %error, "refusing to start");
            std::process::exit(1);
        }
    };

    beacon_gateway::run_server(config).await?;

    Ok(())
}
