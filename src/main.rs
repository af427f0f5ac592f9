//! jarmo-tap - line echo server with connection metrics.
//!
//! Serves a trivial line protocol and reports each client connect and
//! disconnect to the configured collector.

use jarmo_tap::config::Config;
use jarmo_tap::metrics::{Interceptor, Options, Settings, Transport};
use jarmo_tap::network::Gateway;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let mut config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;
    config.apply_env();

    let settings = Settings::from(Options::from(config.metrics.clone()));
    let transport = Transport::bind().await?;
    let outbound = transport.local_addr()?;
    let interceptor = Arc::new(Interceptor::new(settings, transport));

    let active = interceptor.settings();
    info!(
        enabled = active.enabled(),
        host = %active.host(),
        port = active.port(),
        %outbound,
        "Starting jarmo-tap"
    );

    let gateway = Gateway::bind(config.listen.address, interceptor).await?;
    gateway.run().await?;

    Ok(())
}
