//! Core configuration types and loading.

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

use super::defaults::{default_host, default_listen_address, default_port};
use super::env::{ENABLE_VAR, parse_toggle};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Process configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Client listener for the bundled line server.
    #[serde(default)]
    pub listen: ListenConfig,
    /// Connection metrics emission.
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Apply the `JARMO_ENABLE` toggle on top of the file settings.
    ///
    /// An unset variable leaves `metrics.enabled` as loaded.
    pub fn apply_env(&mut self) {
        if let Ok(value) = std::env::var(ENABLE_VAR) {
            self.metrics.enabled = parse_toggle(&value);
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ListenConfig {
    /// Address to accept client connections on.
    #[serde(default = "default_listen_address")]
    pub address: SocketAddr,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: default_listen_address(),
        }
    }
}

/// Collector settings as they appear in the config file.
///
/// Hooks cannot be expressed in TOML; they are attached later through
/// [`crate::metrics::Options`].
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    /// Emit metrics at all. Off unless explicitly enabled.
    #[serde(default)]
    pub enabled: bool,
    /// Collector host name or address.
    #[serde(default = "default_host")]
    pub host: String,
    /// Collector UDP port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: default_host(),
            port: default_port(),
        }
    }
}
