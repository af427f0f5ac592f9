//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

use std::net::SocketAddr;

/// Collector host used when none is configured.
pub const DEFAULT_HOST: &str = "localhost";

/// Collector port used when none is configured.
pub const DEFAULT_PORT: u16 = 8000;

// =============================================================================
// Listen Defaults
// =============================================================================

pub fn default_listen_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

// =============================================================================
// Metrics Defaults
// =============================================================================

pub fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

pub fn default_port() -> u16 {
    DEFAULT_PORT
}
