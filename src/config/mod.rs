//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, ListenConfig, MetricsConfig)
//! - [`defaults`]: Serde default value functions
//! - [`env`]: The `JARMO_ENABLE` process toggle

mod defaults;
pub mod env;
mod types;

pub use defaults::{DEFAULT_HOST, DEFAULT_PORT};
pub use types::{Config, ConfigError, ListenConfig, MetricsConfig};
