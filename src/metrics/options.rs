//! Configuration normalization.
//!
//! [`Options`] is what callers fill in, with every field optional.
//! [`Settings`] is the fully populated, read-only result.

use super::payload::{
    ConnectHook, DisconnectHook, ErrorHook, Payload, connect_payload, disconnect_payload,
    log_send_error,
};
use crate::config::{DEFAULT_HOST, DEFAULT_PORT, MetricsConfig};
use crate::error::SendError;
use crate::network::Connection;
use std::fmt;
use std::sync::Arc;

/// Partial metrics configuration.
///
/// An empty host and port `0` count as unset.
#[derive(Clone, Default)]
pub struct Options {
    enabled: Option<bool>,
    host: Option<String>,
    port: Option<u16>,
    on_error: Option<ErrorHook>,
    on_connect: Option<ConnectHook>,
    on_disconnect: Option<DisconnectHook>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Replace the default error hook.
    pub fn on_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(SendError) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(hook));
        self
    }

    /// Replace the default connect payload builder.
    pub fn on_connect<F>(mut self, hook: F) -> Self
    where
        F: Fn(&dyn Connection, usize) -> Option<Payload> + Send + Sync + 'static,
    {
        self.on_connect = Some(Arc::new(hook));
        self
    }

    /// Replace the default disconnect payload builder.
    pub fn on_disconnect<F>(mut self, hook: F) -> Self
    where
        F: Fn(&dyn Connection, usize, u64) -> Option<Payload> + Send + Sync + 'static,
    {
        self.on_disconnect = Some(Arc::new(hook));
        self
    }

    /// Fill every unset field with its default.
    pub fn normalize(self) -> Settings {
        Settings {
            enabled: self.enabled.unwrap_or(false),
            host: self
                .host
                .filter(|host| !host.is_empty())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: self.port.filter(|port| *port != 0).unwrap_or(DEFAULT_PORT),
            on_error: self.on_error.unwrap_or_else(|| Arc::new(log_send_error)),
            on_connect: self.on_connect.unwrap_or_else(|| Arc::new(connect_payload)),
            on_disconnect: self
                .on_disconnect
                .unwrap_or_else(|| Arc::new(disconnect_payload)),
        }
    }
}

impl From<MetricsConfig> for Options {
    fn from(config: MetricsConfig) -> Self {
        Self::new()
            .enabled(config.enabled)
            .host(config.host)
            .port(config.port)
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("enabled", &self.enabled)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("on_error", &self.on_error.is_some())
            .field("on_connect", &self.on_connect.is_some())
            .field("on_disconnect", &self.on_disconnect.is_some())
            .finish()
    }
}

/// Normalized metrics configuration. Immutable once built.
#[derive(Clone)]
pub struct Settings {
    enabled: bool,
    host: String,
    port: u16,
    pub(super) on_error: ErrorHook,
    pub(super) on_connect: ConnectHook,
    pub(super) on_disconnect: DisconnectHook,
}

impl Settings {
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl Default for Settings {
    fn default() -> Self {
        Options::default().normalize()
    }
}

impl From<Options> for Settings {
    fn from(options: Options) -> Self {
        options.normalize()
    }
}

impl From<Option<Options>> for Settings {
    fn from(options: Option<Options>) -> Self {
        options.unwrap_or_default().normalize()
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("enabled", &self.enabled)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish_non_exhaustive()
    }
}
