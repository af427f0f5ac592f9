//! Payload type, default payload builders and the default error hook.

use crate::error::SendError;
use crate::network::Connection;
use chrono::Utc;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::error;

/// JSON object sent to the collector.
pub type Payload = Map<String, Value>;

/// Builds the payload for a new connection from the live client count.
/// `None` skips the event.
pub type ConnectHook = Arc<dyn Fn(&dyn Connection, usize) -> Option<Payload> + Send + Sync>;

/// Builds the payload for a closed connection from the live client count and
/// the connection duration in milliseconds. `None` skips the event.
pub type DisconnectHook =
    Arc<dyn Fn(&dyn Connection, usize, u64) -> Option<Payload> + Send + Sync>;

/// Receives every failed send.
pub type ErrorHook = Arc<dyn Fn(SendError) + Send + Sync>;

/// `{"name": "connections", "total_connections": live}`
pub fn connect_payload(_connection: &dyn Connection, live: usize) -> Option<Payload> {
    let mut payload = Payload::new();
    payload.insert("name".to_string(), Value::from("connections"));
    payload.insert("total_connections".to_string(), Value::from(live));
    Some(payload)
}

/// `{"total_connections": live, "connection_duration": duration_ms}`
pub fn disconnect_payload(
    _connection: &dyn Connection,
    live: usize,
    duration_ms: u64,
) -> Option<Payload> {
    let mut payload = Payload::new();
    payload.insert("total_connections".to_string(), Value::from(live));
    payload.insert("connection_duration".to_string(), Value::from(duration_ms));
    Some(payload)
}

/// Log the failure with a wall-clock timestamp and carry on.
pub fn log_send_error(err: SendError) {
    error!(
        at = %Utc::now().to_rfc3339(),
        code = err.error_code(),
        error = %err,
        "Failed to send UDP packet(s)"
    );
}
