//! Integration test common infrastructure.
//!
//! Provides a scriptable host connection, a UDP collector that captures
//! emitted payloads, and a line client for the bundled gateway.

pub mod client;
pub mod collector;
pub mod connection;

#[allow(unused_imports)]
pub use client::TestClient;
#[allow(unused_imports)]
pub use collector::Collector;
#[allow(unused_imports)]
pub use connection::MockConnection;
