//! Network module.
//!
//! Contains the host-facing capability traits ([`Connection`], [`Middleware`])
//! and a small reference host: the client [`Hub`] and the TCP [`Gateway`].

mod connection;
mod gateway;
mod hub;

pub use connection::{Connection, DisconnectListener, Middleware, Next};
pub use gateway::Gateway;
pub use hub::{Client, Hub};
