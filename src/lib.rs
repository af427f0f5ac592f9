//! jarmo-tap - connection lifecycle metrics for socket servers.
//!
//! Install [`metrics::Interceptor`] as per-connection [`network::Middleware`]
//! and every client connect and disconnect is reported to a collector as a
//! JSON datagram over UDP.

pub mod config;
pub mod error;
pub mod metrics;
pub mod network;

pub use error::SendError;
