//! Connection lifecycle metrics.
//!
//! Records a payload when a client connects and another when it disconnects,
//! and fires each one at a remote collector as a single UDP datagram. Delivery
//! is best effort: failures are reported to the error hook and dropped.
//!
//! - [`Options`] / [`Settings`]: partial and normalized configuration
//! - [`Interceptor`]: the per-connection middleware
//! - [`Transport`]: the shared outbound socket and send primitive
//! - [`payload`]: payload type, default builders and the default error hook

mod interceptor;
mod options;
pub mod payload;
mod transport;

pub use interceptor::Interceptor;
pub use options::{Options, Settings};
pub use payload::{ConnectHook, DisconnectHook, ErrorHook, Payload};
pub use transport::{MAX_DATAGRAM_LEN, Transport};
