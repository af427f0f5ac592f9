//! Host server capabilities consumed by connection middleware.
//!
//! A host adapter implements [`Connection`] for its client handle and calls
//! every installed [`Middleware`] once per accepted client.

use std::sync::Arc;

/// Callback run when a connection goes away.
pub type DisconnectListener = Box<dyn Fn() + Send + Sync>;

/// Continuation handed to middleware. Calling it lets the host proceed with
/// the connection; dropping it uncalled rejects the connection.
pub type Next = Box<dyn FnOnce() + Send>;

/// A live client connection as seen by middleware.
pub trait Connection: Send + Sync {
    /// Number of clients currently connected to the host server.
    fn live_count(&self) -> usize;

    /// Subscribe to the disconnect signal of this connection.
    ///
    /// The host must still hold a strong reference to the connection while
    /// it runs listeners; a listener that finds the connection gone skips its
    /// work.
    fn on_disconnect(&self, listener: DisconnectListener);
}

/// Per-connection hook installed into the host's accept path.
pub trait Middleware: Send + Sync {
    /// Inspect a newly accepted connection.
    ///
    /// Implementations must not block and must call `next` exactly once to
    /// let the connection through.
    fn handle(&self, connection: Arc<dyn Connection>, next: Next);
}
