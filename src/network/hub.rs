//! Live client registry for the bundled server.
//!
//! Bookkeeping order on disconnect: the client leaves the hub first, then its
//! listeners run. A listener reading [`Connection::live_count`] therefore sees
//! the count without the departing client.

use super::connection::{Connection, DisconnectListener};
use dashmap::DashMap;
use parking_lot::Mutex;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tracing::debug;

/// Registry of connected clients.
#[derive(Default)]
pub struct Hub {
    clients: DashMap<u64, Arc<Client>>,
    next_id: AtomicU64,
}

impl Hub {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Admit a client. It counts as live from this point on.
    pub fn register(self: &Arc<Self>, addr: SocketAddr) -> Arc<Client> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let client = Arc::new(Client {
            id,
            addr,
            hub: Arc::downgrade(self),
            listeners: Mutex::new(Vec::new()),
            disconnected: AtomicBool::new(false),
        });
        self.clients.insert(id, Arc::clone(&client));
        client
    }

    /// Number of live clients.
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    fn remove(&self, id: u64) {
        self.clients.remove(&id);
    }
}

/// A connected client tracked by a [`Hub`].
pub struct Client {
    id: u64,
    addr: SocketAddr,
    hub: Weak<Hub>,
    listeners: Mutex<Vec<DisconnectListener>>,
    disconnected: AtomicBool,
}

impl Client {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Drop the client from the hub and notify disconnect listeners.
    ///
    /// Only the first call has any effect.
    pub fn disconnect(&self) {
        if self.disconnected.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Some(hub) = self.hub.upgrade() {
            hub.remove(self.id);
        }

        // Run listeners outside the lock; they may call back into the client.
        let listeners = std::mem::take(&mut *self.listeners.lock());
        debug!(id = self.id, listeners = listeners.len(), "Client disconnected");
        for listener in &listeners {
            listener();
        }
    }
}

impl Connection for Client {
    fn live_count(&self) -> usize {
        self.hub.upgrade().map_or(0, |hub| hub.len())
    }

    fn on_disconnect(&self, listener: DisconnectListener) {
        if self.disconnected.load(Ordering::Acquire) {
            debug!(id = self.id, "Listener registered after disconnect; ignoring");
            return;
        }
        self.listeners.lock().push(listener);
    }
}
