//! Scriptable host connection.
//!
//! Unlike a well-behaved host, `fire_disconnect` runs every listener each
//! time it is called, so tests can deliver duplicate disconnect signals.

use jarmo_tap::network::{Connection, DisconnectListener};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Host connection with a settable live count.
pub struct MockConnection {
    live: AtomicUsize,
    listeners: Mutex<Vec<DisconnectListener>>,
    registration_delay: Duration,
}

#[allow(dead_code)]
impl MockConnection {
    pub fn new(live: usize) -> Arc<Self> {
        Self::with_registration_delay(live, Duration::ZERO)
    }

    /// A host that blocks for `delay` inside every listener registration.
    pub fn with_registration_delay(live: usize, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            live: AtomicUsize::new(live),
            listeners: Mutex::new(Vec::new()),
            registration_delay: delay,
        })
    }

    pub fn set_live(&self, live: usize) {
        self.live.store(live, Ordering::SeqCst);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }

    pub fn fire_disconnect(&self) {
        for listener in self.listeners.lock().iter() {
            listener();
        }
    }
}

impl Connection for MockConnection {
    fn live_count(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    fn on_disconnect(&self, listener: DisconnectListener) {
        if !self.registration_delay.is_zero() {
            std::thread::sleep(self.registration_delay);
        }
        self.listeners.lock().push(listener);
    }
}
