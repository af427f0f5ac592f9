//! Connection metrics middleware.
//!
//! For every accepted connection the interceptor emits one connect payload,
//! hooks the connection's disconnect signal, and emits one disconnect payload
//! carrying the connection duration. The host's continuation always runs
//! synchronously; sends are spawned and never awaited.

use super::options::Settings;
use super::payload::Payload;
use super::transport::Transport;
use crate::network::{Connection, Middleware, Next};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug, info};

/// Middleware that reports connection lifecycle metrics to a collector.
pub struct Interceptor {
    settings: Arc<Settings>,
    transport: Transport,
    disabled_noticed: AtomicBool,
}

impl Interceptor {
    pub fn new(settings: Settings, transport: Transport) -> Self {
        Self {
            settings: Arc::new(settings),
            transport,
            disabled_noticed: AtomicBool::new(false),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn notice_disabled(&self) {
        if self.disabled_noticed.swap(true, Ordering::Relaxed) {
            debug!("Connection metrics disabled; passing connection through");
        } else {
            info!(
                "Connection metrics are disabled by default; enable them with \
                 [metrics].enabled = true or the JARMO_ENABLE environment variable"
            );
        }
    }
}

impl Middleware for Interceptor {
    fn handle(&self, connection: Arc<dyn Connection>, next: Next) {
        if !self.settings.enabled() {
            self.notice_disabled();
            return next();
        }

        let start = Instant::now();
        let live = connection.live_count();
        let connect_payload = (self.settings.on_connect)(connection.as_ref(), live);

        let settings = Arc::clone(&self.settings);
        let transport = self.transport.clone();
        let weak = Arc::downgrade(&connection);
        let fired = AtomicBool::new(false);
        connection.on_disconnect(Box::new(move || {
            if fired.swap(true, Ordering::AcqRel) {
                debug!("Repeated disconnect signal ignored");
                return;
            }
            let Some(connection) = weak.upgrade() else {
                debug!("Connection dropped before its disconnect signal; metric skipped");
                return;
            };

            let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
            let live = connection.live_count();
            if let Some(payload) = (settings.on_disconnect)(connection.as_ref(), live, duration_ms)
            {
                debug!(live, duration_ms, "Submitting disconnect metric");
                emit(&transport, &settings, payload);
            }
        }));

        // The host proceeds before any send is in flight.
        next();

        if let Some(payload) = connect_payload {
            debug!(live, "Submitting connect metric");
            emit(&self.transport, &self.settings, payload);
        }
    }
}

fn emit(transport: &Transport, settings: &Settings, payload: Payload) {
    // Dropping the handle detaches the send.
    drop(transport.submit(
        settings.host(),
        settings.port(),
        payload,
        Arc::clone(&settings.on_error),
    ));
}
