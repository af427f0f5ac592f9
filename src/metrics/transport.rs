//! UDP send primitive.
//!
//! One outbound socket is bound at startup and shared by every send. A send
//! is complete once the datagram is handed to the kernel; nothing waits for
//! the collector.

use super::payload::{ErrorHook, Payload};
use crate::error::SendError;
use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::net::{UdpSocket, lookup_host};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::trace;

/// Largest UDP payload that fits in a single IPv4 datagram.
pub const MAX_DATAGRAM_LEN: usize = 65_507;

/// Shared outbound socket plus the runtime sends are spawned on.
#[derive(Clone)]
pub struct Transport {
    socket: Arc<UdpSocket>,
    runtime: Handle,
}

impl Transport {
    /// Bind an IPv4 socket on an ephemeral port.
    ///
    /// Captures the current runtime so [`submit`](Self::submit) works from
    /// synchronous host callbacks.
    pub async fn bind() -> Result<Self, SendError> {
        let socket = UdpSocket::bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)))
            .await
            .map_err(SendError::Bind)?;
        Ok(Self {
            socket: Arc::new(socket),
            runtime: Handle::current(),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Serialize `payload` to JSON and write it as one datagram to
    /// `host:port`. Returns the number of bytes sent.
    pub async fn send(&self, host: &str, port: u16, payload: &Payload) -> Result<usize, SendError> {
        let data = serde_json::to_vec(payload)?;
        if data.len() > MAX_DATAGRAM_LEN {
            return Err(SendError::Oversized {
                len: data.len(),
                max: MAX_DATAGRAM_LEN,
            });
        }

        let target = resolve(host, port).await?;
        let sent = self.socket.send_to(&data, target).await?;
        Ok(sent)
    }

    /// Fire-and-forget [`send`](Self::send).
    ///
    /// Returns immediately. A failure is passed to `on_error`; the returned
    /// handle may be dropped.
    pub fn submit(
        &self,
        host: &str,
        port: u16,
        payload: Payload,
        on_error: ErrorHook,
    ) -> JoinHandle<()> {
        let transport = self.clone();
        let host = host.to_string();
        self.runtime.spawn(async move {
            match transport.send(&host, port, &payload).await {
                Ok(len) => trace!(%host, port, len, "Datagram sent"),
                Err(err) => on_error(err),
            }
        })
    }
}

/// First IPv4 address for `host:port`; the outbound socket is IPv4 only.
async fn resolve(host: &str, port: u16) -> Result<SocketAddr, SendError> {
    let mut addrs = lookup_host((host, port))
        .await
        .map_err(|source| SendError::Resolve {
            host: host.to_string(),
            source,
        })?;
    addrs
        .find(SocketAddr::is_ipv4)
        .ok_or_else(|| SendError::NoAddress {
            host: host.to_string(),
        })
}
