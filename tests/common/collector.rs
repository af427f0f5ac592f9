//! Fake metrics collector.
//!
//! A UDP socket on loopback that captures the datagrams sent to it.

use serde_json::Value;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::timeout;

/// Maximum time to wait for an expected datagram.
const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Loopback UDP collector.
pub struct Collector {
    socket: UdpSocket,
}

#[allow(dead_code)]
impl Collector {
    pub async fn bind() -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind collector socket");
        Self { socket }
    }

    pub fn port(&self) -> u16 {
        self.socket
            .local_addr()
            .expect("collector has no local address")
            .port()
    }

    /// Receive the next datagram as raw text.
    pub async fn recv_raw(&self) -> String {
        let mut buf = vec![0u8; 65_536];
        let (len, _) = timeout(RECV_TIMEOUT, self.socket.recv_from(&mut buf))
            .await
            .expect("Timed out waiting for datagram")
            .expect("Collector receive failed");
        String::from_utf8(buf[..len].to_vec()).expect("Datagram is not UTF-8")
    }

    /// Receive the next datagram as JSON.
    pub async fn recv_json(&self) -> Value {
        let raw = self.recv_raw().await;
        serde_json::from_str(&raw).expect("Datagram is not JSON")
    }

    /// Assert that nothing arrives within `wait`.
    pub async fn expect_silence(&self, wait: Duration) {
        let mut buf = vec![0u8; 65_536];
        if let Ok(Ok((len, _))) = timeout(wait, self.socket.recv_from(&mut buf)).await {
            panic!(
                "Unexpected datagram: {}",
                String::from_utf8_lossy(&buf[..len])
            );
        }
    }
}
