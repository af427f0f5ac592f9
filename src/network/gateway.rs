//! Gateway - TCP listener that accepts incoming connections.
//!
//! The Gateway binds a socket, admits each client into the [`Hub`], runs the
//! installed middleware, and then serves a line-echo session until the client
//! goes away. The disconnect signal fires once the session ends.

use super::connection::{Connection, Middleware};
use super::hub::{Client, Hub};
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio_util::codec::{Framed, LinesCodec, LinesCodecError};
use tracing::{debug, error, info, instrument, warn};

/// Longest line accepted from a client, in bytes.
const MAX_LINE_LEN: usize = 4096;

/// The Gateway accepts incoming TCP connections and spawns sessions.
pub struct Gateway {
    listener: TcpListener,
    hub: Arc<Hub>,
    middleware: Arc<dyn Middleware>,
}

impl Gateway {
    /// Bind the gateway to the specified address.
    pub async fn bind(addr: SocketAddr, middleware: Arc<dyn Middleware>) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!(address = %listener.local_addr()?, "Listener bound");

        Ok(Self {
            listener,
            hub: Hub::new(),
            middleware,
        })
    }

    /// Address the listener actually bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Registry of clients served by this gateway.
    pub fn hub(&self) -> Arc<Hub> {
        Arc::clone(&self.hub)
    }

    /// Run the gateway, accepting connections forever.
    #[instrument(skip(self), name = "gateway")]
    pub async fn run(self) -> anyhow::Result<()> {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    let client = self.hub.register(addr);
                    let middleware = Arc::clone(&self.middleware);
                    tokio::spawn(serve(client, stream, middleware));
                }
                Err(e) => {
                    error!(error = %e, "Failed to accept connection");
                }
            }
        }
    }
}

async fn serve(client: Arc<Client>, stream: TcpStream, middleware: Arc<dyn Middleware>) {
    let id = client.id();
    let addr = client.addr();

    let (admit_tx, admit_rx) = oneshot::channel();
    let connection: Arc<dyn Connection> = client.clone();
    middleware.handle(
        connection,
        Box::new(move || {
            let _ = admit_tx.send(());
        }),
    );

    if admit_rx.await.is_err() {
        warn!(id, %addr, "Connection rejected by middleware");
        client.disconnect();
        return;
    }

    info!(id, %addr, "Client connected");
    if let Err(e) = echo(stream).await {
        debug!(id, %addr, error = %e, "Session ended with error");
    }
    client.disconnect();
    info!(id, %addr, "Client closed");
}

/// Echo every received line back to the client.
async fn echo(stream: TcpStream) -> Result<(), LinesCodecError> {
    let mut framed = Framed::new(stream, LinesCodec::new_with_max_length(MAX_LINE_LEN));
    while let Some(line) = framed.next().await {
        let line = line?;
        framed.send(line).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Next;
    use std::time::Duration;
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

    struct PassThrough;

    impl Middleware for PassThrough {
        fn handle(&self, _connection: Arc<dyn Connection>, next: Next) {
            next();
        }
    }

    struct Reject;

    impl Middleware for Reject {
        fn handle(&self, _connection: Arc<dyn Connection>, _next: Next) {}
    }

    async fn wait_for_len(hub: &Hub, len: usize) {
        for _ in 0..100 {
            if hub.len() == len {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("hub never reached {len} clients (has {})", hub.len());
    }

    #[tokio::test]
    async fn echoes_lines_and_tracks_clients() {
        let gateway = Gateway::bind("127.0.0.1:0".parse().unwrap(), Arc::new(PassThrough))
            .await
            .unwrap();
        let addr = gateway.local_addr().unwrap();
        let hub = gateway.hub();
        tokio::spawn(gateway.run());

        let stream = TcpStream::connect(addr).await.unwrap();
        let (read, mut write) = stream.into_split();
        let mut lines = BufReader::new(read).lines();

        write.write_all(b"hello\n").await.unwrap();
        let echoed = tokio::time::timeout(Duration::from_secs(2), lines.next_line())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(echoed.as_deref(), Some("hello"));
        assert_eq!(hub.len(), 1);

        drop(write);
        drop(lines);
        wait_for_len(&hub, 0).await;
    }

    #[tokio::test]
    async fn rejected_connection_is_closed() {
        let gateway = Gateway::bind("127.0.0.1:0".parse().unwrap(), Arc::new(Reject))
            .await
            .unwrap();
        let addr = gateway.local_addr().unwrap();
        let hub = gateway.hub();
        tokio::spawn(gateway.run());

        let stream = TcpStream::connect(addr).await.unwrap();
        let mut lines = BufReader::new(stream).lines();
        let next = tokio::time::timeout(Duration::from_secs(2), lines.next_line())
            .await
            .unwrap();
        assert!(matches!(next, Ok(None) | Err(_)));
        wait_for_len(&hub, 0).await;
    }
}
