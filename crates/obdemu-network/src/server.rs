//! TCP server exposing the emulated adapter to diagnostic clients.
//!
//! Clients such as mobile OBD-II apps connect the way they would to a WiFi
//! ELM327 clone: open a socket, receive the boot banner and initial prompt,
//! then exchange `\r`-terminated command lines for prompt-terminated
//! responses.
//!
//! # Architecture
//!
//! ```text
//! Client app 1 ──┐
//!                ├──> Server ──> per-connection task
//! Client app 2 ──┘                   │
//!                                    ├─> ElmCodec (line framing)
//!                                    └─> Session  (config + dispatch)
//! ```
//!
//! Every connection owns an independent [`Session`]: configuration changes
//! made by one client never leak into another, and no state is shared
//! between tasks.
//!
//! # Example
//!
//! ```no_run
//! use obdemu_network::{Server, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::default();
//! let server = Server::bind(config).await?;
//! server.run().await?;
//! # Ok(())
//! # }
//! ```

use futures::{SinkExt, StreamExt};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tokio_util::codec::Framed;
use tracing::{debug, info, warn};

use obdemu_adapter::Session;
use obdemu_core::constants::{DEFAULT_DEVICE_NAME, DEFAULT_PORT};
use obdemu_protocol::{ElmCodec, boot_banner, echo_line, render};

/// Configuration for the emulator server.
///
/// # Example
///
/// ```
/// use obdemu_network::ServerConfig;
///
/// let config = ServerConfig {
///     bind_addr: "127.0.0.1:35000".parse().unwrap(),
///     ..ServerConfig::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the listener to.
    pub bind_addr: SocketAddr,

    /// Identity advertised to the pairing/discovery layer. Purely
    /// informational over TCP; logged at startup so operators can match the
    /// emulator against what their client app shows.
    pub device_name: String,

    /// Maximum number of simultaneous client connections.
    pub max_connections: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            device_name: DEFAULT_DEVICE_NAME.to_string(),
            max_connections: 100,
        }
    }
}

/// Errors that can occur while serving.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the configured address.
    #[error("Failed to bind to {0}")]
    BindFailed(SocketAddr),

    /// Low-level I/O error on the listener.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// TCP server for the emulated adapter.
pub struct Server {
    listener: TcpListener,
    config: ServerConfig,
}

impl Server {
    /// Bind the server to the configured address.
    ///
    /// Logs the advertised device identity and the listen address; the
    /// server accepts connections as soon as this returns.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::BindFailed`] if the address is unavailable.
    pub async fn bind(config: ServerConfig) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(config.bind_addr)
            .await
            .map_err(|_| ServerError::BindFailed(config.bind_addr))?;

        info!(
            "Device \"{}\" listening on {} (max {} connections)",
            config.device_name, config.bind_addr, config.max_connections
        );

        Ok(Self { listener, config })
    }

    /// The address the listener is actually bound to.
    ///
    /// Useful for tests that bind to port 0 (OS-assigned random port).
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        self.listener.local_addr().map_err(Into::into)
    }

    /// Accept and serve connections until the listener fails.
    ///
    /// Each accepted connection runs on its own task with its own session.
    /// Connections beyond `max_connections` are dropped immediately; the
    /// command surface has no way to report the rejection, so the client
    /// sees a plain connection reset.
    pub async fn run(self) -> Result<(), ServerError> {
        let active = Arc::new(AtomicUsize::new(0));

        loop {
            let (stream, addr) = self.listener.accept().await?;

            if active.load(Ordering::Acquire) >= self.config.max_connections {
                warn!(
                    addr = %addr,
                    max_connections = self.config.max_connections,
                    "Connection rejected: maximum connections reached"
                );
                drop(stream);
                continue;
            }

            if let Err(e) = stream.set_nodelay(true) {
                warn!("Failed to set TCP_NODELAY for {addr}: {e}");
            }

            let count = active.fetch_add(1, Ordering::AcqRel) + 1;
            info!("Client connected from {addr} (total: {count})");

            let active = Arc::clone(&active);
            tokio::spawn(async move {
                if let Err(e) = serve_connection(stream).await {
                    warn!("Client {addr} terminated with error: {e}");
                }
                let remaining = active.fetch_sub(1, Ordering::AcqRel) - 1;
                info!("Client {addr} disconnected (total: {remaining})");
            });
        }
    }
}

/// Serve one client connection to completion.
///
/// Sends the boot banner, then loops: frame a command line, echo it back if
/// echo is enabled, dispatch it, and write each response line after its
/// pacing delay. Returns when the peer closes the connection.
///
/// Generic over the stream type so tests can drive it with an in-memory
/// duplex pipe instead of a socket.
pub async fn serve_connection<S>(stream: S) -> io::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut framed = Framed::new(stream, ElmCodec::new());
    let mut session = Session::new();

    framed.send(boot_banner()).await?;

    while let Some(line) = framed.next().await {
        let line = line?;

        // Echo runs under the setting in force when the line arrived; the
        // line being dispatched may be the one that turns echo off.
        if session.config().echo {
            framed.send(echo_line(&line)).await?;
        }

        let reply = session.handle_line(&line);
        for part in reply {
            if !part.delay_before.is_zero() {
                tokio::time::sleep(part.delay_before).await;
            }
            let rendered = render(&part.answer, session.config());
            debug!("sending response: {rendered:?}");
            framed.send(rendered).await?;
        }
    }

    Ok(())
}
