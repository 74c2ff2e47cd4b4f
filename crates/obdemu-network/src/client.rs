//! TCP client for driving the emulator the way a diagnostic app does.
//!
//! The client speaks the raw command surface: it writes `\r`-terminated
//! lines and reads until the prompt marker. It exists for integration tests
//! and manual probing; it is deliberately not a full scan-tool abstraction.
//!
//! # Reading model
//!
//! [`TcpClient::read_until_prompt`] returns everything up to and including
//! one prompt marker. Commands that answer in several prompted parts (the
//! reset banner, the automatic protocol search, multi-frame vehicle-info
//! queries) require one read per part, exactly as a real client sees them.
//!
//! # Example
//!
//! ```no_run
//! use obdemu_network::{TcpClient, TcpClientConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut client = TcpClient::new(TcpClientConfig {
//!     server_addr: "127.0.0.1:35000".parse()?,
//!     ..TcpClientConfig::default()
//! });
//!
//! client.connect().await?;
//! let banner = client.read_until_prompt().await?;
//! println!("connected: {banner}");
//!
//! let response = client.command("ATRV").await?;
//! println!("battery: {response}");
//! # Ok(())
//! # }
//! ```

use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

use obdemu_core::constants::{DEFAULT_PORT, PROMPT};

/// Configuration for the probing client.
#[derive(Debug, Clone)]
pub struct TcpClientConfig {
    /// Emulator address to connect to.
    pub server_addr: SocketAddr,

    /// Timeout applied to connect and to each read.
    pub timeout: Duration,
}

impl Default for TcpClientConfig {
    fn default() -> Self {
        Self {
            server_addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            timeout: Duration::from_millis(3000),
        }
    }
}

/// Errors that can occur during client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Operation attempted before `connect()`.
    #[error("Not connected to emulator")]
    NotConnected,

    /// Connect or read exceeded the configured timeout.
    #[error("Timeout after {0}ms")]
    Timeout(u64),

    /// Peer closed the connection mid-response.
    #[error("Connection closed before prompt")]
    ConnectionClosed,

    /// Low-level I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Minimal command-line client for the emulator.
pub struct TcpClient {
    config: TcpClientConfig,
    stream: Option<TcpStream>,
}

impl TcpClient {
    /// Create a disconnected client.
    pub fn new(config: TcpClientConfig) -> Self {
        Self {
            config,
            stream: None,
        }
    }

    /// Connect to the emulator.
    ///
    /// The emulator sends its boot banner immediately; call
    /// [`read_until_prompt`](Self::read_until_prompt) next to consume it.
    pub async fn connect(&mut self) -> Result<(), ClientError> {
        let connect = TcpStream::connect(self.config.server_addr);
        let stream = timeout(self.config.timeout, connect)
            .await
            .map_err(|_| ClientError::Timeout(self.config.timeout.as_millis() as u64))??;

        stream.set_nodelay(true)?;
        debug!("Connected to {}", self.config.server_addr);
        self.stream = Some(stream);
        Ok(())
    }

    /// Whether the client currently holds a connection.
    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// Send one command line and read the first prompted response part.
    pub async fn command(&mut self, line: &str) -> Result<String, ClientError> {
        self.send_line(line).await?;
        self.read_until_prompt().await
    }

    /// Write a `\r`-terminated command line.
    pub async fn send_line(&mut self, line: &str) -> Result<(), ClientError> {
        let stream = self.stream.as_mut().ok_or(ClientError::NotConnected)?;
        stream.write_all(line.as_bytes()).await?;
        stream.write_all(b"\r").await?;
        Ok(())
    }

    /// Read until a prompt marker arrives, returning everything received up
    /// to and including it.
    pub async fn read_until_prompt(&mut self) -> Result<String, ClientError> {
        let stream = self.stream.as_mut().ok_or(ClientError::NotConnected)?;
        let deadline = self.config.timeout;

        let mut out = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            let read = timeout(deadline, stream.read(&mut byte))
                .await
                .map_err(|_| ClientError::Timeout(deadline.as_millis() as u64))??;
            if read == 0 {
                return Err(ClientError::ConnectionClosed);
            }
            out.push(byte[0]);
            if byte[0] == PROMPT as u8 {
                return Ok(String::from_utf8_lossy(&out).into_owned());
            }
        }
    }

    /// Close the connection.
    pub async fn close(&mut self) -> Result<(), ClientError> {
        if let Some(mut stream) = self.stream.take() {
            stream.shutdown().await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = TcpClientConfig::default();
        assert_eq!(config.server_addr.port(), DEFAULT_PORT);
        assert_eq!(config.timeout, Duration::from_millis(3000));
    }

    #[tokio::test]
    async fn test_operations_require_connection() {
        let mut client = TcpClient::new(TcpClientConfig::default());

        assert!(!client.is_connected());
        assert!(matches!(
            client.send_line("ATI").await,
            Err(ClientError::NotConnected)
        ));
        assert!(matches!(
            client.read_until_prompt().await,
            Err(ClientError::NotConnected)
        ));
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let mut client = TcpClient::new(TcpClientConfig::default());
        assert!(client.close().await.is_ok());
        assert!(client.close().await.is_ok());
    }
}
