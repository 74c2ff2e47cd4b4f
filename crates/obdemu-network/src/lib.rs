//! Transport layer for the obdemu ELM327 emulator.
//!
//! Exposes the emulated adapter over TCP, the way WiFi ELM327 clones do:
//! each accepted connection gets its own independent session, a boot banner,
//! and a line-framed command/response loop. A small [`TcpClient`] is
//! provided for integration tests and manual probing.

pub mod client;
pub mod server;

pub use client::{ClientError, TcpClient, TcpClientConfig};
pub use server::{Server, ServerConfig, ServerError, serve_connection};
