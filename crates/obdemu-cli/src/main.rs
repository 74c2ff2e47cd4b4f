//! obdemu - ELM327 OBD-II adapter emulator.
//!
//! Starts the TCP emulator so diagnostic client apps can connect as if to a
//! WiFi ELM327 adapter plugged into a vehicle. All vehicle data is
//! synthesized; see the adapter crate for the data table.

use anyhow::Context;
use clap::Parser;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

use obdemu_core::constants::{DEFAULT_DEVICE_NAME, DEFAULT_PORT, ELM_VERSION};
use obdemu_network::{Server, ServerConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to listen on for diagnostic clients
    #[arg(short, long, default_value_t = SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)))]
    listen: SocketAddr,

    /// Device name advertised to the pairing/discovery layer
    #[arg(long, default_value = DEFAULT_DEVICE_NAME)]
    device_name: String,

    /// Maximum number of simultaneous client connections
    #[arg(long, default_value_t = 100)]
    max_connections: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    info!("{ELM_VERSION} emulator starting");

    let config = ServerConfig {
        bind_addr: args.listen,
        device_name: args.device_name,
        max_connections: args.max_connections,
    };

    let server = Server::bind(config)
        .await
        .with_context(|| format!("failed to start emulator on {}", args.listen))?;

    server.run().await.context("emulator terminated")?;
    Ok(())
}
