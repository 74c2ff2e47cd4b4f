//! Core vocabulary for the obdemu ELM327 emulator.
//!
//! This crate holds the constants, the OBD protocol table and the per-session
//! adapter configuration shared by the protocol and adapter crates.

pub mod constants;
pub mod types;

pub use types::{ObdProtocol, SessionConfig};
