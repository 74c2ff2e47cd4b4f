//! The emulated adapter: command dispatch and synthesized vehicle data.
//!
//! This crate owns the behavior of the device itself. [`Session`] holds one
//! client's configuration and turns classified command lines into replies;
//! [`table`] holds the static diagnostic data table representing the
//! synthesized vehicle.

pub mod session;
pub mod table;

pub use session::Session;
pub use table::{DiagnosticEntry, lookup};
