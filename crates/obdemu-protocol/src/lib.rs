//! Wire-level protocol for the obdemu ELM327 emulator.
//!
//! This crate covers everything between raw transport bytes and the logical
//! command/answer level: line framing, command classification, and response
//! rendering under the current session configuration. It knows nothing about
//! the synthesized vehicle data; that lives in `obdemu-adapter`.

pub mod answer;
pub mod codec;
pub mod command;
pub mod encoder;
pub mod framer;

pub use answer::{Answer, Reply, ResponseLine};
pub use codec::ElmCodec;
pub use command::Command;
pub use encoder::{boot_banner, echo_line, hex_pairs, render};
pub use framer::LineFramer;
