//! Tokio codec integrating the line framer with async transports.
//!
//! `ElmCodec` adapts [`LineFramer`] to tokio-util's [`Decoder`] so a
//! `Framed` TCP stream yields complete command lines, however the bytes were
//! segmented on the wire. The [`Encoder`] half is a pass-through: responses
//! are rendered to their final wire form by the encoder module (the
//! formatting depends on live session state, which a codec cannot see), so
//! all that remains here is writing the bytes out.
//!
//! Decoding never fails: oversized lines are truncated and blank lines are
//! absorbed by the framer, so every byte stream decodes cleanly.
//!
//! # Usage
//!
//! ```no_run
//! use futures::StreamExt;
//! use obdemu_protocol::ElmCodec;
//! use tokio::net::TcpStream;
//! use tokio_util::codec::Framed;
//!
//! # async fn example() -> std::io::Result<()> {
//! let stream = TcpStream::connect("127.0.0.1:35000").await?;
//! let mut framed = Framed::new(stream, ElmCodec::new());
//!
//! while let Some(line) = framed.next().await {
//!     println!("command: {}", line?);
//! }
//! # Ok(())
//! # }
//! ```

use bytes::{Buf, BytesMut};
use std::io;
use tokio_util::codec::{Decoder, Encoder};

use crate::framer::LineFramer;

/// Codec yielding command lines and writing pre-rendered response bytes.
#[derive(Debug, Default)]
pub struct ElmCodec {
    framer: LineFramer,
}

impl ElmCodec {
    /// Create a codec with the default line capacity.
    pub fn new() -> Self {
        Self {
            framer: LineFramer::new(),
        }
    }
}

impl Decoder for ElmCodec {
    type Item = String;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> io::Result<Option<String>> {
        while !src.is_empty() {
            let byte = src[0];
            src.advance(1);
            if let Some(line) = self.framer.feed(byte) {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }
}

impl Encoder<String> for ElmCodec {
    type Error = io::Error;

    fn encode(&mut self, item: String, dst: &mut BytesMut) -> io::Result<()> {
        dst.extend_from_slice(item.as_bytes());
        Ok(())
    }
}
