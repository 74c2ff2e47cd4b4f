//! Line framer for the serial-style command stream.
//!
//! Diagnostic clients terminate commands with `\r`, `\n` or `\r\n`, and a
//! single transport read may carry anything from a fragment of one command to
//! several complete ones. The framer accumulates bytes into a bounded buffer
//! and yields a completed line whenever a terminator arrives.
//!
//! # Framing rules
//!
//! - A terminator with a non-empty buffer completes the line and clears the
//!   buffer.
//! - A terminator with an empty buffer is a no-op, so `\r\n` pairs and blank
//!   lines never produce empty commands.
//! - Once the buffer is full, further bytes are dropped until the next
//!   terminator. The truncated line is still dispatched; overflow is a lossy
//!   policy, not an error.
//!
//! # Usage
//!
//! ```
//! use obdemu_protocol::LineFramer;
//!
//! let mut framer = LineFramer::new();
//!
//! for &byte in b"ATZ" {
//!     assert!(framer.feed(byte).is_none());
//! }
//! assert_eq!(framer.feed(b'\r').as_deref(), Some("ATZ"));
//!
//! // The trailing \n of a \r\n pair is absorbed silently.
//! assert!(framer.feed(b'\n').is_none());
//! ```

use obdemu_core::constants::MAX_LINE_LENGTH;

/// Accumulates transport bytes into complete command lines.
///
/// The buffer holds at most `capacity - 1` content bytes, mirroring a
/// fixed-size device buffer that reserves one slot for the terminator.
#[derive(Debug)]
pub struct LineFramer {
    buffer: Vec<u8>,
    max_content: usize,
}

impl LineFramer {
    /// Create a framer with the default line capacity
    /// ([`MAX_LINE_LENGTH`] bytes).
    pub fn new() -> Self {
        Self::with_capacity(MAX_LINE_LENGTH)
    }

    /// Create a framer holding at most `capacity - 1` content bytes per line.
    pub fn with_capacity(capacity: usize) -> Self {
        let max_content = capacity.saturating_sub(1);
        Self {
            buffer: Vec::with_capacity(max_content),
            max_content,
        }
    }

    /// Feed one transport byte, returning the completed line if this byte
    /// terminated one.
    ///
    /// Bytes that are not valid UTF-8 are replaced when the line is
    /// finalized; the command surface is ASCII, so anything else was garbage
    /// on the wire anyway.
    pub fn feed(&mut self, byte: u8) -> Option<String> {
        if byte == b'\r' || byte == b'\n' {
            if self.buffer.is_empty() {
                return None;
            }
            let line = String::from_utf8_lossy(&self.buffer).into_owned();
            self.buffer.clear();
            return Some(line);
        }

        if self.buffer.len() < self.max_content {
            self.buffer.push(byte);
        }
        None
    }

    /// Number of bytes currently buffered for the pending line.
    pub fn pending_len(&self) -> usize {
        self.buffer.len()
    }

    /// Discard any partially accumulated line.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for LineFramer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test helper: feed a byte slice, collecting completed lines.
    fn feed_all(framer: &mut LineFramer, bytes: &[u8]) -> Vec<String> {
        bytes.iter().filter_map(|&b| framer.feed(b)).collect()
    }

    #[test]
    fn test_crlf_terminated_line() {
        let mut framer = LineFramer::new();
        let lines = feed_all(&mut framer, b"ATZ\r\n");
        assert_eq!(lines, vec!["ATZ"]);
    }

    #[test]
    fn test_bare_cr_terminated_line() {
        let mut framer = LineFramer::new();
        let lines = feed_all(&mut framer, b"0105\r");
        assert_eq!(lines, vec!["0105"]);
    }

    #[test]
    fn test_bare_lf_terminated_line() {
        let mut framer = LineFramer::new();
        let lines = feed_all(&mut framer, b"ATDP\n");
        assert_eq!(lines, vec!["ATDP"]);
    }

    #[test]
    fn test_terminator_on_empty_buffer_is_noop() {
        let mut framer = LineFramer::new();
        let lines = feed_all(&mut framer, b"\r\n\r\r\n\n");
        assert!(lines.is_empty());
        assert_eq!(framer.pending_len(), 0);
    }

    #[test]
    fn test_multiple_lines_in_one_feed() {
        let mut framer = LineFramer::new();
        let lines = feed_all(&mut framer, b"ATE0\r0100\r\nATH1\r");
        assert_eq!(lines, vec!["ATE0", "0100", "ATH1"]);
    }

    #[test]
    fn test_byte_by_byte_accumulation() {
        let mut framer = LineFramer::new();

        assert!(framer.feed(b'A').is_none());
        assert!(framer.feed(b'T').is_none());
        assert!(framer.feed(b'I').is_none());
        assert_eq!(framer.pending_len(), 3);

        assert_eq!(framer.feed(b'\r').as_deref(), Some("ATI"));
        assert_eq!(framer.pending_len(), 0);
    }

    #[test]
    fn test_buffer_cleared_after_each_line() {
        let mut framer = LineFramer::new();

        let lines = feed_all(&mut framer, b"ATZ\r");
        assert_eq!(lines, vec!["ATZ"]);

        let lines = feed_all(&mut framer, b"ATI\r");
        assert_eq!(lines, vec!["ATI"]);
    }

    #[test]
    fn test_overflow_truncates_silently() {
        let mut framer = LineFramer::with_capacity(8);

        // 7 content bytes fit; everything past them is dropped.
        let lines = feed_all(&mut framer, b"ABCDEFGHIJKLMNOP\r");
        assert_eq!(lines, vec!["ABCDEFG"]);

        // The framer recovers cleanly on the next line.
        let lines = feed_all(&mut framer, b"ATZ\r");
        assert_eq!(lines, vec!["ATZ"]);
    }

    #[test]
    fn test_default_capacity_limit() {
        let mut framer = LineFramer::new();
        let long_line = vec![b'X'; 500];

        for &byte in &long_line {
            assert!(framer.feed(byte).is_none());
        }
        let line = framer.feed(b'\r').unwrap();

        assert_eq!(line.len(), MAX_LINE_LENGTH - 1);
    }

    #[test]
    fn test_non_utf8_bytes_are_replaced() {
        let mut framer = LineFramer::new();
        let lines = feed_all(&mut framer, &[b'A', 0xFF, b'Z', b'\r']);

        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with('A'));
        assert!(lines[0].ends_with('Z'));
    }

    #[test]
    fn test_clear_discards_partial_line() {
        let mut framer = LineFramer::new();
        feed_all(&mut framer, b"ATZ");

        framer.clear();

        assert_eq!(framer.pending_len(), 0);
        assert!(framer.feed(b'\r').is_none());
    }
}
