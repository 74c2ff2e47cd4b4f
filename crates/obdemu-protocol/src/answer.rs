//! Logical answers, prior to wire formatting.
//!
//! Dispatching a command produces a [`Reply`]: one or more response lines,
//! each carrying a logical [`Answer`] and the pacing delay to apply before
//! sending it. Formatting (hex pairs, spacing, headers already folded in,
//! line terminator, prompt) is applied later by the encoder, so the same
//! reply can be rendered under whatever configuration is current when it is
//! written out.

use std::time::Duration;

/// Acknowledgment answer text.
pub const OK: &str = "OK";

/// Universal "not understood" answer text, used for unrecognized commands
/// and rejected parameters alike.
pub const UNSUPPORTED: &str = "?";

/// A logical answer: either literal text or a sequence of data bytes to be
/// rendered as hex pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Literal text, emitted as-is (modulo space suppression).
    Literal(String),
    /// Data bytes, rendered as two-digit uppercase hex pairs.
    Bytes(Vec<u8>),
}

impl Answer {
    /// Literal text answer.
    pub fn literal(text: impl Into<String>) -> Self {
        Answer::Literal(text.into())
    }

    /// Hex-rendered byte answer.
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Answer::Bytes(data.into())
    }

    /// The `OK` acknowledgment.
    pub fn ok() -> Self {
        Answer::Literal(OK.to_string())
    }

    /// The `?` answer.
    pub fn unsupported() -> Self {
        Answer::Literal(UNSUPPORTED.to_string())
    }
}

/// One physical response line within a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseLine {
    /// Delay to apply before sending this line. Zero for all but the paced
    /// follow-ups (protocol-search description, multi-frame continuation).
    pub delay_before: Duration,

    /// The logical answer carried by this line.
    pub answer: Answer,
}

impl ResponseLine {
    /// A line sent immediately.
    pub fn immediate(answer: Answer) -> Self {
        Self {
            delay_before: Duration::ZERO,
            answer,
        }
    }

    /// A line sent after `delay`.
    pub fn delayed(delay: Duration, answer: Answer) -> Self {
        Self {
            delay_before: delay,
            answer,
        }
    }
}

/// The complete result of dispatching one command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    lines: Vec<ResponseLine>,
}

impl Reply {
    /// A reply with a single, immediately sent answer.
    pub fn single(answer: Answer) -> Self {
        Self {
            lines: vec![ResponseLine::immediate(answer)],
        }
    }

    /// The bare `OK` acknowledgment.
    pub fn ok() -> Self {
        Self::single(Answer::ok())
    }

    /// The bare `?` answer.
    pub fn unsupported() -> Self {
        Self::single(Answer::unsupported())
    }

    /// Append an immediately sent answer.
    pub fn then(mut self, answer: Answer) -> Self {
        self.lines.push(ResponseLine::immediate(answer));
        self
    }

    /// Append an answer sent after `delay`.
    pub fn then_after(mut self, delay: Duration, answer: Answer) -> Self {
        self.lines.push(ResponseLine::delayed(delay, answer));
        self
    }

    /// The response lines, in send order.
    pub fn lines(&self) -> &[ResponseLine] {
        &self.lines
    }

    /// Number of physical response lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the reply carries no lines. Replies built through the public
    /// constructors always carry at least one.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl IntoIterator for Reply {
    type Item = ResponseLine;
    type IntoIter = std::vec::IntoIter<ResponseLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}

impl<'a> IntoIterator for &'a Reply {
    type Item = &'a ResponseLine;
    type IntoIter = std::slice::Iter<'a, ResponseLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
