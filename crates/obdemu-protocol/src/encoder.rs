//! Response rendering under the current session configuration.
//!
//! The encoder turns a logical [`Answer`] into the exact byte sequence the
//! client sees: hex-pair formatting for data bytes, space suppression, the
//! configured line terminator, and the trailing prompt marker that signals
//! readiness for the next command.
//!
//! Rendering is a pure function of `(answer, config)`; it never mutates
//! state, so a reply produced by dispatch can be rendered under the
//! configuration as it stands after that dispatch, matching the physical
//! adapter, which formats from its live settings.

use obdemu_core::SessionConfig;
use obdemu_core::constants::{ELM_VERSION, INITIAL_PROMPT, PROMPT};

use crate::answer::Answer;

/// Render an answer into its wire form.
///
/// - Data bytes become two-digit uppercase hex pairs, space-separated.
/// - With spaces disabled, every interior space is removed, from hex pairs
///   and literal text alike.
/// - The terminator is `\r\n` in linefeed mode, bare `\r` otherwise, and is
///   always followed by the prompt marker.
///
/// # Examples
///
/// ```
/// use obdemu_core::SessionConfig;
/// use obdemu_protocol::{Answer, render};
///
/// let mut config = SessionConfig::new();
/// assert_eq!(render(&Answer::bytes([0x41, 0x05, 0x78]), &config), "41 05 78\r\n>");
///
/// config.spaces = false;
/// config.linefeed = false;
/// assert_eq!(render(&Answer::bytes([0x41, 0x05, 0x78]), &config), "410578\r>");
/// ```
pub fn render(answer: &Answer, config: &SessionConfig) -> String {
    let text = match answer {
        Answer::Literal(text) => text.clone(),
        Answer::Bytes(data) => hex_pairs(data),
    };

    let text = if config.spaces {
        text
    } else {
        text.replace(' ', "")
    };

    let terminator = if config.linefeed { "\r\n" } else { "\r" };
    format!("{text}{terminator}{PROMPT}")
}

/// Format bytes as space-separated two-digit uppercase hex pairs.
///
/// ```
/// use obdemu_protocol::hex_pairs;
///
/// assert_eq!(hex_pairs(&[0x2E, 0xE0]), "2E E0");
/// assert_eq!(hex_pairs(&[]), "");
/// ```
pub fn hex_pairs(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&format!("{byte:02X}"));
    }
    out
}

/// Wire form of the command echo: the raw line followed by CRLF.
///
/// Echo precedes dispatch, so it is emitted under the echo setting in force
/// when the line completed, not the one the line may be about to configure.
pub fn echo_line(line: &str) -> String {
    format!("{line}\r\n")
}

/// Boot banner sent once per session before any command: version string and
/// the initial prompt.
pub fn boot_banner() -> String {
    format!("{ELM_VERSION}\r\n{INITIAL_PROMPT}")
}
