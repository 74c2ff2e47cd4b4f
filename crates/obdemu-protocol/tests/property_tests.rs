//! Property-based tests for the wire layer.
//!
//! These tests use proptest to generate arbitrary byte streams and command
//! lines and verify that the framing and rendering invariants hold across
//! the whole input space, not just the hand-picked cases in the unit tests.

use proptest::prelude::*;

use obdemu_core::SessionConfig;
use obdemu_core::constants::MAX_LINE_LENGTH;
use obdemu_protocol::{Answer, Command, LineFramer, hex_pairs, render};

/// Strategy for arbitrary transport byte streams, terminator bytes included.
fn byte_stream() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..512)
}

/// Strategy for printable ASCII command lines without terminators.
fn command_line() -> impl Strategy<Value = String> {
    prop::string::string_regex("[ -~]{0,80}").expect("failed to create command line strategy")
}

/// Strategy for arbitrary data payloads.
fn payload() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..32)
}

proptest! {
    /// Property: no framed line ever exceeds the buffer's content capacity,
    /// and no framed line ever contains a terminator byte.
    #[test]
    fn prop_framer_bounds_line_length(stream in byte_stream()) {
        let mut framer = LineFramer::new();

        for byte in stream {
            if let Some(line) = framer.feed(byte) {
                // Length in characters: invalid bytes widen to a multi-byte
                // replacement character, but each still came from one
                // buffered byte.
                prop_assert!(line.chars().count() <= MAX_LINE_LENGTH - 1);
                prop_assert!(!line.contains('\r'));
                prop_assert!(!line.contains('\n'));
                prop_assert!(!line.is_empty());
            }
        }
    }

    /// Property: splitting a stream at any point never changes the framed
    /// lines; framing is independent of transport segmentation.
    #[test]
    fn prop_framer_segmentation_independent(
        stream in byte_stream(),
        split in any::<prop::sample::Index>(),
    ) {
        let collect = |chunks: &[&[u8]]| -> Vec<String> {
            let mut framer = LineFramer::new();
            let mut lines = Vec::new();
            for chunk in chunks {
                for &byte in *chunk {
                    if let Some(line) = framer.feed(byte) {
                        lines.push(line);
                    }
                }
            }
            lines
        };

        let at = split.index(stream.len() + 1).min(stream.len());
        let (head, tail) = stream.split_at(at);

        prop_assert_eq!(collect(&[stream.as_slice()]), collect(&[head, tail]));
    }

    /// Property: classification is total; any line yields a command, and
    /// unrecognized lines come back as uppercase query tokens.
    #[test]
    fn prop_parse_is_total(line in command_line()) {
        let command = Command::parse(&line);
        if let Command::Query(token) = command {
            prop_assert_eq!(token, line.to_ascii_uppercase());
        }
    }

    /// Property: every rendered answer ends with the prompt marker under
    /// every combination of formatting flags.
    #[test]
    fn prop_render_always_ends_with_prompt(
        data in payload(),
        spaces in any::<bool>(),
        linefeed in any::<bool>(),
    ) {
        let mut config = SessionConfig::new();
        config.spaces = spaces;
        config.linefeed = linefeed;

        let rendered = render(&Answer::bytes(data), &config);
        prop_assert!(rendered.ends_with('>'));

        let terminator = if linefeed { "\r\n>" } else { "\r>" };
        prop_assert!(rendered.ends_with(terminator));
    }

    /// Property: space suppression only removes spaces; the hex digits and
    /// their order are untouched, so re-enabling spaces is lossless.
    #[test]
    fn prop_space_suppression_preserves_digits(data in payload()) {
        let mut config = SessionConfig::new();
        let answer = Answer::bytes(data);

        let spaced = render(&answer, &config);
        config.spaces = false;
        let bare = render(&answer, &config);

        prop_assert_eq!(spaced.replace(' ', ""), bare);
    }

    /// Property: hex pair rendering round-trips back to the original bytes.
    #[test]
    fn prop_hex_pairs_roundtrip(data in payload()) {
        let rendered = hex_pairs(&data);

        let decoded: Vec<u8> = rendered
            .split_whitespace()
            .map(|pair| u8::from_str_radix(pair, 16).expect("invalid hex pair"))
            .collect();

        prop_assert_eq!(decoded, data);
    }
}
