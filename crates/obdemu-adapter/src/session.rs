//! Per-client session: configuration state plus command dispatch.
//!
//! A [`Session`] owns one client's [`SessionConfig`] and interprets its
//! command lines. Dispatch mutates the configuration first and builds the
//! reply second, so replies are always rendered under the state the command
//! itself established, the same ordering the physical adapter exhibits.
//!
//! Malformed input cannot fail dispatch: anything unrecognized, and any
//! recognized command with an out-of-range parameter, answers with the
//! single token `?`.

use tracing::debug;

use obdemu_core::SessionConfig;
use obdemu_core::constants::{
    BATTERY_VOLTAGE, DEVICE_DESCRIPTION, DEVICE_IDENTIFIER, ELM_VERSION, FRAME_PACING_DELAY,
    PROTOCOL_FOLLOW_UP_DELAY,
};
use obdemu_protocol::{Answer, Command, Reply};

use crate::table;

/// One client's interpreter session.
///
/// # Examples
///
/// ```
/// use obdemu_adapter::Session;
/// use obdemu_protocol::render;
///
/// let mut session = Session::new();
/// let reply = session.handle_line("ATH1");
///
/// assert!(session.config().headers);
/// assert_eq!(render(&reply.lines()[0].answer, session.config()), "OK\r\n>");
/// ```
#[derive(Debug, Default)]
pub struct Session {
    config: SessionConfig,
}

impl Session {
    /// Create a session with the power-on configuration defaults.
    pub fn new() -> Self {
        Self {
            config: SessionConfig::new(),
        }
    }

    /// The session's current configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Dispatch one complete command line.
    ///
    /// Classification is case-insensitive with the fixed precedence encoded
    /// in [`Command::parse`]; handlers mutate the configuration and return
    /// the logical reply, leaving formatting to the encoder.
    pub fn handle_line(&mut self, line: &str) -> Reply {
        debug!("received command: {line}");

        match Command::parse(line) {
            Command::Reset => Reply::single(Answer::literal(ELM_VERSION)).then(Answer::ok()),
            Command::PrintVersion => Reply::single(Answer::literal(ELM_VERSION)),
            Command::RestoreDefaults => {
                self.config.reset();
                Reply::ok()
            }
            Command::ProtocolNumber => {
                Reply::single(Answer::literal(self.config.protocol.id().to_string()))
                    .then(Answer::ok())
            }
            Command::DescribeProtocol => {
                Reply::single(Answer::literal(self.config.protocol.description()))
            }
            Command::DescribeProtocolNumber => {
                Reply::single(Answer::literal(format!("{:X}", self.config.protocol.id())))
            }
            Command::DeviceDescription => Reply::single(Answer::literal(DEVICE_DESCRIPTION)),
            Command::DeviceIdentifier => Reply::single(Answer::literal(DEVICE_IDENTIFIER)),
            Command::BatteryVoltage => Reply::single(Answer::literal(BATTERY_VOLTAGE)),
            Command::SelectAutoProtocol => {
                self.config.select_protocol(0);
                // The automatic search acknowledges first, then reports the
                // protocol it settled on after a short pause.
                Reply::ok().then_after(
                    PROTOCOL_FOLLOW_UP_DELAY,
                    Answer::literal(self.config.protocol.description()),
                )
            }
            Command::SelectProtocol(id) => {
                self.config.select_protocol(id);
                Reply::ok()
            }
            Command::SetTimeout(value) => {
                if (1..=255).contains(&value) {
                    self.config.timeout = value as u8;
                    Reply::ok()
                } else {
                    Reply::unsupported()
                }
            }
            Command::SetHeaders(on) => {
                self.config.headers = on;
                Reply::ok()
            }
            Command::SetAdaptiveTiming(on) => {
                self.config.adaptive_timing = on;
                Reply::ok()
            }
            Command::SetSpaces(on) => {
                self.config.spaces = on;
                Reply::ok()
            }
            Command::SetEcho(on) => {
                self.config.echo = on;
                Reply::ok()
            }
            Command::SetLinefeed(on) => {
                self.config.linefeed = on;
                Reply::ok()
            }
            Command::Query(token) => self.handle_query(&token),
        }
    }

    /// Resolve a diagnostic query token against the data table.
    fn handle_query(&self, token: &str) -> Reply {
        let Some(entry) = table::lookup(token) else {
            return Reply::unsupported();
        };

        let mut frames = entry.frames(self.config.headers).into_iter();
        let Some(first) = frames.next() else {
            return Reply::unsupported();
        };

        let mut reply = Reply::single(Answer::bytes(first));
        for frame in frames {
            reply = reply.then_after(FRAME_PACING_DELAY, Answer::bytes(frame));
        }
        reply
    }
}
