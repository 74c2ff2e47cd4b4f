//! OBD protocol table and per-session adapter configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::DEFAULT_TIMEOUT;

/// OBD-II bus protocols selectable via `ATSP`, ids 1-9.
///
/// Id 0 ("automatic search") is not a variant: selecting it stores the CAN
/// default ([`ObdProtocol::Can11Bit500k`]) and flags the session as
/// auto-selected, which is the observable behavior of the emulated adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObdProtocol {
    /// SAE J1850 PWM (41.6 kbaud)
    J1850Pwm = 1,
    /// SAE J1850 VPW (10.4 kbaud)
    J1850Vpw = 2,
    /// ISO 9141-2
    Iso9141 = 3,
    /// ISO 14230-4 KWP, 5 baud init
    Iso14230Slow = 4,
    /// ISO 14230-4 KWP, fast init
    Iso14230Fast = 5,
    /// ISO 15765-4 CAN, 11 bit id, 500 kbaud
    Can11Bit500k = 6,
    /// ISO 15765-4 CAN, 29 bit id, 500 kbaud
    Can29Bit500k = 7,
    /// ISO 15765-4 CAN, 11 bit id, 250 kbaud
    Can11Bit250k = 8,
    /// ISO 15765-4 CAN, 29 bit id, 250 kbaud
    Can29Bit250k = 9,
}

impl ObdProtocol {
    /// Protocol the automatic search resolves to.
    pub const AUTO_DEFAULT: ObdProtocol = ObdProtocol::Can11Bit500k;

    /// Look up a protocol by its `ATSP` id.
    ///
    /// Returns `None` for 0 and for ids outside 1-9; callers decide how to
    /// fall back (the session falls back to the automatic search default).
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(ObdProtocol::J1850Pwm),
            2 => Some(ObdProtocol::J1850Vpw),
            3 => Some(ObdProtocol::Iso9141),
            4 => Some(ObdProtocol::Iso14230Slow),
            5 => Some(ObdProtocol::Iso14230Fast),
            6 => Some(ObdProtocol::Can11Bit500k),
            7 => Some(ObdProtocol::Can29Bit500k),
            8 => Some(ObdProtocol::Can11Bit250k),
            9 => Some(ObdProtocol::Can29Bit250k),
            _ => None,
        }
    }

    /// Numeric id as reported by `ATPC` (decimal) and `ATDPN` (hex).
    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// Fixed description as reported by `ATDP`.
    pub fn description(&self) -> &'static str {
        match self {
            ObdProtocol::J1850Pwm => "SAE J1850 PWM",
            ObdProtocol::J1850Vpw => "SAE J1850 VPW",
            ObdProtocol::Iso9141 => "ISO 9141-2",
            ObdProtocol::Iso14230Slow => "ISO 14230-4 KWP (5 baud init)",
            ObdProtocol::Iso14230Fast => "ISO 14230-4 KWP (fast init)",
            ObdProtocol::Can11Bit500k => "ISO 15765-4 CAN (11 bit, 500 kbaud)",
            ObdProtocol::Can29Bit500k => "ISO 15765-4 CAN (29 bit, 500 kbaud)",
            ObdProtocol::Can11Bit250k => "ISO 15765-4 CAN (11 bit, 250 kbaud)",
            ObdProtocol::Can29Bit250k => "ISO 15765-4 CAN (29 bit, 250 kbaud)",
        }
    }
}

impl fmt::Display for ObdProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Mutable adapter settings for one client session.
///
/// Created with documented defaults at session start, mutated only by the
/// command interpreter in direct response to `AT` configuration commands,
/// and restored wholesale by [`SessionConfig::reset`] (`ATD`). There is one
/// configuration per session; it is never shared between connections.
///
/// # Protocol invariant
///
/// The selected protocol and its label are always consistent: both are
/// mutated only through [`SessionConfig::select_protocol`], and the label is
/// derived rather than stored. Selecting the automatic search (id 0, or any
/// id outside 1-9) pins the effective protocol to the CAN default while the
/// label reads `AUTO`.
///
/// # Examples
///
/// ```
/// use obdemu_core::SessionConfig;
///
/// let mut config = SessionConfig::new();
/// assert_eq!(config.protocol_label(), "AUTO");
/// assert_eq!(config.protocol.id(), 6);
///
/// config.select_protocol(3);
/// assert_eq!(config.protocol_label(), "ISO 9141-2");
///
/// config.reset();
/// assert_eq!(config.protocol_label(), "AUTO");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Adaptive timing control (`ATM0`/`ATM1`).
    pub adaptive_timing: bool,

    /// Linefeed mode (`ATL0`/`ATL1`): responses end `\r\n` instead of `\r`.
    pub linefeed: bool,

    /// Header visibility (`ATH0`/`ATH1`): prepend the response-mode byte and
    /// echoed query id to diagnostic answers.
    pub headers: bool,

    /// Command echo (`ATE0`/`ATE1`): repeat each received line back to the
    /// client before answering it.
    pub echo: bool,

    /// Space visibility (`ATS0`/`ATS1`): keep interior spaces in responses.
    pub spaces: bool,

    /// Response timeout (`ATST`), stored and reported but not acted upon.
    pub timeout: u8,

    /// Effective bus protocol.
    pub protocol: ObdProtocol,

    /// Whether the protocol was chosen by automatic search (`ATSP0`).
    auto_protocol: bool,
}

impl SessionConfig {
    /// Create a configuration with the power-on defaults.
    pub fn new() -> Self {
        Self {
            adaptive_timing: true,
            linefeed: true,
            headers: false,
            echo: true,
            spaces: true,
            timeout: DEFAULT_TIMEOUT,
            protocol: ObdProtocol::AUTO_DEFAULT,
            auto_protocol: true,
        }
    }

    /// Restore every field to the power-on defaults (`ATD`).
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Select a bus protocol by `ATSP` id.
    ///
    /// Ids 1-9 select that protocol. Everything else (0, out of range,
    /// or a value recovered from unparsable input) selects the automatic
    /// search, which immediately resolves to the CAN default.
    pub fn select_protocol(&mut self, id: i64) {
        match u8::try_from(id).ok().and_then(ObdProtocol::from_id) {
            Some(protocol) => {
                self.protocol = protocol;
                self.auto_protocol = false;
            }
            None => {
                self.protocol = ObdProtocol::AUTO_DEFAULT;
                self.auto_protocol = true;
            }
        }
    }

    /// Label of the selected protocol: `AUTO` after an automatic search,
    /// otherwise the protocol's fixed description.
    pub fn protocol_label(&self) -> &'static str {
        if self.auto_protocol {
            "AUTO"
        } else {
            self.protocol.description()
        }
    }

    /// Whether the protocol was chosen by automatic search.
    pub fn is_auto_protocol(&self) -> bool {
        self.auto_protocol
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}
