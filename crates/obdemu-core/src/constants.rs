//! Constants for the emulated ELM327 command surface.
//!
//! These values define the identity the emulator presents to diagnostic
//! client applications and the fixed timing/framing parameters of its
//! serial-style protocol. Clients such as Torque or RealDash key their
//! behavior off the version banner and the prompt marker, so changing these
//! values may break client compatibility.

use std::time::Duration;

// ============================================================================
// Device identity
// ============================================================================

/// Version banner reported by `ATZ`/`ATI` and printed at boot.
///
/// Diagnostic apps parse this string to decide which ELM327 feature set to
/// assume; v1.5 is the id reported by virtually every clone adapter.
pub const ELM_VERSION: &str = "ELM327 v1.5";

/// Device description reported by `AT@1`.
pub const DEVICE_DESCRIPTION: &str = "OBDEMU OBD-II Emulator";

/// Device identifier reported by `AT@2`.
pub const DEVICE_IDENTIFIER: &str = "OBDEMU";

/// Name advertised to the pairing/discovery layer at startup.
pub const DEFAULT_DEVICE_NAME: &str = "OBDEMU";

/// Battery voltage reported by `ATRV`.
///
/// The emulator has no ADC to sample, so it reports a healthy 12.6 V.
pub const BATTERY_VOLTAGE: &str = "12.6V";

// ============================================================================
// Framing
// ============================================================================

/// Prompt marker emitted after every response.
///
/// Clients treat the prompt as the end-of-response signal and will not send
/// the next command until they have seen it.
pub const PROMPT: char = '>';

/// Prompt sequence printed once at boot, before any command is received.
pub const INITIAL_PROMPT: &str = "> ";

/// Command line buffer capacity in bytes, including the terminator slot.
///
/// Input beyond `MAX_LINE_LENGTH - 1` bytes is silently discarded until the
/// next line terminator. Real adapters carry the same fixed-size buffer; a
/// truncated line is still dispatched, it is not an error.
pub const MAX_LINE_LENGTH: usize = 64;

// ============================================================================
// Session defaults
// ============================================================================

/// Default `ATST` timeout value (units of 4 ms on real hardware; stored and
/// reported only by the emulator).
pub const DEFAULT_TIMEOUT: u8 = 50;

// ============================================================================
// Response pacing
// ============================================================================

/// Delay before the protocol description that follows an `ATSP0`
/// acknowledgment.
pub const PROTOCOL_FOLLOW_UP_DELAY: Duration = Duration::from_millis(100);

/// Delay between successive frames of a multi-frame vehicle-info answer.
pub const FRAME_PACING_DELAY: Duration = Duration::from_millis(10);

// ============================================================================
// Transport
// ============================================================================

/// Default TCP port, matching the port convention of WiFi ELM327 adapters.
pub const DEFAULT_PORT: u16 = 35000;
