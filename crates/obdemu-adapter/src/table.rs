//! Static diagnostic data table: the synthesized vehicle.
//!
//! Maps diagnostic query tokens (mode + identifier, e.g. `0105`) to fixed
//! response data. The table is immutable for the process lifetime; entries
//! hold raw payload bytes only, and the header-prefixed or header-suppressed
//! rendering is derived from them on demand so the two shapes can never
//! drift apart.
//!
//! Mode 01 entries answer with the response-mode byte `41` and the echoed
//! PID when headers are visible, and with the bare payload otherwise. Mode
//! 09 entries are stored as complete frames (response mode, identifier and
//! frame index included) and are rendered the same way under either header
//! setting, matching the emulated adapter.

/// Response-mode byte for mode 01 (current data) answers.
const CURRENT_DATA_RESPONSE: u8 = 0x41;

/// One entry of the diagnostic data table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticEntry {
    /// Mode 01 current-data value: echoed PID plus payload bytes.
    CurrentData {
        /// PID echoed back in the header-prefixed rendering.
        pid: u8,
        /// Payload bytes, identical under both header settings.
        payload: &'static [u8],
    },

    /// Mode 09 vehicle information: one or more complete response frames,
    /// rendered verbatim regardless of header visibility.
    VehicleInfo {
        /// Complete frames, in transmission order.
        frames: &'static [&'static [u8]],
    },
}

impl DiagnosticEntry {
    /// Resolve the response frames for this entry under the given header
    /// setting.
    ///
    /// The payload bytes never change with the header flag; only the
    /// prefix of a current-data frame does.
    ///
    /// # Examples
    ///
    /// ```
    /// use obdemu_adapter::lookup;
    ///
    /// let entry = lookup("0105").unwrap();
    /// assert_eq!(entry.frames(false), vec![vec![0x78]]);
    /// assert_eq!(entry.frames(true), vec![vec![0x41, 0x05, 0x78]]);
    /// ```
    pub fn frames(&self, headers: bool) -> Vec<Vec<u8>> {
        match self {
            DiagnosticEntry::CurrentData { pid, payload } => {
                let frame = if headers {
                    let mut frame = Vec::with_capacity(payload.len() + 2);
                    frame.push(CURRENT_DATA_RESPONSE);
                    frame.push(*pid);
                    frame.extend_from_slice(payload);
                    frame
                } else {
                    payload.to_vec()
                };
                vec![frame]
            }
            DiagnosticEntry::VehicleInfo { frames } => {
                frames.iter().map(|frame| frame.to_vec()).collect()
            }
        }
    }

    /// Whether this entry spans more than one response frame.
    pub fn is_multi_frame(&self) -> bool {
        matches!(self, DiagnosticEntry::VehicleInfo { frames } if frames.len() > 1)
    }
}

/// The synthesized vehicle, keyed by query token.
///
/// Supported-PID bitmaps advertise exactly the PIDs the table answers:
/// 05, 0A, 0C, 0D, 0F, 44, 5C and the extended C9.
static ENTRIES: &[(&str, DiagnosticEntry)] = &[
    // Mode 01: supported-PID bitmaps
    (
        "0100",
        DiagnosticEntry::CurrentData {
            pid: 0x00,
            payload: &[0x08, 0x5A, 0x00, 0x00],
        },
    ),
    (
        "0120",
        DiagnosticEntry::CurrentData {
            pid: 0x20,
            payload: &[0x00, 0x00, 0x00, 0x00],
        },
    ),
    (
        "0140",
        DiagnosticEntry::CurrentData {
            pid: 0x40,
            payload: &[0x10, 0x00, 0x00, 0x10],
        },
    ),
    (
        "0160",
        DiagnosticEntry::CurrentData {
            pid: 0x60,
            payload: &[0x00, 0x00, 0x00, 0x00],
        },
    ),
    (
        "0180",
        DiagnosticEntry::CurrentData {
            pid: 0x80,
            payload: &[0x00, 0x00, 0x00, 0x00],
        },
    ),
    (
        "01A0",
        DiagnosticEntry::CurrentData {
            pid: 0xA0,
            payload: &[0x00, 0x00, 0x00, 0x00],
        },
    ),
    (
        "01C0",
        DiagnosticEntry::CurrentData {
            pid: 0xC0,
            payload: &[0x00, 0x80, 0x00, 0x00],
        },
    ),
    // Mode 01: live values
    // Coolant temperature 80 °C (A - 40)
    (
        "0105",
        DiagnosticEntry::CurrentData {
            pid: 0x05,
            payload: &[0x78],
        },
    ),
    // Fuel pressure 3.0 bar (A * 3 kPa)
    (
        "010A",
        DiagnosticEntry::CurrentData {
            pid: 0x0A,
            payload: &[0x01],
        },
    ),
    // Engine speed 3000 rpm ((A*256 + B) / 4)
    (
        "010C",
        DiagnosticEntry::CurrentData {
            pid: 0x0C,
            payload: &[0x2E, 0xE0],
        },
    ),
    // Vehicle speed 60 km/h
    (
        "010D",
        DiagnosticEntry::CurrentData {
            pid: 0x0D,
            payload: &[0x3C],
        },
    ),
    // Intake air temperature 27 °C (A - 40)
    (
        "010F",
        DiagnosticEntry::CurrentData {
            pid: 0x0F,
            payload: &[0x43],
        },
    ),
    // Commanded equivalence ratio for AFR 13.2 ((A*256 + B) / 32768)
    (
        "0144",
        DiagnosticEntry::CurrentData {
            pid: 0x44,
            payload: &[0x72, 0xF3],
        },
    ),
    // Engine oil temperature 90 °C (A - 40)
    (
        "015C",
        DiagnosticEntry::CurrentData {
            pid: 0x5C,
            payload: &[0x82],
        },
    ),
    // Extended PID: oil pressure 300 kPa
    (
        "01C9",
        DiagnosticEntry::CurrentData {
            pid: 0xC9,
            payload: &[0x01],
        },
    ),
    // Mode 09: vehicle information
    (
        "0900",
        DiagnosticEntry::VehicleInfo {
            frames: &[&[0x49, 0x00, 0xFF, 0xFF, 0xFF, 0xFF]],
        },
    ),
    // VIN 1HGCM82633A004352, three frames with running frame-index bytes
    (
        "0901",
        DiagnosticEntry::VehicleInfo {
            frames: &[
                &[0x49, 0x01, 0x01, 0x31, 0x48, 0x47, 0x43, 0x4D, 0x38, 0x32],
                &[0x49, 0x01, 0x02, 0x36, 0x33, 0x33, 0x41, 0x30, 0x30, 0x34],
                &[0x49, 0x01, 0x03, 0x33, 0x35, 0x32],
            ],
        },
    ),
    // Calibration ID "CALID1234"
    (
        "0902",
        DiagnosticEntry::VehicleInfo {
            frames: &[&[
                0x49, 0x02, 0x43, 0x41, 0x4C, 0x49, 0x44, 0x31, 0x32, 0x33, 0x34,
            ]],
        },
    ),
    // Calibration verification number
    (
        "0903",
        DiagnosticEntry::VehicleInfo {
            frames: &[&[0x49, 0x03, 0x12, 0x34, 0x56, 0x78]],
        },
    ),
    // In-use performance tracking
    (
        "0904",
        DiagnosticEntry::VehicleInfo {
            frames: &[&[0x49, 0x04, 0x56, 0x78, 0x90, 0xAB]],
        },
    ),
    // ECU name "ECU123456"
    (
        "0906",
        DiagnosticEntry::VehicleInfo {
            frames: &[&[
                0x49, 0x06, 0x45, 0x43, 0x55, 0x31, 0x32, 0x33, 0x34, 0x35, 0x36,
            ]],
        },
    ),
];

/// Look up a diagnostic query token, case-insensitively.
///
/// Returns `None` for unknown tokens; the interpreter answers those with
/// `?`.
pub fn lookup(token: &str) -> Option<&'static DiagnosticEntry> {
    ENTRIES
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(token))
        .map(|(_, entry)| entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert!(lookup("01a0").is_some());
        assert!(lookup("01A0").is_some());
        assert!(lookup("0901").is_some());
    }

    #[test]
    fn test_lookup_miss() {
        assert!(lookup("ZZZZ").is_none());
        assert!(lookup("0199").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_current_data_header_renderings() {
        let entry = lookup("0100").unwrap();

        assert_eq!(entry.frames(false), vec![vec![0x08, 0x5A, 0x00, 0x00]]);
        assert_eq!(
            entry.frames(true),
            vec![vec![0x41, 0x00, 0x08, 0x5A, 0x00, 0x00]]
        );
    }

    #[test]
    fn test_header_flag_never_changes_payload() {
        for (token, entry) in ENTRIES {
            let bare = entry.frames(false);
            let prefixed = entry.frames(true);

            assert_eq!(bare.len(), prefixed.len(), "frame count for {token}");
            for (bare_frame, prefixed_frame) in bare.iter().zip(&prefixed) {
                // The header-suppressed frame is always a suffix of the
                // header-prefixed one.
                assert!(
                    prefixed_frame.ends_with(bare_frame),
                    "payload drifted for {token}"
                );
            }
        }
    }

    #[test]
    fn test_vehicle_info_ignores_header_flag() {
        let entry = lookup("0902").unwrap();
        assert_eq!(entry.frames(false), entry.frames(true));
    }

    #[test]
    fn test_vin_frames_carry_running_index() {
        let entry = lookup("0901").unwrap();
        let frames = entry.frames(false);

        assert_eq!(frames.len(), 3);
        for (i, frame) in frames.iter().enumerate() {
            assert_eq!(&frame[..2], &[0x49, 0x01]);
            assert_eq!(frame[2], (i + 1) as u8);
        }

        // The frame payloads concatenate to the full VIN.
        let vin: Vec<u8> = frames.iter().flat_map(|f| f[3..].to_vec()).collect();
        assert_eq!(String::from_utf8(vin).unwrap(), "1HGCM82633A004352");
    }

    #[test]
    fn test_multi_frame_detection() {
        assert!(lookup("0901").unwrap().is_multi_frame());
        assert!(!lookup("0900").unwrap().is_multi_frame());
        assert!(!lookup("0105").unwrap().is_multi_frame());
    }
}
