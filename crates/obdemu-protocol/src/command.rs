//! Command classification for the adapter's ASCII surface.
//!
//! Every complete line is classified into exactly one [`Command`]. Matching
//! is case-insensitive and follows a fixed precedence: exact `AT` commands
//! first, then the prefixed `AT` commands that carry an inline parameter,
//! and finally everything else becomes a [`Command::Query`] token to be
//! resolved against the diagnostic data table. The precedence is encoded in
//! the order of the match arms below; the prefixed forms are only reachable
//! after every exact form has failed, so `ATSP0` (which triggers the
//! automatic-search follow-up) can never be swallowed by the generic `ATSP`
//! parameter form.

/// A classified command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `ATZ`: full reset, answering the version banner then an
    /// acknowledgment.
    Reset,
    /// `ATI`: print the version banner.
    PrintVersion,
    /// `ATD`: restore the configuration defaults.
    RestoreDefaults,
    /// `ATPC`: report the current protocol number (decimal), then
    /// acknowledge.
    ProtocolNumber,
    /// `ATDP`: describe the current protocol.
    DescribeProtocol,
    /// `ATDPN`: report the current protocol number in hex.
    DescribeProtocolNumber,
    /// `AT@1`: device description.
    DeviceDescription,
    /// `AT@2`: device identifier.
    DeviceIdentifier,
    /// `ATRV`: battery voltage.
    BatteryVoltage,
    /// `ATSP0`: automatic protocol search; acknowledges, then reports the
    /// resolved protocol description as a paced follow-up.
    SelectAutoProtocol,
    /// `ATSP<n>`: select protocol by decimal id. The raw parsed value is
    /// carried as-is; range handling happens at dispatch.
    SelectProtocol(i64),
    /// `ATST<hh>`: set the response timeout from a hex value. The raw
    /// parsed value is carried as-is; the 1-255 validity check happens at
    /// dispatch.
    SetTimeout(u32),
    /// `ATH0`/`ATH1`: header visibility.
    SetHeaders(bool),
    /// `ATM0`/`ATM1`: adaptive timing.
    ///
    /// The emulated adapter's firmware maps `ATM0` to ENABLED and `ATM1` to
    /// disabled; the polarity is preserved here as observed on the wire.
    SetAdaptiveTiming(bool),
    /// `ATS0`/`ATS1`: space visibility.
    SetSpaces(bool),
    /// `ATE0`/`ATE1`: command echo.
    SetEcho(bool),
    /// `ATL0`/`ATL1`: linefeed mode.
    SetLinefeed(bool),
    /// Anything else: a diagnostic query token, resolved against the data
    /// table at dispatch time. A miss answers `?`.
    Query(String),
}

impl Command {
    /// Classify a complete command line.
    ///
    /// # Examples
    ///
    /// ```
    /// use obdemu_protocol::Command;
    ///
    /// assert_eq!(Command::parse("atz"), Command::Reset);
    /// assert_eq!(Command::parse("ATSP3"), Command::SelectProtocol(3));
    /// assert_eq!(Command::parse("0105"), Command::Query("0105".into()));
    /// ```
    pub fn parse(line: &str) -> Self {
        let cmd = line.to_ascii_uppercase();

        match cmd.as_str() {
            "ATZ" => Command::Reset,
            "ATI" => Command::PrintVersion,
            "ATD" => Command::RestoreDefaults,
            "ATPC" => Command::ProtocolNumber,
            "ATDP" => Command::DescribeProtocol,
            "ATDPN" => Command::DescribeProtocolNumber,
            "AT@1" => Command::DeviceDescription,
            "AT@2" => Command::DeviceIdentifier,
            "ATRV" => Command::BatteryVoltage,
            "ATSP0" => Command::SelectAutoProtocol,
            "ATH0" => Command::SetHeaders(false),
            "ATH1" => Command::SetHeaders(true),
            "ATM0" => Command::SetAdaptiveTiming(true),
            "ATM1" => Command::SetAdaptiveTiming(false),
            "ATS0" => Command::SetSpaces(false),
            "ATS1" => Command::SetSpaces(true),
            "ATE0" => Command::SetEcho(false),
            "ATE1" => Command::SetEcho(true),
            "ATL0" => Command::SetLinefeed(false),
            "ATL1" => Command::SetLinefeed(true),
            _ => Self::parse_prefixed(&cmd),
        }
    }

    /// Classify the prefixed parameter commands, falling through to a
    /// diagnostic query token.
    fn parse_prefixed(cmd: &str) -> Self {
        if let Some(rest) = cmd.strip_prefix("ATSP") {
            return Command::SelectProtocol(leading_decimal(rest));
        }
        if let Some(rest) = cmd.strip_prefix("ATST") {
            return Command::SetTimeout(leading_hex(rest));
        }
        Command::Query(cmd.to_string())
    }
}

/// Parse the leading decimal integer of `s`, `atoi`-style: an optional sign
/// followed by digits, stopping at the first non-digit. No digits parses
/// as 0.
fn leading_decimal(s: &str) -> i64 {
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };

    let mut value: i64 = 0;
    for c in digits.chars() {
        let Some(d) = c.to_digit(10) else { break };
        value = value.saturating_mul(10).saturating_add(i64::from(d));
    }
    sign * value
}

/// Parse the leading hexadecimal integer of `s`, stopping at the first
/// non-hex-digit. No digits parses as 0.
fn leading_hex(s: &str) -> u32 {
    let mut value: u32 = 0;
    for c in s.chars() {
        let Some(d) = c.to_digit(16) else { break };
        value = value.saturating_mul(16).saturating_add(d);
    }
    value
}
