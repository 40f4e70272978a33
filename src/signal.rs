use std::{error::Error, fmt::Display};

#[derive(Debug)]
pub enum SignalError {
    ProtocolUnterminated,
    ScancodeMissing,
    MissingHexPrefix(String),
    InvalidHexCode(String)
}

impl Display for SignalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProtocolUnterminated => f.write_str("decode report has an unterminated protocol name"),
            Self::ScancodeMissing => f.write_str("decode report is missing a scancode"),
            Self::MissingHexPrefix(code) => f.write_fmt(format_args!("code \'{}\' is missing its 0x prefix", code)),
            Self::InvalidHexCode(code) => f.write_fmt(format_args!("code \'{}\' is not a valid hex scancode", code))
        }
    }
}

impl Error for SignalError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IrProtocol {
    Nec,
    NecX,
    Nec32,
    Rc5,
    Rc6,
    Sony,
    Jvc,
    Sanyo,
    Sharp,
    Other(String)
}

impl IrProtocol {
    fn from_name(name: &str) -> IrProtocol {
        return match name {
            "nec" => Self::Nec,
            "necx" => Self::NecX,
            "nec32" => Self::Nec32,
            "rc-5" => Self::Rc5,
            "rc-6" => Self::Rc6,
            "sony" => Self::Sony,
            "jvc" => Self::Jvc,
            "sanyo" => Self::Sanyo,
            "sharp" => Self::Sharp,
            _ => Self::Other(name.to_string())
        };
    }
}

impl Display for IrProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return match self {
            Self::Nec => f.write_str("NEC"),
            Self::NecX => f.write_str("NECX"),
            Self::Nec32 => f.write_str("NEC32"),
            Self::Rc5 => f.write_str("RC5"),
            Self::Rc6 => f.write_str("RC6"),
            Self::Sony => f.write_str("SONY"),
            Self::Jvc => f.write_str("JVC"),
            Self::Sanyo => f.write_str("SANYO"),
            Self::Sharp => f.write_str("SHARP"),
            Self::Other(name) => f.write_str(name)
        };
    }
}

/// One decoded signal as reported by the kernel lirc interface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IrSignal {
    pub protocol: IrProtocol,
    pub code: u64,
    pub repeat: bool
}

impl IrSignal {
    /// Parses one line of `ir-keytable -t` output, e.g.
    /// `1678.01: lirc protocol(nec): scancode = 0x1ea0cf3 repeat`.
    /// Lines that aren't lirc decode reports (EV_MSC/EV_KEY noise) yield
    /// Ok(None) and should be skipped.
    pub fn parse_decode_line(line: &str) -> Result<Option<IrSignal>, SignalError> {
        let rest = match line.split_once("lirc protocol(") {
            Some((_, rest)) => rest,
            None => return Ok(None)
        };

        let (protocol, rest) = match rest.split_once(')') {
            Some(parts) => parts,
            None => return Err(SignalError::ProtocolUnterminated)
        };

        let rest = match rest.split_once("scancode = ") {
            Some((_, rest)) => rest,
            None => return Err(SignalError::ScancodeMissing)
        };

        let mut fields = rest.split_whitespace();
        let code = match fields.next() {
            Some(token) => parse_hex(token)?,
            None => return Err(SignalError::ScancodeMissing)
        };
        let repeat = fields.any(|flag| { flag == "repeat" });

        return Ok(Some(IrSignal {
            protocol: IrProtocol::from_name(protocol),
            code: code,
            repeat: repeat
        }));
    }

    /// Whether this signal makes it into the history. Repeats and protocols
    /// other than NEC are logged but never recorded.
    pub fn is_recorded(&self) -> bool {
        return !self.repeat && self.protocol == IrProtocol::Nec;
    }

    pub fn hex_code(&self) -> String {
        return format!("0x{:X}", self.code);
    }
}

impl Display for IrSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.repeat {
            false => f.write_fmt(format_args!("{} {}", self.protocol, self.hex_code())),
            true => f.write_fmt(format_args!("{} {} (repeat)", self.protocol, self.hex_code()))
        }
    }
}

fn parse_hex(token: &str) -> Result<u64, SignalError> {
    let digits = match token.strip_prefix("0x").or_else(|| { token.strip_prefix("0X") }) {
        Some(d) => d,
        None => return Err(SignalError::MissingHexPrefix(token.to_string()))
    };

    return match u64::from_str_radix(digits, 16) {
        Ok(code) => Ok(code),
        Err(_) => Err(SignalError::InvalidHexCode(token.to_string()))
    };
}

/// Parses a code from the web remote's send path into the 32-bit scancode
/// the NEC transmitter takes.
pub fn parse_hex_code(text: &str) -> Result<u32, SignalError> {
    let code = parse_hex(text.trim())?;

    return match u32::try_from(code) {
        Ok(code) => Ok(code),
        Err(_) => Err(SignalError::InvalidHexCode(text.to_string()))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_decode_report() {
        let line = "1678.013021: lirc protocol(nec): scancode = 0x1ea0cf3";
        let signal = IrSignal::parse_decode_line(line).unwrap().unwrap();

        assert_eq!(signal.protocol, IrProtocol::Nec);
        assert_eq!(signal.code, 0x1EA0CF3);
        assert!(!signal.repeat);
    }

    #[test]
    fn parses_a_repeat_flag() {
        let line = "1678.123021: lirc protocol(nec): scancode = 0x1ea0cf3 repeat";
        let signal = IrSignal::parse_decode_line(line).unwrap().unwrap();

        assert!(signal.repeat);
        assert!(!signal.is_recorded());
    }

    #[test]
    fn skips_event_noise_lines() {
        let lines = [
            "1678.013066: event type EV_MSC(0x04): scancode = 0x1ea0cf3",
            "1678.013066: event type SYN_REPORT: (0x00)",
            ""
        ];

        for line in lines {
            assert_eq!(IrSignal::parse_decode_line(line).unwrap(), None);
        }
    }

    #[test]
    fn unknown_protocols_are_carried_through() {
        let line = "9.5: lirc protocol(imon): scancode = 0x2a";
        let signal = IrSignal::parse_decode_line(line).unwrap().unwrap();

        assert_eq!(signal.protocol, IrProtocol::Other(String::from("imon")));
        assert!(!signal.is_recorded());
        assert_eq!(signal.protocol.to_string(), "imon");
    }

    #[test]
    fn malformed_reports_are_errors() {
        let missing_scancode = "1678.0: lirc protocol(nec): something else";
        assert!(IrSignal::parse_decode_line(missing_scancode).is_err());

        let unterminated = "1678.0: lirc protocol(nec";
        assert!(IrSignal::parse_decode_line(unterminated).is_err());

        let bad_digits = "1678.0: lirc protocol(nec): scancode = 0xZZ";
        assert!(IrSignal::parse_decode_line(bad_digits).is_err());
    }

    #[test]
    fn only_nec_non_repeats_are_recorded() {
        let nec = IrSignal { protocol: IrProtocol::Nec, code: 0x20DF10EF, repeat: false };
        let sony = IrSignal { protocol: IrProtocol::Sony, code: 0x20DF10EF, repeat: false };

        assert!(nec.is_recorded());
        assert!(!sony.is_recorded());
    }

    #[test]
    fn send_codes_require_the_hex_prefix() {
        assert_eq!(parse_hex_code("0x1EA0DF2").unwrap(), 0x1EA0DF2);
        assert_eq!(parse_hex_code("0X20df10ef").unwrap(), 0x20DF10EF);
        assert!(matches!(parse_hex_code("1EA0DF2"), Err(SignalError::MissingHexPrefix(_))));
        assert!(matches!(parse_hex_code("0x"), Err(SignalError::InvalidHexCode(_))));
        assert!(matches!(parse_hex_code("0xNOPE"), Err(SignalError::InvalidHexCode(_))));
        assert!(matches!(parse_hex_code("0x1FFFFFFFF"), Err(SignalError::InvalidHexCode(_))));
    }

    #[test]
    fn signals_render_for_the_log() {
        let signal = IrSignal { protocol: IrProtocol::Nec, code: 0x1EAFE01, repeat: false };
        assert_eq!(signal.to_string(), "NEC 0x1EAFE01");

        let repeat = IrSignal { protocol: IrProtocol::Rc6, code: 0x0C, repeat: true };
        assert_eq!(repeat.to_string(), "RC6 0xC (repeat)");
    }
}
