//! Logical addresses, physical addresses, and byte values on the CEC bus.
//!
//! CEC uses three numeric shapes that keep showing up in frames and adapter
//! commands:
//!
//! - **Logical address** – a 4-bit role identifier (0 = TV, 4 = playback
//!   device, 15 = broadcast).  One hex digit in a frame header.
//! - **Physical address** – a 16-bit HDMI topology path, written either as
//!   four hex digits (`"1000"`) or dotted (`"1.0.0.0"`).  Two bytes on the
//!   wire.
//! - **Byte value** – any single frame byte (opcodes, key codes, vendor
//!   payload).  Canonical textual form is exactly two uppercase hex digits.
//!
//! Everything that reaches the frame builder goes through this module first,
//! so range errors surface here, before any adapter process is spawned.

use std::fmt;

use thiserror::Error;

/// Error type for address and byte normalization.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    /// A byte-like value fell outside `[0, 255]`.
    #[error("byte value out of range: {0} (expected 0-255)")]
    ByteOutOfRange(i64),

    /// A byte-like string could not be parsed as hex or decimal.
    #[error("unparsable byte value: {0:?}")]
    ByteUnparsable(String),
}

// ── Logical addresses ─────────────────────────────────────────────────────────

/// A 4-bit logical address identifying a device role on the bus.
///
/// Construction is lenient: [`LogicalAddress::clamp`] saturates any integer
/// into `[0, 15]` and never fails.  This mirrors the long-standing behaviour
/// of the control surface this crate replaces; callers that want strictness
/// should range-check before constructing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LogicalAddress(u8);

impl LogicalAddress {
    /// The TV, by CEC convention always logical address 0.
    pub const TV: LogicalAddress = LogicalAddress(0);
    /// The playback-device role this controller registers as by default.
    pub const PLAYBACK: LogicalAddress = LogicalAddress(4);
    /// The broadcast address.
    pub const BROADCAST: LogicalAddress = LogicalAddress(15);

    /// Saturates `v` into the valid nibble range `[0, 15]`.
    ///
    /// Negative values become 0, values above 15 become 15.  Never fails.
    pub fn clamp(v: i64) -> LogicalAddress {
        LogicalAddress(v.clamp(0, 15) as u8)
    }

    /// Returns the raw nibble value (guaranteed `<= 15`).
    pub fn value(self) -> u8 {
        self.0
    }
}

impl From<u8> for LogicalAddress {
    fn from(v: u8) -> Self {
        LogicalAddress::clamp(i64::from(v))
    }
}

impl fmt::Display for LogicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self.0)
    }
}

// ── Byte values ───────────────────────────────────────────────────────────────

/// Validates an integer as a frame byte.
///
/// # Errors
///
/// Returns [`AddressError::ByteOutOfRange`] if `v` is outside `[0, 255]`.
pub fn byte_from_i64(v: i64) -> Result<u8, AddressError> {
    u8::try_from(v).map_err(|_| AddressError::ByteOutOfRange(v))
}

/// Parses a byte from its textual forms: `"0x1A"`, `"1A"`, or decimal `"26"`.
///
/// Digit-only tokens read as decimal; anything else is tried as hex, with or
/// without a `0x` prefix.
///
/// # Errors
///
/// Returns [`AddressError::ByteUnparsable`] for empty or non-numeric input and
/// [`AddressError::ByteOutOfRange`] when the parsed value exceeds 255.
pub fn byte_from_str(s: &str) -> Result<u8, AddressError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(AddressError::ByteUnparsable(s.to_string()));
    }

    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        let v = trimmed
            .parse::<i64>()
            .map_err(|_| AddressError::ByteUnparsable(s.to_string()))?;
        return byte_from_i64(v);
    }

    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let v = i64::from_str_radix(digits, 16)
        .map_err(|_| AddressError::ByteUnparsable(s.to_string()))?;
    byte_from_i64(v)
}

/// Renders a byte in its canonical textual form: two uppercase hex digits.
pub fn byte_to_hex(b: u8) -> String {
    format!("{b:02X}")
}

// ── Physical addresses ────────────────────────────────────────────────────────

/// A 16-bit HDMI topology address, canonically four uppercase hex digits.
///
/// Parsing is deliberately forgiving: every accepted input form normalizes to
/// the same four-digit representation, and unrecognizable input falls back to
/// [`PhysicalAddress::DEFAULT`] (`"1000"`, the first input of the root
/// display) rather than failing.  Frames carry the two-byte form from
/// [`PhysicalAddress::to_bytes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhysicalAddress(u16);

impl PhysicalAddress {
    /// Fallback used when input is empty or unrecognizable.
    pub const DEFAULT: PhysicalAddress = PhysicalAddress(0x1000);

    /// Constructs from a raw 16-bit topology value.
    pub fn from_raw(v: u16) -> PhysicalAddress {
        PhysicalAddress(v)
    }

    /// Constructs from the two-byte wire representation (high byte first).
    pub fn from_bytes(pair: [u8; 2]) -> PhysicalAddress {
        PhysicalAddress(u16::from(pair[0]) << 8 | u16::from(pair[1]))
    }

    /// Parses any accepted textual form.
    ///
    /// Accepted inputs:
    /// - dotted form: `"1.0.0.0"` (each segment one hex nibble)
    /// - bare hex: `"1000"`, `"0x1000"`, short forms padded (`"100"` → `"0100"`)
    ///
    /// Empty or unrecognizable input yields [`PhysicalAddress::DEFAULT`].
    pub fn parse(input: &str) -> PhysicalAddress {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return PhysicalAddress::DEFAULT;
        }

        if trimmed.contains('.') {
            return Self::parse_dotted(trimmed).unwrap_or(PhysicalAddress::DEFAULT);
        }

        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        // Longer input keeps the least-significant four digits, matching the
        // fixed four-character canonical form.
        let tail: String = {
            let chars: Vec<char> = digits.chars().collect();
            let start = chars.len().saturating_sub(4);
            chars[start..].iter().collect()
        };

        match u16::from_str_radix(&tail, 16) {
            Ok(v) => PhysicalAddress(v),
            Err(_) => PhysicalAddress::DEFAULT,
        }
    }

    fn parse_dotted(s: &str) -> Option<PhysicalAddress> {
        let mut value: u16 = 0;
        let mut segments = 0;
        for part in s.split('.') {
            let nibble = u16::from_str_radix(part.trim(), 16).ok()?;
            if nibble > 0xF {
                return None;
            }
            value = value << 4 | nibble;
            segments += 1;
        }
        if segments == 4 {
            Some(PhysicalAddress(value))
        } else {
            None
        }
    }

    /// Returns the two-byte wire representation (high byte first).
    pub fn to_bytes(self) -> [u8; 2] {
        [(self.0 >> 8) as u8, (self.0 & 0xFF) as u8]
    }

    /// Returns the canonical four-uppercase-hex-digit form, e.g. `"1000"`.
    pub fn as_hex(self) -> String {
        format!("{:04X}", self.0)
    }

    /// Returns the dotted form used in adapter output, e.g. `"1.0.0.0"`.
    pub fn to_dotted(self) -> String {
        format!(
            "{:X}.{:X}.{:X}.{:X}",
            self.0 >> 12,
            self.0 >> 8 & 0xF,
            self.0 >> 4 & 0xF,
            self.0 & 0xF
        )
    }

    /// Returns the raw 16-bit value.
    pub fn raw(self) -> u16 {
        self.0
    }
}

impl fmt::Display for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_hex())
    }
}

// ── OSD text encoding ─────────────────────────────────────────────────────────

/// Encodes a display string as printable-ASCII bytes for OSD frames.
///
/// Characters outside the printable ASCII range (0x20–0x7E) are replaced with
/// `'?'`; the result is truncated to `max_len` bytes.
pub fn ascii_bytes(s: &str, max_len: usize) -> Vec<u8> {
    s.chars()
        .map(|c| {
            let b = c as u32;
            if (0x20..=0x7E).contains(&b) {
                b as u8
            } else {
                b'?'
            }
        })
        .take(max_len)
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── LogicalAddress ────────────────────────────────────────────────────────

    #[test]
    fn test_clamp_passes_through_valid_nibbles() {
        for v in 0..=15 {
            assert_eq!(LogicalAddress::clamp(v).value(), v as u8);
        }
    }

    #[test]
    fn test_clamp_saturates_out_of_range_values() {
        assert_eq!(LogicalAddress::clamp(-3).value(), 0);
        assert_eq!(LogicalAddress::clamp(99).value(), 15);
    }

    #[test]
    fn test_logical_address_displays_as_single_hex_digit() {
        assert_eq!(LogicalAddress::clamp(10).to_string(), "A");
        assert_eq!(LogicalAddress::TV.to_string(), "0");
    }

    // ── byte parsing ──────────────────────────────────────────────────────────

    #[test]
    fn test_byte_from_i64_accepts_full_range() {
        assert_eq!(byte_from_i64(0), Ok(0));
        assert_eq!(byte_from_i64(255), Ok(255));
    }

    #[test]
    fn test_byte_from_i64_rejects_out_of_range() {
        assert_eq!(byte_from_i64(300), Err(AddressError::ByteOutOfRange(300)));
        assert_eq!(byte_from_i64(-1), Err(AddressError::ByteOutOfRange(-1)));
    }

    #[test]
    fn test_byte_from_str_accepts_prefixed_hex() {
        assert_eq!(byte_from_str("0x1A"), Ok(0x1A));
        assert_eq!(byte_from_str("0XFF"), Ok(0xFF));
    }

    #[test]
    fn test_byte_from_str_accepts_bare_hex() {
        assert_eq!(byte_from_str("1A"), Ok(0x1A));
        assert_eq!(byte_from_str("ff"), Ok(0xFF));
    }

    #[test]
    fn test_byte_from_str_reads_digit_only_tokens_as_decimal() {
        assert_eq!(byte_from_str("26"), Ok(26));
        assert_eq!(byte_from_str("255"), Ok(255));
        assert_eq!(byte_from_str("300"), Err(AddressError::ByteOutOfRange(300)));
    }

    #[test]
    fn test_byte_from_str_rejects_garbage() {
        assert!(matches!(
            byte_from_str("zz"),
            Err(AddressError::ByteUnparsable(_))
        ));
        assert!(matches!(
            byte_from_str(""),
            Err(AddressError::ByteUnparsable(_))
        ));
    }

    #[test]
    fn test_byte_from_str_rejects_hex_overflow() {
        assert_eq!(
            byte_from_str("0x300"),
            Err(AddressError::ByteOutOfRange(0x300))
        );
    }

    #[test]
    fn test_byte_to_hex_is_two_uppercase_digits() {
        assert_eq!(byte_to_hex(0x00), "00");
        assert_eq!(byte_to_hex(0x0F), "0F");
        assert_eq!(byte_to_hex(0xAB), "AB");
    }

    // ── PhysicalAddress ───────────────────────────────────────────────────────

    #[test]
    fn test_physical_address_parses_dotted_form() {
        assert_eq!(PhysicalAddress::parse("1.0.0.0").as_hex(), "1000");
        assert_eq!(PhysicalAddress::parse("2.1.0.0").as_hex(), "2100");
    }

    #[test]
    fn test_physical_address_parses_bare_hex() {
        assert_eq!(PhysicalAddress::parse("1000").as_hex(), "1000");
        assert_eq!(PhysicalAddress::parse("0x2000").as_hex(), "2000");
    }

    #[test]
    fn test_physical_address_pads_short_input() {
        assert_eq!(PhysicalAddress::parse("100").as_hex(), "0100");
    }

    #[test]
    fn test_physical_address_truncates_long_input_to_low_digits() {
        assert_eq!(PhysicalAddress::parse("12345").as_hex(), "2345");
    }

    #[test]
    fn test_physical_address_falls_back_to_default() {
        assert_eq!(PhysicalAddress::parse(""), PhysicalAddress::DEFAULT);
        assert_eq!(PhysicalAddress::parse("not-an-addr"), PhysicalAddress::DEFAULT);
        assert_eq!(PhysicalAddress::parse("1.0.0"), PhysicalAddress::DEFAULT);
    }

    #[test]
    fn test_physical_address_round_trips_through_bytes() {
        for input in ["1.0.0.0", "2100", "0x3200", "FFFF"] {
            let addr = PhysicalAddress::parse(input);
            let rejoined = PhysicalAddress::from_bytes(addr.to_bytes());
            assert_eq!(addr, rejoined, "round trip failed for {input:?}");
            assert_eq!(addr.as_hex().len(), 4);
        }
    }

    #[test]
    fn test_physical_address_to_bytes_splits_high_low() {
        assert_eq!(PhysicalAddress::parse("1000").to_bytes(), [0x10, 0x00]);
        assert_eq!(PhysicalAddress::parse("2.1.0.0").to_bytes(), [0x21, 0x00]);
    }

    #[test]
    fn test_physical_address_dotted_rendering() {
        assert_eq!(PhysicalAddress::parse("1000").to_dotted(), "1.0.0.0");
        assert_eq!(PhysicalAddress::from_raw(0xABCD).to_dotted(), "A.B.C.D");
    }

    // ── ascii_bytes ───────────────────────────────────────────────────────────

    #[test]
    fn test_ascii_bytes_passes_printable_text() {
        assert_eq!(ascii_bytes("TV Pilot", 14), b"TV Pilot".to_vec());
    }

    #[test]
    fn test_ascii_bytes_replaces_non_printable_characters() {
        assert_eq!(ascii_bytes("a\tb\u{e4}", 14), b"a?b?".to_vec());
    }

    #[test]
    fn test_ascii_bytes_truncates_to_max_len() {
        assert_eq!(ascii_bytes("abcdefgh", 3), b"abc".to_vec());
    }
}
