//! Unit-bearing numeric validators: durations and byte sizes.
//!
//! Both parse a `<number><unit>?` grammar, convert the magnitude to a base
//! unit (milliseconds, bytes) through a fixed multiplier table, and then
//! convert that to the validator's configured output unit. The conversion
//! is floating point with no rounding, so 500ms expressed in seconds
//! resolves to 0.5.

use crate::error::ParseError;
use crate::source::RawEnv;
use crate::validator::{FieldOptions, Validator};
use crate::value::Value;

/// Splits a raw value into its numeric magnitude and trailing unit suffix.
///
/// The suffix is the trailing run of ASCII letters; everything before it
/// must parse as a finite number.
fn split_magnitude<'a>(raw: &'a str, field: &str, expected: &str) -> Result<(f64, &'a str), ParseError> {
    let trimmed = raw.trim();
    let split_at = trimmed
        .rfind(|c: char| !c.is_ascii_alphabetic())
        .map_or(0, |idx| idx + c_len(trimmed, idx));
    let (number, suffix) = trimmed.split_at(split_at);

    let magnitude: f64 = number
        .parse()
        .map_err(|_| ParseError::invalid(field, raw, expected.to_string()))?;
    if !magnitude.is_finite() {
        return Err(ParseError::invalid(field, raw, expected.to_string()));
    }
    Ok((magnitude, suffix))
}

/// Byte length of the character starting at `idx`.
fn c_len(s: &str, idx: usize) -> usize {
    s[idx..].chars().next().map_or(0, char::len_utf8)
}

// ============================================================================
// Durations
// ============================================================================

/// Time unit accepted and produced by the duration validator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DurationUnit {
    /// Milliseconds (the base unit and the default)
    #[default]
    Millis,
    /// Seconds
    Seconds,
    /// Minutes
    Minutes,
    /// Hours
    Hours,
    /// Days
    Days,
}

impl DurationUnit {
    /// Milliseconds per one of this unit.
    #[must_use]
    pub const fn millis(self) -> f64 {
        match self {
            Self::Millis => 1.0,
            Self::Seconds => 1_000.0,
            Self::Minutes => 60_000.0,
            Self::Hours => 3_600_000.0,
            Self::Days => 86_400_000.0,
        }
    }

    /// Maps a raw suffix to its unit. An empty suffix means milliseconds.
    #[must_use]
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "" | "ms" => Some(Self::Millis),
            "s" => Some(Self::Seconds),
            "m" => Some(Self::Minutes),
            "h" => Some(Self::Hours),
            "d" => Some(Self::Days),
            _ => None,
        }
    }
}

/// Validator for durations written as `<number><unit>?`.
///
/// Units are `ms`, `s`, `m`, `h`, `d`; a bare number means milliseconds.
/// The resolved value is expressed in the configured output unit
/// (milliseconds unless changed with [`unit`](DurationValidator::unit)).
#[derive(Debug, Clone)]
pub struct DurationValidator {
    options: FieldOptions,
    output: DurationUnit,
}

/// Builds a duration validator resolving to milliseconds.
#[must_use]
pub fn duration() -> DurationValidator {
    DurationValidator {
        options: FieldOptions::default(),
        output: DurationUnit::Millis,
    }
}

impl DurationValidator {
    /// Expresses resolved values in `unit` instead of milliseconds.
    #[must_use]
    pub const fn unit(mut self, unit: DurationUnit) -> Self {
        self.output = unit;
        self
    }
}

impl Validator for DurationValidator {
    fn kind(&self) -> &'static str {
        "duration"
    }

    fn options(&self) -> &FieldOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut FieldOptions {
        &mut self.options
    }

    fn parse_raw(&self, raw: &str, field: &str, _source: &RawEnv) -> Result<Value, ParseError> {
        let expected = "a duration like '500ms', '5s', '10m', '2h', or '1d'";
        let (magnitude, suffix) = split_magnitude(raw, field, expected)?;
        let unit = DurationUnit::from_suffix(suffix)
            .ok_or_else(|| ParseError::invalid(field, raw, expected))?;

        let millis = magnitude * unit.millis();
        Ok(Value::Num(millis / self.output.millis()))
    }
}

// ============================================================================
// Byte Sizes
// ============================================================================

/// Size unit accepted and produced by the byte-size validator.
///
/// Multipliers are binary (1024-based).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ByteUnit {
    /// Bytes (the base unit and the default)
    #[default]
    B,
    /// Kibibytes (1024 bytes)
    Kb,
    /// Mebibytes (1024²)
    Mb,
    /// Gibibytes (1024³)
    Gb,
    /// Tebibytes (1024⁴)
    Tb,
}

impl ByteUnit {
    /// Bytes per one of this unit.
    #[must_use]
    pub const fn bytes(self) -> f64 {
        match self {
            Self::B => 1.0,
            Self::Kb => 1024.0,
            Self::Mb => 1_048_576.0,
            Self::Gb => 1_073_741_824.0,
            Self::Tb => 1_099_511_627_776.0,
        }
    }

    /// Maps a raw suffix (case-insensitive) to its unit. An empty suffix
    /// means bytes.
    #[must_use]
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix.to_ascii_lowercase().as_str() {
            "" | "b" => Some(Self::B),
            "kb" => Some(Self::Kb),
            "mb" => Some(Self::Mb),
            "gb" => Some(Self::Gb),
            "tb" => Some(Self::Tb),
            _ => None,
        }
    }
}

/// Validator for byte sizes written as `<number><unit>?`.
///
/// Units are `b`, `kb`, `mb`, `gb`, `tb`, case-insensitive; a bare number
/// means bytes. The resolved value is expressed in the configured output
/// unit (bytes unless changed with [`unit`](ByteSizeValidator::unit)).
#[derive(Debug, Clone)]
pub struct ByteSizeValidator {
    options: FieldOptions,
    output: ByteUnit,
}

/// Builds a byte-size validator resolving to bytes.
#[must_use]
pub fn bytes() -> ByteSizeValidator {
    ByteSizeValidator {
        options: FieldOptions::default(),
        output: ByteUnit::B,
    }
}

impl ByteSizeValidator {
    /// Expresses resolved values in `unit` instead of bytes.
    #[must_use]
    pub const fn unit(mut self, unit: ByteUnit) -> Self {
        self.output = unit;
        self
    }
}

impl Validator for ByteSizeValidator {
    fn kind(&self) -> &'static str {
        "bytes"
    }

    fn options(&self) -> &FieldOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut FieldOptions {
        &mut self.options
    }

    fn parse_raw(&self, raw: &str, field: &str, _source: &RawEnv) -> Result<Value, ParseError> {
        let expected = "a byte size like '512', '64kb', '2MB', '1gb', or '1tb'";
        let (magnitude, suffix) = split_magnitude(raw, field, expected)?;
        let unit = ByteUnit::from_suffix(suffix)
            .ok_or_else(|| ParseError::invalid(field, raw, expected))?;

        let total = magnitude * unit.bytes();
        Ok(Value::Num(total / self.output.bytes()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> RawEnv {
        RawEnv::new()
    }

    #[test]
    fn test_duration_resolves_to_millis_by_default() {
        let validator = duration();
        for (raw, expected) in [
            ("5s", 5000.0),
            ("500ms", 500.0),
            ("10m", 600_000.0),
            ("2h", 7_200_000.0),
            ("1d", 86_400_000.0),
            ("250", 250.0),
        ] {
            let value = validator.parse(Some(raw), "D", &source()).unwrap();
            assert_eq!(value, Value::Num(expected), "raw input {raw:?}");
        }
    }

    #[test]
    fn test_duration_output_unit_conversion() {
        let validator = duration().unit(DurationUnit::Seconds);
        assert_eq!(
            validator.parse(Some("5s"), "D", &source()).unwrap(),
            Value::Num(5.0)
        );
        assert_eq!(
            validator.parse(Some("500ms"), "D", &source()).unwrap(),
            Value::Num(0.5)
        );
        assert_eq!(
            validator.parse(Some("2m"), "D", &source()).unwrap(),
            Value::Num(120.0)
        );
    }

    #[test]
    fn test_duration_accepts_fractional_magnitudes() {
        let validator = duration();
        assert_eq!(
            validator.parse(Some("1.5s"), "D", &source()).unwrap(),
            Value::Num(1500.0)
        );
    }

    #[test]
    fn test_duration_rejects_unknown_units_and_garbage() {
        let validator = duration();
        for raw in ["5x", "s5", "five", "", "5 s", "5S", "1w"] {
            assert!(
                validator.parse_raw(raw, "D", &source()).is_err(),
                "raw input {raw:?} should fail"
            );
        }
    }

    #[test]
    fn test_bytes_resolves_to_bytes_by_default() {
        let validator = bytes();
        for (raw, expected) in [
            ("512", 512.0),
            ("512b", 512.0),
            ("64kb", 65_536.0),
            ("2MB", 2_097_152.0),
            ("1gb", 1_073_741_824.0),
            ("1tb", 1_099_511_627_776.0),
        ] {
            let value = validator.parse(Some(raw), "B", &source()).unwrap();
            assert_eq!(value, Value::Num(expected), "raw input {raw:?}");
        }
    }

    #[test]
    fn test_bytes_suffix_is_case_insensitive() {
        let validator = bytes();
        for raw in ["2mb", "2MB", "2Mb", "2mB"] {
            let value = validator.parse(Some(raw), "B", &source()).unwrap();
            assert_eq!(value, Value::Num(2_097_152.0), "raw input {raw:?}");
        }
    }

    #[test]
    fn test_bytes_output_unit_conversion() {
        let validator = bytes().unit(ByteUnit::Mb);
        assert_eq!(
            validator.parse(Some("2MB"), "B", &source()).unwrap(),
            Value::Num(2.0)
        );
        // 512kb in mebibytes is fractional; nothing rounds it away.
        assert_eq!(
            validator.parse(Some("512kb"), "B", &source()).unwrap(),
            Value::Num(0.5)
        );
    }

    #[test]
    fn test_bytes_rejects_unknown_units_and_garbage() {
        let validator = bytes();
        for raw in ["2pb", "mb2", "big", "", "2 mb"] {
            assert!(
                validator.parse_raw(raw, "B", &source()).is_err(),
                "raw input {raw:?} should fail"
            );
        }
    }

    #[test]
    fn test_scientific_magnitudes_parse() {
        // The trailing-letter split leaves "1e3" intact for the float parse.
        assert_eq!(
            duration().parse(Some("1e3"), "D", &source()).unwrap(),
            Value::Num(1000.0)
        );
    }
}
