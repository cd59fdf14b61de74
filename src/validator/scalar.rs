//! Numeric and boolean validators.

use crate::error::ParseError;
use crate::source::RawEnv;
use crate::validator::{FieldOptions, Validator};
use crate::value::Value;

// ============================================================================
// Numbers
// ============================================================================

/// Validator for numeric values.
///
/// Accepts decimals, negatives, and scientific notation; rejects the
/// non-finite spellings (`NaN`, `inf`) that a plain float parse would let
/// through.
#[derive(Debug, Clone)]
pub struct NumberValidator {
    options: FieldOptions,
    min: Option<f64>,
    max: Option<f64>,
    integer: bool,
}

/// Builds a number validator.
#[must_use]
pub fn num() -> NumberValidator {
    NumberValidator {
        options: FieldOptions::default(),
        min: None,
        max: None,
        integer: false,
    }
}

impl NumberValidator {
    /// Requires the value to be at least `min`.
    #[must_use]
    pub const fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Requires the value to be at most `max`.
    #[must_use]
    pub const fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Rejects values with a fractional part.
    #[must_use]
    pub const fn integer(mut self) -> Self {
        self.integer = true;
        self
    }
}

impl Validator for NumberValidator {
    fn kind(&self) -> &'static str {
        "number"
    }

    fn options(&self) -> &FieldOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut FieldOptions {
        &mut self.options
    }

    fn parse_raw(&self, raw: &str, field: &str, _source: &RawEnv) -> Result<Value, ParseError> {
        let parsed: f64 = raw
            .trim()
            .parse()
            .map_err(|_| ParseError::invalid(field, raw, "a number"))?;

        if !parsed.is_finite() {
            return Err(ParseError::invalid(field, raw, "a finite number"));
        }
        if self.integer && parsed.fract() != 0.0 {
            return Err(ParseError::invalid(field, raw, "an integer"));
        }
        if let Some(min) = self.min {
            if parsed < min {
                return Err(ParseError::invalid(field, raw, format!("a number >= {min}")));
            }
        }
        if let Some(max) = self.max {
            if parsed > max {
                return Err(ParseError::invalid(field, raw, format!("a number <= {max}")));
            }
        }
        Ok(Value::Num(parsed))
    }
}

// ============================================================================
// Booleans
// ============================================================================

/// Raw spellings accepted as `true`.
const TRUE_WORDS: [&str; 6] = ["1", "true", "t", "yes", "y", "on"];

/// Raw spellings accepted as `false`.
const FALSE_WORDS: [&str; 6] = ["0", "false", "f", "no", "n", "off"];

/// Validator for boolean values.
#[derive(Debug, Clone)]
pub struct BoolValidator {
    options: FieldOptions,
}

/// Builds a boolean validator.
#[must_use]
pub fn boolean() -> BoolValidator {
    BoolValidator {
        options: FieldOptions::default(),
    }
}

impl Validator for BoolValidator {
    fn kind(&self) -> &'static str {
        "boolean"
    }

    fn options(&self) -> &FieldOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut FieldOptions {
        &mut self.options
    }

    fn parse_raw(&self, raw: &str, field: &str, _source: &RawEnv) -> Result<Value, ParseError> {
        let lowered = raw.to_ascii_lowercase();
        if TRUE_WORDS.contains(&lowered.as_str()) {
            return Ok(Value::Bool(true));
        }
        if FALSE_WORDS.contains(&lowered.as_str()) {
            return Ok(Value::Bool(false));
        }
        Err(ParseError::invalid(
            field,
            raw,
            format!(
                "a boolean (one of: {}, {})",
                TRUE_WORDS.join(", "),
                FALSE_WORDS.join(", ")
            ),
        ))
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
    fn test_number_accepts_standard_literals() {
        let validator = num();
        for (raw, expected) in [
            ("42", 42.0),
            ("-3.5", -3.5),
            ("0", 0.0),
            ("1e3", 1000.0),
            ("2.5E-2", 0.025),
            (" 7 ", 7.0),
        ] {
            let value = validator.parse(Some(raw), "N", &source()).unwrap();
            assert_eq!(value, Value::Num(expected), "raw input {raw:?}");
        }
    }

    #[test]
    fn test_number_rejects_garbage() {
        let validator = num();
        for raw in ["abc", "12abc", "--5", " ", "0x10"] {
            assert!(
                validator.parse(Some(raw), "N", &source()).is_err(),
                "raw input {raw:?} should fail"
            );
        }
    }

    #[test]
    fn test_number_rejects_non_finite_spellings() {
        let validator = num();
        for raw in ["NaN", "nan", "inf", "-inf", "infinity"] {
            assert!(
                validator.parse(Some(raw), "N", &source()).is_err(),
                "raw input {raw:?} should fail"
            );
        }
    }

    #[test]
    fn test_integer_flag_rejects_fractional() {
        let validator = num().integer();
        assert!(validator.parse(Some("5"), "N", &source()).is_ok());
        assert!(validator.parse(Some("5.0"), "N", &source()).is_ok());
        assert!(validator.parse(Some("5.5"), "N", &source()).is_err());
    }

    #[test]
    fn test_number_bounds() {
        let validator = num().min(1.0).max(10.0);
        assert!(validator.parse(Some("1"), "N", &source()).is_ok());
        assert!(validator.parse(Some("10"), "N", &source()).is_ok());
        assert!(validator.parse(Some("0.99"), "N", &source()).is_err());
        assert!(validator.parse(Some("10.01"), "N", &source()).is_err());
    }

    #[test]
    fn test_boolean_true_spellings() {
        let validator = boolean();
        for raw in ["1", "true", "TRUE", "t", "yes", "Yes", "y", "on", "ON"] {
            let value = validator.parse(Some(raw), "B", &source()).unwrap();
            assert_eq!(value, Value::Bool(true), "raw input {raw:?}");
        }
    }

    #[test]
    fn test_boolean_false_spellings() {
        let validator = boolean();
        for raw in ["0", "false", "False", "f", "no", "n", "off", "OFF"] {
            let value = validator.parse(Some(raw), "B", &source()).unwrap();
            assert_eq!(value, Value::Bool(false), "raw input {raw:?}");
        }
    }

    #[test]
    fn test_boolean_rejects_everything_else() {
        let validator = boolean();
        for raw in ["2", "yeah", "enabled", "true ", "o"] {
            assert!(
                validator.parse(Some(raw), "B", &source()).is_err(),
                "raw input {raw:?} should fail"
            );
        }
    }
}
