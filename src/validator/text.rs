//! Text validators: free-form strings, pattern matches, and closed choices.

use regex::Regex;

use crate::error::ParseError;
use crate::source::RawEnv;
use crate::validator::{FieldOptions, Validator};
use crate::value::Value;

// ============================================================================
// Strings
// ============================================================================

/// Validator for strings with optional normalization.
///
/// Transforms apply in a fixed order (trim, then lowercase, then
/// uppercase) before any length or pattern check, so constraints always
/// see the final value.
#[derive(Debug, Clone)]
pub struct StringValidator {
    options: FieldOptions,
    trim: bool,
    lowercase: bool,
    uppercase: bool,
    min_len: Option<usize>,
    max_len: Option<usize>,
    pattern: Option<Regex>,
}

/// Builds a string validator.
#[must_use]
pub fn string() -> StringValidator {
    StringValidator {
        options: FieldOptions::default(),
        trim: false,
        lowercase: false,
        uppercase: false,
        min_len: None,
        max_len: None,
        pattern: None,
    }
}

impl StringValidator {
    /// Strips leading and trailing whitespace.
    #[must_use]
    pub const fn trim(mut self) -> Self {
        self.trim = true;
        self
    }

    /// Lowercases the value.
    #[must_use]
    pub const fn lowercase(mut self) -> Self {
        self.lowercase = true;
        self
    }

    /// Uppercases the value (after lowercasing, when both are set).
    #[must_use]
    pub const fn uppercase(mut self) -> Self {
        self.uppercase = true;
        self
    }

    /// Requires at least `min` characters after transforms.
    #[must_use]
    pub const fn min_len(mut self, min: usize) -> Self {
        self.min_len = Some(min);
        self
    }

    /// Allows at most `max` characters after transforms.
    #[must_use]
    pub const fn max_len(mut self, max: usize) -> Self {
        self.max_len = Some(max);
        self
    }

    /// Requires the transformed value to match `pattern`.
    #[must_use]
    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }
}

impl Validator for StringValidator {
    fn kind(&self) -> &'static str {
        "string"
    }

    fn options(&self) -> &FieldOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut FieldOptions {
        &mut self.options
    }

    fn parse_raw(&self, raw: &str, field: &str, _source: &RawEnv) -> Result<Value, ParseError> {
        let mut value = raw.to_string();
        if self.trim {
            value = value.trim().to_string();
        }
        if self.lowercase {
            value = value.to_lowercase();
        }
        if self.uppercase {
            value = value.to_uppercase();
        }

        let length = value.chars().count();
        if let Some(min) = self.min_len {
            if length < min {
                return Err(ParseError::invalid(
                    field,
                    raw,
                    format!("at least {min} characters"),
                ));
            }
        }
        if let Some(max) = self.max_len {
            if length > max {
                return Err(ParseError::invalid(
                    field,
                    raw,
                    format!("at most {max} characters"),
                ));
            }
        }
        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(&value) {
                return Err(ParseError::invalid(
                    field,
                    raw,
                    format!("a string matching {pattern}"),
                ));
            }
        }
        Ok(Value::Str(value))
    }
}

// ============================================================================
// Pattern Matches
// ============================================================================

/// Validator requiring a caller-supplied pattern to match.
#[derive(Debug, Clone)]
pub struct RegexValidator {
    options: FieldOptions,
    pattern: Regex,
}

/// Builds a validator around a compiled pattern.
///
/// The pattern is required here, unlike [`string`], where it is one
/// optional constraint among several.
#[must_use]
pub fn matches(pattern: Regex) -> RegexValidator {
    RegexValidator {
        options: FieldOptions::default(),
        pattern,
    }
}

impl Validator for RegexValidator {
    fn kind(&self) -> &'static str {
        "regex"
    }

    fn options(&self) -> &FieldOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut FieldOptions {
        &mut self.options
    }

    fn parse_raw(&self, raw: &str, field: &str, _source: &RawEnv) -> Result<Value, ParseError> {
        if self.pattern.is_match(raw) {
            Ok(Value::Str(raw.to_string()))
        } else {
            Err(ParseError::invalid(
                field,
                raw,
                format!("a string matching {}", self.pattern),
            ))
        }
    }
}

// ============================================================================
// Closed Choices
// ============================================================================

/// Validator accepting only a closed list of string values.
#[derive(Debug, Clone)]
pub struct ChoiceValidator {
    options: FieldOptions,
    allowed: Vec<String>,
}

/// Builds a validator over a closed list of strings.
#[must_use]
pub fn one_of<I, T>(values: I) -> ChoiceValidator
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    ChoiceValidator {
        options: FieldOptions::default(),
        allowed: values.into_iter().map(Into::into).collect(),
    }
}

impl Validator for ChoiceValidator {
    fn kind(&self) -> &'static str {
        "choice"
    }

    fn options(&self) -> &FieldOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut FieldOptions {
        &mut self.options
    }

    fn parse_raw(&self, raw: &str, field: &str, _source: &RawEnv) -> Result<Value, ParseError> {
        if self.allowed.iter().any(|allowed| allowed == raw) {
            Ok(Value::Str(raw.to_string()))
        } else {
            Err(ParseError::invalid(
                field,
                raw,
                format!("one of: {}", self.allowed.join(", ")),
            ))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
