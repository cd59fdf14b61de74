//! Structured validators: JSON documents, delimited arrays, and UUIDs.

use std::sync::Arc;

use uuid::{Uuid, Variant};

use crate::error::ParseError;
use crate::source::RawEnv;
use crate::validator::{FieldOptions, FieldValidator, Validator};
use crate::value::Value;

// ============================================================================
// JSON
// ============================================================================

/// A predicate over a parsed JSON document.
#[derive(Clone)]
struct JsonCheck(Arc<dyn Fn(&serde_json::Value) -> bool + Send + Sync>);

impl std::fmt::Debug for JsonCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("JsonCheck(..)")
    }
}

/// Validator for JSON values.
#[derive(Debug, Clone)]
pub struct JsonValidator {
    options: FieldOptions,
    schema: Option<JsonCheck>,
}

/// Builds a JSON validator.
#[must_use]
pub fn json() -> JsonValidator {
    JsonValidator {
        options: FieldOptions::default(),
        schema: None,
    }
}

impl JsonValidator {
    /// Requires the parsed document to satisfy `predicate`.
    #[must_use]
    pub fn schema(mut self, predicate: impl Fn(&serde_json::Value) -> bool + Send + Sync + 'static) -> Self {
        self.schema = Some(JsonCheck(Arc::new(predicate)));
        self
    }
}

impl Validator for JsonValidator {
    fn kind(&self) -> &'static str {
        "json"
    }

    fn options(&self) -> &FieldOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut FieldOptions {
        &mut self.options
    }

    fn parse_raw(&self, raw: &str, field: &str, _source: &RawEnv) -> Result<Value, ParseError> {
        let parsed: serde_json::Value = serde_json::from_str(raw)
            .map_err(|err| ParseError::invalid(field, raw, format!("valid JSON ({err})")))?;

        if let Some(check) = &self.schema {
            if !(check.0)(&parsed) {
                return Err(ParseError::SchemaMismatch {
                    field: field.to_string(),
                    value: raw.to_string(),
                });
            }
        }
        Ok(Value::Json(parsed))
    }
}

// ============================================================================
// Arrays
// ============================================================================

/// Validator for delimited lists.
///
/// The raw value is split on the separator; items are trimmed and empty
/// items dropped before any other rule runs. An optional sub-validator
/// checks each surviving item, and its failures carry the item index.
#[derive(Debug, Clone)]
pub struct ArrayValidator {
    options: FieldOptions,
    separator: String,
    item: Option<Box<FieldValidator>>,
    min_items: Option<usize>,
    max_items: Option<usize>,
    unique: bool,
}

/// Builds an array validator splitting on commas.
#[must_use]
pub fn array() -> ArrayValidator {
    ArrayValidator {
        options: FieldOptions::default(),
        separator: ",".to_string(),
        item: None,
        min_items: None,
        max_items: None,
        unique: false,
    }
}

impl ArrayValidator {
    /// Splits on `separator` instead of commas.
    #[must_use]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Validates every item with `validator`.
    #[must_use]
    pub fn items(mut self, validator: impl Validator + Send + Sync + 'static) -> Self {
        self.item = Some(Box::new(FieldValidator::erase(validator)));
        self
    }

    /// Requires at least `min` items.
    #[must_use]
    pub const fn min_items(mut self, min: usize) -> Self {
        self.min_items = Some(min);
        self
    }

    /// Allows at most `max` items.
    #[must_use]
    pub const fn max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    /// Rejects duplicate items.
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

/// Rewraps an item failure so the diagnostic names the offending index.
fn item_error(err: &ParseError, field: &str, item: &str, index: usize) -> ParseError {
    let expected = match err {
        ParseError::Invalid { expected, .. } => format!("{expected} (item {index})"),
        ParseError::SchemaMismatch { .. } => {
            format!("JSON matching the schema check (item {index})")
        }
        ParseError::MissingRequired { .. } => format!("a non-empty item (item {index})"),
    };
    ParseError::invalid(field, item, expected)
}

impl Validator for ArrayValidator {
    fn kind(&self) -> &'static str {
        "array"
    }

    fn options(&self) -> &FieldOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut FieldOptions {
        &mut self.options
    }

    fn parse_raw(&self, raw: &str, field: &str, source: &RawEnv) -> Result<Value, ParseError> {
        let items: Vec<&str> = raw
            .split(self.separator.as_str())
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .collect();

        let mut values = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let value = match &self.item {
                Some(sub) => sub
                    .parse_raw(item, field, source)
                    .and_then(|parsed| {
                        sub.options()
                            .check_choices(&parsed, field)
                            .map(|()| parsed)
                    })
                    .map_err(|err| item_error(&err, field, item, index))?,
                None => Value::Str((*item).to_string()),
            };
            values.push(value);
        }

        if let Some(min) = self.min_items {
            if values.len() < min {
                return Err(ParseError::invalid(
                    field,
                    raw,
                    format!("at least {min} items"),
                ));
            }
        }
        if let Some(max) = self.max_items {
            if values.len() > max {
                return Err(ParseError::invalid(
                    field,
                    raw,
                    format!("at most {max} items"),
                ));
            }
        }
        if self.unique {
            for (index, value) in values.iter().enumerate() {
                if values[..index].contains(value) {
                    return Err(ParseError::invalid(
                        field,
                        raw,
                        format!("unique items (duplicate '{value}')"),
                    ));
                }
            }
        }
        Ok(Value::List(values))
    }
}

// ============================================================================
// UUIDs
// ============================================================================

/// Validator for hyphenated RFC 4122 UUIDs (versions 1 through 5).
///
/// Input case is ignored; the resolved value is normalized to lowercase.
#[derive(Debug, Clone)]
pub struct UuidValidator {
    options: FieldOptions,
}

/// Builds a UUID validator.
#[must_use]
pub fn uuid() -> UuidValidator {
    UuidValidator {
        options: FieldOptions::default(),
    }
}

/// Length of the canonical hyphenated form; other encodings (simple,
/// braced, URN) are rejected up front.
const HYPHENATED_LEN: usize = 36;

impl Validator for UuidValidator {
    fn kind(&self) -> &'static str {
        "uuid"
    }

    fn options(&self) -> &FieldOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut FieldOptions {
        &mut self.options
    }

    fn parse_raw(&self, raw: &str, field: &str, _source: &RawEnv) -> Result<Value, ParseError> {
        let expected = "a hyphenated RFC 4122 UUID (versions 1-5)";
        if raw.len() != HYPHENATED_LEN {
            return Err(ParseError::invalid(field, raw, expected));
        }
        let parsed =
            Uuid::try_parse(raw).map_err(|_| ParseError::invalid(field, raw, expected))?;

        let version = parsed.get_version_num();
        if !(1..=5).contains(&version) || parsed.get_variant() != Variant::RFC4122 {
            return Err(ParseError::invalid(field, raw, expected));
        }
        Ok(Value::Str(parsed.hyphenated().to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================
