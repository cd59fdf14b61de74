//! Resolved configuration values.
//!
//! Every validator produces a [`Value`], a closed set of shapes that a
//! flat string-keyed configuration can resolve to. Keeping the set closed
//! lets the resolver store heterogeneous fields in one map and lets
//! allow-list membership (`choices`) compare final values directly.

use serde::Serialize;

// ============================================================================
// Value
// ============================================================================

/// A typed configuration value produced by a validator.
///
/// Numbers are carried as `f64` throughout: ports, byte counts, and
/// converted durations all share one numeric representation, which keeps
/// unit conversion exact in the fractional cases (500ms expressed in
/// seconds is 0.5, not 0).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A string, possibly transformed (trimmed, case-folded).
    Str(String),
    /// A finite numeric value.
    Num(f64),
    /// A boolean.
    Bool(bool),
    /// A parsed JSON document.
    Json(serde_json::Value),
    /// A list of values, from the array validator.
    List(Vec<Value>),
}

impl Value {
    /// Returns the string content, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric content, if this is a number.
    #[must_use]
    pub const fn as_num(&self) -> Option<f64> {
        match self {
            Self::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean content, if this is a boolean.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the parsed JSON document, if this is JSON.
    #[must_use]
    pub const fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the list items, if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Num(n) => {
                // Whole numbers print without a trailing ".0" so defaults
                // and diagnostics read like the raw input ("3000", not
                // "3000.0").
                if n.is_finite() && n.fract() == 0.0 {
                    write!(f, "{n:.0}")
                } else {
                    write!(f, "{n}")
                }
            }
            Self::Bool(b) => write!(f, "{b}"),
            Self::Json(v) => write!(f, "{v}"),
            Self::List(items) => {
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Num(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Num(f64::from(value))
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Self::Num(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Num(f64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<&str>> for Value {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_number_display_has_no_fraction() {
        assert_eq!(Value::Num(3000.0).to_string(), "3000");
        assert_eq!(Value::Num(-42.0).to_string(), "-42");
    }

    #[test]
    fn test_fractional_number_display() {
        assert_eq!(Value::Num(0.5).to_string(), "0.5");
        assert_eq!(Value::Num(2.25).to_string(), "2.25");
    }

    #[test]
    fn test_string_display_is_verbatim() {
        assert_eq!(Value::Str("localhost".to_string()).to_string(), "localhost");
    }

    #[test]
    fn test_list_display_joins_with_commas() {
        let list = Value::from(vec!["a", "b", "c"]);
        assert_eq!(list.to_string(), "a,b,c");
    }

    #[test]
    fn test_json_display_is_compact() {
        let json = Value::Json(serde_json::json!({"a": 1}));
        assert_eq!(json.to_string(), r#"{"a":1}"#);
    }

    #[test]
    fn test_integer_conversions_share_numeric_repr() {
        assert_eq!(Value::from(8080_u16), Value::Num(8080.0));
        assert_eq!(Value::from(3000_i32), Value::Num(3000.0));
        assert_eq!(Value::from(0.5), Value::Num(0.5));
    }

    #[test]
    fn test_accessors_reject_other_shapes() {
        let num = Value::Num(1.0);
        assert_eq!(num.as_num(), Some(1.0));
        assert!(num.as_str().is_none());
        assert!(num.as_bool().is_none());
        assert!(num.as_json().is_none());
        assert!(num.as_list().is_none());
    }

    #[test]
    fn test_equality_across_shapes() {
        assert_eq!(Value::from("a"), Value::from("a"));
        assert_ne!(Value::from("1"), Value::from(1.0));
        assert_eq!(
            Value::from(vec!["x", "y"]),
            Value::List(vec![Value::from("x"), Value::from("y")])
        );
    }
}
