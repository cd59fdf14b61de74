//! Error and diagnostic types.
//!
//! Field failures form a closed taxonomy ([`ParseError`]) so every handling
//! site pattern-matches a variant instead of probing for an error "kind".
//! The aggregate pass converts each failure into a [`Diagnostic`] with a
//! severity, which is what reporters consume.

use serde::Serialize;
use thiserror::Error;

use crate::mask;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes used by the default reporter.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (missing or invalid environment values)
    pub const CONFIG_ERROR: i32 = 2;
}

// ============================================================================
// Parse Errors
// ============================================================================

/// A single field's validation failure.
///
/// Custom validators return this type as well, so user-supplied parsers
/// are isolated by the aggregate pass exactly like the built-ins. A panic
/// inside a custom parser is deliberately not caught and unwinds out of
/// the pass.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The raw value was absent or empty and no default applied
    #[error("missing required value for '{field}'")]
    MissingRequired {
        /// Name of the missing field
        field: String,
    },

    /// The raw value was present but failed the field's validation rule
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    Invalid {
        /// Name of the field with the invalid value
        field: String,
        /// The raw value as provided
        value: String,
        /// Description of what was expected
        expected: String,
    },

    /// A parsed JSON value was rejected by the field's schema predicate
    #[error("JSON value for '{field}' was rejected by the schema check: got '{value}'")]
    SchemaMismatch {
        /// Name of the field
        field: String,
        /// The raw value as provided
        value: String,
    },
}

impl ParseError {
    /// Builds an [`ParseError::Invalid`] for `field`.
    ///
    /// Shorthand used throughout the validator catalogue; also convenient
    /// for custom validators.
    #[must_use]
    pub fn invalid(field: &str, value: &str, expected: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.to_string(),
            value: value.to_string(),
            expected: expected.into(),
        }
    }

    /// Name of the field this error belongs to.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::MissingRequired { field }
            | Self::Invalid { field, .. }
            | Self::SchemaMismatch { field, .. } => field,
        }
    }

    /// The offending raw value, when one was present.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::MissingRequired { .. } => None,
            Self::Invalid { value, .. } | Self::SchemaMismatch { value, .. } => Some(value),
        }
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

/// A single issue found during an aggregate validation pass.
///
/// Carried in batches to the reporter: one list of warnings, one list of
/// errors, never one call per field.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    /// Name of the field (or raw key, for extra-key issues)
    pub field: String,
    /// Description of the issue, without the offending value
    pub message: String,
    /// Display form of the offending value: truncated, and masked when
    /// the field is marked secret
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Severity level of the issue
    pub severity: Severity,
}

impl Diagnostic {
    /// Converts a field failure into a diagnostic.
    ///
    /// The offending value is prepared for display here, so raw secrets
    /// never reach a reporter.
    #[must_use]
    pub fn from_error(error: &ParseError, severity: Severity, secret: bool) -> Self {
        let message = match error {
            ParseError::MissingRequired { .. } => "missing required value".to_string(),
            ParseError::Invalid { expected, .. } => format!("expected {expected}"),
            ParseError::SchemaMismatch { .. } => "JSON value rejected by the schema check".to_string(),
        };
        Self {
            field: error.field().to_string(),
            message,
            value: error.value().map(|v| mask::display(v, secret)),
            severity,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {} at {}", prefix, self.message, self.field)?;
        if let Some(value) = &self.value {
            write!(f, " (got '{value}')")?;
        }
        Ok(())
    }
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - blocks the field from resolving and fails the pass
    Error,
    /// Warning - informational; the field still resolves where possible
    Warning,
}

// ============================================================================
// Tests
// ============================================================================
