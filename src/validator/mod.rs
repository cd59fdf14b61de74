//! The field validator contract and catalogue.
//!
//! Every validator pairs a type-specific parser with one shared option
//! surface: tiered defaults, an allow-list over final values, display
//! metadata, secret masking, deprecation, conditional requirement, and
//! warn-only downgrade. The [`Validator`] trait carries that surface as
//! provided methods, so the catalogue stays consistent by construction.
//!
//! Validators are built once, are immutable afterwards, and can be reused
//! across passes and field names.

pub mod net;
pub mod scalar;
pub mod structured;
pub mod text;
pub mod units;

pub use net::{email, host, port, url, EmailValidator, HostValidator, PortValidator, UrlValidator};
pub use scalar::{boolean, num, BoolValidator, NumberValidator};
pub use structured::{array, json, uuid, ArrayValidator, JsonValidator, UuidValidator};
pub use text::{matches, one_of, string, ChoiceValidator, RegexValidator, StringValidator};
pub use units::{bytes, duration, ByteSizeValidator, ByteUnit, DurationUnit, DurationValidator};

use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::ParseError;
use crate::resolve::Resolved;
use crate::source::RawEnv;
use crate::tier::Tier;
use crate::value::Value;

// ============================================================================
// Shared Options
// ============================================================================

/// A conditional-requirement predicate over the partially-resolved result.
///
/// Evaluated against the fields resolved so far, in declaration order, so
/// it may only depend on fields declared earlier in the schema.
#[derive(Clone)]
pub struct RequiredWhen(Arc<dyn Fn(&Resolved) -> bool + Send + Sync>);

impl RequiredWhen {
    /// Wraps a predicate.
    pub fn new(predicate: impl Fn(&Resolved) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(predicate))
    }

    /// Runs the predicate against the partial result.
    #[must_use]
    pub fn evaluate(&self, resolved: &Resolved) -> bool {
        (self.0)(resolved)
    }
}

impl std::fmt::Debug for RequiredWhen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RequiredWhen(..)")
    }
}

/// Options shared by every validator in the catalogue.
#[derive(Debug, Clone, Default)]
pub struct FieldOptions {
    /// Fallback when the value is absent and no tiered default applies
    pub default: Option<Value>,
    /// Fallback outside the production tier
    pub dev_default: Option<Value>,
    /// Fallback in the test tier
    pub test_default: Option<Value>,
    /// Allow-list checked against the final parsed value
    pub choices: Option<Vec<Value>>,
    /// Human description, surfaced in generated example text
    pub desc: Option<String>,
    /// Illustrative value for generated example text
    pub example: Option<String>,
    /// Documentation link for generated example text
    pub docs: Option<String>,
    /// Masks the value in every diagnostic
    pub secret: bool,
    /// Deprecation notice, warned whenever a value is supplied
    pub deprecated: Option<String>,
    /// Downgrades validation failure to a warning plus default substitution
    pub warn_only: bool,
    /// Makes the field required only when the predicate holds
    pub required_when: Option<RequiredWhen>,
}

impl FieldOptions {
    /// Picks the default for an absent value under `tier`.
    ///
    /// Precedence is fixed: the test default wins in the test tier, the
    /// dev default wins outside production, then the static default.
    /// Defaults are returned as stored; they are never re-validated.
    #[must_use]
    pub fn tier_default(&self, tier: Tier) -> Option<&Value> {
        if tier == Tier::Test {
            if let Some(value) = &self.test_default {
                return Some(value);
            }
        }
        if tier != Tier::Production {
            if let Some(value) = &self.dev_default {
                return Some(value);
            }
        }
        self.default.as_ref()
    }

    /// Enforces the allow-list against a final parsed value.
    pub fn check_choices(&self, value: &Value, field: &str) -> Result<(), ParseError> {
        let Some(choices) = &self.choices else {
            return Ok(());
        };
        if choices.contains(value) {
            return Ok(());
        }
        let listed = choices
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Err(ParseError::invalid(
            field,
            &value.to_string(),
            format!("one of: {listed}"),
        ))
    }
}

// ============================================================================
// Validator Contract
// ============================================================================

/// A parsing/validation rule for a single field.
///
/// Implementors supply [`kind`](Validator::kind), access to their shared
/// [`FieldOptions`], and the type-specific [`parse_raw`](Validator::parse_raw)
/// for a non-empty raw value. The missing-value policy, the allow-list
/// check, and the whole option-builder surface are provided here and are
/// identical across the catalogue.
pub trait Validator {
    /// Discriminator tag ("string", "number", "port", ...).
    fn kind(&self) -> &'static str;

    /// The shared options attached to this validator.
    fn options(&self) -> &FieldOptions;

    /// Mutable access for the builder methods.
    fn options_mut(&mut self) -> &mut FieldOptions;

    /// Parses a non-empty raw value into a typed [`Value`].
    ///
    /// Only called once the missing-value policy has ruled out absence;
    /// `source` is available for the rare rule that needs sibling keys.
    fn parse_raw(&self, raw: &str, field: &str, source: &RawEnv) -> Result<Value, ParseError>;

    // ------------------------------------------------------------------
    // Universal parse
    // ------------------------------------------------------------------

    /// Full parse of an optional raw value, reading the tier from `source`.
    fn parse(&self, raw: Option<&str>, field: &str, source: &RawEnv) -> Result<Value, ParseError> {
        self.parse_with_tier(raw, field, source, source.tier())
    }

    /// Full parse with an explicitly supplied tier.
    ///
    /// An absent or empty raw value resolves through the tiered defaults
    /// and fails as missing-required when none applies. A present value
    /// goes through [`parse_raw`](Validator::parse_raw) and then the
    /// allow-list check, in that order, so membership is tested against
    /// the final transformed value. Defaults skip both.
    fn parse_with_tier(
        &self,
        raw: Option<&str>,
        field: &str,
        source: &RawEnv,
        tier: Tier,
    ) -> Result<Value, ParseError> {
        match raw {
            Some(s) if !s.is_empty() => {
                let value = self.parse_raw(s, field, source)?;
                self.options().check_choices(&value, field)?;
                Ok(value)
            }
            _ => self
                .options()
                .tier_default(tier)
                .cloned()
                .ok_or_else(|| ParseError::MissingRequired {
                    field: field.to_string(),
                }),
        }
    }

    // ------------------------------------------------------------------
    // Option Builders
    // ------------------------------------------------------------------

    /// Sets the static default for absent values.
    #[must_use]
    fn default(mut self, value: impl Into<Value>) -> Self
    where
        Self: Sized,
    {
        self.options_mut().default = Some(value.into());
        self
    }

    /// Sets the default used outside the production tier.
    #[must_use]
    fn dev_default(mut self, value: impl Into<Value>) -> Self
    where
        Self: Sized,
    {
        self.options_mut().dev_default = Some(value.into());
        self
    }

    /// Sets the default used in the test tier.
    #[must_use]
    fn test_default(mut self, value: impl Into<Value>) -> Self
    where
        Self: Sized,
    {
        self.options_mut().test_default = Some(value.into());
        self
    }

    /// Restricts the final value to an allow-list.
    #[must_use]
    fn choices<I, T>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
        Self: Sized,
    {
        self.options_mut().choices = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Attaches a human description (documentation only).
    #[must_use]
    fn desc(mut self, text: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.options_mut().desc = Some(text.into());
        self
    }

    /// Attaches an illustrative value (documentation only).
    #[must_use]
    fn example(mut self, text: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.options_mut().example = Some(text.into());
        self
    }

    /// Attaches a documentation link (documentation only).
    #[must_use]
    fn docs(mut self, url: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.options_mut().docs = Some(url.into());
        self
    }

    /// Marks the value as sensitive; diagnostics mask it.
    #[must_use]
    fn secret(mut self) -> Self
    where
        Self: Sized,
    {
        self.options_mut().secret = true;
        self
    }

    /// Marks the field deprecated; supplying a value warns.
    #[must_use]
    fn deprecated(mut self, message: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.options_mut().deprecated = Some(message.into());
        self
    }

    /// Downgrades this field's failures to warnings, substituting the
    /// static default.
    #[must_use]
    fn warn_only(mut self) -> Self
    where
        Self: Sized,
    {
        self.options_mut().warn_only = true;
        self
    }

    /// Requires the field only when the predicate holds over the fields
    /// resolved so far.
    #[must_use]
    fn required_when(mut self, predicate: impl Fn(&Resolved) -> bool + Send + Sync + 'static) -> Self
    where
        Self: Sized,
    {
        self.options_mut().required_when = Some(RequiredWhen::new(predicate));
        self
    }
}

// ============================================================================
// Erased Form
// ============================================================================

/// A validator with its output type erased, as stored in a schema.
///
/// Behaves exactly like the validator it was built from: it implements
/// [`Validator`] itself, delegating the type-specific parse through a
/// captured closure.
#[derive(Clone)]
pub struct FieldValidator {
    kind: &'static str,
    options: FieldOptions,
    parse: Arc<dyn Fn(&str, &str, &RawEnv) -> Result<Value, ParseError> + Send + Sync>,
}

impl FieldValidator {
    /// Erases a concrete validator for storage.
    pub fn erase<V>(validator: V) -> Self
    where
        V: Validator + Send + Sync + 'static,
    {
        let kind = validator.kind();
        let options = validator.options().clone();
        Self {
            kind,
            options,
            parse: Arc::new(move |raw, field, source| validator.parse_raw(raw, field, source)),
        }
    }
}

impl std::fmt::Debug for FieldValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldValidator")
            .field("kind", &self.kind)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Validator for FieldValidator {
    fn kind(&self) -> &'static str {
        self.kind
    }

    fn options(&self) -> &FieldOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut FieldOptions {
        &mut self.options
    }

    fn parse_raw(&self, raw: &str, field: &str, source: &RawEnv) -> Result<Value, ParseError> {
        (self.parse)(raw, field, source)
    }
}

// ============================================================================
// Custom Validators
// ============================================================================

/// A validator built from a caller-supplied parse function.
pub struct CustomValidator<T, F> {
    options: FieldOptions,
    parse: F,
    _output: PhantomData<fn() -> T>,
}

/// Builds a validator from a parse function.
///
/// The function receives the non-empty raw value and the field name, and
/// returns either the typed output or a [`ParseError`]. Failures are
/// isolated by the aggregate pass like any built-in validator's; panics
/// are not caught.
pub fn custom<T, F>(parse: F) -> CustomValidator<T, F>
where
    T: Into<Value>,
    F: Fn(&str, &str) -> Result<T, ParseError>,
{
    CustomValidator {
        options: FieldOptions::default(),
        parse,
        _output: PhantomData,
    }
}

impl<T, F> Validator for CustomValidator<T, F>
where
    T: Into<Value>,
    F: Fn(&str, &str) -> Result<T, ParseError>,
{
    fn kind(&self) -> &'static str {
        "custom"
    }

    fn options(&self) -> &FieldOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut FieldOptions {
        &mut self.options
    }

    fn parse_raw(&self, raw: &str, field: &str, _source: &RawEnv) -> Result<Value, ParseError> {
        (self.parse)(raw, field).map(Into::into)
    }
}

// ============================================================================
// Tests
// ============================================================================
