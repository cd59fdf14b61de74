//! The aggregate validation pass.
//!
//! Resolves an entire [`Schema`] against a [`RawEnv`] in declaration
//! order, applying the deprecation, conditional-requirement, warn-only,
//! and secret-masking policies, scanning for unexpected extra keys, and
//! delivering the partitioned diagnostic lists to a [`Reporter`] in one
//! batch per severity.
//!
//! Failures never escape the pass: each field's error becomes a
//! [`Diagnostic`] locally and resolution moves on to the next field, so
//! one bad value cannot hide the rest. The pass always constructs and
//! returns a guarded result, even when hard errors exist and the reporter
//! chooses not to terminate.

use indexmap::IndexMap;

use crate::error::{Diagnostic, Severity};
use crate::guard::Env;
use crate::mask;
use crate::reporter::Reporter;
use crate::schema::Schema;
use crate::source::RawEnv;
use crate::tier::{Tier, TIER_VAR};
use crate::validator::Validator;
use crate::value::Value;

/// Common system and runtime keys exempt from extra-key detection.
const SYSTEM_VARS: [&str; 12] = [
    "PATH", "HOME", "USER", "SHELL", "TERM", "LANG", "LC_ALL", "TZ", "PWD", "OLDPWD", "HOSTNAME",
    "LOGNAME",
];

/// Keys injected by the package manager, exempt from extra-key detection.
const PACKAGE_MANAGER_PREFIX: &str = "CARGO_";

/// Extra keys (and guard misses) suggest a declared field within this
/// Damerau-Levenshtein distance.
const SUGGEST_MAX_DISTANCE: usize = 3;

/// Nearest candidate name for typo correction, distance capped.
pub(crate) fn suggest<'a>(input: &str, candidates: impl Iterator<Item = &'a str>) -> Option<String> {
    candidates
        .map(|name| (name, strsim::damerau_levenshtein(input, name)))
        .filter(|(_, dist)| *dist <= SUGGEST_MAX_DISTANCE)
        .min_by_key(|(_, dist)| *dist)
        .map(|(name, _)| name.to_string())
}

// ============================================================================
// Resolved Values
// ============================================================================

/// The accumulating (and, after the pass, final) resolved field map.
///
/// Conditional-requirement predicates receive this partially populated:
/// only fields declared earlier in the schema are visible to them.
#[derive(Debug, Clone)]
pub struct Resolved {
    values: IndexMap<String, Value>,
    tier: Tier,
}

impl Resolved {
    pub(crate) fn new(tier: Tier) -> Self {
        Self {
            values: IndexMap::new(),
            tier,
        }
    }

    pub(crate) fn insert(&mut self, field: &str, value: Value) {
        self.values.insert(field.to_string(), value);
    }

    /// The tier this pass resolved under, read once at entry.
    #[must_use]
    pub const fn tier(&self) -> Tier {
        self.tier
    }

    /// Looks up a resolved value. Fields that failed resolution (or were
    /// skipped with no default) are absent.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// String content of a resolved field.
    #[must_use]
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Numeric content of a resolved field.
    #[must_use]
    pub fn get_num(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(Value::as_num)
    }

    /// Boolean content of a resolved field.
    #[must_use]
    pub fn get_bool(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(Value::as_bool)
    }

    /// Returns `true` when the field resolved to `true`.
    ///
    /// The usual shape of a conditional-requirement predicate over a
    /// feature flag.
    #[must_use]
    pub fn is_true(&self, field: &str) -> bool {
        self.get_bool(field) == Some(true)
    }

    /// Returns `true` when the field has a resolved value.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Iterates resolved pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of resolved fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when nothing resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ============================================================================
// Options
// ============================================================================

/// Caller options for a validation pass.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Treat unexpected extra keys as hard errors.
    pub strict: bool,

    /// Warn on unexpected extra keys.
    pub warn_on_extra: bool,

    /// Extra keys the caller expects; never reported.
    pub allowed_extra: Vec<String>,
}

// ============================================================================
// Resolver
// ============================================================================

/// Output of one aggregate pass, before reporter dispatch.
#[derive(Debug)]
pub struct ResolveOutcome {
    /// Every field that resolved, in declaration order.
    pub resolved: Resolved,

    /// Hard errors; the named fields have no resolved value.
    pub errors: Vec<Diagnostic>,

    /// Warnings; the named fields still resolved where a default applied.
    pub warnings: Vec<Diagnostic>,
}

/// The aggregate pass. Collects every diagnostic rather than stopping at
/// the first.
#[derive(Debug, Default)]
pub struct Resolver {
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
}

impl Resolver {
    /// Creates a resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves `schema` against `source` in declaration order.
    ///
    /// The tier is read from the source exactly once, here, and threaded
    /// through every field so one pass sees one consistent tier.
    pub fn resolve(
        &mut self,
        schema: &Schema,
        source: &RawEnv,
        options: &ResolveOptions,
    ) -> ResolveOutcome {
        self.errors.clear();
        self.warnings.clear();

        let tier = source.tier();
        let mut resolved = Resolved::new(tier);

        for (field, validator) in schema.iter() {
            self.resolve_field(field, validator, source, tier, &mut resolved);
        }

        if options.strict || options.warn_on_extra {
            self.scan_extra_keys(schema, source, options);
        }

        tracing::debug!(
            fields = schema.len(),
            resolved = resolved.len(),
            errors = self.errors.len(),
            warnings = self.warnings.len(),
            tier = tier.as_str(),
            "validation pass complete"
        );

        ResolveOutcome {
            resolved,
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    fn resolve_field(
        &mut self,
        field: &str,
        validator: &crate::validator::FieldValidator,
        source: &RawEnv,
        tier: Tier,
        resolved: &mut Resolved,
    ) {
        let raw = source.get(field);
        let opts = validator.options();
        let supplied = raw.is_some_and(|value| !value.is_empty());

        if supplied {
            if let Some(notice) = &opts.deprecated {
                self.warnings.push(Diagnostic {
                    field: field.to_string(),
                    message: format!("deprecated: {notice}"),
                    value: raw.map(|value| mask::display(value, opts.secret)),
                    severity: Severity::Warning,
                });
            }
        }

        if let Some(predicate) = &opts.required_when {
            // Not required right now and nothing supplied: the field gets
            // its static default (possibly none) and no validation at all.
            if !supplied && !predicate.evaluate(resolved) {
                if let Some(default) = &opts.default {
                    resolved.insert(field, default.clone());
                }
                return;
            }
        }

        match validator.parse_with_tier(raw, field, source, tier) {
            Ok(value) => resolved.insert(field, value),
            Err(error) if opts.warn_only => {
                self.warnings
                    .push(Diagnostic::from_error(&error, Severity::Warning, opts.secret));
                if let Some(default) = &opts.default {
                    resolved.insert(field, default.clone());
                }
            }
            Err(error) => {
                self.errors
                    .push(Diagnostic::from_error(&error, Severity::Error, opts.secret));
            }
        }
    }

    /// Reports raw keys outside the schema and the allow-lists.
    fn scan_extra_keys(&mut self, schema: &Schema, source: &RawEnv, options: &ResolveOptions) {
        let severity = if options.strict {
            Severity::Error
        } else {
            Severity::Warning
        };

        for key in source.keys() {
            if schema.contains(key)
                || key == TIER_VAR
                || SYSTEM_VARS.contains(&key)
                || key.starts_with(PACKAGE_MANAGER_PREFIX)
                || options.allowed_extra.iter().any(|allowed| allowed == key)
            {
                continue;
            }

            let message = match suggest(key, schema.names()) {
                Some(near) => format!("unexpected key (did you mean '{near}'?)"),
                None => "unexpected key".to_string(),
            };
            let diagnostic = Diagnostic {
                field: key.to_string(),
                message,
                value: None,
                severity,
            };
            match severity {
                Severity::Error => self.errors.push(diagnostic),
                Severity::Warning => self.warnings.push(diagnostic),
            }
        }
    }
}

// ============================================================================
// Entry Points
// ============================================================================

/// Validates `source` against `schema` and returns the guarded result.
///
/// Diagnostics go to the reporter in one batch per severity, warnings
/// first. The error handler may exit or panic at the reporter's
/// discretion; when it returns, the caller still receives a guarded
/// result populated with whatever resolved. The success handler runs only
/// when no hard errors exist.
pub fn clean<R>(schema: &Schema, source: &RawEnv, options: &ResolveOptions, reporter: &R) -> Env
where
    R: Reporter + ?Sized,
{
    let outcome = Resolver::new().resolve(schema, source, options);
    let failed = !outcome.errors.is_empty();

    if !outcome.warnings.is_empty() {
        reporter.on_warning(&outcome.warnings);
    }
    if failed {
        reporter.on_error(&outcome.errors);
    }

    let env = Env::new(schema, outcome.resolved);
    if !failed {
        reporter.on_success(&env);
    }
    env
}

/// Validates like [`clean`], then hands the resolved values and the raw
/// source to `transform` and returns its output, bypassing the guard.
pub fn clean_then<R, T, U>(
    schema: &Schema,
    source: &RawEnv,
    options: &ResolveOptions,
    reporter: &R,
    transform: T,
) -> U
where
    R: Reporter + ?Sized,
    T: FnOnce(&Resolved, &RawEnv) -> U,
{
    let env = clean(schema, source, options, reporter);
    transform(env.resolved(), source)
}

// ============================================================================
// Tests
// ============================================================================
