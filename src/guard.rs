//! The read guard over a finished validation pass.
//!
//! [`Env`] exposes a closed key set: the declared schema fields plus the
//! three derived tier flags. Reading anything else goes through a
//! get-or-warn path that logs one warning (with a did-you-mean hint when
//! a declared field is close) and returns `None`, so a typo in caller
//! code surfaces in the logs instead of crashing.
//!
//! There is no mutating surface: once constructed, nothing can be added,
//! removed, or changed.

use crate::resolve::{suggest, Resolved};
use crate::schema::Schema;
use crate::tier::{Tier, FLAG_DEVELOPMENT, FLAG_PRODUCTION, FLAG_TEST};
use crate::value::Value;

/// An immutable, access-checked view over resolved configuration.
#[derive(Debug, Clone)]
pub struct Env {
    resolved: Resolved,
    declared: Vec<String>,
}

impl Env {
    pub(crate) fn new(schema: &Schema, resolved: Resolved) -> Self {
        Self {
            resolved,
            declared: schema.names().map(str::to_string).collect(),
        }
    }

    pub(crate) const fn resolved(&self) -> &Resolved {
        &self.resolved
    }

    /// Looks up a key in the closed set.
    ///
    /// Declared fields return their resolved value, or `None` silently
    /// when resolution failed. The three tier flags return booleans. Any
    /// other key logs a warning and returns `None`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        match key {
            FLAG_PRODUCTION => return Some(Value::Bool(self.is_production())),
            FLAG_DEVELOPMENT => return Some(Value::Bool(self.is_development())),
            FLAG_TEST => return Some(Value::Bool(self.is_test())),
            _ => {}
        }
        if self.declared.iter().any(|name| name == key) {
            return self.resolved.get(key).cloned();
        }

        match suggest(key, self.declared.iter().map(String::as_str)) {
            Some(near) => tracing::warn!(key, suggestion = %near, "read of undeclared field"),
            None => tracing::warn!(key, "read of undeclared field"),
        }
        None
    }

    /// String content of a declared field.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric content of a declared field.
    #[must_use]
    pub fn get_num(&self, key: &str) -> Option<f64> {
        self.get(key)?.as_num()
    }

    /// Boolean content of a declared field (or tier flag).
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key)?.as_bool()
    }

    /// Parsed JSON content of a declared field.
    #[must_use]
    pub fn get_json(&self, key: &str) -> Option<serde_json::Value> {
        match self.get(key)? {
            Value::Json(v) => Some(v),
            _ => None,
        }
    }

    /// List content of a declared field.
    #[must_use]
    pub fn get_list(&self, key: &str) -> Option<Vec<Value>> {
        match self.get(key)? {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// The tier this result was resolved under.
    #[must_use]
    pub const fn tier(&self) -> Tier {
        self.resolved.tier()
    }

    /// Derived flag: resolved under the production tier.
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.tier().is_production()
    }

    /// Derived flag: resolved under the development tier.
    #[must_use]
    pub fn is_development(&self) -> bool {
        self.tier().is_development()
    }

    /// Derived flag: resolved under the test tier.
    #[must_use]
    pub fn is_test(&self) -> bool {
        self.tier().is_test()
    }

    /// Iterates resolved pairs in declaration order. Tier flags are not
    /// included; fields without a resolved value are skipped.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.resolved.iter()
    }

    /// Number of fields with a resolved value.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    /// Returns `true` when no field resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
