//! Raw key/value sources.
//!
//! A [`RawEnv`] is the injectable input to a validation pass: an ordered
//! map of string keys to string values, most commonly captured from the
//! process environment. Tests and embedding callers build one from pairs
//! instead.

use indexmap::IndexMap;

use crate::tier::{Tier, TIER_VAR};

/// An ordered raw key/value source.
///
/// Iteration follows insertion order, which keeps extra-key diagnostics
/// deterministic. Values are kept verbatim; an empty string is treated the
/// same as an absent key by the missing-value policy, but stays observable
/// here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEnv {
    vars: IndexMap<String, String>,
}

impl RawEnv {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures the current process environment.
    #[must_use]
    pub fn from_process() -> Self {
        std::env::vars().collect()
    }

    /// Builds a source from key/value pairs, preserving their order.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        pairs.into_iter().collect()
    }

    /// Adds one entry, builder style.
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds one entry in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Looks up a raw value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Returns `true` if the key is present, even with an empty value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Iterates keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns `true` when the source holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Classifies the tier from this source's indicator entry.
    #[must_use]
    pub fn tier(&self) -> Tier {
        Tier::from_indicator(self.get(TIER_VAR))
    }

    /// Returns the entries whose keys start with `prefix`, with the prefix
    /// stripped and the original order preserved.
    #[must_use]
    pub fn grouped_by_prefix(&self, prefix: &str) -> Self {
        let vars = self
            .vars
            .iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(prefix)
                    .map(|stripped| (stripped.to_string(), value.clone()))
            })
            .collect();
        Self { vars }
    }
}

impl<K, V> FromIterator<(K, V)> for RawEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
