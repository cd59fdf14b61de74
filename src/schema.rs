//! The declarative schema: an ordered mapping from field name to validator.
//!
//! Declaration order is semantic. The aggregate pass resolves fields in
//! the order they were added, so a conditional-requirement predicate may
//! reference earlier-declared fields, and generated example text lists
//! entries in the same order.

use indexmap::IndexMap;

use crate::validator::{FieldValidator, Validator};

/// An ordered field-name-to-validator mapping.
///
/// Built once, immutable in use, and shareable across validation passes.
/// Validators are stored in erased form; adding a field erases it on the
/// way in.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: IndexMap<String, FieldValidator>,
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field, builder style. Redeclaring a name replaces the
    /// earlier validator but keeps the original position.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, validator: impl Validator + Send + Sync + 'static) -> Self {
        self.fields
            .insert(name.into(), FieldValidator::erase(validator));
        self
    }

    /// Looks up a declared field's validator.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValidator> {
        self.fields.get(name)
    }

    /// Returns `true` when `name` is declared.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Iterates declared fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValidator)> {
        self.fields.iter().map(|(name, v)| (name.as_str(), v))
    }

    /// Iterates declared field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` when no fields are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
