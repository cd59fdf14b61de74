//! Runtime tier classification.
//!
//! The tier governs default precedence during validation and the three
//! derived flags on the final result. It is read once per aggregate pass
//! from the source's `APP_ENV` entry and threaded down from there; nothing
//! re-reads ambient state mid-pass.

use serde::Serialize;

/// Key in the raw source that names the runtime tier.
pub const TIER_VAR: &str = "APP_ENV";

/// Result key for the derived production flag.
pub const FLAG_PRODUCTION: &str = "is_production";

/// Result key for the derived development flag.
pub const FLAG_DEVELOPMENT: &str = "is_development";

/// Result key for the derived test flag.
pub const FLAG_TEST: &str = "is_test";

/// Runtime environment classification.
///
/// Anything other than an exact `production` or `test` indicator (including
/// an absent one) classifies as development.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Production deployment
    Production,
    /// Local or staging development (the default)
    #[default]
    Development,
    /// Test runs
    Test,
}

impl Tier {
    /// Classifies a raw tier indicator.
    #[must_use]
    pub fn from_indicator(indicator: Option<&str>) -> Self {
        match indicator {
            Some("production") => Self::Production,
            Some("test") => Self::Test,
            _ => Self::Development,
        }
    }

    /// Canonical lowercase name of the tier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
            Self::Test => "test",
        }
    }

    /// Returns `true` for the production tier.
    #[must_use]
    pub fn is_production(self) -> bool {
        self == Self::Production
    }

    /// Returns `true` for the development tier.
    #[must_use]
    pub fn is_development(self) -> bool {
        self == Self::Development
    }

    /// Returns `true` for the test tier.
    #[must_use]
    pub fn is_test(self) -> bool {
        self == Self::Test
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_indicators() {
        assert_eq!(Tier::from_indicator(Some("production")), Tier::Production);
        assert_eq!(Tier::from_indicator(Some("test")), Tier::Test);
    }

    #[test]
    fn test_everything_else_is_development() {
        assert_eq!(Tier::from_indicator(None), Tier::Development);
        assert_eq!(Tier::from_indicator(Some("")), Tier::Development);
        assert_eq!(Tier::from_indicator(Some("staging")), Tier::Development);
        assert_eq!(Tier::from_indicator(Some("Production")), Tier::Development);
    }

    #[test]
    fn test_flags_are_mutually_exclusive() {
        for tier in [Tier::Production, Tier::Development, Tier::Test] {
            let set = [tier.is_production(), tier.is_development(), tier.is_test()];
            assert_eq!(set.iter().filter(|flag| **flag).count(), 1);
        }
    }

    #[test]
    fn test_tier_names() {
        assert_eq!(Tier::Production.as_str(), "production");
        assert_eq!(Tier::Development.as_str(), "development");
        assert_eq!(Tier::Test.as_str(), "test");
    }
}
