//! Display preparation for sensitive and oversized values.
//!
//! Diagnostics never carry a raw secret: values are masked (or truncated,
//! for non-secrets) at the moment a diagnostic is recorded. The example
//! renderer shares the same helpers.

/// Values longer than this keep a short identifying prefix when masked.
const MASK_PREFIX_THRESHOLD: usize = 5;

/// Character count retained by [`mask`] for longer values.
const MASK_PREFIX_LEN: usize = 3;

/// Longest value rendered verbatim in diagnostics.
const DISPLAY_MAX: usize = 64;

/// Masks a sensitive value for display.
///
/// Values longer than five characters keep their first three characters so
/// operators can tell two credentials apart; shorter values are masked
/// entirely.
#[must_use]
pub fn mask(value: &str) -> String {
    if value.chars().count() > MASK_PREFIX_THRESHOLD {
        let prefix: String = value.chars().take(MASK_PREFIX_LEN).collect();
        format!("{prefix}*****")
    } else {
        "*****".to_string()
    }
}

/// Caps a value at `max_chars` characters, appending `...` when cut.
#[must_use]
pub fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        value.to_string()
    } else {
        let kept: String = value.chars().take(max_chars).collect();
        format!("{kept}...")
    }
}

/// Prepares an offending value for a diagnostic.
pub(crate) fn display(value: &str, secret: bool) -> String {
    if secret {
        mask(value)
    } else {
        truncate(value, DISPLAY_MAX)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_values_keep_a_prefix() {
        assert_eq!(mask("super-secret"), "sup*****");
        assert_eq!(mask("abcdef"), "abc*****");
    }

    #[test]
    fn test_short_values_mask_entirely() {
        assert_eq!(mask("abcde"), "*****");
        assert_eq!(mask("ab"), "*****");
        assert_eq!(mask(""), "*****");
    }

    #[test]
    fn test_mask_counts_characters_not_bytes() {
        // Six two-byte characters: over the threshold by count.
        assert_eq!(mask("éééééé"), "ééé*****");
    }

    #[test]
    fn test_truncate_leaves_short_values_alone() {
        assert_eq!(truncate("short", 64), "short");
    }

    #[test]
    fn test_truncate_caps_long_values() {
        let long = "x".repeat(100);
        let shown = truncate(&long, 64);
        assert_eq!(shown.len(), 67);
        assert!(shown.ends_with("..."));
    }

    #[test]
    fn test_display_masks_only_secrets() {
        assert_eq!(display("super-secret", true), "sup*****");
        assert_eq!(display("plain-value", false), "plain-value");
    }
}
