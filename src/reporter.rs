//! Diagnostic reporters.
//!
//! The aggregate pass never returns its diagnostic lists to the caller;
//! it hands them to a [`Reporter`], warnings first, then errors, one call
//! per severity with the full batch. What happens next is the reporter's
//! business: the default one prints and exits, the collecting one stores
//! everything for inspection.

use std::sync::Mutex;

use crate::error::{Diagnostic, ExitCode};
use crate::guard::Env;

/// Consumer of a validation pass's diagnostics.
///
/// Handlers receive whole batches, never one call per field. `on_error`
/// may terminate the process or panic; the pass does not rely on either
/// and still returns a (partially populated) result when it comes back.
pub trait Reporter {
    /// Receives every hard error from the pass, in field order.
    fn on_error(&self, errors: &[Diagnostic]);

    /// Receives every warning from the pass, in field order.
    fn on_warning(&self, warnings: &[Diagnostic]) {
        let _ = warnings;
    }

    /// Receives the guarded result when the pass produced no hard errors.
    fn on_success(&self, env: &Env) {
        let _ = env;
    }
}

// ============================================================================
// Default Reporter
// ============================================================================

/// The exit-on-error reporter.
///
/// Warnings and errors print to stderr line by line; any hard error ends
/// the process with the configuration exit code.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultReporter;

impl Reporter for DefaultReporter {
    fn on_error(&self, errors: &[Diagnostic]) {
        for diagnostic in errors {
            eprintln!("{diagnostic}");
        }
        eprintln!(
            "environment validation failed ({} error{})",
            errors.len(),
            if errors.len() == 1 { "" } else { "s" }
        );
        std::process::exit(ExitCode::CONFIG_ERROR);
    }

    fn on_warning(&self, warnings: &[Diagnostic]) {
        for diagnostic in warnings {
            eprintln!("{diagnostic}");
        }
    }
}

// ============================================================================
// Collecting Reporter
// ============================================================================

/// A reporter that stores everything it receives.
///
/// Thread-safe; the usual choice in tests and in embedding code that
/// wants to present diagnostics its own way.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    errors: Mutex<Vec<Diagnostic>>,
    warnings: Mutex<Vec<Diagnostic>>,
    succeeded: Mutex<bool>,
}

impl CollectingReporter {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The errors received so far.
    #[must_use]
    pub fn errors(&self) -> Vec<Diagnostic> {
        self.errors.lock().map(|guard| guard.clone()).unwrap_or_default()
    }

    /// The warnings received so far.
    #[must_use]
    pub fn warnings(&self) -> Vec<Diagnostic> {
        self.warnings.lock().map(|guard| guard.clone()).unwrap_or_default()
    }

    /// Returns `true` once a pass completed without hard errors.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.succeeded.lock().map(|guard| *guard).unwrap_or(false)
    }
}

impl Reporter for CollectingReporter {
    fn on_error(&self, errors: &[Diagnostic]) {
        if let Ok(mut guard) = self.errors.lock() {
            guard.extend_from_slice(errors);
        }
    }

    fn on_warning(&self, warnings: &[Diagnostic]) {
        if let Ok(mut guard) = self.warnings.lock() {
            guard.extend_from_slice(warnings);
        }
    }

    fn on_success(&self, _env: &Env) {
        if let Ok(mut guard) = self.succeeded.lock() {
            *guard = true;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
