//! Diagnostic counters.
//!
//! Every diagnostic raised by a formatting call is counted here by class,
//! process-wide, with relaxed atomics.

use std::sync::atomic::{AtomicU64, Ordering};

/// Diagnostic classes tracked by the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticClass {
    MalformedWidth,
    UnknownConversion,
    EmptyDirective,
    MissingArgument,
    ArgumentMismatch,
}

/// Per-class diagnostic counters.
pub struct DiagnosticStats {
    /// Total diagnostics recorded.
    pub total: AtomicU64,
    pub malformed_width: AtomicU64,
    pub unknown_conversion: AtomicU64,
    pub empty_directive: AtomicU64,
    pub missing_argument: AtomicU64,
    pub argument_mismatch: AtomicU64,
    /// Calls that ended early under the abort policy.
    pub aborted_calls: AtomicU64,
}

/// Plain-value copy of the counters at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub total: u64,
    pub malformed_width: u64,
    pub unknown_conversion: u64,
    pub empty_directive: u64,
    pub missing_argument: u64,
    pub argument_mismatch: u64,
    pub aborted_calls: u64,
}

impl DiagnosticStats {
    /// Create zeroed counters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            total: AtomicU64::new(0),
            malformed_width: AtomicU64::new(0),
            unknown_conversion: AtomicU64::new(0),
            empty_directive: AtomicU64::new(0),
            missing_argument: AtomicU64::new(0),
            argument_mismatch: AtomicU64::new(0),
            aborted_calls: AtomicU64::new(0),
        }
    }

    /// Record one diagnostic.
    pub fn record(&self, class: DiagnosticClass) {
        self.total.fetch_add(1, Ordering::Relaxed);
        let counter = match class {
            DiagnosticClass::MalformedWidth => &self.malformed_width,
            DiagnosticClass::UnknownConversion => &self.unknown_conversion,
            DiagnosticClass::EmptyDirective => &self.empty_directive,
            DiagnosticClass::MissingArgument => &self.missing_argument,
            DiagnosticClass::ArgumentMismatch => &self.argument_mismatch,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a call that stopped on its first diagnostic.
    pub fn record_abort(&self) {
        self.aborted_calls.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            total: self.total.load(Ordering::Relaxed),
            malformed_width: self.malformed_width.load(Ordering::Relaxed),
            unknown_conversion: self.unknown_conversion.load(Ordering::Relaxed),
            empty_directive: self.empty_directive.load(Ordering::Relaxed),
            missing_argument: self.missing_argument.load(Ordering::Relaxed),
            argument_mismatch: self.argument_mismatch.load(Ordering::Relaxed),
            aborted_calls: self.aborted_calls.load(Ordering::Relaxed),
        }
    }
}

impl Default for DiagnosticStats {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_STATS: DiagnosticStats = DiagnosticStats::new();

/// Access the process-wide counters.
#[must_use]
pub fn global_stats() -> &'static DiagnosticStats {
    &GLOBAL_STATS
}
