//! Runtime configuration.
//!
//! The error policy is set via the `SPRINTER_MODE` environment variable:
//! - `continue` (default): best-effort formatting. Malformed directives are
//!   recorded as diagnostics and skipped; the call always completes.
//! - `abort`: the first diagnostic ends the call with an error.
//!
//! The initial diagnostic channel target is set via `SPRINTER_DIAG`:
//! `stderr` (default), `stdout`, or `off`.

use std::sync::atomic::{AtomicU8, Ordering};

/// What a formatting call does when it meets a malformed directive.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorPolicy {
    /// Record the diagnostic, skip the offending directive, keep scanning.
    #[default]
    Continue,
    /// Stop at the first diagnostic and report it as the call's error.
    Abort,
}

impl ErrorPolicy {
    /// Parse from string (case-insensitive). Unknown values map to the default.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" | "strict" | "fatal" => Self::Abort,
            "continue" | "lenient" | "best-effort" | "default" => Self::Continue,
            _ => Self::Continue,
        }
    }

    /// Stable lowercase name, as accepted by `from_str_loose`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Continue => "continue",
            Self::Abort => "abort",
        }
    }

    /// Returns true if a diagnostic should end the call.
    #[must_use]
    pub const fn aborts(self) -> bool {
        matches!(self, Self::Abort)
    }
}

/// Where diagnostic markers go when nothing has been installed explicitly.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagTarget {
    #[default]
    Stderr,
    Stdout,
    Off,
}

impl DiagTarget {
    /// Parse from string (case-insensitive). Unknown values map to the default.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "stdout" | "out" => Self::Stdout,
            "off" | "none" | "disabled" | "0" => Self::Off,
            _ => Self::Stderr,
        }
    }
}

// Atomic cache: 0=unresolved, 1=Continue, 2=Abort, 255=resolving.
static CACHED_POLICY: AtomicU8 = AtomicU8::new(0);

const POLICY_UNRESOLVED: u8 = 0;
const POLICY_CONTINUE: u8 = 1;
const POLICY_ABORT: u8 = 2;
const POLICY_RESOLVING: u8 = 255;

fn policy_to_u8(policy: ErrorPolicy) -> u8 {
    match policy {
        ErrorPolicy::Continue => POLICY_CONTINUE,
        ErrorPolicy::Abort => POLICY_ABORT,
    }
}

fn u8_to_policy(v: u8) -> ErrorPolicy {
    match v {
        POLICY_ABORT => ErrorPolicy::Abort,
        _ => ErrorPolicy::Continue,
    }
}

/// Get the configured error policy (reads env var on first call, caches thereafter).
///
/// A call that races the first resolution sees `Continue` until the winner
/// stores the parsed value.
#[must_use]
pub fn error_policy() -> ErrorPolicy {
    let cached = CACHED_POLICY.load(Ordering::Relaxed);

    if cached != POLICY_UNRESOLVED && cached != POLICY_RESOLVING {
        return u8_to_policy(cached);
    }
    if cached == POLICY_RESOLVING {
        return ErrorPolicy::Continue;
    }

    if CACHED_POLICY
        .compare_exchange(
            POLICY_UNRESOLVED,
            POLICY_RESOLVING,
            Ordering::SeqCst,
            Ordering::Relaxed,
        )
        .is_err()
    {
        let v = CACHED_POLICY.load(Ordering::Relaxed);
        return if v != POLICY_UNRESOLVED && v != POLICY_RESOLVING {
            u8_to_policy(v)
        } else {
            ErrorPolicy::Continue
        };
    }

    let policy = std::env::var("SPRINTER_MODE")
        .map(|v| ErrorPolicy::from_str_loose(&v))
        .unwrap_or_default();
    CACHED_POLICY.store(policy_to_u8(policy), Ordering::Release);
    policy
}

/// Read the initial diagnostic channel target from `SPRINTER_DIAG`.
#[must_use]
pub fn diag_target() -> DiagTarget {
    std::env::var("SPRINTER_DIAG")
        .map(|v| DiagTarget::from_str_loose(&v))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_policies() {
        assert_eq!(ErrorPolicy::from_str_loose("continue"), ErrorPolicy::Continue);
        assert_eq!(ErrorPolicy::from_str_loose("LENIENT"), ErrorPolicy::Continue);
        assert_eq!(
            ErrorPolicy::from_str_loose("best-effort"),
            ErrorPolicy::Continue
        );
        assert_eq!(ErrorPolicy::from_str_loose("abort"), ErrorPolicy::Abort);
        assert_eq!(ErrorPolicy::from_str_loose(" Strict "), ErrorPolicy::Abort);
        assert_eq!(ErrorPolicy::from_str_loose("fatal"), ErrorPolicy::Abort);
        assert_eq!(ErrorPolicy::from_str_loose("bogus"), ErrorPolicy::Continue);
    }

    #[test]
    fn policy_names_round_trip_through_parser() {
        for policy in [ErrorPolicy::Continue, ErrorPolicy::Abort] {
            assert_eq!(ErrorPolicy::from_str_loose(policy.as_str()), policy);
        }
    }

    #[test]
    fn default_is_continue() {
        assert_eq!(ErrorPolicy::default(), ErrorPolicy::Continue);
        assert!(!ErrorPolicy::Continue.aborts());
        assert!(ErrorPolicy::Abort.aborts());
    }

    #[test]
    fn parse_diag_targets() {
        assert_eq!(DiagTarget::from_str_loose("stdout"), DiagTarget::Stdout);
        assert_eq!(DiagTarget::from_str_loose("OFF"), DiagTarget::Off);
        assert_eq!(DiagTarget::from_str_loose("none"), DiagTarget::Off);
        assert_eq!(DiagTarget::from_str_loose("stderr"), DiagTarget::Stderr);
        assert_eq!(DiagTarget::from_str_loose("whatever"), DiagTarget::Stderr);
    }

    #[test]
    fn cached_policy_is_process_sticky_until_cache_reset() {
        let previous = CACHED_POLICY.swap(POLICY_ABORT, Ordering::SeqCst);
        assert_eq!(error_policy(), ErrorPolicy::Abort);
        assert_eq!(error_policy(), ErrorPolicy::Abort);

        CACHED_POLICY.store(POLICY_CONTINUE, Ordering::SeqCst);
        assert_eq!(error_policy(), ErrorPolicy::Continue);

        // A reader racing the first resolution sees the default.
        CACHED_POLICY.store(POLICY_RESOLVING, Ordering::SeqCst);
        assert_eq!(error_policy(), ErrorPolicy::Continue);

        CACHED_POLICY.store(previous, Ordering::SeqCst);
    }
}
