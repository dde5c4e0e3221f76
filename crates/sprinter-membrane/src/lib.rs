//! # sprinter-membrane
//!
//! Process-wide state shared by every formatting call: the configured error
//! policy, the diagnostic marker channel, and the diagnostic counters.
//! The formatter itself stays a pure function of its inputs.

pub mod config;
pub mod diag;
pub mod stats;

pub use config::{DiagTarget, ErrorPolicy, error_policy};
pub use diag::Marker;
pub use stats::{DiagnosticClass, DiagnosticStats, StatsSnapshot, global_stats};
