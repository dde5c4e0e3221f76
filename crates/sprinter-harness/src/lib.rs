//! Conformance testing harness for sprinter.
//!
//! This crate provides:
//! - A reference formatter built on `std::fmt`
//! - Fixture capture: record reference output for the built-in vectors as JSON
//! - Fixture verify: compare the formatter against captured fixtures
//! - An oracle run that prints one `Test NN OK.` line per built-in vector
//! - Report generation: human-readable + machine-readable conformance reports
//! - Structured JSONL logging with an artifact index

#![forbid(unsafe_code)]

pub mod capture;
pub mod diff;
pub mod error;
pub mod fixtures;
pub mod oracle;
pub mod reference;
pub mod report;
pub mod runner;
pub mod structured_log;
pub mod verify;

pub use error::HarnessError;
pub use fixtures::{FixtureArg, FixtureCase, FixtureSet};
pub use report::ConformanceReport;
pub use runner::TestRunner;
pub use verify::VerificationResult;
