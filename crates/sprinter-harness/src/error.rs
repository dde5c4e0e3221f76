//! Harness error type.

use thiserror::Error;

use sprinter_core::FormatError;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("format: {0}")]
    Format(#[from] FormatError),
    #[error("char argument {0:?} is not ASCII")]
    WideChar(char),
    #[error("bad argument '{input}': expected c:<char>, d:<int> or s:<text>")]
    BadArgument { input: String },
    #[error("reference formatter cannot render {template:?}: {reason}")]
    Unsupported { template: String, reason: String },
    #[error("no fixture JSON files found in {0}")]
    NoFixtures(String),
    #[error("{failed} of {total} cases failed")]
    VerificationFailed { failed: usize, total: usize },
}
