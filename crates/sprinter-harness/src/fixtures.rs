//! Fixture loading and management.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sprinter_core::FormatArg;

use crate::error::HarnessError;

/// A typed argument as stored in fixture JSON.
///
/// Serialized as `{"type":"int","value":-88}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum FixtureArg {
    Char(char),
    Int(i32),
    Str(String),
}

impl FixtureArg {
    /// Borrow this argument as a formatter argument.
    pub fn to_format_arg(&self) -> Result<FormatArg<'_>, HarnessError> {
        match self {
            Self::Char(c) if c.is_ascii() => Ok(FormatArg::Char(*c as u8)),
            Self::Char(c) => Err(HarnessError::WideChar(*c)),
            Self::Int(v) => Ok(FormatArg::Int(*v)),
            Self::Str(s) => Ok(FormatArg::Text(s.as_bytes())),
        }
    }
}

/// Parses the CLI form `c:<char>`, `d:<int>` or `s:<text>`.
impl FromStr for FixtureArg {
    type Err = HarnessError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let bad = || HarnessError::BadArgument {
            input: input.to_string(),
        };
        let (tag, value) = input.split_once(':').ok_or_else(bad)?;
        match tag {
            "c" => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Self::Char(c)),
                    _ => Err(bad()),
                }
            }
            "d" | "x" => value.trim().parse().map(Self::Int).map_err(|_| bad()),
            "s" => Ok(Self::Str(value.to_string())),
            _ => Err(bad()),
        }
    }
}

/// Convert a whole argument list, in order.
pub fn format_args(args: &[FixtureArg]) -> Result<Vec<FormatArg<'_>>, HarnessError> {
    args.iter().map(FixtureArg::to_format_arg).collect()
}

/// A single fixture test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    /// Format template.
    pub template: String,
    /// Arguments consumed by the template, in order.
    pub args: Vec<FixtureArg>,
    /// Expected rendered text.
    pub expected_output: String,
    /// Expected returned length in bytes.
    pub expected_len: usize,
    /// Number of diagnostics the call should raise.
    #[serde(default)]
    pub expected_diagnostics: usize,
}

/// A collection of fixture cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Fixture family name.
    pub family: String,
    /// UTC timestamp of capture.
    pub captured_at: String,
    /// Individual test cases.
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load fixture set from a file path.
    pub fn from_file(path: &std::path::Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}
