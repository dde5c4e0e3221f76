//! Side-by-side oracle run.
//!
//! Formats each vector with both the formatter and the reference, and reports
//! one line per vector: `Test NN OK.` on agreement, otherwise one line per
//! mismatch in text and in returned length.

use sprinter_core::{FormatOptions, format_with};

use crate::capture::Vector;
use crate::error::HarnessError;
use crate::fixtures::format_args;
use crate::reference::reference_format;

/// Outcome of checking one vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleCheck {
    /// 1-based position of the vector.
    pub number: usize,
    pub name: String,
    pub actual: String,
    pub expected: String,
    pub actual_len: usize,
    pub expected_len: usize,
}

impl OracleCheck {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.actual == self.expected && self.actual_len == self.expected_len
    }

    /// Report lines for this check.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let n = self.number;
        if self.passed() {
            return vec![format!("Test {n:2} OK.")];
        }
        let mut lines = Vec::new();
        if self.actual != self.expected {
            lines.push(format!(
                "Test {n:2}: text is \"{}\" but should be \"{}\".",
                self.actual, self.expected
            ));
        }
        if self.actual_len != self.expected_len {
            lines.push(format!(
                "Test {n:2}: length is {} but should be {}.",
                self.actual_len, self.expected_len
            ));
        }
        lines
    }
}

/// Check every vector, in order.
///
/// Diagnostics are not emitted; vectors the reference cannot render are
/// reported as errors.
pub fn run_oracle(vectors: &[Vector]) -> Result<Vec<OracleCheck>, HarnessError> {
    let opts = FormatOptions::default().quiet();
    vectors
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let expected = reference_format(&v.template, &v.args)?;
            let args = format_args(&v.args)?;
            let formatted = format_with(v.template.as_bytes(), &args, &opts)?;
            Ok(OracleCheck {
                number: i + 1,
                name: v.name.clone(),
                actual: formatted.to_string_lossy(),
                actual_len: formatted.len(),
                expected_len: expected.len(),
                expected,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::acceptance_vectors;

    #[test]
    fn acceptance_vectors_all_pass() {
        let checks = run_oracle(&acceptance_vectors()).unwrap();
        assert_eq!(checks.len(), 16);
        for check in &checks {
            assert!(check.passed(), "{:?}", check.lines());
        }
        assert_eq!(checks[0].lines(), vec!["Test  1 OK."]);
        assert_eq!(checks[15].lines(), vec!["Test 16 OK."]);
    }

    #[test]
    fn mismatch_lines_name_both_sides() {
        let check = OracleCheck {
            number: 3,
            name: "x".into(),
            actual: "ab".into(),
            expected: "abc".into(),
            actual_len: 2,
            expected_len: 3,
        };
        assert_eq!(
            check.lines(),
            vec![
                "Test  3: text is \"ab\" but should be \"abc\".".to_string(),
                "Test  3: length is 2 but should be 3.".to_string(),
            ]
        );
    }
}
