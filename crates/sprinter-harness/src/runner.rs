//! Test execution engine.

use sprinter_core::{ErrorPolicy, FormatOptions, format_with};

use crate::diff;
use crate::fixtures::{FixtureCase, FixtureSet, format_args};
use crate::verify::VerificationResult;

/// Runs a fixture set and collects verification results.
pub struct TestRunner {
    /// Name of the test campaign.
    pub campaign: String,
    /// Error policy the formatter runs under.
    pub policy: ErrorPolicy,
}

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub fn new(campaign: impl Into<String>, policy: ErrorPolicy) -> Self {
        Self {
            campaign: campaign.into(),
            policy,
        }
    }

    /// Run all fixtures in a set and return results.
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<VerificationResult> {
        fixture_set
            .cases
            .iter()
            .map(|case| self.execute_case(case))
            .collect()
    }

    fn options(&self) -> FormatOptions {
        FormatOptions::default().with_policy(self.policy).quiet()
    }

    fn execute_case(&self, case: &FixtureCase) -> VerificationResult {
        let mut result = VerificationResult {
            case_name: case.name.clone(),
            template: case.template.clone(),
            passed: false,
            expected: case.expected_output.clone(),
            actual: String::new(),
            expected_len: case.expected_len,
            actual_len: 0,
            diagnostics: Vec::new(),
            diff: None,
        };

        let args = match format_args(&case.args) {
            Ok(args) => args,
            Err(err) => {
                result.diff = Some(format!("unusable fixture: {err}"));
                return result;
            }
        };
        let formatted = match format_with(case.template.as_bytes(), &args, &self.options()) {
            Ok(f) => f,
            Err(err) => {
                result.actual = format!("error:{err}");
                result.diff = Some(diff::render_diff(&case.expected_output, &result.actual));
                return result;
            }
        };

        result.actual = formatted.to_string_lossy();
        result.actual_len = formatted.len();
        result.diagnostics = formatted
            .diagnostics()
            .iter()
            .map(ToString::to_string)
            .collect();

        let mut notes = Vec::new();
        if result.actual != case.expected_output {
            notes.push(diff::render_diff(&case.expected_output, &result.actual));
        }
        if result.actual_len != case.expected_len {
            notes.push(format!(
                "length is {} but should be {}",
                result.actual_len, case.expected_len
            ));
        }
        if result.diagnostics.len() != case.expected_diagnostics {
            notes.push(format!(
                "raised {} diagnostics but should raise {}",
                result.diagnostics.len(),
                case.expected_diagnostics
            ));
        }
        result.passed = notes.is_empty();
        if !result.passed {
            result.diff = Some(notes.join("\n"));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(cases: &str) -> FixtureSet {
        FixtureSet::from_json(&format!(
            r#"{{"version":"v1","family":"printf","captured_at":"2026-01-01T00:00:00Z","cases":[{cases}]}}"#
        ))
        .expect("valid fixture json")
    }

    #[test]
    fn matching_case_passes() {
        let set = fixture(
            r#"{"name":"neg","template":"%4d = 0x%8x","args":[{"type":"int","value":-88},{"type":"int","value":-88}],"expected_output":" -88 = 0xffffffa8","expected_len":17}"#,
        );
        let results = TestRunner::new("smoke", ErrorPolicy::Continue).run(&set);
        assert_eq!(results.len(), 1);
        assert!(results[0].passed, "{:?}", results[0].diff);
        assert_eq!(results[0].actual_len, 17);
    }

    #[test]
    fn wrong_expectation_fails_with_diff() {
        let set = fixture(
            r#"{"name":"bad","template":"%d","args":[{"type":"int","value":5}],"expected_output":"6","expected_len":1}"#,
        );
        let results = TestRunner::new("smoke", ErrorPolicy::Continue).run(&set);
        assert!(!results[0].passed);
        assert!(results[0].diff.as_deref().unwrap().contains("-6\n+5\n"));
    }

    #[test]
    fn diagnostic_cases_count_diagnostics() {
        let set = fixture(
            r#"{"name":"unknown","template":"a%qb","args":[],"expected_output":"ab","expected_len":2,"expected_diagnostics":1}"#,
        );
        let results = TestRunner::new("diag", ErrorPolicy::Continue).run(&set);
        assert!(results[0].passed, "{:?}", results[0].diff);
        assert_eq!(results[0].diagnostics.len(), 1);
    }

    #[test]
    fn abort_policy_turns_diagnostics_into_failures() {
        let set = fixture(
            r#"{"name":"unknown","template":"a%qb","args":[],"expected_output":"ab","expected_len":2,"expected_diagnostics":1}"#,
        );
        let results = TestRunner::new("diag", ErrorPolicy::Abort).run(&set);
        assert!(!results[0].passed);
        assert!(results[0].actual.starts_with("error:aborted"));
    }

    #[test]
    fn non_ascii_char_fixture_is_reported() {
        let set = fixture(
            r#"{"name":"wide","template":"%c","args":[{"type":"char","value":"ø"}],"expected_output":"ø","expected_len":2}"#,
        );
        let results = TestRunner::new("smoke", ErrorPolicy::Continue).run(&set);
        assert!(!results[0].passed);
        assert!(results[0].diff.as_deref().unwrap().starts_with("unusable fixture"));
    }
}
