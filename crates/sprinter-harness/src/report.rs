//! Report generation for conformance results.

use serde::{Deserialize, Serialize};

use crate::verify::VerificationSummary;

/// A conformance report over one verification run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformanceReport {
    /// Report title.
    pub title: String,
    /// Error policy the formatter ran under.
    pub policy: String,
    /// Timestamp (UTC).
    pub timestamp: String,
    /// Verification summary.
    pub summary: VerificationSummary,
}

impl ConformanceReport {
    /// Render the report as markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", self.title));
        out.push_str(&format!("- Policy: {}\n", self.policy));
        out.push_str(&format!("- Timestamp: {}\n", self.timestamp));
        out.push_str(&format!("- Total: {}\n", self.summary.total));
        out.push_str(&format!("- Passed: {}\n", self.summary.passed));
        out.push_str(&format!("- Failed: {}\n\n", self.summary.failed));

        out.push_str("| Case | Template | Length | Status |\n");
        out.push_str("|------|----------|--------|--------|\n");
        for r in &self.summary.results {
            let status = if r.passed { "PASS" } else { "FAIL" };
            out.push_str(&format!(
                "| {} | `{}` | {} | {} |\n",
                r.case_name,
                table_cell(&r.template),
                r.actual_len,
                status
            ));
        }

        for r in self.summary.results.iter().filter(|r| !r.passed) {
            if let Some(diff) = &r.diff {
                out.push_str(&format!("\n## {}\n\n```\n{diff}\n```\n", r.case_name));
            }
        }
        out
    }

    /// Render the report as JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}

fn table_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::VerificationResult;

    fn result(name: &str, passed: bool) -> VerificationResult {
        VerificationResult {
            case_name: name.into(),
            template: "%c|%d".into(),
            passed,
            expected: "a|1".into(),
            actual: if passed { "a|1" } else { "a|2" }.into(),
            expected_len: 3,
            actual_len: 3,
            diagnostics: Vec::new(),
            diff: (!passed).then(|| "-a|1\n+a|2".to_string()),
        }
    }

    fn report() -> ConformanceReport {
        ConformanceReport {
            title: "sprinter Conformance Report".into(),
            policy: "continue".into(),
            timestamp: "2026-01-01T00:00:00Z".into(),
            summary: VerificationSummary::from_results(vec![
                result("ok", true),
                result("broken", false),
            ]),
        }
    }

    #[test]
    fn markdown_escapes_pipes_and_lists_failures() {
        let md = report().to_markdown();
        assert!(md.contains("- Passed: 1\n- Failed: 1\n"));
        assert!(md.contains("| ok | `%c\\|%d` | 3 | PASS |"));
        assert!(md.contains("| broken | `%c\\|%d` | 3 | FAIL |"));
        assert!(md.contains("## broken\n\n```\n-a|1\n+a|2\n```\n"));
        assert!(!md.contains("## ok"));
    }

    #[test]
    fn json_roundtrips_summary() {
        let json = report().to_json();
        let back: ConformanceReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.summary.failed, 1);
        assert_eq!(back.summary.failures(), vec!["broken"]);
    }
}
