//! Integration test: capture, persist, reload and verify the built-in fixtures.
//!
//! Run: cargo test -p sprinter-harness --test fixture_pipeline_test

use std::path::PathBuf;

use sprinter_core::ErrorPolicy;
use sprinter_harness::capture::{builtin_vectors, capture_fixture_set};
use sprinter_harness::structured_log::{
    LogEmitter, LogEntry, LogLevel, Outcome, validate_log_file,
};
use sprinter_harness::verify::VerificationSummary;
use sprinter_harness::{ConformanceReport, FixtureArg, FixtureCase, FixtureSet, TestRunner};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("sprinter-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

#[test]
fn captured_fixtures_verify_under_both_policies() {
    let dir = scratch_dir("pipeline");
    let set = capture_fixture_set("printf", "2026-01-01T00:00:00Z", &builtin_vectors()).unwrap();
    let path = dir.join("printf.json");
    std::fs::write(&path, set.to_json().unwrap()).unwrap();

    let loaded = FixtureSet::from_file(&path).unwrap();
    assert_eq!(loaded.cases.len(), set.cases.len());

    for policy in [ErrorPolicy::Continue, ErrorPolicy::Abort] {
        let results = TestRunner::new("pipeline", policy).run(&loaded);
        let summary = VerificationSummary::from_results(results);
        assert!(
            summary.all_passed(),
            "{policy:?} failures: {:?}",
            summary.failures()
        );
    }
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn hand_written_diagnostic_fixture_verifies() {
    let case = |name: &str, template: &str, args: Vec<FixtureArg>, out: &str, diags: usize| {
        FixtureCase {
            name: name.into(),
            template: template.into(),
            args,
            expected_output: out.into(),
            expected_len: out.len(),
            expected_diagnostics: diags,
        }
    };
    let set = FixtureSet {
        version: "v1".into(),
        family: "printf-diagnostics".into(),
        captured_at: "manual".into(),
        cases: vec![
            case("malformed_width", "[%-5d]", vec![FixtureArg::Int(7)], "[    7]", 1),
            case("unknown", "%q%d", vec![FixtureArg::Int(5)], "5", 1),
            case("trailing_percent", "50%", vec![], "50", 1),
            case("missing", "a%sb", vec![], "ab", 1),
            case(
                "mismatch",
                "%d|%s",
                vec![FixtureArg::Str("oops".into()), FixtureArg::Str("ok".into())],
                "|ok",
                1,
            ),
        ],
    };

    let summary = VerificationSummary::from_results(
        TestRunner::new("diag", ErrorPolicy::Continue).run(&set),
    );
    assert!(summary.all_passed(), "{:?}", summary.failures());

    let aborted = VerificationSummary::from_results(
        TestRunner::new("diag", ErrorPolicy::Abort).run(&set),
    );
    assert_eq!(aborted.failed, set.cases.len());
}

#[test]
fn verification_log_passes_schema_validation() {
    let dir = scratch_dir("log");
    let set = capture_fixture_set("printf", "t", &builtin_vectors()).unwrap();
    let results = TestRunner::new("log", ErrorPolicy::Continue).run(&set);

    let log_path = dir.join("verify.jsonl");
    let mut emitter = LogEmitter::to_file(&log_path, "verify", "run-1").unwrap();
    emitter.emit(LogLevel::Info, "verify_start").unwrap();
    for r in &results {
        emitter
            .emit_entry(
                LogEntry::new("", LogLevel::Info, "case_verified")
                    .with_policy("continue")
                    .with_case(&r.case_name, &r.template)
                    .with_outcome(if r.passed { Outcome::Pass } else { Outcome::Fail })
                    .with_result(r.actual_len, r.diagnostics.len()),
            )
            .unwrap();
    }
    emitter.flush().unwrap();
    drop(emitter);

    let (lines, errors) = validate_log_file(&log_path).unwrap();
    assert_eq!(lines, results.len() + 1);
    assert!(errors.is_empty(), "{errors:?}");

    let report = ConformanceReport {
        title: "sprinter Conformance Report".into(),
        policy: "continue".into(),
        timestamp: "fixed".into(),
        summary: VerificationSummary::from_results(results),
    };
    let md = report.to_markdown();
    assert!(md.contains("| most_negative |"));
    assert!(md.contains(&format!("- Passed: {}\n", set.cases.len())));
    let _ = std::fs::remove_dir_all(&dir);
}
