//! CLI entrypoint for the sprinter conformance harness.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use sprinter_core::{ErrorPolicy, FormatOptions, format_with};
use sprinter_harness::capture::{acceptance_vectors, builtin_vectors, capture_fixture_set};
use sprinter_harness::fixtures::{FixtureArg, format_args};
use sprinter_harness::oracle::run_oracle;
use sprinter_harness::structured_log::{
    ArtifactIndex, LogEmitter, LogEntry, LogLevel, Outcome, now_utc, validate_log_file,
};
use sprinter_harness::verify::VerificationSummary;
use sprinter_harness::{ConformanceReport, FixtureSet, HarnessError, TestRunner};

/// Conformance tooling for sprinter.
#[derive(Debug, Parser)]
#[command(name = "sprinter-harness")]
#[command(about = "Conformance testing harness for sprinter")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render the built-in vectors with the reference formatter into a fixture file.
    Capture {
        /// Output directory for fixture JSON files.
        #[arg(long)]
        output: PathBuf,
        /// Fixture family name (also the file stem).
        #[arg(long, default_value = "printf")]
        family: String,
        /// Capture only the sixteen acceptance vectors.
        #[arg(long)]
        acceptance_only: bool,
    },
    /// Verify the formatter against captured fixtures.
    Verify {
        /// Directory containing fixture JSON files.
        #[arg(long)]
        fixture: PathBuf,
        /// Error policy: `continue` or `abort`.
        #[arg(long, default_value = "continue")]
        policy: String,
        /// Output report path (markdown; JSON is written next to it).
        #[arg(long)]
        report: Option<PathBuf>,
        /// Structured JSONL log path.
        #[arg(long)]
        log: Option<PathBuf>,
        /// Optional fixed timestamp string for deterministic report generation.
        #[arg(long)]
        timestamp: Option<String>,
    },
    /// Compare the formatter with the reference on the built-in vectors.
    Oracle {
        /// Include the edge vectors after the acceptance vectors.
        #[arg(long)]
        all: bool,
    },
    /// Format one template and print the output plus any diagnostics.
    Render {
        /// Template to format.
        template: String,
        /// Arguments as `c:<char>`, `d:<int>` or `s:<text>`, in order.
        #[arg(long = "arg")]
        args: Vec<FixtureArg>,
        /// Error policy: `continue` or `abort` (defaults to SPRINTER_MODE).
        #[arg(long)]
        policy: Option<String>,
    },
    /// Validate a structured JSONL log file.
    ValidateLog {
        /// Log file path.
        #[arg(long)]
        log: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Capture {
            output,
            family,
            acceptance_only,
        } => {
            eprintln!("Capturing {family} fixtures to {}", output.display());
            std::fs::create_dir_all(&output)?;
            let vectors = if acceptance_only {
                acceptance_vectors()
            } else {
                builtin_vectors()
            };
            let set = capture_fixture_set(&family, &now_utc(), &vectors)?;
            let path = output.join(format!("{family}.json"));
            std::fs::write(&path, set.to_json()?)?;
            eprintln!("Wrote {} cases to {}", set.cases.len(), path.display());
        }
        Command::Verify {
            fixture,
            policy,
            report,
            log,
            timestamp,
        } => {
            let policy = ErrorPolicy::from_str_loose(&policy);
            eprintln!(
                "Verifying against fixtures in {} (policy={})",
                fixture.display(),
                policy.as_str()
            );
            let fixture_sets = load_fixture_sets(&fixture)?;

            let mut emitter = match &log {
                Some(path) => Some(LogEmitter::to_file(path, "verify", &run_id())?),
                None => None,
            };
            let runner = TestRunner::new("fixture-verify", policy);
            let mut results = Vec::new();
            for set in &fixture_sets {
                let started = Instant::now();
                let run = runner.run(set);
                let elapsed = u64::try_from(started.elapsed().as_nanos()).unwrap_or(u64::MAX);
                if let Some(emitter) = emitter.as_mut() {
                    for r in &run {
                        let outcome = if r.passed { Outcome::Pass } else { Outcome::Fail };
                        let level = if r.passed { LogLevel::Info } else { LogLevel::Error };
                        emitter.emit_entry(
                            LogEntry::new("", level, "case_verified")
                                .with_policy(policy.as_str())
                                .with_case(&r.case_name, &r.template)
                                .with_outcome(outcome)
                                .with_result(r.actual_len, r.diagnostics.len()),
                        )?;
                    }
                    emitter.emit_entry(
                        LogEntry::new("", LogLevel::Info, "fixture_set_done")
                            .with_policy(policy.as_str())
                            .with_latency_ns(elapsed)
                            .with_details(serde_json::json!({
                                "family": set.family,
                                "cases": run.len(),
                            })),
                    )?;
                }
                results.extend(run);
            }

            let summary = VerificationSummary::from_results(results);
            let report_doc = ConformanceReport {
                title: String::from("sprinter Conformance Report"),
                policy: policy.as_str().to_string(),
                timestamp: timestamp.unwrap_or_else(now_utc),
                summary,
            };

            eprintln!(
                "Verification complete: total={}, passed={}, failed={}",
                report_doc.summary.total, report_doc.summary.passed, report_doc.summary.failed
            );

            if let Some(report_path) = report {
                eprintln!("Writing report to {}", report_path.display());
                let markdown = report_doc.to_markdown();
                let json = report_doc.to_json();
                let json_path = report_path.with_extension("json");
                std::fs::write(&report_path, &markdown)?;
                std::fs::write(&json_path, &json)?;

                let mut index = ArtifactIndex::new(run_id());
                index.add_bytes(report_path.display().to_string(), "report", markdown.as_bytes());
                index.add_bytes(json_path.display().to_string(), "report", json.as_bytes());
                let index_path = report_path.with_extension("artifacts.json");
                std::fs::write(&index_path, index.to_json()?)?;
            }
            if let Some(emitter) = emitter.as_mut() {
                emitter.flush()?;
            }

            if !report_doc.summary.all_passed() {
                return Err(HarnessError::VerificationFailed {
                    failed: report_doc.summary.failed,
                    total: report_doc.summary.total,
                }
                .into());
            }
        }
        Command::Oracle { all } => {
            let vectors = if all {
                builtin_vectors()
            } else {
                acceptance_vectors()
            };
            let checks = run_oracle(&vectors)?;
            let mut stdout = std::io::stdout().lock();
            for check in &checks {
                for line in check.lines() {
                    writeln!(stdout, "{line}")?;
                }
            }
            let failed = checks.iter().filter(|c| !c.passed()).count();
            if failed > 0 {
                return Err(HarnessError::VerificationFailed {
                    failed,
                    total: checks.len(),
                }
                .into());
            }
        }
        Command::Render {
            template,
            args,
            policy,
        } => {
            let opts = match policy {
                Some(p) => FormatOptions::default().with_policy(ErrorPolicy::from_str_loose(&p)),
                None => FormatOptions::from_env(),
            }
            .quiet();
            let values = format_args(&args)?;
            let formatted = format_with(template.as_bytes(), &values, &opts)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(formatted.as_bytes())?;
            writeln!(stdout)?;
            writeln!(stdout, "length: {}", formatted.len())?;
            for d in formatted.diagnostics() {
                writeln!(stdout, "diagnostic: {d}")?;
            }
        }
        Command::ValidateLog { log } => {
            let (lines, errors) = validate_log_file(&log)?;
            for err in &errors {
                eprintln!("{err}");
            }
            eprintln!(
                "Validated {lines} lines in {}: {} errors",
                log.display(),
                errors.len()
            );
            if !errors.is_empty() {
                return Err(format!("{} schema violations", errors.len()).into());
            }
        }
    }

    Ok(())
}

fn load_fixture_sets(dir: &Path) -> Result<Vec<FixtureSet>, HarnessError> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    paths.sort();

    let mut sets = Vec::new();
    for path in paths {
        match FixtureSet::from_file(&path) {
            Ok(set) => sets.push(set),
            Err(err) => eprintln!("Skipping {}: {}", path.display(), err),
        }
    }
    if sets.is_empty() {
        return Err(HarnessError::NoFixtures(dir.display().to_string()));
    }
    Ok(sets)
}

fn run_id() -> String {
    format!("run-{}", std::process::id())
}
