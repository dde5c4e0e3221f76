//! Fixture capture.
//!
//! Runs the built-in vectors through the reference formatter and serializes
//! inputs and outputs as a JSON fixture set for later verification.

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;
use crate::fixtures::{FixtureArg, FixtureCase, FixtureSet};
use crate::reference::reference_format;

/// Fixture schema version written by [`capture_fixture_set`].
pub const FIXTURE_VERSION: &str = "v1";

/// A template and its arguments, without an expectation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vector {
    pub name: String,
    pub template: String,
    pub args: Vec<FixtureArg>,
}

impl Vector {
    fn new(name: &str, template: &str, args: Vec<FixtureArg>) -> Self {
        Self {
            name: name.to_string(),
            template: template.to_string(),
            args,
        }
    }
}

fn c(ch: char) -> FixtureArg {
    FixtureArg::Char(ch)
}

fn d(v: i32) -> FixtureArg {
    FixtureArg::Int(v)
}

fn s(text: &str) -> FixtureArg {
    FixtureArg::Str(text.to_string())
}

/// The sixteen acceptance vectors, in their historical order.
#[must_use]
pub fn acceptance_vectors() -> Vec<Vector> {
    vec![
        Vector::new("empty", "", vec![]),
        Vector::new("literal_only", "A long text without %%-signs.", vec![]),
        Vector::new("one_char", "One char: '%c'.", vec![c('x')]),
        Vector::new("two_chars", "Two chars: '%c' and '%c'.", vec![c('x'), c('y')]),
        Vector::new(
            "padded_chars",
            "Three chars: '%c', '%2c' and '%4c'.",
            vec![c('x'), c('y'), c('z')],
        ),
        Vector::new(
            "escapes",
            "Legal %s are '%%%%', '%1cc', '%%d', '%%s' and '%%x'.",
            vec![s("%-directives"), c('%')],
        ),
        Vector::new(
            "strings",
            "Three texts: '%s', '%s' and '%4s'.",
            vec![s("abc...æøå"), s("alpha -> omega"), s("")],
        ),
        Vector::new(
            "percentages",
            "A rise of %d%% beats one of %d%%!",
            vec![d(27), d(8)],
        ),
        Vector::new(
            "negatives",
            "The number %d lies in the interval %d-%d.",
            vec![d(-2230), d(-10000), d(-1000)],
        ),
        Vector::new(
            "widths",
            "The numbers are %0d, %12d and %209d.",
            vec![d(0), d(1000), d(1_000_000_000)],
        ),
        Vector::new(
            "largest_positive",
            "The %2s number is %1001d.",
            vec![s("largest positive"), d(i32::MAX)],
        ),
        Vector::new(
            "second_most_negative",
            "The second %s number is %d (-%d).",
            vec![s("most negative"), d(-2_147_483_647), d(1)],
        ),
        Vector::new(
            "most_negative",
            "The very %s number is %d.",
            vec![s("most negative"), d(i32::MIN)],
        ),
        Vector::new("zero_hex", "%d = 0x%x", vec![d(0), d(0)]),
        Vector::new("hex", "%d = 0x%1x", vec![d(1234), d(1234)]),
        Vector::new("negative_hex", "%4d = 0x%8x", vec![d(-88), d(-88)]),
    ]
}

/// Boundary vectors beyond the acceptance set.
#[must_use]
pub fn edge_vectors() -> Vec<Vector> {
    vec![
        Vector::new("lone_escape", "%%", vec![]),
        Vector::new("min_hex", "%x", vec![d(i32::MIN)]),
        Vector::new("minus_one_hex", "%10x", vec![d(-1)]),
        Vector::new("max_hex", "%x", vec![d(i32::MAX)]),
        Vector::new("min_padded", "[%12d]", vec![d(i32::MIN)]),
        Vector::new("no_truncation", "%3s|%1d", vec![s("truncate me"), d(123_456)]),
        Vector::new("adjacent", "%c%d%s%x", vec![c('a'), d(1), s("b"), d(12)]),
        Vector::new("zero_width_char", "%0c%00c", vec![c('p'), c('q')]),
        Vector::new("padded_empty", "<%8s>", vec![s("")]),
    ]
}

/// Every built-in vector: acceptance first, then edges.
#[must_use]
pub fn builtin_vectors() -> Vec<Vector> {
    let mut all = acceptance_vectors();
    all.extend(edge_vectors());
    all
}

/// Render one vector with the reference formatter.
pub fn capture_case(vector: &Vector) -> Result<FixtureCase, HarnessError> {
    let expected_output = reference_format(&vector.template, &vector.args)?;
    Ok(FixtureCase {
        name: vector.name.clone(),
        template: vector.template.clone(),
        args: vector.args.clone(),
        expected_len: expected_output.len(),
        expected_output,
        expected_diagnostics: 0,
    })
}

/// Capture a fixture set from `vectors`.
pub fn capture_fixture_set(
    family: &str,
    captured_at: &str,
    vectors: &[Vector],
) -> Result<FixtureSet, HarnessError> {
    let cases = vectors
        .iter()
        .map(capture_case)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(FixtureSet {
        version: FIXTURE_VERSION.to_string(),
        family: family.to_string(),
        captured_at: captured_at.to_string(),
        cases,
    })
}
