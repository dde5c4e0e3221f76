//! Reference formatter built on `std::fmt`.
//!
//! Renders only well-formed templates: every directive is `%%` or a decimal
//! width followed by `c`, `d`, `s` or `x`, with an argument of the right type.
//! Anything else is reported as [`HarnessError::Unsupported`], so expectations
//! for malformed input have to be written by hand.

use std::fmt::Write;

use crate::error::HarnessError;
use crate::fixtures::FixtureArg;

/// Render `template` with `args` the way C `sprintf` would.
pub fn reference_format(template: &str, args: &[FixtureArg]) -> Result<String, HarnessError> {
    let template = until_nul(template);
    let unsupported = |reason: String| HarnessError::Unsupported {
        template: template.to_string(),
        reason,
    };

    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut chars = template.chars();
    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }

        let mut width = 0usize;
        let mut saw_width = false;
        let conversion = loop {
            match chars.next() {
                Some(d @ '0'..='9') => {
                    saw_width = true;
                    let digit = d as usize - '0' as usize;
                    width = width
                        .checked_mul(10)
                        .and_then(|w| w.checked_add(digit))
                        .ok_or_else(|| unsupported("width overflows usize".into()))?;
                }
                Some(c) => break c,
                None => return Err(unsupported("template ends inside a directive".into())),
            }
        };

        if conversion == '%' {
            // Any width digit, even `0`, makes `%` an unknown conversion.
            if saw_width {
                return Err(unsupported("width before '%%'".into()));
            }
            out.push('%');
            continue;
        }

        let arg = args
            .next()
            .ok_or_else(|| unsupported(format!("no argument for '%{conversion}'")))?;
        // `write!` into a String cannot fail.
        let _ = match (conversion, arg) {
            ('c', FixtureArg::Char(c)) if c.is_ascii() => write!(out, "{c:>width$}"),
            ('d', FixtureArg::Int(v)) => write!(out, "{v:>width$}"),
            ('x', FixtureArg::Int(v)) => write!(out, "{:>width$}", format!("{:x}", *v as u32)),
            ('s', FixtureArg::Str(s)) => {
                let s = until_nul(s);
                // Width counts bytes, not chars.
                let pad = width.saturating_sub(s.len());
                write!(out, "{:pad$}{s}", "")
            }
            (c, arg) => return Err(unsupported(format!("'%{c}' with argument {arg:?}"))),
        };
    }

    if let Some(extra) = args.next() {
        return Err(unsupported(format!("unused argument {extra:?}")));
    }
    Ok(out)
}

fn until_nul(s: &str) -> &str {
    s.split('\0').next().unwrap_or(s)
}
