//! Diagnostics and errors raised by the formatter.
//!
//! A [`Diagnostic`] describes malformed input. Under the default error policy
//! it is collected alongside the rendered output and formatting continues; under
//! the abort policy the first one becomes [`FormatError::Aborted`].
//!
//! A [`FormatError`] always ends the call.

use sprinter_membrane::{DiagnosticClass, Marker};

/// Type tag of a formatting argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgKind {
    Char,
    Int,
    Text,
}

impl ArgKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Char => "char",
            Self::Int => "int",
            Self::Text => "text",
        }
    }
}

impl core::fmt::Display for ArgKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// What was wrong with a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A non-digit byte appeared before the conversion letter.
    MalformedWidthDigit(u8),
    /// The conversion letter is not one of `c`, `d`, `s`, `x`.
    UnknownConversion(u8),
    /// A lone `%` at the end of the template.
    EmptyDirective,
    /// The directive needs an argument but none are left.
    MissingArgument { expected: ArgKind },
    /// The next argument has the wrong type. It is consumed.
    ArgumentMismatch { expected: ArgKind, found: ArgKind },
}

/// A diagnostic and the template offset of the `%` that started its directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub offset: usize,
}

impl Diagnostic {
    #[must_use]
    pub const fn new(kind: DiagnosticKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// Marker line written to the diagnostic channel.
    #[must_use]
    pub const fn marker(&self) -> Marker {
        match self.kind {
            DiagnosticKind::MalformedWidthDigit(b) => Marker::Width(b),
            _ => Marker::Plain,
        }
    }

    /// Counter class for the process-wide statistics.
    #[must_use]
    pub const fn class(&self) -> DiagnosticClass {
        match self.kind {
            DiagnosticKind::MalformedWidthDigit(_) => DiagnosticClass::MalformedWidth,
            DiagnosticKind::UnknownConversion(_) => DiagnosticClass::UnknownConversion,
            DiagnosticKind::EmptyDirective => DiagnosticClass::EmptyDirective,
            DiagnosticKind::MissingArgument { .. } => DiagnosticClass::MissingArgument,
            DiagnosticKind::ArgumentMismatch { .. } => DiagnosticClass::ArgumentMismatch,
        }
    }
}

impl core::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            DiagnosticKind::MalformedWidthDigit(b) => write!(
                f,
                "offset {}: '{}' is not a width digit",
                self.offset,
                b.escape_ascii()
            ),
            DiagnosticKind::UnknownConversion(b) => write!(
                f,
                "offset {}: unknown conversion '{}'",
                self.offset,
                b.escape_ascii()
            ),
            DiagnosticKind::EmptyDirective => {
                write!(f, "offset {}: '%' at end of template", self.offset)
            }
            DiagnosticKind::MissingArgument { expected } => write!(
                f,
                "offset {}: missing {expected} argument",
                self.offset
            ),
            DiagnosticKind::ArgumentMismatch { expected, found } => write!(
                f,
                "offset {}: expected {expected} argument, found {found}",
                self.offset
            ),
        }
    }
}

/// Error that ends a formatting call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// First diagnostic under the abort policy.
    Aborted(Diagnostic),
    /// Rendered output would exceed the configured limit.
    OutputTooLarge { limit: usize },
    /// A single directive is longer than the configured limit.
    DirectiveTooLong { offset: usize, limit: usize },
    /// Destination buffer cannot hold the output plus its NUL terminator.
    BufferTooSmall { needed: usize, available: usize },
}

impl core::fmt::Display for FormatError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Aborted(d) => write!(f, "aborted: {d}"),
            Self::OutputTooLarge { limit } => {
                write!(f, "rendered output exceeds {limit} bytes")
            }
            Self::DirectiveTooLong { offset, limit } => {
                write!(f, "directive at offset {offset} exceeds {limit} bytes")
            }
            Self::BufferTooSmall { needed, available } => {
                write!(f, "destination too small: need {needed}, have {available}")
            }
        }
    }
}

impl std::error::Error for FormatError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_width_errors_carry_their_byte_in_the_marker() {
        let width = Diagnostic::new(DiagnosticKind::MalformedWidthDigit(b'-'), 3);
        assert_eq!(width.marker(), Marker::Width(b'-'));
        let unknown = Diagnostic::new(DiagnosticKind::UnknownConversion(b'q'), 0);
        assert_eq!(unknown.marker(), Marker::Plain);
        assert_eq!(
            Diagnostic::new(DiagnosticKind::EmptyDirective, 9).marker(),
            Marker::Plain
        );
    }

    #[test]
    fn display_names_offset_and_cause() {
        let d = Diagnostic::new(
            DiagnosticKind::ArgumentMismatch {
                expected: ArgKind::Int,
                found: ArgKind::Text,
            },
            12,
        );
        assert_eq!(d.to_string(), "offset 12: expected int argument, found text");

        let e = FormatError::BufferTooSmall {
            needed: 6,
            available: 4,
        };
        assert_eq!(e.to_string(), "destination too small: need 6, have 4");
    }

    #[test]
    fn nonprintable_bytes_are_escaped() {
        let d = Diagnostic::new(DiagnosticKind::UnknownConversion(b'\n'), 0);
        assert_eq!(d.to_string(), "offset 0: unknown conversion '\\n'");
    }
}
