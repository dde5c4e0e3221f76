//! Formatted output.
//!
//! `sprinter`/`format` render a template and typed arguments into bytes,
//! driving the integer conversion in `stdlib::conversion` for `%d` and `%x`.

pub mod buffer;
pub mod error;
pub mod printf;

pub use error::{ArgKind, Diagnostic, DiagnosticKind, FormatError};
pub use printf::{
    ConversionKind, Directive, FormatArg, FormatOptions, Formatted, Scanner, Segment, format,
    format_with, parse_directive, required_args, sprinter, terminated,
};
