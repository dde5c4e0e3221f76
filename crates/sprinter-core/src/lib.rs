//! # sprinter-core
//!
//! A small sprintf: literal text plus `%c`, `%d`, `%s`, `%x` and `%%`, with
//! an optional decimal field width. Malformed directives never panic; they are
//! returned as structured diagnostics next to the rendered bytes.
//!
//! No `unsafe` code is permitted at the crate level.

#![deny(unsafe_code)]

pub mod stdio;
pub mod stdlib;

pub use sprinter_membrane::ErrorPolicy;
pub use stdio::{FormatArg, FormatError, FormatOptions, Formatted, format, format_with, sprinter};
