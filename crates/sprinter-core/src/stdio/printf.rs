//! sprintf-style formatting engine.
//!
//! Supported directive grammar: `% (digit)* (c|d|s|x)` or `%%`. There are no
//! flags, no precision and no length modifiers; width pads on the left with
//! spaces and never truncates.
//!
//! Templates and text arguments are byte strings. Each ends at its first NUL
//! byte, or at the end of the slice if it has none.
//!
//! Scanning is a two-state machine ([`Scanner`]): literal text, and the bytes
//! of a directive up to and including the first byte that is `%`, an ASCII
//! letter, or the end of the template. The formatter interprets each directive
//! and renders it into a bounded output buffer.

use sprinter_membrane::{ErrorPolicy, diag, global_stats};

use super::buffer::{BoundedBuf, DEFAULT_MAX_DIRECTIVE, DEFAULT_MAX_OUTPUT, Overflow};
use super::error::{ArgKind, Diagnostic, DiagnosticKind, FormatError};
use crate::stdlib::conversion::{ITOA_BUF_LEN, Radix, itoa};

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

/// Typed argument value, consumed in template order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg<'a> {
    Char(u8),
    Int(i32),
    Text(&'a [u8]),
}

impl FormatArg<'_> {
    #[must_use]
    pub const fn kind(&self) -> ArgKind {
        match self {
            Self::Char(_) => ArgKind::Char,
            Self::Int(_) => ArgKind::Int,
            Self::Text(_) => ArgKind::Text,
        }
    }
}

impl From<u8> for FormatArg<'_> {
    fn from(c: u8) -> Self {
        Self::Char(c)
    }
}

impl From<i32> for FormatArg<'_> {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl<'a> From<&'a [u8]> for FormatArg<'a> {
    fn from(s: &'a [u8]) -> Self {
        Self::Text(s)
    }
}

impl<'a> From<&'a str> for FormatArg<'a> {
    fn from(s: &'a str) -> Self {
        Self::Text(s.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// Directives
// ---------------------------------------------------------------------------

/// Rendering rule selected by a directive's last byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionKind {
    /// `%%`
    Percent,
    /// `c`
    Char,
    /// `d`
    Decimal,
    /// `s`
    String,
    /// `x`
    Hex,
    /// Anything else, carrying the offending byte.
    Unknown(u8),
}

impl ConversionKind {
    #[must_use]
    pub const fn from_letter(letter: u8) -> Self {
        match letter {
            b'c' => Self::Char,
            b'd' => Self::Decimal,
            b's' => Self::String,
            b'x' => Self::Hex,
            other => Self::Unknown(other),
        }
    }

    /// Argument type this conversion consumes, if any.
    #[must_use]
    pub const fn expected_arg(self) -> Option<ArgKind> {
        match self {
            Self::Char => Some(ArgKind::Char),
            Self::Decimal | Self::Hex => Some(ArgKind::Int),
            Self::String => Some(ArgKind::Text),
            Self::Percent | Self::Unknown(_) => None,
        }
    }
}

/// An interpreted directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub width: usize,
    pub kind: ConversionKind,
    /// Non-digit bytes found before the conversion letter, in order.
    pub malformed: Vec<u8>,
}

/// Interpret the bytes of a directive (everything after the `%`, including
/// the terminal byte). Returns `None` for an empty directive.
///
/// Width digits carry positional place value: the byte at index `i` of the
/// `n` bytes before the letter is worth `digit * 10^(n - 1 - i)`. Non-digit
/// bytes still occupy their position and are reported in `malformed`.
#[must_use]
pub fn parse_directive(code: &[u8]) -> Option<Directive> {
    let (&letter, width_bytes) = code.split_last()?;
    if code == b"%" {
        return Some(Directive {
            width: 0,
            kind: ConversionKind::Percent,
            malformed: Vec::new(),
        });
    }

    let mut width = 0usize;
    let mut malformed = Vec::new();
    for (i, &b) in width_bytes.iter().enumerate() {
        if b.is_ascii_digit() {
            let place = width_bytes.len() - 1 - i;
            let value = usize::from(b - b'0').saturating_mul(pow10(place));
            width = width.saturating_add(value);
        } else {
            malformed.push(b);
        }
    }

    Some(Directive {
        width,
        kind: ConversionKind::from_letter(letter),
        malformed,
    })
}

fn pow10(exp: usize) -> usize {
    u32::try_from(exp)
        .ok()
        .and_then(|e| 10usize.checked_pow(e))
        .unwrap_or(usize::MAX)
}

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

/// A piece of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'t> {
    /// Literal bytes to copy verbatim.
    Literal(&'t [u8]),
    /// Directive starting with the `%` at `offset`. `code` excludes that `%`.
    Directive { offset: usize, code: &'t [u8] },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Literal,
    InDirective { start: usize },
    Done,
}

/// Splits a template into literal runs and directives.
#[derive(Debug, Clone)]
pub struct Scanner<'t> {
    template: &'t [u8],
    pos: usize,
    state: ScanState,
}

impl<'t> Scanner<'t> {
    #[must_use]
    pub fn new(template: &'t [u8]) -> Self {
        Self {
            template: terminated(template),
            pos: 0,
            state: ScanState::Literal,
        }
    }

    fn scan_literal(&mut self) -> Option<Segment<'t>> {
        let template = self.template;
        let start = self.pos;
        let end = match template[start..].iter().position(|&b| b == b'%') {
            Some(i) => {
                let pct = start + i;
                self.state = ScanState::InDirective { start: pct };
                self.pos = pct + 1;
                pct
            }
            None => {
                self.state = ScanState::Done;
                self.pos = template.len();
                template.len()
            }
        };
        (end > start).then_some(Segment::Literal(&template[start..end]))
    }

    fn scan_directive(&mut self, start: usize) -> Segment<'t> {
        let template = self.template;
        while let Some(&b) = template.get(self.pos) {
            self.pos += 1;
            if ends_directive(b) {
                self.state = ScanState::Literal;
                return Segment::Directive {
                    offset: start,
                    code: &template[start + 1..self.pos],
                };
            }
        }
        self.state = ScanState::Done;
        Segment::Directive {
            offset: start,
            code: &template[start + 1..],
        }
    }
}

impl<'t> Iterator for Scanner<'t> {
    type Item = Segment<'t>;

    fn next(&mut self) -> Option<Segment<'t>> {
        loop {
            match self.state {
                ScanState::Done => return None,
                ScanState::Literal => {
                    if let Some(seg) = self.scan_literal() {
                        return Some(seg);
                    }
                }
                ScanState::InDirective { start } => return Some(self.scan_directive(start)),
            }
        }
    }
}

fn ends_directive(b: u8) -> bool {
    b == b'%' || b.is_ascii_alphabetic()
}

/// The prefix of `bytes` before its first NUL.
#[must_use]
pub fn terminated(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&b| b == 0) {
        Some(end) => &bytes[..end],
        None => bytes,
    }
}

/// Argument types a template consumes, in order.
///
/// Unknown and empty directives consume nothing and are skipped.
#[must_use]
pub fn required_args(template: &[u8]) -> Vec<ArgKind> {
    Scanner::new(template)
        .filter_map(|seg| match seg {
            Segment::Directive { code, .. } => parse_directive(code),
            Segment::Literal(_) => None,
        })
        .filter_map(|d| d.kind.expected_arg())
        .collect()
}

// ---------------------------------------------------------------------------
// Formatter
// ---------------------------------------------------------------------------

/// Per-call formatting options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    pub policy: ErrorPolicy,
    /// Maximum rendered length in bytes.
    pub max_output: usize,
    /// Maximum length of one directive, excluding its `%`.
    pub max_directive: usize,
    /// Write a marker line per diagnostic to the diagnostic channel.
    pub emit_diagnostics: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            policy: ErrorPolicy::Continue,
            max_output: DEFAULT_MAX_OUTPUT,
            max_directive: DEFAULT_MAX_DIRECTIVE,
            emit_diagnostics: true,
        }
    }
}

impl FormatOptions {
    /// Defaults with the error policy taken from `SPRINTER_MODE`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            policy: sprinter_membrane::error_policy(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_max_output(mut self, limit: usize) -> Self {
        self.max_output = limit;
        self
    }

    #[must_use]
    pub fn with_max_directive(mut self, limit: usize) -> Self {
        self.max_directive = limit;
        self
    }

    #[must_use]
    pub fn quiet(mut self) -> Self {
        self.emit_diagnostics = false;
        self
    }
}

/// Result of a completed formatting call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatted {
    bytes: Vec<u8>,
    diagnostics: Vec<Diagnostic>,
}

impl Formatted {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Rendered length in bytes, excluding any terminator.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// True if no diagnostic was raised.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    /// Copy the output plus a NUL terminator into `dst` and return the length.
    ///
    /// `dst` is left untouched if it is too small.
    pub fn write_to(&self, dst: &mut [u8]) -> Result<usize, FormatError> {
        let len = self.bytes.len();
        let needed = len + 1;
        if dst.len() < needed {
            return Err(FormatError::BufferTooSmall {
                needed,
                available: dst.len(),
            });
        }
        dst[..len].copy_from_slice(&self.bytes);
        dst[len] = 0;
        Ok(len)
    }
}

struct Formatter<'f, 'a> {
    args: core::slice::Iter<'f, FormatArg<'a>>,
    opts: &'f FormatOptions,
    out: BoundedBuf,
    diagnostics: Vec<Diagnostic>,
}

impl<'f, 'a> Formatter<'f, 'a> {
    fn new(args: &'f [FormatArg<'a>], opts: &'f FormatOptions) -> Self {
        Self {
            args: args.iter(),
            opts,
            out: BoundedBuf::new(opts.max_output),
            diagnostics: Vec::new(),
        }
    }

    fn run(mut self, template: &[u8]) -> Result<Formatted, FormatError> {
        for segment in Scanner::new(template) {
            match segment {
                Segment::Literal(run) => self.out.extend_from_slice(run).map_err(too_large)?,
                Segment::Directive { offset, code } => self.directive(offset, code)?,
            }
        }
        Ok(Formatted {
            bytes: self.out.into_vec(),
            diagnostics: self.diagnostics,
        })
    }

    fn directive(&mut self, offset: usize, code: &[u8]) -> Result<(), FormatError> {
        if code.len() > self.opts.max_directive {
            return Err(FormatError::DirectiveTooLong {
                offset,
                limit: self.opts.max_directive,
            });
        }
        let Some(directive) = parse_directive(code) else {
            return self.diagnose(offset, DiagnosticKind::EmptyDirective);
        };
        for &b in &directive.malformed {
            self.diagnose(offset, DiagnosticKind::MalformedWidthDigit(b))?;
        }
        self.render(offset, &directive)
    }

    fn render(&mut self, offset: usize, directive: &Directive) -> Result<(), FormatError> {
        let width = directive.width;
        match directive.kind {
            ConversionKind::Percent => self.out.push(b'%').map_err(too_large),
            ConversionKind::Unknown(letter) => {
                self.diagnose(offset, DiagnosticKind::UnknownConversion(letter))
            }
            ConversionKind::Char => match self.next_arg(offset, ArgKind::Char)? {
                Some(FormatArg::Char(c)) => self.padded(width, &[c]),
                _ => Ok(()),
            },
            ConversionKind::String => match self.next_arg(offset, ArgKind::Text)? {
                Some(FormatArg::Text(s)) => self.padded(width, terminated(s)),
                _ => Ok(()),
            },
            ConversionKind::Decimal | ConversionKind::Hex => {
                let radix = if directive.kind == ConversionKind::Hex {
                    Radix::Hex
                } else {
                    Radix::Decimal
                };
                match self.next_arg(offset, ArgKind::Int)? {
                    Some(FormatArg::Int(v)) => {
                        let mut digits = [0u8; ITOA_BUF_LEN];
                        let len = itoa(v, radix, &mut digits);
                        self.padded(width, &digits[..len])
                    }
                    _ => Ok(()),
                }
            }
        }
    }

    /// Take the next argument if it has the expected type.
    fn next_arg(
        &mut self,
        offset: usize,
        expected: ArgKind,
    ) -> Result<Option<FormatArg<'a>>, FormatError> {
        match self.args.next() {
            None => {
                self.diagnose(offset, DiagnosticKind::MissingArgument { expected })?;
                Ok(None)
            }
            Some(arg) if arg.kind() == expected => Ok(Some(*arg)),
            Some(arg) => {
                let found = arg.kind();
                self.diagnose(offset, DiagnosticKind::ArgumentMismatch { expected, found })?;
                Ok(None)
            }
        }
    }

    fn padded(&mut self, width: usize, body: &[u8]) -> Result<(), FormatError> {
        self.out
            .pad(b' ', width.saturating_sub(body.len()))
            .map_err(too_large)?;
        self.out.extend_from_slice(body).map_err(too_large)
    }

    fn diagnose(&mut self, offset: usize, kind: DiagnosticKind) -> Result<(), FormatError> {
        let diagnostic = Diagnostic::new(kind, offset);
        let stats = global_stats();
        stats.record(diagnostic.class());
        if self.opts.emit_diagnostics {
            diag::emit(diagnostic.marker());
        }
        if self.opts.policy.aborts() {
            stats.record_abort();
            return Err(FormatError::Aborted(diagnostic));
        }
        self.diagnostics.push(diagnostic);
        Ok(())
    }
}

fn too_large(o: Overflow) -> FormatError {
    FormatError::OutputTooLarge { limit: o.limit }
}

/// Format `template` with `args` using `opts`.
pub fn format_with(
    template: &[u8],
    args: &[FormatArg<'_>],
    opts: &FormatOptions,
) -> Result<Formatted, FormatError> {
    Formatter::new(args, opts).run(template)
}

/// Format `template` with `args` using [`FormatOptions::from_env`].
pub fn format(template: &[u8], args: &[FormatArg<'_>]) -> Result<Formatted, FormatError> {
    format_with(template, args, &FormatOptions::from_env())
}

/// Format into `dst`, NUL-terminate, and return the length written
/// (excluding the terminator).
pub fn sprinter(
    dst: &mut [u8],
    template: &[u8],
    args: &[FormatArg<'_>],
) -> Result<usize, FormatError> {
    format(template, args)?.write_to(dst)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
