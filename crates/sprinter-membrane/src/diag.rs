//! Process-wide diagnostic channel.
//!
//! Formatting diagnostics are reported to the caller as structured records,
//! and additionally written here as short marker lines:
//! - a malformed width byte `b` writes `ERROR: b`
//! - every other diagnostic writes `ERROR`
//!
//! Each line is written under one lock, so concurrent callers never
//! interleave within a line. Ordering across callers is unspecified.

use std::io::Write;

use parking_lot::{Mutex, const_mutex};

use crate::config::{self, DiagTarget};

/// Marker written for one diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// A non-digit byte found where a width digit was expected.
    Width(u8),
    /// Any other diagnostic.
    Plain,
}

impl Marker {
    /// Append the marker line (including the trailing newline) to `out`.
    pub fn render(self, out: &mut Vec<u8>) {
        match self {
            Self::Width(b) => {
                out.extend_from_slice(b"ERROR: ");
                out.push(b);
            }
            Self::Plain => out.extend_from_slice(b"ERROR"),
        }
        out.push(b'\n');
    }
}

enum Sink {
    /// Not yet resolved from `SPRINTER_DIAG`.
    Unresolved,
    Target(DiagTarget),
    Custom(Box<dyn Write + Send>),
}

static CHANNEL: Mutex<Sink> = const_mutex(Sink::Unresolved);

/// Write one marker line to the channel.
///
/// Write failures are swallowed: the channel is advisory and must never
/// change the outcome of a formatting call.
pub fn emit(marker: Marker) {
    let mut line = Vec::with_capacity(10);
    marker.render(&mut line);

    let mut sink = CHANNEL.lock();
    if matches!(*sink, Sink::Unresolved) {
        *sink = Sink::Target(config::diag_target());
    }
    let _ = match &mut *sink {
        Sink::Target(DiagTarget::Stderr) => std::io::stderr().lock().write_all(&line),
        Sink::Target(DiagTarget::Stdout) => std::io::stdout().lock().write_all(&line),
        Sink::Target(DiagTarget::Off) | Sink::Unresolved => Ok(()),
        Sink::Custom(w) => w.write_all(&line).and_then(|()| w.flush()),
    };
}

/// Redirect the channel to a caller-provided writer.
pub fn set_sink(writer: Box<dyn Write + Send>) {
    *CHANNEL.lock() = Sink::Custom(writer);
}

/// Redirect the channel to one of the standard targets.
pub fn set_target(target: DiagTarget) {
    *CHANNEL.lock() = Sink::Target(target);
}
