//! Bounded growable byte buffers.
//!
//! The output of a formatting call accumulates in a `BoundedBuf`. It grows on
//! demand up to a fixed limit and refuses any write that would cross it; a
//! refused write leaves the contents unchanged. Directives are borrowed slices
//! of the template; the formatter checks their length against
//! `FormatOptions::max_directive`.
//!
//! Invariant: `data.len() <= limit`.

/// Default limit for rendered output, in bytes.
pub const DEFAULT_MAX_OUTPUT: usize = 65_536;

/// Default limit for one directive (the bytes after `%`), in bytes.
pub const DEFAULT_MAX_DIRECTIVE: usize = 1023;

/// Initial allocation never exceeds this, whatever the limit.
const INITIAL_CAPACITY: usize = 256;

/// A write would have exceeded the buffer limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overflow {
    pub limit: usize,
}

/// Growable byte buffer with a hard upper bound.
#[derive(Debug, Clone)]
pub struct BoundedBuf {
    data: Vec<u8>,
    limit: usize,
}

impl BoundedBuf {
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            data: Vec::with_capacity(limit.min(INITIAL_CAPACITY)),
            limit,
        }
    }

    /// Bytes that can still be written.
    #[must_use]
    fn remaining(&self) -> usize {
        self.limit - self.data.len()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    pub fn push(&mut self, byte: u8) -> Result<(), Overflow> {
        self.reserve(1)?;
        self.data.push(byte);
        Ok(())
    }

    pub fn extend_from_slice(&mut self, bytes: &[u8]) -> Result<(), Overflow> {
        self.reserve(bytes.len())?;
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Append `count` copies of `byte`.
    pub fn pad(&mut self, byte: u8, count: usize) -> Result<(), Overflow> {
        self.reserve(count)?;
        self.data.resize(self.data.len() + count, byte);
        Ok(())
    }

    fn reserve(&self, additional: usize) -> Result<(), Overflow> {
        if additional > self.remaining() {
            return Err(Overflow { limit: self.limit });
        }
        Ok(())
    }
}
