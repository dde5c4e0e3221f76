//! Integer-to-string conversion (itoa).
//!
//! Digits are generated least-significant first and the buffer is reversed
//! in place afterwards. Two inputs take dedicated paths:
//! - `i32::MIN` in decimal has no positive counterpart in 32 bits, so its
//!   literal is copied verbatim.
//! - Negative values in hex render the two's-complement bit pattern as
//!   exactly eight nibbles, most significant first, with no sign.

/// Large enough for the longest rendering, `-2147483648`.
pub const ITOA_BUF_LEN: usize = 12;

const DIGITS: &[u8; 16] = b"0123456789abcdef";

const I32_MIN_LITERAL: &[u8] = b"-2147483648";

/// Radix accepted by [`itoa`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Decimal,
    Hex,
}

impl Radix {
    #[must_use]
    pub const fn base(self) -> u32 {
        match self {
            Self::Decimal => 10,
            Self::Hex => 16,
        }
    }
}

/// Render `value` in `radix` into the front of `buf`.
///
/// Returns the number of bytes written. No terminator is appended.
pub fn itoa(value: i32, radix: Radix, buf: &mut [u8; ITOA_BUF_LEN]) -> usize {
    match radix {
        Radix::Decimal if value == i32::MIN => {
            buf[..I32_MIN_LITERAL.len()].copy_from_slice(I32_MIN_LITERAL);
            I32_MIN_LITERAL.len()
        }
        Radix::Hex if value < 0 => twos_complement_hex(value, buf),
        _ => {
            let negative = value < 0;
            let mut n = value.unsigned_abs();
            let base = radix.base();
            let mut len = 0;
            loop {
                buf[len] = DIGITS[(n % base) as usize];
                len += 1;
                n /= base;
                if n == 0 {
                    break;
                }
            }
            if negative {
                buf[len] = b'-';
                len += 1;
            }
            buf[..len].reverse();
            len
        }
    }
}

/// Render `value` in `radix` into a fresh vector.
#[must_use]
pub fn itoa_vec(value: i32, radix: Radix) -> Vec<u8> {
    let mut buf = [0u8; ITOA_BUF_LEN];
    let len = itoa(value, radix, &mut buf);
    buf[..len].to_vec()
}

fn twos_complement_hex(value: i32, buf: &mut [u8; ITOA_BUF_LEN]) -> usize {
    let bits = value as u32;
    let mut len = 0;
    let mut shift = 28i32;
    while shift >= 0 {
        buf[len] = DIGITS[((bits >> shift) & 0xf) as usize];
        len += 1;
        shift -= 4;
    }
    len
}
