//! Standard library utilities.

pub mod conversion;

pub use conversion::{ITOA_BUF_LEN, Radix, itoa, itoa_vec};
