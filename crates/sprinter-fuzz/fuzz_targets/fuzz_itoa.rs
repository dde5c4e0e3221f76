#![no_main]
use libfuzzer_sys::fuzz_target;
use sprinter_core::stdlib::{Radix, itoa_vec};

fuzz_target!(|data: [u8; 4]| {
    let v = i32::from_le_bytes(data);
    assert_eq!(itoa_vec(v, Radix::Decimal), v.to_string().into_bytes());
    assert_eq!(
        itoa_vec(v, Radix::Hex),
        format!("{:x}", v as u32).into_bytes()
    );
});
