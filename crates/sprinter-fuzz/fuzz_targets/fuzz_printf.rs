#![no_main]
use libfuzzer_sys::fuzz_target;
use sprinter_core::stdio::{ArgKind, FormatError, required_args, terminated};
use sprinter_core::{ErrorPolicy, FormatArg, FormatOptions, format_with};

const MAX_OUTPUT: usize = 4096;

// Input layout: one selector byte, then the template up to the first NUL,
// then argument material.
fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let template = terminated(rest);
    let pool = rest.get(template.len() + 1..).unwrap_or(&[]);

    // Build the arguments the template asks for, occasionally with a wrong type.
    let mut args = Vec::new();
    for (i, kind) in required_args(template).into_iter().enumerate() {
        let b = pool.get(i).copied().unwrap_or(b'?');
        let arg = match kind {
            _ if selector & 1 == 1 && b % 7 == 0 => FormatArg::Text(b"mismatch"),
            ArgKind::Char => FormatArg::Char(b),
            ArgKind::Int => FormatArg::Int(i32::from_le_bytes([b, b.rotate_left(3), b ^ 0x5a, b])),
            ArgKind::Text => FormatArg::Text(pool),
        };
        args.push(arg);
    }

    let policy = if selector & 2 == 0 {
        ErrorPolicy::Continue
    } else {
        ErrorPolicy::Abort
    };
    let opts = FormatOptions::default()
        .with_policy(policy)
        .with_max_output(MAX_OUTPUT)
        .quiet();

    let first = format_with(template, &args, &opts);
    match &first {
        Ok(f) => {
            assert!(f.len() <= MAX_OUTPUT);
            if policy == ErrorPolicy::Abort {
                assert!(f.is_clean());
            }
            if !template.contains(&b'%') {
                assert_eq!(f.as_bytes(), template);
            }
        }
        Err(FormatError::Aborted(_)) => assert_eq!(policy, ErrorPolicy::Abort),
        Err(FormatError::OutputTooLarge { limit }) => assert_eq!(*limit, MAX_OUTPUT),
        Err(FormatError::DirectiveTooLong { .. }) => {}
        Err(FormatError::BufferTooSmall { .. }) => {
            unreachable!("format_with never writes to a caller buffer")
        }
    }

    // Formatting is a pure function of its inputs.
    assert_eq!(format_with(template, &args, &opts), first);
});
