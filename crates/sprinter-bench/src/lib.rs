//! Shared inputs for the sprinter benchmarks.

use sprinter_core::FormatArg;

/// A named template and the arguments it consumes.
pub type Workload = (&'static str, &'static [u8], Vec<FormatArg<'static>>);

fn workload(
    name: &'static str,
    template: &'static [u8],
    args: Vec<FormatArg<'static>>,
) -> Workload {
    (name, template, args)
}

#[must_use]
pub fn workloads() -> Vec<Workload> {
    vec![
        workload(
            "literal",
            b"A long text without any directives at all.",
            vec![],
        ),
        workload(
            "char",
            b"chars: '%c', '%2c' and '%4c'.",
            vec![
                FormatArg::Char(b'x'),
                FormatArg::Char(b'y'),
                FormatArg::Char(b'z'),
            ],
        ),
        workload(
            "decimal",
            b"%d lies in %d-%d.",
            vec![
                FormatArg::Int(-2230),
                FormatArg::Int(-10000),
                FormatArg::Int(-1000),
            ],
        ),
        workload(
            "hex",
            b"%4d = 0x%8x",
            vec![FormatArg::Int(-88), FormatArg::Int(-88)],
        ),
        workload(
            "string",
            b"'%s', '%s' and '%4s'.",
            vec![
                FormatArg::Text(b"abc"),
                FormatArg::Text(b"alpha -> omega"),
                FormatArg::Text(b""),
            ],
        ),
        workload("wide", b"%1001d", vec![FormatArg::Int(i32::MAX)]),
    ]
}
