#[cfg(feature = "print")]
use std::io::{Cursor, Write};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use disasm68k_core::bits::BitReader;
#[cfg(feature = "print")]
use disasm68k_core::{
    label::Labels,
    printer::{FormatterFn, Printer, RenderingSettings},
};
use disasm68k_test::test::Parser;

const SOURCES: &[(&str, &str)] = &[
    (
        "integer",
        concat!(
            include_str!("../tests/move.test"),
            include_str!("../tests/arith.test"),
            include_str!("../tests/logic.test"),
        ),
    ),
    ("bits", include_str!("../tests/bits.test")),
    ("flow", include_str!("../tests/flow.test")),
    ("ea", include_str!("../tests/ea.test")),
];

fn bench_impl<const PRINT: bool>(c: &mut Criterion, name: &str) {
    let mut group = c.benchmark_group(name);
    for (name, source) in SOURCES {
        let (start, code) = Parser::parse_all(source).unwrap();

        let decoder = disasm68k_isa::decoder();
        #[cfg(feature = "print")]
        let labels = Labels::default();
        #[cfg(feature = "print")]
        let printer = Printer::new(&labels, RenderingSettings::default());
        #[cfg(feature = "print")]
        let mut buffer = Cursor::new(Vec::new());

        group.throughput(Throughput::Bytes(code.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &code, |b, code| {
            b.iter(|| {
                let mut reader = BitReader::with_offset(code, start);
                let mut count = 0;
                while !reader.is_finished() {
                    match decoder.decode(&mut reader) {
                        Ok(insn) => {
                            count += 1;

                            #[cfg(feature = "print")]
                            if PRINT {
                                let display = FormatterFn(|fmt| {
                                    printer.print_insn_mnemonic(fmt, &(), &insn)?;
                                    printer.print_insn_operands(fmt, &(), &insn)
                                });
                                buffer.set_position(0);
                                write!(&mut buffer, "{display}").unwrap();
                            }
                        }
                        Err(_) => panic!(),
                    }
                }
                count
            })
        });
    }
}

fn m68k_bench(c: &mut Criterion) {
    bench_impl::<false>(c, "decode");
    #[cfg(feature = "print")]
    bench_impl::<true>(c, "print");
}

criterion_group!(benches, m68k_bench);
criterion_main!(benches);
