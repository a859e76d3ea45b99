use disasm68k_core::{
    bits::BitReader, error::Error, insn::Insn, mnemonic::Mnemonic, printer::RenderingSettings,
    ArchDecoder,
};
use disasm68k_test::test::{Parser, Runner, Test};

#[test]
fn parse_flags() {
    let src = " +a\t+b  -abc-foo -foo  +bar+foo";
    let mut flags = disasm68k_test::test::parse_flags(src);
    assert_eq!(flags.next(), Some(("a", true)));
    assert_eq!(flags.next(), Some(("b", true)));
    assert_eq!(flags.next(), Some(("abc-foo", false)));
    assert_eq!(flags.next(), Some(("foo", false)));
    assert_eq!(flags.next(), Some(("bar+foo", true)));
    assert_eq!(flags.next(), None);
}

#[test]
fn parse() -> Result<(), String> {
    let src = r#"; comment
        10000: 4e75     rts ; +upper
        10002: 2008     move.l a0,d0

               203c 0000 0010  move.l #$10,d0
               ...
               00ff            dc.w $ff
    "#;

    let mut parser = Parser::new("input", src);
    let mut test = Test::default();

    assert!(parser.parse(&mut test)?);
    assert_eq!(test.line, 2);
    assert_eq!(test.address, 0x10000);
    assert_eq!(test.bytes, &[0x4e, 0x75]);
    assert_eq!(test.asm, "rts");
    assert_eq!(test.comment, "+upper");

    assert!(parser.parse(&mut test)?);
    assert_eq!(test.line, 3);
    assert_eq!(test.address, 0x10002);
    assert_eq!(test.bytes, &[0x20, 0x08]);
    assert_eq!(test.asm, "move.l a0,d0");

    assert!(parser.parse(&mut test)?);
    assert_eq!(test.line, 5);
    assert_eq!(test.address, 0);
    assert_eq!(test.bytes, &[0x20, 0x3c, 0x00, 0x00, 0x00, 0x10]);
    assert_eq!(test.asm, "move.l #$10,d0");

    assert!(parser.parse(&mut test)?);
    assert_eq!(test.bytes, &[0x00, 0xff]);

    assert!(!parser.parse(&mut test)?);
    Ok(())
}

#[test]
fn parse_all() -> Result<(), String> {
    let src = r#"
        10000: 4e71     nop
        10004: 4e75     rts
    "#;
    let (start, data) = Parser::parse_all(src)?;
    assert_eq!(start, 0x10000);
    assert_eq!(data, &[0x4e, 0x71, 0x00, 0x00, 0x4e, 0x75]);
    Ok(())
}

#[test]
fn missing_bytes() {
    let mut parser = Parser::new("input", "10000: rts");
    let mut test = Test::default();
    assert!(parser.parse(&mut test).is_err());
}

/// Decodes the first word of anything as `nop`.
struct Greedy;

impl ArchDecoder for Greedy {
    fn decode(&self, reader: &mut BitReader) -> Result<Insn, Error> {
        reader.read_u16()?;
        Ok(Insn::new(Mnemonic::Nop))
    }
}

impl Runner for Greedy {
    fn create(&mut self, _: &Test) -> (Box<dyn ArchDecoder>, RenderingSettings) {
        (Box::new(Greedy), RenderingSettings::default())
    }
}

#[test]
fn invalid_rejects_decoded_prefix() {
    assert!(Greedy.run_invalid("input", "10000: ffff 0001  bad").is_err());
    assert!(Greedy.run_invalid("input", "10000: 4e71  nop").is_err());
    assert!(Greedy.run_invalid("input", "10000: ff  short").is_ok());
}
