use disasm68k::{Casing, Decoder, Listing, Literal, Options, RenderingSettings};
use disasm68k_test::check;

fn line(address: u64, mnemonic: &str, operands: &str, hex: &str, ascii: &str) -> String {
    format!("${address:08X}: {mnemonic:<20}{operands:<40}; {hex:<20} | {ascii}\n")
}

fn label(name: &str) -> String {
    format!("{:10}{name}:\n", "")
}

#[test]
fn code() -> Result<(), String> {
    let decoder = Decoder::new(Options::default());
    let map = decoder
        .decode(&[0x41, 0xfa, 0x00, 0x06, 0x60, 0x02, 0x4e, 0x71, 0x4e, 0x75])
        .unwrap();
    let result = Listing::new(&map, RenderingSettings::default())
        .print_to_string()
        .unwrap();

    let expect = [
        line(0x10000, "lea", "lbl10008(pc),a0", "41 fa 00 06", "A..."),
        line(0x10004, "bra.s", "lbl10008", "60 02", "`."),
        line(0x10006, "nop", "", "4e 71", "Nq"),
        label("lbl10008"),
        line(0x10008, "rts", "", "4e 75", "Nu"),
        line(0x1000a, "<end>", "", "", ""),
    ]
    .concat();
    check("code", 1, &expect, &result)
}

#[test]
fn data() -> Result<(), String> {
    let decoder = Decoder::new(Options {
        base_address: 0x100,
    });
    let mut map = decoder.decode(b"\xaa\xaa\xaa\xaaAB\0C").unwrap();
    decoder
        .set_literal_range(&mut map, 0x100, 0x104, Literal::ByteRun)
        .unwrap();
    decoder
        .set_literal_range(&mut map, 0x104, 0x108, Literal::Text)
        .unwrap();

    let settings = RenderingSettings {
        hex: true,
        casing: Casing::Upper,
    };
    let result = Listing::new(&map, settings).print_to_string().unwrap();
    let expect = [
        line(0x100, "DCB.B", "$4,$AA", "AA AA AA AA", "...."),
        line(0x104, "DC.B", "\"AB\",$0,\"C\"", "41 42 00 43", "AB.C"),
        line(0x108, "<end>", "", "", ""),
    ]
    .concat();
    check("data", 1, &expect, &result)
}

#[test]
fn anchored() -> Result<(), String> {
    let decoder = Decoder::new(Options::default());
    let mut map = decoder
        .decode(&[0x41, 0xfa, 0x00, 0x04, 0x20, 0x3c, 0x00, 0x00, 0x00, 0x10])
        .unwrap();
    decoder.rename_label(&mut map, 0x10000, "start").unwrap();
    let result = Listing::new(&map, RenderingSettings::default())
        .print_to_string()
        .unwrap();

    let expect = [
        label("start"),
        line(0x10000, "lea", "start+$6(pc),a0", "41 fa 00 04", "A..."),
        line(0x10004, "move.l", "#$10,d0", "20 3c 00 00 00 10", " <...."),
        line(0x1000a, "<end>", "", "", ""),
    ]
    .concat();
    check("anchored", 1, &expect, &result)
}
