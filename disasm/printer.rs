use std::{
    cmp,
    collections::BTreeSet,
    io::{self, Write},
    string::FromUtf8Error,
};

use disasm68k_core::{item::Item, map::DisassemblyMap};

pub use disasm68k_core::printer::{
    Casing, FormatterFn, ItemText, Printer, PrinterExt, RenderingSettings, Style,
};

const LABEL_INDENT: usize = 10;
const MNEMONIC_WIDTH: usize = 20;
const OPERANDS_WIDTH: usize = 40;
const HEX_WIDTH: usize = 20;

pub trait WriteExt: Write {
    fn write_spaces(&mut self, mut width: usize) -> io::Result<()> {
        while width > 0 {
            const FILL: [u8; 32] = [b' '; 32];
            let len = cmp::min(width, FILL.len());
            self.write_all(&FILL[..len])?;
            width -= len;
        }
        Ok(())
    }
}

impl<T: Write> WriteExt for T {}

/// Prints a disassembly map as an assembler listing.
///
/// ```text
///           lbl10004:
/// $00010004: rts                                                         ; 4e 75                | Nu
/// ```
pub struct Listing<'a, E: PrinterExt = ()> {
    map: &'a DisassemblyMap,
    printer: Printer<'a>,
    ext: E,
}

impl<'a> Listing<'a> {
    pub fn new(map: &'a DisassemblyMap, settings: RenderingSettings) -> Self {
        Self::with_ext(map, settings, ())
    }
}

impl<'a, E: PrinterExt> Listing<'a, E> {
    pub fn with_ext(map: &'a DisassemblyMap, settings: RenderingSettings, ext: E) -> Self {
        Self {
            map,
            printer: Printer::new(map.labels(), settings),
            ext,
        }
    }

    pub fn printer(&self) -> &Printer<'a> {
        &self.printer
    }

    /// Prints the label at `address` if it is referenced or anchors another one.
    fn print_label_line<W: Write>(
        &self,
        out: &mut W,
        anchors: &BTreeSet<u64>,
        address: u64,
    ) -> io::Result<()> {
        let Some(label) = self.map.labels().get(address) else {
            return Ok(());
        };
        if !label.is_referenced() && !anchors.contains(&address) {
            return Ok(());
        }
        out.write_spaces(LABEL_INDENT)?;
        let display = FormatterFn(|fmt| self.ext.print_symbol(fmt, label.name()));
        writeln!(out, "{display}:")
    }

    /// Prints a single item line without the label line.
    pub fn print_item<W: Write>(&self, out: &mut W, item: &Item) -> io::Result<()> {
        let text = self.printer.texts(item);
        let (printer, ext) = (&self.printer, &self.ext);

        let address = FormatterFn(|fmt| ext.print_address(fmt, format_args!("${:08X}", item.address())));
        write!(out, "{address}: ")?;

        let mnemonic = FormatterFn(|fmt| printer.print_mnemonic(fmt, ext, item));
        write!(out, "{mnemonic}")?;
        out.write_spaces(MNEMONIC_WIDTH.saturating_sub(text.mnemonic.len()))?;

        let operands = FormatterFn(|fmt| printer.print_operands(fmt, ext, item));
        write!(out, "{operands}")?;
        out.write_spaces(OPERANDS_WIDTH.saturating_sub(text.operands.len()))?;

        write!(out, "; {}", text.hex)?;
        out.write_spaces(HEX_WIDTH.saturating_sub(text.hex.len()))?;
        writeln!(out, " | {}", text.ascii)
    }

    pub fn print<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let anchors = self.map.labels().anchors();
        for item in self.map.items() {
            self.print_label_line(out, &anchors, item.address())?;
            self.print_item(out, item)?;
        }
        Ok(())
    }

    pub fn print_to_vec(&self) -> Vec<u8> {
        let mut out = Vec::new();
        // writing to a vector never fails
        let _ = self.print(&mut out);
        out
    }

    pub fn print_to_string(&self) -> Result<String, FromUtf8Error> {
        String::from_utf8(self.print_to_vec())
    }
}
