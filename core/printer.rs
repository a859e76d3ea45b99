use alloc::{format, string::String};
use core::fmt::{self, Display, Write};

use crate::{
    insn::Insn,
    item::{Item, ItemKind},
    label::{AddressLabel, Labels},
    operand::{IndexReg, Operand, RegKind, RegisterList},
};

pub struct FormatterFn<F>(pub F)
where
    F: Fn(&mut fmt::Formatter) -> fmt::Result;

impl<F> fmt::Display for FormatterFn<F>
where
    F: Fn(&mut fmt::Formatter) -> fmt::Result,
{
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        self.0(fmt)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Style {
    Mnemonic,
    Register,
    Immediate,
    Address,
    AddressOffset,
    Symbol,
    Comment,
    AssemblerDirective,
}

pub trait PrinterExt {
    fn print_styled(
        &self,
        fmt: &mut fmt::Formatter,
        #[allow(unused_variables)] style: Style,
        display: impl fmt::Display,
    ) -> fmt::Result {
        display.fmt(fmt)
    }

    fn print_mnemonic(&self, fmt: &mut fmt::Formatter, display: impl fmt::Display) -> fmt::Result {
        self.print_styled(fmt, Style::Mnemonic, display)
    }

    fn print_register(&self, fmt: &mut fmt::Formatter, display: impl fmt::Display) -> fmt::Result {
        self.print_styled(fmt, Style::Register, display)
    }

    fn print_immediate(&self, fmt: &mut fmt::Formatter, display: impl fmt::Display) -> fmt::Result {
        self.print_styled(fmt, Style::Immediate, display)
    }

    fn print_address(&self, fmt: &mut fmt::Formatter, display: impl fmt::Display) -> fmt::Result {
        self.print_styled(fmt, Style::Address, display)
    }

    fn print_address_offset(
        &self,
        fmt: &mut fmt::Formatter,
        display: impl fmt::Display,
    ) -> fmt::Result {
        self.print_styled(fmt, Style::AddressOffset, display)
    }

    fn print_symbol(&self, fmt: &mut fmt::Formatter, display: impl fmt::Display) -> fmt::Result {
        self.print_styled(fmt, Style::Symbol, display)
    }

    fn print_comment(&self, fmt: &mut fmt::Formatter, display: impl fmt::Display) -> fmt::Result {
        self.print_styled(fmt, Style::Comment, display)
    }

    fn print_assembler_directive(
        &self,
        fmt: &mut fmt::Formatter,
        display: impl fmt::Display,
    ) -> fmt::Result {
        self.print_styled(fmt, Style::AssemblerDirective, display)
    }
}

impl PrinterExt for () {}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Casing {
    #[default]
    Lower,
    Upper,
}

impl Casing {
    fn apply(self, c: char) -> char {
        match self {
            Self::Lower => c.to_ascii_lowercase(),
            Self::Upper => c.to_ascii_uppercase(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RenderingSettings {
    /// Numbers in hex with a `$` prefix, decimal otherwise.
    pub hex: bool,
    /// Casing of everything except label names and string literals.
    pub casing: Casing,
}

impl Default for RenderingSettings {
    fn default() -> Self {
        Self {
            hex: true,
            casing: Casing::Lower,
        }
    }
}

struct CaseWriter<'a, 'b> {
    fmt: &'a mut fmt::Formatter<'b>,
    casing: Casing,
}

impl fmt::Write for CaseWriter<'_, '_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            self.fmt.write_char(self.casing.apply(c))?;
        }
        Ok(())
    }
}

/// Renders the inner value in the given casing.
pub struct Cased<D>(pub Casing, pub D);

impl<D: Display> Display for Cased<D> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let mut out = CaseWriter {
            fmt,
            casing: self.0,
        };
        write!(out, "{}", self.1)
    }
}

#[derive(Copy, Clone)]
struct Num {
    value: u64,
    hex: bool,
}

impl Display for Num {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        if self.hex {
            write!(fmt, "${:X}", self.value)
        } else {
            write!(fmt, "{}", self.value)
        }
    }
}

#[derive(Copy, Clone)]
struct Signed {
    value: i64,
    hex: bool,
}

impl Display for Signed {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        if self.value < 0 {
            fmt.write_char('-')?;
        }
        let value = self.value.unsigned_abs();
        Num {
            value,
            hex: self.hex,
        }
        .fmt(fmt)
    }
}

/// Displacement from the current instruction, `*`, `*+n` or `*-n`.
#[derive(Copy, Clone)]
struct Relative(Signed);

impl Display for Relative {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_char('*')?;
        if self.0.value > 0 {
            fmt.write_char('+')?;
        }
        if self.0.value != 0 {
            self.0.fmt(fmt)?;
        }
        Ok(())
    }
}

struct Reg(RegKind, u8);

impl Display for Reg {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}{}", self.0.prefix(), self.1)
    }
}

fn is_printable(byte: u8) -> bool {
    (0x20..=0x7e).contains(&byte)
}

fn be_value(chunk: &[u8]) -> u64 {
    chunk.iter().fold(0, |acc, &i| (acc << 8) | i as u64)
}

/// The four rendered columns of an item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemText {
    pub mnemonic: String,
    pub operands: String,
    pub hex: String,
    pub ascii: String,
}

/// Renders items with the labels of their disassembly map.
#[derive(Copy, Clone)]
pub struct Printer<'a> {
    labels: &'a Labels,
    settings: RenderingSettings,
}

impl<'a> Printer<'a> {
    pub fn new(labels: &'a Labels, settings: RenderingSettings) -> Self {
        Self { labels, settings }
    }

    pub fn settings(&self) -> RenderingSettings {
        self.settings
    }

    pub fn labels(&self) -> &'a Labels {
        self.labels
    }

    fn cased<D: Display>(&self, display: D) -> Cased<D> {
        Cased(self.settings.casing, display)
    }

    fn num(&self, value: u64) -> Cased<Num> {
        self.cased(Num {
            value,
            hex: self.settings.hex,
        })
    }

    fn signed(&self, value: i64) -> Signed {
        Signed {
            value,
            hex: self.settings.hex,
        }
    }

    pub fn print_insn_mnemonic<E: PrinterExt>(
        &self,
        fmt: &mut fmt::Formatter,
        ext: &E,
        insn: &Insn,
    ) -> fmt::Result {
        let display = FormatterFn(|fmt| {
            fmt.write_str(insn.mnemonic().text())?;
            match insn.size().suffix() {
                Some(suffix) if !insn.is_implicit_size() => write!(fmt, ".{suffix}"),
                _ => Ok(()),
            }
        });
        ext.print_mnemonic(fmt, self.cased(display))
    }

    pub fn print_insn_operands<E: PrinterExt>(
        &self,
        fmt: &mut fmt::Formatter,
        ext: &E,
        insn: &Insn,
    ) -> fmt::Result {
        for (i, operand) in insn.operands().iter().enumerate() {
            if i != 0 {
                fmt.write_char(',')?;
            }
            self.print_operand(fmt, ext, operand)?;
        }
        Ok(())
    }

    pub fn print_mnemonic<E: PrinterExt>(
        &self,
        fmt: &mut fmt::Formatter,
        ext: &E,
        item: &Item,
    ) -> fmt::Result {
        match item.kind() {
            ItemKind::Insn(insn) => self.print_insn_mnemonic(fmt, ext, insn),
            ItemKind::End => ext.print_comment(fmt, "<end>"),
            _ => match item.data_kind() {
                Some(kind) => ext.print_assembler_directive(fmt, self.cased(kind.text())),
                None => Ok(()),
            },
        }
    }

    pub fn print_operands<E: PrinterExt>(
        &self,
        fmt: &mut fmt::Formatter,
        ext: &E,
        item: &Item,
    ) -> fmt::Result {
        let bytes = item.bytes();
        match item.kind() {
            ItemKind::Insn(insn) => self.print_insn_operands(fmt, ext, insn),
            ItemKind::Bytes => self.print_values(fmt, ext, bytes.iter().map(|&i| i as u64)),
            ItemKind::Words => self.print_values(fmt, ext, bytes.chunks(2).map(be_value)),
            ItemKind::Longs => self.print_values(fmt, ext, bytes.chunks(4).map(be_value)),
            ItemKind::ByteRun(value) => self.print_run(fmt, ext, item.count(), *value as u64),
            ItemKind::WordRun(value) => self.print_run(fmt, ext, item.count(), *value as u64),
            ItemKind::LongRun(value) => self.print_run(fmt, ext, item.count(), *value as u64),
            ItemKind::Text => self.print_text(fmt, ext, bytes),
            ItemKind::End => Ok(()),
        }
    }

    /// Raw bytes as `xx xx`.
    pub fn print_hex(&self, fmt: &mut fmt::Formatter, bytes: &[u8]) -> fmt::Result {
        for (i, byte) in bytes.iter().enumerate() {
            if i != 0 {
                fmt.write_char(' ')?;
            }
            match self.settings.casing {
                Casing::Lower => write!(fmt, "{byte:02x}")?,
                Casing::Upper => write!(fmt, "{byte:02X}")?,
            }
        }
        Ok(())
    }

    /// Raw bytes with non-printable characters replaced by `.`.
    pub fn print_ascii(&self, fmt: &mut fmt::Formatter, bytes: &[u8]) -> fmt::Result {
        for &byte in bytes {
            fmt.write_char(if is_printable(byte) { byte as char } else { '.' })?;
        }
        Ok(())
    }

    /// Label name, or `anchor+offset` if the label is anchored.
    pub fn print_label<E: PrinterExt>(
        &self,
        fmt: &mut fmt::Formatter,
        ext: &E,
        label: &AddressLabel,
    ) -> fmt::Result {
        match label.anchor().and_then(|i| self.labels.get(i)) {
            Some(anchor) => {
                ext.print_symbol(fmt, anchor.name())?;
                fmt.write_char('+')?;
                let offset = label.address().wrapping_sub(anchor.address());
                ext.print_address_offset(fmt, self.num(offset))
            }
            None => ext.print_symbol(fmt, label.name()),
        }
    }

    fn print_values<E, I>(&self, fmt: &mut fmt::Formatter, ext: &E, values: I) -> fmt::Result
    where
        E: PrinterExt,
        I: Iterator<Item = u64>,
    {
        for (i, value) in values.enumerate() {
            if i != 0 {
                fmt.write_char(',')?;
            }
            ext.print_immediate(fmt, self.num(value))?;
        }
        Ok(())
    }

    fn print_run<E: PrinterExt>(
        &self,
        fmt: &mut fmt::Formatter,
        ext: &E,
        count: usize,
        value: u64,
    ) -> fmt::Result {
        ext.print_immediate(fmt, self.num(count as u64))?;
        fmt.write_char(',')?;
        ext.print_immediate(fmt, self.num(value))
    }

    fn print_text<E: PrinterExt>(
        &self,
        fmt: &mut fmt::Formatter,
        ext: &E,
        bytes: &[u8],
    ) -> fmt::Result {
        let mut quoted = false;
        for (i, &byte) in bytes.iter().enumerate() {
            if is_printable(byte) && byte != b'"' {
                if !quoted {
                    if i != 0 {
                        fmt.write_char(',')?;
                    }
                    fmt.write_char('"')?;
                    quoted = true;
                }
                fmt.write_char(byte as char)?;
            } else {
                if quoted {
                    fmt.write_char('"')?;
                    quoted = false;
                }
                if i != 0 {
                    fmt.write_char(',')?;
                }
                ext.print_immediate(fmt, self.num(byte as u64))?;
            }
        }
        if quoted {
            fmt.write_char('"')?;
        }
        Ok(())
    }

    fn print_reg<E: PrinterExt>(
        &self,
        fmt: &mut fmt::Formatter,
        ext: &E,
        kind: RegKind,
        num: u8,
    ) -> fmt::Result {
        ext.print_register(fmt, self.cased(Reg(kind, num)))
    }

    fn print_index<E: PrinterExt>(
        &self,
        fmt: &mut fmt::Formatter,
        ext: &E,
        index: &IndexReg,
    ) -> fmt::Result {
        let size = if index.long { ".l" } else { ".w" };
        let display = FormatterFn(|fmt| write!(fmt, "{}{size}", Reg(index.kind, index.num)));
        ext.print_register(fmt, self.cased(display))
    }

    fn print_register_list<E: PrinterExt>(
        &self,
        fmt: &mut fmt::Formatter,
        ext: &E,
        list: &RegisterList,
    ) -> fmt::Result {
        let mut first = true;
        for (kind, mask) in [(RegKind::Data, list.data), (RegKind::Address, list.addr)] {
            let mut n = 0;
            while n < 8 {
                if mask & (1 << n) == 0 {
                    n += 1;
                    continue;
                }
                let start = n;
                while n < 8 && mask & (1 << n) != 0 {
                    n += 1;
                }
                if !first {
                    fmt.write_char('/')?;
                }
                first = false;
                self.print_reg(fmt, ext, kind, start)?;
                if n - 1 > start {
                    fmt.write_char('-')?;
                    self.print_reg(fmt, ext, kind, n - 1)?;
                }
            }
        }
        Ok(())
    }

    /// Prints the bound label if it is inside of the map, `numeric` otherwise.
    fn print_reference<E: PrinterExt>(
        &self,
        fmt: &mut fmt::Formatter,
        ext: &E,
        label: Option<u64>,
        style: Style,
        numeric: impl Display,
    ) -> fmt::Result {
        let label = label
            .and_then(|i| self.labels.get(i))
            .filter(|i| !i.is_out_of_range());
        match label {
            Some(label) => self.print_label(fmt, ext, label),
            None => ext.print_styled(fmt, style, numeric),
        }
    }

    fn print_pc<E: PrinterExt>(
        &self,
        fmt: &mut fmt::Formatter,
        ext: &E,
        index: Option<&IndexReg>,
    ) -> fmt::Result {
        fmt.write_char('(')?;
        ext.print_register(fmt, self.cased("pc"))?;
        if let Some(index) = index {
            fmt.write_char(',')?;
            self.print_index(fmt, ext, index)?;
        }
        fmt.write_char(')')
    }

    pub fn print_operand<E: PrinterExt>(
        &self,
        fmt: &mut fmt::Formatter,
        ext: &E,
        operand: &Operand,
    ) -> fmt::Result {
        match operand {
            Operand::DataDirect(reg) => self.print_reg(fmt, ext, RegKind::Data, *reg),
            Operand::AddrDirect(reg) => self.print_reg(fmt, ext, RegKind::Address, *reg),
            Operand::Indirect(reg) => {
                fmt.write_char('(')?;
                self.print_reg(fmt, ext, RegKind::Address, *reg)?;
                fmt.write_char(')')
            }
            Operand::PostIncrement(reg) => {
                fmt.write_char('(')?;
                self.print_reg(fmt, ext, RegKind::Address, *reg)?;
                fmt.write_str(")+")
            }
            Operand::PreDecrement(reg) => {
                fmt.write_str("-(")?;
                self.print_reg(fmt, ext, RegKind::Address, *reg)?;
                fmt.write_char(')')
            }
            Operand::Displacement { reg, disp } => {
                let disp = self.cased(self.signed(*disp as i64));
                ext.print_address_offset(fmt, disp)?;
                fmt.write_char('(')?;
                self.print_reg(fmt, ext, RegKind::Address, *reg)?;
                fmt.write_char(')')
            }
            Operand::Indexed { reg, index, disp } => {
                let disp = self.cased(self.signed(*disp as i64));
                ext.print_address_offset(fmt, disp)?;
                fmt.write_char('(')?;
                self.print_reg(fmt, ext, RegKind::Address, *reg)?;
                fmt.write_char(',')?;
                self.print_index(fmt, ext, index)?;
                fmt.write_char(')')
            }
            Operand::PcDisplacement { disp, label } => {
                let numeric = self.cased(Relative(self.signed(*disp as i64)));
                self.print_reference(fmt, ext, *label, Style::AddressOffset, numeric)?;
                self.print_pc(fmt, ext, None)
            }
            Operand::PcIndexed { index, disp, label } => {
                let numeric = self.cased(Relative(self.signed(*disp as i64)));
                self.print_reference(fmt, ext, *label, Style::AddressOffset, numeric)?;
                self.print_pc(fmt, ext, Some(index))
            }
            Operand::AbsShort(addr) => {
                ext.print_address(fmt, self.num(*addr as u16 as u64))?;
                write!(fmt, "{}", self.cased(".w"))
            }
            Operand::AbsLong(addr) => ext.print_address(fmt, self.num(*addr as u64)),
            Operand::Immediate(value) => {
                let display = self.cased(self.signed(*value));
                ext.print_immediate(fmt, FormatterFn(|fmt| write!(fmt, "#{display}")))
            }
            Operand::Sr => ext.print_register(fmt, self.cased("sr")),
            Operand::Ccr => ext.print_register(fmt, self.cased("ccr")),
            Operand::Usp => ext.print_register(fmt, self.cased("usp")),
            Operand::RegListAnDn(list) | Operand::RegListDnAn(list) => {
                self.print_register_list(fmt, ext, list)
            }
            Operand::Label { disp, label } => {
                let numeric = self.cased(Relative(self.signed(*disp as i64)));
                self.print_reference(fmt, ext, *label, Style::Address, numeric)
            }
        }
    }

    /// `mnemonic operands` of a single instruction.
    pub fn insn_text(&self, insn: &Insn) -> String {
        let display = FormatterFn(|fmt| {
            self.print_insn_mnemonic(fmt, &(), insn)?;
            if !insn.operands().is_empty() {
                fmt.write_char(' ')?;
                self.print_insn_operands(fmt, &(), insn)?;
            }
            Ok(())
        });
        format!("{display}")
    }

    /// Renders the plain text columns of an item.
    pub fn texts(&self, item: &Item) -> ItemText {
        ItemText {
            mnemonic: format!("{}", FormatterFn(|fmt| self.print_mnemonic(fmt, &(), item))),
            operands: format!("{}", FormatterFn(|fmt| self.print_operands(fmt, &(), item))),
            hex: format!("{}", FormatterFn(|fmt| self.print_hex(fmt, item.bytes()))),
            ascii: format!("{}", FormatterFn(|fmt| self.print_ascii(fmt, item.bytes()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::{insn::Size, mnemonic::Mnemonic};

    const UPPER: RenderingSettings = RenderingSettings {
        hex: true,
        casing: Casing::Upper,
    };

    const DECIMAL: RenderingSettings = RenderingSettings {
        hex: false,
        casing: Casing::Lower,
    };

    fn insn(insn: Insn) -> Item {
        Item::insn(0x1000, vec![0; 2], insn)
    }

    fn pair(mnemonic: &str, operands: &str) -> (String, String) {
        (mnemonic.into(), operands.into())
    }

    fn texts(labels: &Labels, settings: RenderingSettings, item: &Item) -> (String, String) {
        let text = Printer::new(labels, settings).texts(item);
        (text.mnemonic, text.operands)
    }

    fn operand(labels: &Labels, settings: RenderingSettings, operand: Operand) -> String {
        let item = insn(Insn::new(Mnemonic::Tst).with(operand));
        texts(labels, settings, &item).1
    }

    #[test]
    fn insn_casing() {
        let labels = Labels::default();
        let item = insn(
            Insn::new(Mnemonic::Move)
                .with_size(Size::Long)
                .with(Operand::AddrDirect(0))
                .with(Operand::DataDirect(0)),
        );
        let lower = texts(&labels, RenderingSettings::default(), &item);
        assert_eq!(lower, pair("move.l", "a0,d0"));
        let upper = texts(&labels, UPPER, &item);
        assert_eq!(upper, pair("MOVE.L", "A0,D0"));

        let item = insn(Insn::new(Mnemonic::Lea).with_size(Size::Long).implicit());
        assert_eq!(texts(&labels, UPPER, &item).0, "LEA");
    }

    #[test]
    fn numbers() {
        let labels = Labels::default();
        let default = RenderingSettings::default();
        assert_eq!(operand(&labels, default, Operand::Immediate(255)), "#$ff");
        assert_eq!(operand(&labels, UPPER, Operand::Immediate(255)), "#$FF");
        assert_eq!(operand(&labels, DECIMAL, Operand::Immediate(255)), "#255");
        assert_eq!(operand(&labels, default, Operand::Immediate(0)), "#$0");
        assert_eq!(operand(&labels, default, Operand::Immediate(-1)), "#-$1");
        assert_eq!(operand(&labels, DECIMAL, Operand::Immediate(-8)), "#-8");

        assert_eq!(operand(&labels, default, Operand::AbsShort(-2)), "$fffe.w");
        assert_eq!(operand(&labels, UPPER, Operand::AbsLong(0xdff000)), "$DFF000");
    }

    #[test]
    fn addressing_modes() {
        let labels = Labels::default();
        let s = RenderingSettings::default();
        assert_eq!(operand(&labels, s, Operand::PostIncrement(7)), "(a7)+");
        assert_eq!(operand(&labels, s, Operand::PreDecrement(1)), "-(a1)");
        let op = Operand::Displacement { reg: 5, disp: -4 };
        assert_eq!(operand(&labels, s, op), "-$4(a5)");
        let op = Operand::Displacement { reg: 5, disp: 16 };
        assert_eq!(operand(&labels, DECIMAL, op), "16(a5)");
        let index = IndexReg {
            kind: RegKind::Data,
            num: 1,
            long: false,
        };
        let op = Operand::Indexed {
            reg: 0,
            index,
            disp: -2,
        };
        assert_eq!(operand(&labels, s, op), "-$2(a0,d1.w)");
        let index = IndexReg {
            kind: RegKind::Address,
            num: 2,
            long: true,
        };
        let op = Operand::pc_indexed(index, 4);
        assert_eq!(operand(&labels, UPPER, op), "*+$6(PC,A2.L)");
        assert_eq!(operand(&labels, s, Operand::pc_displacement(-2)), "*(pc)");
        assert_eq!(operand(&labels, s, Operand::Usp), "usp");
    }

    #[test]
    fn relative_labels() {
        let labels = Labels::default();
        let s = RenderingSettings::default();
        assert_eq!(operand(&labels, s, Operand::label(4)), "*+$6");
        assert_eq!(operand(&labels, s, Operand::label(-6)), "*-$4");
        assert_eq!(operand(&labels, s, Operand::label(-2)), "*");
        assert_eq!(operand(&labels, DECIMAL, Operand::label(8)), "*+10");
        assert_eq!(operand(&labels, DECIMAL, Operand::label(-12)), "*-10");
    }

    #[test]
    fn bound_labels() {
        let mut labels = Labels::default();
        labels.insert(AddressLabel::with_name(0x1006, "Loop", false));
        labels.insert(AddressLabel::new(0x1009, false));
        labels.insert(AddressLabel::new(0x2000, true));
        labels.link(|addr| addr == 0x1006);

        let mut op = Operand::label(4);
        op.bind_label(Some(0x1006));
        assert_eq!(operand(&labels, UPPER, op), "Loop");

        let mut op = Operand::pc_displacement(7);
        op.bind_label(Some(0x1009));
        assert_eq!(operand(&labels, RenderingSettings::default(), op), "Loop+$3(pc)");

        let mut op = Operand::AbsLong(0x1006);
        op.bind_label(Some(0x1006));
        assert_eq!(op.bound_label(), None);
        assert_eq!(operand(&labels, RenderingSettings::default(), op), "$1006");
    }

    #[test]
    fn register_lists() {
        let labels = Labels::default();
        let s = RenderingSettings::default();
        let list = RegisterList {
            data: 0b1000_0111,
            addr: 0b0000_0011,
        };
        assert_eq!(
            operand(&labels, s, Operand::RegListAnDn(list)),
            "d0-d2/d7/a0-a1"
        );
        let list = RegisterList {
            data: 0,
            addr: 0b1100_0000,
        };
        assert_eq!(operand(&labels, UPPER, Operand::RegListDnAn(list)), "A6-A7");
    }

    #[test]
    fn data_items() {
        let labels = Labels::default();
        let s = RenderingSettings::default();
        let item = Item::new(0x100, vec![1, 0xff], ItemKind::Bytes);
        assert_eq!(texts(&labels, s, &item), pair("dc.b", "$1,$ff"));
        let item = Item::new(0x100, vec![0x12, 0x34, 0, 1], ItemKind::Words);
        assert_eq!(texts(&labels, UPPER, &item), pair("DC.W", "$1234,$1"));
        let item = Item::new(0x100, vec![0xaa; 4], ItemKind::ByteRun(0xaa));
        assert_eq!(texts(&labels, s, &item), pair("dcb.b", "$4,$aa"));
        let item = Item::new(0x100, vec![0xab, 0xcd, 0xab, 0xcd], ItemKind::WordRun(0xabcd));
        assert_eq!(texts(&labels, DECIMAL, &item).1, "2,43981");
        let item = Item::new(0x100, b"AB\0C".to_vec(), ItemKind::Text);
        assert_eq!(texts(&labels, UPPER, &item), pair("DC.B", "\"AB\",$0,\"C\""));
        let item = Item::new(0x100, b"a\"b".to_vec(), ItemKind::Text);
        assert_eq!(texts(&labels, s, &item).1, "\"a\",$22,\"b\"");
    }

    #[test]
    fn hex_and_ascii() {
        let labels = Labels::default();
        let item = Item::insn(0x1000, vec![0x4e, 0x75], Insn::new(Mnemonic::Rts));
        let text = Printer::new(&labels, UPPER).texts(&item);
        assert_eq!(text.hex, "4E 75");
        assert_eq!(text.ascii, "Nu");
        let text = Printer::new(&labels, RenderingSettings::default()).texts(&item);
        assert_eq!(text.mnemonic, "rts");
        assert_eq!(text.operands, "");
        assert_eq!(text.hex, "4e 75");

        let text = Printer::new(&labels, UPPER).texts(&Item::end(0x1002));
        let end = ItemText {
            mnemonic: "<end>".into(),
            ..ItemText::default()
        };
        assert_eq!(text, end);
    }
}
