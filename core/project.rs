//! Binary project file.
//!
//! Every number is little-endian. The layout is a header (magic, version,
//! bounds), the label table and the item table. See [`DisassemblyMap::save`].

use std::io::{self, Read, Write};

use alloc::{string::String, vec::Vec};
use byteorder::{ReadBytesExt, WriteBytesExt, BE, LE};

use crate::{
    error::{Corruption, MapError, ProjectError},
    insn::{Cpu, Insn, Size},
    item::{DataKind, Item, ItemKind},
    label::{AddressLabel, Labels},
    map::DisassemblyMap,
    mnemonic::Mnemonic,
    operand::{IndexReg, Operand, OperandType, RegKind, RegisterList},
};

pub const MAGIC: u32 = 0xC0DE_FACE;
pub const VERSION: u32 = 1;

const ABSENT: u8 = 0x00;
const PRESENT: u8 = 0xff;

type Result<T = (), E = Corruption> = core::result::Result<T, E>;

impl DisassemblyMap {
    /// Writes the whole map.
    pub fn save<W: Write>(&self, out: &mut W) -> Result<(), ProjectError> {
        out.write_u32::<LE>(MAGIC)?;
        out.write_u32::<LE>(VERSION)?;
        out.write_i64::<LE>(self.start() as i64)?;
        out.write_i64::<LE>(self.end() as i64)?;

        out.write_i32::<LE>(self.labels().len() as i32)?;
        for label in self.labels() {
            write_label(out, self.labels(), label)?;
        }

        out.write_i32::<LE>(self.item_count() as i32)?;
        for item in self.items() {
            write_item(out, item)?;
        }
        Ok(())
    }

    /// Reads a map written by [`DisassemblyMap::save`] and relinks labels.
    pub fn load<R: Read>(input: &mut R) -> Result<Self, ProjectError> {
        Ok(read_map(input)?)
    }
}

fn write_label<W: Write>(out: &mut W, labels: &Labels, label: &AddressLabel) -> io::Result<()> {
    out.write_i64::<LE>(label.address() as i64)?;
    out.write_i32::<LE>(label.name().len() as i32)?;
    out.write_all(label.name().as_bytes())?;
    out.write_i32::<LE>(label.referrers().len() as i32)?;
    for &referrer in label.referrers() {
        out.write_i64::<LE>(referrer as i64)?;
    }
    out.write_u8(label.is_out_of_range() as u8)?;
    match label.anchor().and_then(|i| labels.get(i)) {
        Some(anchor) => {
            out.write_u8(PRESENT)?;
            write_label(out, labels, anchor)
        }
        None => out.write_u8(ABSENT),
    }
}

fn write_item<W: Write>(out: &mut W, item: &Item) -> io::Result<()> {
    out.write_u16::<LE>(item.type_id())?;
    out.write_i64::<LE>(item.address() as i64)?;
    out.write_i32::<LE>(item.len() as i32)?;
    out.write_all(item.bytes())?;
    match item.kind() {
        ItemKind::ByteRun(value) => out.write_u8(*value)?,
        ItemKind::WordRun(value) => out.write_all(&value.to_be_bytes())?,
        ItemKind::LongRun(value) => out.write_all(&value.to_be_bytes())?,
        ItemKind::Insn(insn) => {
            for i in 0..2 {
                match insn.operands().get(i) {
                    Some(operand) => {
                        out.write_u8(PRESENT)?;
                        write_operand(out, operand)?;
                    }
                    None => out.write_u8(ABSENT)?,
                }
            }
            out.write_i32::<LE>(insn.size() as i32)?;
            out.write_u8(insn.is_implicit_size() as u8)?;
            out.write_i32::<LE>(insn.cpu().raw() as i32)?;
        }
        _ => {}
    }
    Ok(())
}

fn write_index<W: Write>(out: &mut W, index: &IndexReg) -> io::Result<()> {
    out.write_i32::<LE>(index.kind as i32)?;
    out.write_i32::<LE>(index.num as i32)?;
    let size = if index.long { Size::Long } else { Size::Word };
    out.write_i32::<LE>(size as i32)
}

fn write_operand<W: Write>(out: &mut W, operand: &Operand) -> io::Result<()> {
    out.write_u16::<LE>(operand.operand_type().into())?;
    match operand {
        Operand::DataDirect(reg)
        | Operand::AddrDirect(reg)
        | Operand::Indirect(reg)
        | Operand::PostIncrement(reg)
        | Operand::PreDecrement(reg) => out.write_i32::<LE>(*reg as i32)?,
        Operand::Displacement { reg, disp } => {
            out.write_i32::<LE>(*reg as i32)?;
            out.write_i32::<LE>(*disp as i32)?;
        }
        Operand::Indexed { reg, index, disp } => {
            out.write_i32::<LE>(*reg as i32)?;
            out.write_i32::<LE>(*disp as i32)?;
            write_index(out, index)?;
        }
        Operand::PcDisplacement { disp, .. } | Operand::Label { disp, .. } => {
            out.write_i32::<LE>(*disp)?;
        }
        Operand::PcIndexed { index, disp, .. } => {
            out.write_i32::<LE>(*disp)?;
            write_index(out, index)?;
        }
        Operand::AbsShort(addr) => out.write_i32::<LE>(*addr as i32)?,
        Operand::AbsLong(addr) => out.write_i32::<LE>(*addr as i32)?,
        Operand::Immediate(value) => out.write_i64::<LE>(*value)?,
        Operand::RegListAnDn(list) | Operand::RegListDnAn(list) => {
            out.write_i32::<LE>(list.data as i32)?;
            out.write_i32::<LE>(list.addr as i32)?;
        }
        Operand::Sr | Operand::Ccr | Operand::Usp => {}
    }
    if operand.is_reference() {
        match operand.bound_label() {
            Some(address) => {
                out.write_u8(PRESENT)?;
                out.write_i64::<LE>(address as i64)?;
            }
            None => out.write_u8(ABSENT)?,
        }
    }
    Ok(())
}

fn read_map<R: Read>(input: &mut R) -> Result<DisassemblyMap> {
    let magic = input.read_u32::<LE>()?;
    if magic != MAGIC {
        return Err(Corruption::Magic(magic));
    }
    let version = input.read_u32::<LE>()?;
    if version != VERSION {
        return Err(Corruption::Version(version));
    }
    let start = input.read_i64::<LE>()? as u64;
    let end = input.read_i64::<LE>()? as u64;

    let mut labels = Labels::default();
    for _ in 0..read_len(input)? {
        labels.insert(read_label(input)?);
    }

    let mut map = DisassemblyMap::from_parts(start, end, labels);
    for _ in 0..read_len(input)? {
        let item = read_item(input, map.labels())?;
        if item.address() < start || item.end_address() > end {
            return Err(MapError::OutOfBounds(item.address()).into());
        }
        map.put(item)?;
    }
    if !map.is_partitioned() {
        return Err(Corruption::Partition { start, end });
    }
    map.link_labels();
    Ok(map)
}

fn read_len<R: Read>(input: &mut R) -> Result<usize> {
    let len = input.read_i32::<LE>()?;
    usize::try_from(len).map_err(|_| Corruption::Length(len))
}

fn read_marker<R: Read>(input: &mut R) -> Result<bool> {
    match input.read_u8()? {
        ABSENT => Ok(false),
        PRESENT => Ok(true),
        value => Err(Corruption::Value {
            what: "marker",
            value: value as i64,
        }),
    }
}

fn read_bool<R: Read>(input: &mut R) -> Result<bool> {
    match input.read_u8()? {
        0 => Ok(false),
        1 => Ok(true),
        value => Err(Corruption::Value {
            what: "bool",
            value: value as i64,
        }),
    }
}

fn read_bytes<R: Read>(input: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    Read::take(&mut *input, len as u64).read_to_end(&mut buf)?;
    if buf.len() != len {
        return Err(Corruption::Truncated(io::ErrorKind::UnexpectedEof.into()));
    }
    Ok(buf)
}

fn read_label<R: Read>(input: &mut R) -> Result<AddressLabel> {
    let address = input.read_i64::<LE>()? as u64;
    let len = read_len(input)?;
    let name = String::from_utf8(read_bytes(input, len)?)?;
    let referrers = read_len(input)?;
    let mut referrer_list = Vec::with_capacity(referrers.min(4096));
    for _ in 0..referrers {
        referrer_list.push(input.read_i64::<LE>()? as u64);
    }
    let out_of_range = read_bool(input)?;
    let mut label = AddressLabel::with_name(address, name, out_of_range);
    for referrer in referrer_list {
        label.add_referrer(referrer);
    }
    if read_marker(input)? {
        let anchor = read_label(input)?;
        label.set_anchor(Some(anchor.address()));
    }
    Ok(label)
}

fn read_item<R: Read>(input: &mut R, labels: &Labels) -> Result<Item> {
    let id = input.read_u16::<LE>()?;
    let address = input.read_i64::<LE>()? as u64;
    let len = read_len(input)?;
    let bytes = read_bytes(input, len)?;

    let kind = if let Some(mnemonic) = Mnemonic::from_id(id) {
        ItemKind::Insn(read_insn(input, labels, mnemonic)?)
    } else {
        match DataKind::from_id(id) {
            Some(DataKind::Bytes) => ItemKind::Bytes,
            Some(DataKind::Words) => ItemKind::Words,
            Some(DataKind::Longs) => ItemKind::Longs,
            Some(DataKind::Text) => ItemKind::Text,
            Some(DataKind::End) => ItemKind::End,
            Some(DataKind::ByteRun) => ItemKind::ByteRun(input.read_u8()?),
            Some(DataKind::WordRun) => ItemKind::WordRun(input.read_u16::<BE>()?),
            Some(DataKind::LongRun) => ItemKind::LongRun(input.read_u32::<BE>()?),
            None => return Err(Corruption::ItemType(id)),
        }
    };
    Ok(Item::new(address, bytes, kind))
}

fn read_insn<R: Read>(input: &mut R, labels: &Labels, mnemonic: Mnemonic) -> Result<Insn> {
    let mut insn = Insn::new(mnemonic);
    for _ in 0..2 {
        if read_marker(input)? {
            insn.push_operand(read_operand(input, labels)?);
        }
    }
    let size = input.read_i32::<LE>()?;
    let size = Size::from_id(size).ok_or(Corruption::Value {
        what: "size",
        value: size as i64,
    })?;
    insn.set_size(size);
    insn.set_implicit_size(read_bool(input)?);
    let cpu = input.read_i32::<LE>()?;
    let cpu = u8::try_from(cpu)
        .ok()
        .and_then(Cpu::from_raw)
        .ok_or(Corruption::Value {
            what: "cpu",
            value: cpu as i64,
        })?;
    insn.set_cpu(cpu);
    Ok(insn)
}

fn read_int<R: Read>(input: &mut R, what: &'static str, max: i32) -> Result<i32> {
    let value = input.read_i32::<LE>()?;
    if (0..=max).contains(&value) {
        Ok(value)
    } else {
        Err(Corruption::Value {
            what,
            value: value as i64,
        })
    }
}

fn read_reg<R: Read>(input: &mut R) -> Result<u8> {
    read_int(input, "register", 7).map(|i| i as u8)
}

fn read_ranged<R: Read>(input: &mut R, what: &'static str, min: i32, max: i32) -> Result<i32> {
    let value = input.read_i32::<LE>()?;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(Corruption::Value {
            what,
            value: value as i64,
        })
    }
}

fn read_index<R: Read>(input: &mut R) -> Result<IndexReg> {
    let kind = match read_int(input, "register kind", 1)? {
        0 => RegKind::Data,
        _ => RegKind::Address,
    };
    let num = read_reg(input)?;
    let long = match input.read_i32::<LE>()? {
        3 => false,
        4 => true,
        value => {
            return Err(Corruption::Value {
                what: "index size",
                value: value as i64,
            })
        }
    };
    Ok(IndexReg { kind, num, long })
}

fn read_list<R: Read>(input: &mut R) -> Result<RegisterList> {
    let data = read_int(input, "register mask", 0xff)? as u8;
    let addr = read_int(input, "register mask", 0xff)? as u8;
    Ok(RegisterList { data, addr })
}

fn read_operand<R: Read>(input: &mut R, labels: &Labels) -> Result<Operand> {
    let id = input.read_u16::<LE>()?;
    let ty = OperandType::from_u16(id).ok_or(Corruption::OperandType(id))?;
    let mut operand = match ty {
        OperandType::DnDirect => Operand::DataDirect(read_reg(input)?),
        OperandType::AnDirect => Operand::AddrDirect(read_reg(input)?),
        OperandType::AnIndirect => Operand::Indirect(read_reg(input)?),
        OperandType::AnIndirectPostincrement => Operand::PostIncrement(read_reg(input)?),
        OperandType::AnIndirectPredecrement => Operand::PreDecrement(read_reg(input)?),
        OperandType::AnIndirectDisplacement => Operand::Displacement {
            reg: read_reg(input)?,
            disp: read_ranged(input, "displacement", i16::MIN as i32, i16::MAX as i32)? as i16,
        },
        OperandType::AnIndirectIndexDisplacement => Operand::Indexed {
            reg: read_reg(input)?,
            disp: read_ranged(input, "displacement", i8::MIN as i32, i8::MAX as i32)? as i8,
            index: read_index(input)?,
        },
        OperandType::PcIndirectDisplacement => Operand::PcDisplacement {
            disp: input.read_i32::<LE>()?,
            label: None,
        },
        OperandType::PcIndirectIndexDisplacement => Operand::PcIndexed {
            disp: input.read_i32::<LE>()?,
            index: read_index(input)?,
            label: None,
        },
        OperandType::Label => Operand::Label {
            disp: input.read_i32::<LE>()?,
            label: None,
        },
        OperandType::AbsShort => Operand::AbsShort(
            read_ranged(input, "address", i16::MIN as i32, i16::MAX as i32)? as i16,
        ),
        OperandType::AbsLong => Operand::AbsLong(input.read_i32::<LE>()? as u32),
        OperandType::ImmediateData => Operand::Immediate(input.read_i64::<LE>()?),
        OperandType::RegisterListAnDn => Operand::RegListAnDn(read_list(input)?),
        OperandType::RegisterListDnAn => Operand::RegListDnAn(read_list(input)?),
        OperandType::SrDirect => Operand::Sr,
        OperandType::CcrDirect => Operand::Ccr,
        OperandType::UspDirect => Operand::Usp,
    };
    if operand.is_reference() && read_marker(input)? {
        let address = input.read_i64::<LE>()? as u64;
        if labels.get(address).is_none() {
            return Err(Corruption::MissingLabel(address));
        }
        operand.bind_label(Some(address));
    }
    Ok(operand)
}
