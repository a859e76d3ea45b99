//! Data movement instructions.

use disasm68k_core::{
    bits::BitReader,
    error::Error,
    insn::{Insn, Size},
    mnemonic::Mnemonic,
    operand::{EaMask, Operand, RegisterList},
};

use crate::{
    arith::source_mask,
    ea::{ea, ea_low},
    expect, field, opcode, reg_high, reg_low,
};

/// Size field of `move` in bits 13-12.
fn move_size(op: u32) -> Result<Size, Error> {
    match field(op, 12, 2) {
        0b01 => Ok(Size::Byte),
        0b11 => Ok(Size::Word),
        0b10 => Ok(Size::Long),
        _ => Err(Error::Failed),
    }
}

pub(crate) fn move_(reader: &mut BitReader) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xc000, 0x0000)?;
    let size = move_size(op)?;
    let src = ea_low(reader, op, size, source_mask(EaMask::ALL, size))?;
    let dst = ea(
        reader,
        field(op, 6, 3),
        field(op, 9, 3),
        size,
        EaMask::DATA_ALTERABLE,
    )?;
    Ok(Insn::new(Mnemonic::Move).with_size(size).with(src).with(dst))
}

pub(crate) fn movea(reader: &mut BitReader) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xc1c0, 0x0040)?;
    let size = match move_size(op)? {
        Size::Byte => return Err(Error::Failed),
        size => size,
    };
    let src = ea_low(reader, op, size, EaMask::ALL)?;
    Ok(Insn::new(Mnemonic::Movea)
        .with_size(size)
        .with(src)
        .with(Operand::AddrDirect(reg_high(op))))
}

pub(crate) fn moveq(reader: &mut BitReader) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xf100, 0x7000)?;
    Ok(Insn::new(Mnemonic::Moveq)
        .with_size(Size::Long)
        .implicit()
        .with(Operand::Immediate(op as u8 as i8 as i64))
        .with(Operand::DataDirect(reg_high(op))))
}

/// `movep Dx,d16(Ay)` and `movep d16(Ay),Dx`.
pub(crate) fn movep(reader: &mut BitReader) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xf138, 0x0108)?;
    let opmode = field(op, 6, 3);
    let size = if opmode & 1 == 0 {
        Size::Word
    } else {
        Size::Long
    };
    let memory = Operand::Displacement {
        reg: reg_low(op),
        disp: reader.read_i16()?,
    };
    let data = Operand::DataDirect(reg_high(op));
    let insn = Insn::new(Mnemonic::Movep).with_size(size);
    Ok(match opmode {
        0b100 | 0b101 => insn.with(memory).with(data),
        0b110 | 0b111 => insn.with(data).with(memory),
        _ => return Err(Error::Failed),
    })
}

pub(crate) fn move_from_sr(reader: &mut BitReader) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xffc0, 0x40c0)?;
    let dst = ea_low(reader, op, Size::Word, EaMask::DATA_ALTERABLE)?;
    Ok(Insn::new(Mnemonic::MoveFromSr)
        .with_size(Size::Word)
        .with(Operand::Sr)
        .with(dst))
}

pub(crate) fn move_to_ccr(reader: &mut BitReader) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xffc0, 0x44c0)?;
    let src = ea_low(reader, op, Size::Word, EaMask::DATA)?;
    Ok(Insn::new(Mnemonic::MoveCcr)
        .with_size(Size::Word)
        .with(src)
        .with(Operand::Ccr))
}

pub(crate) fn move_to_sr(reader: &mut BitReader) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xffc0, 0x46c0)?;
    let src = ea_low(reader, op, Size::Word, EaMask::DATA)?;
    Ok(Insn::new(Mnemonic::MoveSr)
        .with_size(Size::Word)
        .with(src)
        .with(Operand::Sr))
}

/// `move An,usp` and `move usp,An`.
pub(crate) fn move_usp(reader: &mut BitReader) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xfff0, 0x4e60)?;
    let an = Operand::AddrDirect(reg_low(op));
    let insn = Insn::new(Mnemonic::MoveUsp).with_size(Size::Long);
    Ok(if op & 0x0008 == 0 {
        insn.with(an).with(Operand::Usp)
    } else {
        insn.with(Operand::Usp).with(an)
    })
}

pub(crate) fn swap(reader: &mut BitReader) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xfff8, 0x4840)?;
    Ok(Insn::new(Mnemonic::Swap)
        .with_size(Size::Word)
        .implicit()
        .with(Operand::DataDirect(reg_low(op))))
}

pub(crate) fn pea(reader: &mut BitReader) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xffc0, 0x4840)?;
    let src = ea_low(reader, op, Size::Long, EaMask::CONTROL)?;
    Ok(Insn::new(Mnemonic::Pea)
        .with_size(Size::Long)
        .implicit()
        .with(src))
}

pub(crate) fn lea(reader: &mut BitReader) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xf1c0, 0x41c0)?;
    let src = ea_low(reader, op, Size::Long, EaMask::CONTROL)?;
    Ok(Insn::new(Mnemonic::Lea)
        .with_size(Size::Long)
        .implicit()
        .with(src)
        .with(Operand::AddrDirect(reg_high(op))))
}

/// `movem <list>,<ea>` and `movem <ea>,<list>`.
///
/// The register mask word precedes the effective address extension. In the
/// predecrement mode the mask is stored in reverse order.
pub(crate) fn movem(reader: &mut BitReader) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xfb80, 0x4880)?;
    let size = if op & 0x0040 != 0 {
        Size::Long
    } else {
        Size::Word
    };
    let mask = reader.read_u16()?;
    if mask == 0 {
        return Err(Error::Failed);
    }
    let insn = Insn::new(Mnemonic::Movem).with_size(size);
    if op & 0x0400 == 0 {
        let dst = ea_low(reader, op, size, EaMask::MOVEM_STORE)?;
        let list = match dst {
            Operand::PreDecrement(_) => Operand::RegListDnAn(RegisterList::from_reversed_mask(mask)),
            _ => Operand::RegListAnDn(RegisterList::from_mask(mask)),
        };
        Ok(insn.with(list).with(dst))
    } else {
        let src = ea_low(reader, op, size, EaMask::MOVEM_LOAD)?;
        Ok(insn
            .with(src)
            .with(Operand::RegListAnDn(RegisterList::from_mask(mask))))
    }
}

pub(crate) fn exg(reader: &mut BitReader) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xf130, 0xc100)?;
    let (x, y) = (reg_high(op), reg_low(op));
    let (a, b) = match field(op, 3, 5) {
        0b01000 => (Operand::DataDirect(x), Operand::DataDirect(y)),
        0b01001 => (Operand::AddrDirect(x), Operand::AddrDirect(y)),
        0b10001 => (Operand::DataDirect(x), Operand::AddrDirect(y)),
        _ => return Err(Error::Failed),
    };
    Ok(Insn::new(Mnemonic::Exg).with_size(Size::Long).with(a).with(b))
}
