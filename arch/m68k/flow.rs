//! Program control and system instructions.

use disasm68k_core::{
    bits::BitReader,
    error::Error,
    insn::{Insn, Size},
    mnemonic::Mnemonic,
    operand::{EaMask, Operand},
};

use crate::{
    ea::{ea_low, immediate},
    expect, field, opcode, reg_low,
};

fn fixed(reader: &mut BitReader, mnemonic: Mnemonic, word: u32) -> Result<Insn, Error> {
    expect(opcode(reader)?, 0xffff, word)?;
    Ok(Insn::new(mnemonic))
}

fn jump(reader: &mut BitReader, mnemonic: Mnemonic, bits: u32) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xffc0, bits)?;
    let target = ea_low(reader, op, Size::Unsized, EaMask::CONTROL)?;
    Ok(Insn::new(mnemonic).with(target))
}

pub(crate) fn illegal(reader: &mut BitReader) -> Result<Insn, Error> {
    fixed(reader, Mnemonic::Illegal, 0x4afc)
}

pub(crate) fn reset(reader: &mut BitReader) -> Result<Insn, Error> {
    fixed(reader, Mnemonic::Reset, 0x4e70)
}

pub(crate) fn nop(reader: &mut BitReader) -> Result<Insn, Error> {
    fixed(reader, Mnemonic::Nop, 0x4e71)
}

pub(crate) fn rte(reader: &mut BitReader) -> Result<Insn, Error> {
    fixed(reader, Mnemonic::Rte, 0x4e73)
}

pub(crate) fn rts(reader: &mut BitReader) -> Result<Insn, Error> {
    fixed(reader, Mnemonic::Rts, 0x4e75)
}

pub(crate) fn trapv(reader: &mut BitReader) -> Result<Insn, Error> {
    fixed(reader, Mnemonic::Trapv, 0x4e76)
}

pub(crate) fn rtr(reader: &mut BitReader) -> Result<Insn, Error> {
    fixed(reader, Mnemonic::Rtr, 0x4e77)
}

pub(crate) fn stop(reader: &mut BitReader) -> Result<Insn, Error> {
    expect(opcode(reader)?, 0xffff, 0x4e72)?;
    Ok(Insn::new(Mnemonic::Stop).with(immediate(reader, Size::Word)?))
}

pub(crate) fn trap(reader: &mut BitReader) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xfff0, 0x4e40)?;
    Ok(Insn::new(Mnemonic::Trap).with(Operand::Immediate(field(op, 0, 4) as i64)))
}

/// `link An,#disp`, the displacement is signed.
pub(crate) fn link(reader: &mut BitReader) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xfff8, 0x4e50)?;
    let disp = reader.read_i16()?;
    Ok(Insn::new(Mnemonic::Link)
        .with(Operand::AddrDirect(reg_low(op)))
        .with(Operand::Immediate(disp as i64)))
}

pub(crate) fn unlk(reader: &mut BitReader) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xfff8, 0x4e58)?;
    Ok(Insn::new(Mnemonic::Unlk).with(Operand::AddrDirect(reg_low(op))))
}

pub(crate) fn jsr(reader: &mut BitReader) -> Result<Insn, Error> {
    jump(reader, Mnemonic::Jsr, 0x4e80)
}

pub(crate) fn jmp(reader: &mut BitReader) -> Result<Insn, Error> {
    jump(reader, Mnemonic::Jmp, 0x4ec0)
}

pub(crate) fn dbcc(reader: &mut BitReader) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xf0f8, 0x50c8)?;
    let disp = reader.read_i16()?;
    Ok(Insn::new(Mnemonic::decrement_branch(field(op, 8, 4)))
        .with(Operand::DataDirect(reg_low(op)))
        .with(Operand::label(disp as i32)))
}

pub(crate) fn scc(reader: &mut BitReader) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xf0c0, 0x50c0)?;
    let dst = ea_low(reader, op, Size::Byte, EaMask::DATA_ALTERABLE)?;
    Ok(Insn::new(Mnemonic::set(field(op, 8, 4)))
        .with_size(Size::Byte)
        .implicit()
        .with(dst))
}

/// `Bcc`, `bra` and `bsr`. A zero 8-bit displacement selects a 16-bit
/// displacement in the following word.
pub(crate) fn bcc(reader: &mut BitReader) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xf000, 0x6000)?;
    let (size, disp) = match op as u8 as i8 {
        0 => (Size::Word, reader.read_i16()? as i32),
        disp => (Size::Short, disp as i32),
    };
    Ok(Insn::new(Mnemonic::branch(field(op, 8, 4)))
        .with_size(size)
        .with(Operand::label(disp)))
}
