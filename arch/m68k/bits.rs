//! Bit manipulation, shift and rotate instructions.

use disasm68k_core::{
    bits::BitReader,
    error::Error,
    insn::{Insn, Size},
    mnemonic::Mnemonic,
    operand::{EaMask, Operand},
};

use crate::{
    ea::{ea_low, immediate},
    expect, field, opcode, reg_high, reg_low, size_field,
};

const BIT_OPS: [Mnemonic; 4] = [Mnemonic::Btst, Mnemonic::Bchg, Mnemonic::Bclr, Mnemonic::Bset];

/// Shift kind by type field, right then left.
const SHIFTS: [[Mnemonic; 2]; 4] = [
    [Mnemonic::Asr, Mnemonic::Asl],
    [Mnemonic::Lsr, Mnemonic::Lsl],
    [Mnemonic::Roxr, Mnemonic::Roxl],
    [Mnemonic::Ror, Mnemonic::Rol],
];

/// Destination of a bit operation. Operations on `Dn` are long, in memory
/// they are byte sized.
fn bit_target(reader: &mut BitReader, op: u32, mnemonic: Mnemonic) -> Result<(Size, Operand), Error> {
    let size = if field(op, 3, 3) == 0 {
        Size::Long
    } else {
        Size::Byte
    };
    let mask = if mnemonic == Mnemonic::Btst {
        EaMask::DATA
    } else {
        EaMask::DATA_ALTERABLE
    };
    Ok((size, ea_low(reader, op, size, mask)?))
}

/// `bxxx #n,<ea>`
pub(crate) fn bit_static(reader: &mut BitReader) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xff00, 0x0800)?;
    let mnemonic = BIT_OPS[field(op, 6, 2) as usize];
    let bit = immediate(reader, Size::Byte)?;
    // immediate destination would need a second immediate
    if field(op, 0, 6) == 0o74 {
        return Err(Error::Failed);
    }
    let (size, dst) = bit_target(reader, op, mnemonic)?;
    Ok(Insn::new(mnemonic)
        .with_size(size)
        .implicit()
        .with(bit)
        .with(dst))
}

/// `bxxx Dn,<ea>`
pub(crate) fn bit_dynamic(reader: &mut BitReader) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xf100, 0x0100)?;
    let mnemonic = BIT_OPS[field(op, 6, 2) as usize];
    let (size, dst) = bit_target(reader, op, mnemonic)?;
    Ok(Insn::new(mnemonic)
        .with_size(size)
        .implicit()
        .with(Operand::DataDirect(reg_high(op)))
        .with(dst))
}

/// Single bit shift of a memory word.
pub(crate) fn shift_memory(reader: &mut BitReader) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xf8c0, 0xe0c0)?;
    let mnemonic = SHIFTS[field(op, 9, 2) as usize][field(op, 8, 1) as usize];
    let dst = ea_low(reader, op, Size::Word, EaMask::MEMORY_ALTERABLE)?;
    Ok(Insn::new(mnemonic).with_size(Size::Word).with(dst))
}

/// Shift of a data register by an immediate count or by a register.
pub(crate) fn shift_register(reader: &mut BitReader) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xf000, 0xe000)?;
    let size = size_field(op)?;
    let mnemonic = SHIFTS[field(op, 3, 2) as usize][field(op, 8, 1) as usize];
    let count = if op & 0x0020 == 0 {
        match reg_high(op) {
            0 => Operand::Immediate(8),
            n => Operand::Immediate(n as i64),
        }
    } else {
        Operand::DataDirect(reg_high(op))
    };
    Ok(Insn::new(mnemonic)
        .with_size(size)
        .with(count)
        .with(Operand::DataDirect(reg_low(op))))
}
