use disasm68k_core::{
    bits::BitReader,
    error::Error,
    insn::{Insn, Size},
    mnemonic::Mnemonic,
    operand::{EaMask, Operand},
};

use crate::{
    arith::{data_op, immediate_op, unary_op},
    ea::{ea_low, immediate},
    expect, opcode, reg_high, size_field,
};

/// `op #imm,ccr` or `op #imm,sr`, a single fixed operation word.
fn status_op(
    reader: &mut BitReader,
    mnemonic: Mnemonic,
    word: u32,
    size: Size,
    register: Operand,
) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xffff, word)?;
    let src = immediate(reader, size)?;
    Ok(Insn::new(mnemonic).with_size(size).with(src).with(register))
}

pub(crate) fn ori_ccr(reader: &mut BitReader) -> Result<Insn, Error> {
    status_op(reader, Mnemonic::OriCcr, 0x003c, Size::Byte, Operand::Ccr)
}

pub(crate) fn ori_sr(reader: &mut BitReader) -> Result<Insn, Error> {
    status_op(reader, Mnemonic::OriSr, 0x007c, Size::Word, Operand::Sr)
}

pub(crate) fn andi_ccr(reader: &mut BitReader) -> Result<Insn, Error> {
    status_op(reader, Mnemonic::AndiCcr, 0x023c, Size::Byte, Operand::Ccr)
}

pub(crate) fn andi_sr(reader: &mut BitReader) -> Result<Insn, Error> {
    status_op(reader, Mnemonic::AndiSr, 0x027c, Size::Word, Operand::Sr)
}

pub(crate) fn eori_ccr(reader: &mut BitReader) -> Result<Insn, Error> {
    status_op(reader, Mnemonic::EoriCcr, 0x0a3c, Size::Byte, Operand::Ccr)
}

pub(crate) fn eori_sr(reader: &mut BitReader) -> Result<Insn, Error> {
    status_op(reader, Mnemonic::EoriSr, 0x0a7c, Size::Word, Operand::Sr)
}

pub(crate) fn ori(reader: &mut BitReader) -> Result<Insn, Error> {
    immediate_op(reader, Mnemonic::Ori, 0x0000)
}

pub(crate) fn andi(reader: &mut BitReader) -> Result<Insn, Error> {
    immediate_op(reader, Mnemonic::Andi, 0x0200)
}

pub(crate) fn eori(reader: &mut BitReader) -> Result<Insn, Error> {
    immediate_op(reader, Mnemonic::Eori, 0x0a00)
}

pub(crate) fn not(reader: &mut BitReader) -> Result<Insn, Error> {
    unary_op(reader, Mnemonic::Not, 0x4600)
}

pub(crate) fn tas(reader: &mut BitReader) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xffc0, 0x4ac0)?;
    let dst = ea_low(reader, op, Size::Byte, EaMask::DATA_ALTERABLE)?;
    Ok(Insn::new(Mnemonic::Tas)
        .with_size(Size::Byte)
        .implicit()
        .with(dst))
}

pub(crate) fn or(reader: &mut BitReader) -> Result<Insn, Error> {
    data_op(reader, Mnemonic::Or, 0x8000, EaMask::DATA)
}

pub(crate) fn and(reader: &mut BitReader) -> Result<Insn, Error> {
    data_op(reader, Mnemonic::And, 0xc000, EaMask::DATA)
}

/// `eor Dn,<ea>`, there is no memory source form.
pub(crate) fn eor(reader: &mut BitReader) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xf100, 0xb100)?;
    let size = size_field(op)?;
    let dst = ea_low(reader, op, size, EaMask::DATA_ALTERABLE)?;
    Ok(Insn::new(Mnemonic::Eor)
        .with_size(size)
        .with(Operand::DataDirect(reg_high(op)))
        .with(dst))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_register() {
        let mut reader = BitReader::new(&[0x02, 0x3c, 0x00, 0xfe]);
        let insn = andi_ccr(&mut reader).unwrap();
        assert_eq!(insn.mnemonic().text(), "andi");
        assert_eq!(insn.size(), Size::Byte);
        assert_eq!(insn.operands(), &[Operand::Immediate(0xfe), Operand::Ccr]);

        let mut reader = BitReader::new(&[0x00, 0x7c, 0x07, 0x00]);
        let insn = ori_sr(&mut reader).unwrap();
        assert_eq!(insn.operands(), &[Operand::Immediate(0x700), Operand::Sr]);

        // non-zero gap byte
        let mut reader = BitReader::new(&[0x0a, 0x3c, 0x01, 0x00]);
        assert_eq!(eori_ccr(&mut reader), Err(Error::Failed));
    }

    #[test]
    fn immediate_to_ccr_is_not_ori() {
        let mut reader = BitReader::new(&[0x00, 0x3c, 0x00, 0x01]);
        assert_eq!(ori(&mut reader), Err(Error::Failed));
    }

    #[test]
    fn register_forms() {
        // or.w (a0),d1
        let mut reader = BitReader::new(&[0x82, 0x50]);
        let insn = or(&mut reader).unwrap();
        assert_eq!(
            insn.operands(),
            &[Operand::Indirect(0), Operand::DataDirect(1)]
        );
        // and.l a0,d0 reads an address register
        let mut reader = BitReader::new(&[0xc0, 0x88]);
        assert_eq!(and(&mut reader), Err(Error::Failed));
        // eor.b d2,d3
        let mut reader = BitReader::new(&[0xb5, 0x03]);
        let insn = eor(&mut reader).unwrap();
        assert_eq!(
            insn.operands(),
            &[Operand::DataDirect(2), Operand::DataDirect(3)]
        );
        // tas (a0)
        let mut reader = BitReader::new(&[0x4a, 0xd0]);
        assert!(tas(&mut reader).unwrap().is_implicit_size());
    }
}
