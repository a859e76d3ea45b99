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

/// `op #imm,<ea>` of line 0, `bits` selects the operation.
pub(crate) fn immediate_op(
    reader: &mut BitReader,
    mnemonic: Mnemonic,
    bits: u32,
) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xff00, bits)?;
    let size = size_field(op)?;
    let src = immediate(reader, size)?;
    let dst = ea_low(reader, op, size, EaMask::DATA_ALTERABLE)?;
    Ok(Insn::new(mnemonic).with_size(size).with(src).with(dst))
}

/// Source modes of a sized operation, byte operations cannot read `An`.
pub(crate) fn source_mask(mask: EaMask, size: Size) -> EaMask {
    if size == Size::Byte {
        mask.without(EaMask::AN)
    } else {
        mask
    }
}

/// `op <ea>,Dn` and `op Dn,<ea>` of lines 8, 9, C and D.
pub(crate) fn data_op(
    reader: &mut BitReader,
    mnemonic: Mnemonic,
    line: u32,
    src: EaMask,
) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xf000, line)?;
    let size = size_field(op)?;
    let dn = Operand::DataDirect(reg_high(op));
    let insn = Insn::new(mnemonic).with_size(size);
    if op & 0x0100 == 0 {
        let src = ea_low(reader, op, size, source_mask(src, size))?;
        Ok(insn.with(src).with(dn))
    } else {
        let dst = ea_low(reader, op, size, EaMask::MEMORY_ALTERABLE)?;
        Ok(insn.with(dn).with(dst))
    }
}

/// `op <ea>,An`, bit 8 selects a long operation.
fn address_op(reader: &mut BitReader, mnemonic: Mnemonic, line: u32) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xf0c0, line | 0x00c0)?;
    let size = if op & 0x0100 != 0 {
        Size::Long
    } else {
        Size::Word
    };
    let src = ea_low(reader, op, size, EaMask::ALL)?;
    Ok(Insn::new(mnemonic)
        .with_size(size)
        .with(src)
        .with(Operand::AddrDirect(reg_high(op))))
}

/// `op Dy,Dx` and `op -(Ay),-(Ax)`.
fn extended_op(
    reader: &mut BitReader,
    mnemonic: Mnemonic,
    bits: u32,
    size: Option<Size>,
) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    let size = match size {
        Some(size) => {
            expect(op, 0xf1f0, bits)?;
            size
        }
        None => {
            expect(op, 0xf130, bits)?;
            size_field(op)?
        }
    };
    let (x, y) = (reg_high(op), reg_low(op));
    let (src, dst) = if op & 0x0008 == 0 {
        (Operand::DataDirect(y), Operand::DataDirect(x))
    } else {
        (Operand::PreDecrement(y), Operand::PreDecrement(x))
    };
    let insn = Insn::new(mnemonic).with_size(size).with(src).with(dst);
    Ok(if mnemonic == Mnemonic::Abcd || mnemonic == Mnemonic::Sbcd {
        insn.implicit()
    } else {
        insn
    })
}

/// `op.w <ea>,Dn` of multiply, divide and `chk`.
fn word_op(reader: &mut BitReader, mnemonic: Mnemonic, bits: u32) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xf1c0, bits)?;
    let src = ea_low(reader, op, Size::Word, EaMask::DATA)?;
    Ok(Insn::new(mnemonic)
        .with_size(Size::Word)
        .with(src)
        .with(Operand::DataDirect(reg_high(op))))
}

/// Single operand `op <ea>` with a size field.
pub(crate) fn unary_op(reader: &mut BitReader, mnemonic: Mnemonic, bits: u32) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xff00, bits)?;
    let size = size_field(op)?;
    let dst = ea_low(reader, op, size, EaMask::DATA_ALTERABLE)?;
    Ok(Insn::new(mnemonic).with_size(size).with(dst))
}

fn quick_op(reader: &mut BitReader, mnemonic: Mnemonic, bits: u32) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xf100, bits)?;
    let size = size_field(op)?;
    let data = match field(op, 9, 3) {
        0 => 8,
        n => n as i64,
    };
    let dst = ea_low(reader, op, size, source_mask(EaMask::ALTERABLE, size))?;
    Ok(Insn::new(mnemonic)
        .with_size(size)
        .with(Operand::Immediate(data))
        .with(dst))
}

pub(crate) fn subi(reader: &mut BitReader) -> Result<Insn, Error> {
    immediate_op(reader, Mnemonic::Subi, 0x0400)
}

pub(crate) fn addi(reader: &mut BitReader) -> Result<Insn, Error> {
    immediate_op(reader, Mnemonic::Addi, 0x0600)
}

pub(crate) fn cmpi(reader: &mut BitReader) -> Result<Insn, Error> {
    immediate_op(reader, Mnemonic::Cmpi, 0x0c00)
}

pub(crate) fn negx(reader: &mut BitReader) -> Result<Insn, Error> {
    unary_op(reader, Mnemonic::Negx, 0x4000)
}

pub(crate) fn clr(reader: &mut BitReader) -> Result<Insn, Error> {
    unary_op(reader, Mnemonic::Clr, 0x4200)
}

pub(crate) fn neg(reader: &mut BitReader) -> Result<Insn, Error> {
    unary_op(reader, Mnemonic::Neg, 0x4400)
}

pub(crate) fn tst(reader: &mut BitReader) -> Result<Insn, Error> {
    unary_op(reader, Mnemonic::Tst, 0x4a00)
}

pub(crate) fn ext(reader: &mut BitReader) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xffb8, 0x4880)?;
    let size = if op & 0x0040 != 0 {
        Size::Long
    } else {
        Size::Word
    };
    Ok(Insn::new(Mnemonic::Ext)
        .with_size(size)
        .with(Operand::DataDirect(reg_low(op))))
}

pub(crate) fn nbcd(reader: &mut BitReader) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xffc0, 0x4800)?;
    let dst = ea_low(reader, op, Size::Byte, EaMask::DATA_ALTERABLE)?;
    Ok(Insn::new(Mnemonic::Nbcd)
        .with_size(Size::Byte)
        .implicit()
        .with(dst))
}

pub(crate) fn chk(reader: &mut BitReader) -> Result<Insn, Error> {
    word_op(reader, Mnemonic::Chk, 0x4180)
}

pub(crate) fn addq(reader: &mut BitReader) -> Result<Insn, Error> {
    quick_op(reader, Mnemonic::Addq, 0x5000)
}

pub(crate) fn subq(reader: &mut BitReader) -> Result<Insn, Error> {
    quick_op(reader, Mnemonic::Subq, 0x5100)
}

pub(crate) fn sbcd(reader: &mut BitReader) -> Result<Insn, Error> {
    extended_op(reader, Mnemonic::Sbcd, 0x8100, Some(Size::Byte))
}

pub(crate) fn abcd(reader: &mut BitReader) -> Result<Insn, Error> {
    extended_op(reader, Mnemonic::Abcd, 0xc100, Some(Size::Byte))
}

pub(crate) fn subx(reader: &mut BitReader) -> Result<Insn, Error> {
    extended_op(reader, Mnemonic::Subx, 0x9100, None)
}

pub(crate) fn addx(reader: &mut BitReader) -> Result<Insn, Error> {
    extended_op(reader, Mnemonic::Addx, 0xd100, None)
}

pub(crate) fn divu(reader: &mut BitReader) -> Result<Insn, Error> {
    word_op(reader, Mnemonic::Divu, 0x80c0)
}

pub(crate) fn divs(reader: &mut BitReader) -> Result<Insn, Error> {
    word_op(reader, Mnemonic::Divs, 0x81c0)
}

pub(crate) fn mulu(reader: &mut BitReader) -> Result<Insn, Error> {
    word_op(reader, Mnemonic::Mulu, 0xc0c0)
}

pub(crate) fn muls(reader: &mut BitReader) -> Result<Insn, Error> {
    word_op(reader, Mnemonic::Muls, 0xc1c0)
}

pub(crate) fn suba(reader: &mut BitReader) -> Result<Insn, Error> {
    address_op(reader, Mnemonic::Suba, 0x9000)
}

pub(crate) fn cmpa(reader: &mut BitReader) -> Result<Insn, Error> {
    address_op(reader, Mnemonic::Cmpa, 0xb000)
}

pub(crate) fn adda(reader: &mut BitReader) -> Result<Insn, Error> {
    address_op(reader, Mnemonic::Adda, 0xd000)
}

pub(crate) fn sub(reader: &mut BitReader) -> Result<Insn, Error> {
    data_op(reader, Mnemonic::Sub, 0x9000, EaMask::ALL)
}

pub(crate) fn add(reader: &mut BitReader) -> Result<Insn, Error> {
    data_op(reader, Mnemonic::Add, 0xd000, EaMask::ALL)
}

pub(crate) fn cmp(reader: &mut BitReader) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xf100, 0xb000)?;
    let size = size_field(op)?;
    let src = ea_low(reader, op, size, source_mask(EaMask::ALL, size))?;
    Ok(Insn::new(Mnemonic::Cmp)
        .with_size(size)
        .with(src)
        .with(Operand::DataDirect(reg_high(op))))
}

pub(crate) fn cmpm(reader: &mut BitReader) -> Result<Insn, Error> {
    let op = opcode(reader)?;
    expect(op, 0xf138, 0xb108)?;
    let size = size_field(op)?;
    Ok(Insn::new(Mnemonic::Cmpm)
        .with_size(size)
        .with(Operand::PostIncrement(reg_low(op)))
        .with(Operand::PostIncrement(reg_high(op))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(
        rule: fn(&mut BitReader) -> Result<Insn, Error>,
        data: &[u8],
    ) -> Result<Insn, Error> {
        let mut reader = BitReader::new(data);
        let insn = rule(&mut reader)?;
        assert!(reader.is_finished(), "trailing bytes");
        Ok(insn)
    }

    #[test]
    fn immediate_arithmetic() {
        // addi.w #$10,d1
        let insn = decode(addi, &[0x06, 0x41, 0x00, 0x10]).unwrap();
        assert_eq!(insn.mnemonic(), Mnemonic::Addi);
        assert_eq!(insn.size(), Size::Word);
        assert_eq!(
            insn.operands(),
            &[Operand::Immediate(0x10), Operand::DataDirect(1)]
        );
        // subi.b to An is not data alterable
        assert_eq!(decode(subi, &[0x04, 0x09, 0x00, 0x01]), Err(Error::Failed));
        // cmpi size 11
        assert_eq!(decode(cmpi, &[0x0c, 0xc0, 0x00, 0x01]), Err(Error::Failed));
    }

    #[test]
    fn register_forms() {
        // add.l d0,(a1)
        let insn = decode(add, &[0xd3, 0x91]).unwrap();
        assert_eq!(insn.size(), Size::Long);
        assert_eq!(
            insn.operands(),
            &[Operand::DataDirect(1), Operand::Indirect(1)]
        );
        // sub.b a0,d0 is not valid
        assert_eq!(decode(sub, &[0x90, 0x08]), Err(Error::Failed));
        // sub.w a0,d0
        assert!(decode(sub, &[0x90, 0x48]).is_ok());
        // adda.l d1,a2
        let insn = decode(adda, &[0xd5, 0xc1]).unwrap();
        assert_eq!(insn.size(), Size::Long);
        assert_eq!(
            insn.operands(),
            &[Operand::DataDirect(1), Operand::AddrDirect(2)]
        );
        // cmpa.w is not cmp
        assert_eq!(decode(cmp, &[0xb0, 0xc0]), Err(Error::Failed));
    }

    #[test]
    fn extended() {
        // addx.w -(a1),-(a2)
        let insn = decode(addx, &[0xd5, 0x49]).unwrap();
        assert_eq!(insn.size(), Size::Word);
        assert_eq!(
            insn.operands(),
            &[Operand::PreDecrement(1), Operand::PreDecrement(2)]
        );
        // abcd d1,d0
        let insn = decode(abcd, &[0xc1, 0x01]).unwrap();
        assert!(insn.is_implicit_size());
        assert_eq!(
            insn.operands(),
            &[Operand::DataDirect(1), Operand::DataDirect(0)]
        );
        // cmpm.b (a0)+,(a1)+
        let insn = decode(cmpm, &[0xb3, 0x08]).unwrap();
        assert_eq!(
            insn.operands(),
            &[Operand::PostIncrement(0), Operand::PostIncrement(1)]
        );
    }

    #[test]
    fn quick() {
        // addq.l #8,d0
        let insn = decode(addq, &[0x50, 0x80]).unwrap();
        assert_eq!(
            insn.operands(),
            &[Operand::Immediate(8), Operand::DataDirect(0)]
        );
        // subq.w #1,a0
        assert!(decode(subq, &[0x53, 0x48]).is_ok());
        // subq.b #1,a0
        assert_eq!(decode(subq, &[0x53, 0x08]), Err(Error::Failed));
        // scc pattern
        assert_eq!(decode(addq, &[0x50, 0xc0]), Err(Error::Failed));
    }

    #[test]
    fn word_sized() {
        // muls.w #-1,d2
        let insn = decode(muls, &[0xc5, 0xfc, 0xff, 0xff]).unwrap();
        assert_eq!(insn.size(), Size::Word);
        assert_eq!(
            insn.operands(),
            &[Operand::Immediate(0xffff), Operand::DataDirect(2)]
        );
        // ext.l d3
        let insn = decode(ext, &[0x48, 0xc3]).unwrap();
        assert_eq!(insn.size(), Size::Long);
        // clr.l -(a7)
        let insn = decode(clr, &[0x42, 0xa7]).unwrap();
        assert_eq!(insn.operands(), &[Operand::PreDecrement(7)]);
    }
}
