use disasm68k_core::{
    bits::BitReader,
    error::Error,
    insn::Size,
    operand::{EaMask, IndexReg, Operand},
};

/// Addressing mode selected by an effective address field.
pub(crate) fn mode(mode: u32, reg: u32) -> Option<EaMask> {
    Some(match mode {
        0b000 => EaMask::DN,
        0b001 => EaMask::AN,
        0b010 => EaMask::AN_INDIRECT,
        0b011 => EaMask::POSTINCREMENT,
        0b100 => EaMask::PREDECREMENT,
        0b101 => EaMask::DISPLACEMENT,
        0b110 => EaMask::INDEX,
        _ => match reg {
            0b000 => EaMask::ABS_SHORT,
            0b001 => EaMask::ABS_LONG,
            0b010 => EaMask::PC_DISPLACEMENT,
            0b011 => EaMask::PC_INDEX,
            0b100 => EaMask::IMMEDIATE,
            _ => return None,
        },
    })
}

fn index(reader: &mut BitReader) -> Result<IndexReg, Error> {
    IndexReg::from_extension(reader.read_u8()?).ok_or(Error::Failed)
}

/// Immediate data of an operation of `size`.
///
/// Byte data occupies the low half of an extension word whose high half
/// must be zero.
pub(crate) fn immediate(reader: &mut BitReader, size: Size) -> Result<Operand, Error> {
    let value = match size {
        Size::Byte => {
            if reader.read_u8()? != 0 {
                return Err(Error::Failed);
            }
            reader.read_u8()? as i64
        }
        Size::Word => reader.read_u16()? as i64,
        Size::Long => reader.read_u32()? as i64,
        Size::Unsized | Size::Short => return Err(Error::Failed),
    };
    Ok(Operand::Immediate(value))
}

/// Decodes an effective address, `mask` is the set of allowed modes.
pub(crate) fn ea(
    reader: &mut BitReader,
    mode_bits: u32,
    reg_bits: u32,
    size: Size,
    mask: EaMask,
) -> Result<Operand, Error> {
    let kind = mode(mode_bits, reg_bits).ok_or(Error::Failed)?;
    if !mask.contains(kind) {
        return Err(Error::Failed);
    }

    let reg = reg_bits as u8;
    let operand = match mode_bits {
        0b000 => Operand::DataDirect(reg),
        0b001 => Operand::AddrDirect(reg),
        0b010 => Operand::Indirect(reg),
        0b011 => Operand::PostIncrement(reg),
        0b100 => Operand::PreDecrement(reg),
        0b101 => Operand::Displacement {
            reg,
            disp: reader.read_i16()?,
        },
        0b110 => {
            let index = index(reader)?;
            Operand::Indexed {
                reg,
                index,
                disp: reader.read_i8()?,
            }
        }
        _ => match reg_bits {
            0b000 => Operand::AbsShort(reader.read_i16()?),
            0b001 => Operand::AbsLong(reader.read_u32()?),
            0b010 => Operand::pc_displacement(reader.read_i16()?),
            0b011 => {
                let index = index(reader)?;
                Operand::pc_indexed(index, reader.read_i8()?)
            }
            _ => immediate(reader, size)?,
        },
    };
    Ok(operand)
}

/// Decodes the effective address in the low six bits of `op`.
pub(crate) fn ea_low(
    reader: &mut BitReader,
    op: u32,
    size: Size,
    mask: EaMask,
) -> Result<Operand, Error> {
    ea(reader, (op >> 3) & 7, op & 7, size, mask)
}
