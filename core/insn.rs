use alloc::vec::Vec;

use crate::{mnemonic::Mnemonic, operand::Operand};

/// Operation size.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Size {
    #[default]
    Unsized = 0,
    /// 8-bit branch displacement.
    Short = 1,
    Byte = 2,
    Word = 3,
    Long = 4,
}

impl Size {
    pub fn from_id(id: i32) -> Option<Self> {
        Some(match id {
            0 => Self::Unsized,
            1 => Self::Short,
            2 => Self::Byte,
            3 => Self::Word,
            4 => Self::Long,
            _ => return None,
        })
    }

    pub fn suffix(self) -> Option<char> {
        match self {
            Self::Unsized => None,
            Self::Short => Some('s'),
            Self::Byte => Some('b'),
            Self::Word => Some('w'),
            Self::Long => Some('l'),
        }
    }

    /// Standard two bit size field, `0b11` is not a size.
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            0b00 => Some(Self::Byte),
            0b01 => Some(Self::Word),
            0b10 => Some(Self::Long),
            _ => None,
        }
    }
}

/// Processors that implement an instruction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cpu(u8);

impl Cpu {
    pub const MC68000: Self = Self(1 << 0);
    pub const MC68010: Self = Self(1 << 1);
    pub const MC68020: Self = Self(1 << 2);
    pub const MC68030: Self = Self(1 << 3);
    pub const MC68040: Self = Self(1 << 4);
    pub const MC68060: Self = Self(1 << 5);
    pub const ALL: Self = Self(0x3f);

    pub const fn from_raw(raw: u8) -> Option<Self> {
        if raw & !Self::ALL.0 == 0 {
            Some(Self(raw))
        } else {
            None
        }
    }

    pub const fn raw(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::ALL
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Insn {
    mnemonic: Mnemonic,
    size: Size,
    operands: Vec<Operand>,
    implicit_size: bool,
    cpu: Cpu,
}

impl Insn {
    pub fn new(mnemonic: Mnemonic) -> Self {
        Self {
            mnemonic,
            size: Size::Unsized,
            operands: Vec::with_capacity(2),
            implicit_size: false,
            cpu: Cpu::ALL,
        }
    }

    pub fn mnemonic(&self) -> Mnemonic {
        self.mnemonic
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) -> &mut Self {
        self.size = size;
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Size is implied by the mnemonic and is not printed.
    pub fn is_implicit_size(&self) -> bool {
        self.implicit_size
    }

    pub fn set_implicit_size(&mut self, implicit: bool) -> &mut Self {
        self.implicit_size = implicit;
        self
    }

    pub fn implicit(mut self) -> Self {
        self.implicit_size = true;
        self
    }

    pub fn cpu(&self) -> Cpu {
        self.cpu
    }

    pub fn set_cpu(&mut self, cpu: Cpu) -> &mut Self {
        self.cpu = cpu;
        self
    }

    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    pub fn operands_mut(&mut self) -> &mut [Operand] {
        &mut self.operands
    }

    pub fn push_operand(&mut self, operand: Operand) -> &mut Self {
        debug_assert!(self.operands.len() < 2);
        self.operands.push(operand);
        self
    }

    pub fn with(mut self, operand: Operand) -> Self {
        self.push_operand(operand);
        self
    }
}
