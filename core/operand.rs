use crate::macros::impl_type_ids;

impl_type_ids! {
    /// Serialized operand type identifiers.
    pub enum OperandType {
        AbsLong                     = 0x2001,
        AbsShort                    = 0x2002,
        AnDirect                    = 0x2003,
        AnIndirect                  = 0x2004,
        AnIndirectDisplacement      = 0x2005,
        AnIndirectIndexDisplacement = 0x2006,
        AnIndirectPostincrement     = 0x2007,
        AnIndirectPredecrement      = 0x2008,
        CcrDirect                   = 0x2009,
        DnDirect                    = 0x200a,
        ImmediateData               = 0x200b,
        Label                       = 0x200c,
        PcIndirectDisplacement      = 0x200d,
        PcIndirectIndexDisplacement = 0x200e,
        RegisterListAnDn            = 0x200f,
        RegisterListDnAn            = 0x2010,
        SrDirect                    = 0x2011,
        UspDirect                   = 0x2012,
    }
}

/// Set of addressing modes allowed for an operand position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EaMask(u16);

impl EaMask {
    pub const DN: Self = Self(1 << 11);
    pub const AN: Self = Self(1 << 10);
    pub const AN_INDIRECT: Self = Self(1 << 9);
    pub const POSTINCREMENT: Self = Self(1 << 8);
    pub const PREDECREMENT: Self = Self(1 << 7);
    pub const DISPLACEMENT: Self = Self(1 << 6);
    pub const INDEX: Self = Self(1 << 5);
    pub const ABS_SHORT: Self = Self(1 << 4);
    pub const ABS_LONG: Self = Self(1 << 3);
    pub const IMMEDIATE: Self = Self(1 << 2);
    pub const PC_DISPLACEMENT: Self = Self(1 << 1);
    pub const PC_INDEX: Self = Self(1 << 0);

    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(0b1111_1111_1111);
    /// All modes except `An`.
    pub const DATA: Self = Self(0b1011_1111_1111);
    /// All modes except immediate and PC relative.
    pub const ALTERABLE: Self = Self(0b1111_1111_1000);
    pub const DATA_ALTERABLE: Self = Self(0b1011_1111_1000);
    pub const MEMORY_ALTERABLE: Self = Self(0b0011_1111_1000);
    pub const CONTROL: Self = Self(0b0010_0111_1011);
    /// Destinations of `movem` register to memory.
    pub const MOVEM_STORE: Self = Self(0b0010_1111_1000);
    /// Sources of `movem` memory to registers.
    pub const MOVEM_LOAD: Self = Self(0b0011_0111_1011);

    pub const fn raw(self) -> u16 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RegKind {
    Data = 0,
    Address = 1,
}

impl RegKind {
    pub fn prefix(self) -> char {
        match self {
            Self::Data => 'd',
            Self::Address => 'a',
        }
    }
}

/// Index register of the indexed addressing modes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IndexReg {
    pub kind: RegKind,
    pub num: u8,
    /// Sign-extended word index if false.
    pub long: bool,
}

impl IndexReg {
    /// Parses a brief extension byte, `None` if reserved bits are set.
    pub fn from_extension(byte: u8) -> Option<Self> {
        if byte & 0b111 != 0 {
            return None;
        }
        Some(Self {
            kind: if byte & 0x80 != 0 {
                RegKind::Address
            } else {
                RegKind::Data
            },
            num: (byte >> 4) & 7,
            long: byte & 0x08 != 0,
        })
    }

    pub fn to_extension(self) -> u8 {
        ((self.kind as u8) << 7) | (self.num << 4) | ((self.long as u8) << 3)
    }
}

/// Registers selected by `movem`, bit `n` of each mask is register `n`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterList {
    pub data: u8,
    pub addr: u8,
}

impl RegisterList {
    /// Normal order, bit 0 is `d0` and bit 15 is `a7`.
    pub fn from_mask(mask: u16) -> Self {
        Self {
            data: mask as u8,
            addr: (mask >> 8) as u8,
        }
    }

    /// Predecrement order, bit 15 is `d0` and bit 0 is `a7`.
    pub fn from_reversed_mask(mask: u16) -> Self {
        Self::from_mask(mask.reverse_bits())
    }

    pub fn is_empty(&self) -> bool {
        self.data == 0 && self.addr == 0
    }
}

/// Decoded instruction operand.
///
/// Operands which denote an address store the address of their bound label,
/// the label itself lives in the disassembly map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    /// `Dn`
    DataDirect(u8),
    /// `An`
    AddrDirect(u8),
    /// `(An)`
    Indirect(u8),
    /// `(An)+`
    PostIncrement(u8),
    /// `-(An)`
    PreDecrement(u8),
    /// `d16(An)`
    Displacement { reg: u8, disp: i16 },
    /// `d8(An,Xn)`
    Indexed { reg: u8, index: IndexReg, disp: i8 },
    /// `d16(pc)`, the displacement is relative to the instruction address.
    PcDisplacement { disp: i32, label: Option<u64> },
    /// `d8(pc,Xn)`, the displacement is relative to the instruction address.
    PcIndexed {
        index: IndexReg,
        disp: i32,
        label: Option<u64>,
    },
    /// `addr.w`, sign extended to 32 bits.
    AbsShort(i16),
    /// `addr.l`
    AbsLong(u32),
    /// `#imm`
    Immediate(i64),
    Sr,
    Ccr,
    Usp,
    /// Register list in normal order.
    RegListAnDn(RegisterList),
    /// Register list in predecrement order.
    RegListDnAn(RegisterList),
    /// Branch target, the displacement is relative to the instruction address.
    Label { disp: i32, label: Option<u64> },
}

impl Operand {
    pub fn operand_type(&self) -> OperandType {
        match self {
            Self::DataDirect(..) => OperandType::DnDirect,
            Self::AddrDirect(..) => OperandType::AnDirect,
            Self::Indirect(..) => OperandType::AnIndirect,
            Self::PostIncrement(..) => OperandType::AnIndirectPostincrement,
            Self::PreDecrement(..) => OperandType::AnIndirectPredecrement,
            Self::Displacement { .. } => OperandType::AnIndirectDisplacement,
            Self::Indexed { .. } => OperandType::AnIndirectIndexDisplacement,
            Self::PcDisplacement { .. } => OperandType::PcIndirectDisplacement,
            Self::PcIndexed { .. } => OperandType::PcIndirectIndexDisplacement,
            Self::AbsShort(..) => OperandType::AbsShort,
            Self::AbsLong(..) => OperandType::AbsLong,
            Self::Immediate(..) => OperandType::ImmediateData,
            Self::Sr => OperandType::SrDirect,
            Self::Ccr => OperandType::CcrDirect,
            Self::Usp => OperandType::UspDirect,
            Self::RegListAnDn(..) => OperandType::RegisterListAnDn,
            Self::RegListDnAn(..) => OperandType::RegisterListDnAn,
            Self::Label { .. } => OperandType::Label,
        }
    }

    /// Branch target with a word-fetch adjusted displacement.
    pub fn label(disp: i32) -> Self {
        Self::Label {
            disp: disp + 2,
            label: None,
        }
    }

    pub fn pc_displacement(disp: i16) -> Self {
        Self::PcDisplacement {
            disp: disp as i32 + 2,
            label: None,
        }
    }

    pub fn pc_indexed(index: IndexReg, disp: i8) -> Self {
        Self::PcIndexed {
            index,
            disp: disp as i32 + 2,
            label: None,
        }
    }

    /// Operand denotes an address relative to its instruction.
    ///
    /// Absolute addresses are plain numbers and never produce labels.
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            Self::PcDisplacement { .. } | Self::PcIndexed { .. } | Self::Label { .. }
        )
    }

    /// Address this operand refers to if the instruction is at `address`.
    pub fn target(&self, address: u64) -> Option<u64> {
        match *self {
            Self::PcDisplacement { disp, .. }
            | Self::PcIndexed { disp, .. }
            | Self::Label { disp, .. } => Some(address.wrapping_add(disp as i64 as u64)),
            _ => None,
        }
    }

    /// Address of the bound label.
    pub fn bound_label(&self) -> Option<u64> {
        match *self {
            Self::PcDisplacement { label, .. }
            | Self::PcIndexed { label, .. }
            | Self::Label { label, .. } => label,
            _ => None,
        }
    }

    /// Binds a label, ignored for operands without an address.
    pub fn bind_label(&mut self, address: Option<u64>) {
        match self {
            Self::PcDisplacement { label, .. }
            | Self::PcIndexed { label, .. }
            | Self::Label { label, .. } => *label = address,
            _ => {}
        }
    }
}
