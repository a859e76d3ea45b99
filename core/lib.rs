extern crate alloc;

pub mod bits;
pub mod error;
pub mod insn;
pub mod item;
pub mod label;
pub mod macros;
pub mod map;
pub mod mnemonic;
pub mod operand;
pub mod project;

#[cfg(feature = "print")]
pub mod printer;

use crate::{bits::BitReader, error::Error, insn::Insn};

/// Decodes a single instruction at the reader position.
///
/// On error the reader position is unspecified, callers are expected to
/// revert to a snapshot.
pub trait ArchDecoder {
    fn decode(&self, reader: &mut BitReader) -> Result<Insn, Error>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Address of the first byte of a decoded binary.
    pub base_address: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            base_address: 0x10000,
        }
    }
}
