//! MC68000 instruction decoder.
//!
//! Every instruction form is a [`Rule`] in the ordered [`rules::CATALOG`].
//! The first rule that matches the bit stream wins.

extern crate alloc;

mod arith;
mod bits;
mod ea;
mod flow;
mod logic;
mod moves;
pub mod rules;

use alloc::boxed::Box;

use disasm68k_core::{
    bits::BitReader,
    error::Error,
    insn::{Insn, Size},
    ArchDecoder,
};

pub use self::rules::{Rule, CATALOG};

/// Extracts `len` bits of `op` starting at bit `lo`.
#[inline(always)]
fn field(op: u32, lo: u32, len: u32) -> u32 {
    (op >> lo) & ((1 << len) - 1)
}

/// Fails unless the bits of `op` selected by `mask` are equal to `bits`.
#[inline(always)]
fn expect(op: u32, mask: u32, bits: u32) -> Result<(), Error> {
    if op & mask == bits {
        Ok(())
    } else {
        Err(Error::Failed)
    }
}

/// Standard size field in bits 7-6.
#[inline(always)]
fn size_field(op: u32) -> Result<Size, Error> {
    Size::from_bits(field(op, 6, 2)).ok_or(Error::Failed)
}

/// Register number in bits 11-9.
#[inline(always)]
fn reg_high(op: u32) -> u8 {
    field(op, 9, 3) as u8
}

/// Register number in bits 2-0.
#[inline(always)]
fn reg_low(op: u32) -> u8 {
    field(op, 0, 3) as u8
}

/// Reads the 16-bit operation word.
#[inline(always)]
fn opcode(reader: &mut BitReader) -> Result<u32, Error> {
    reader.read(16)
}

pub struct Decoder {
    rules: &'static [Rule],
}

impl Decoder {
    pub fn new() -> Self {
        Self::with_rules(CATALOG)
    }

    /// Decoder that only tries `rules`, in order.
    pub fn with_rules(rules: &'static [Rule]) -> Self {
        Self { rules }
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchDecoder for Decoder {
    fn decode(&self, reader: &mut BitReader) -> Result<Insn, Error> {
        let mut result = Err(Error::Failed);
        for rule in self.rules {
            reader.take_snapshot();
            match (rule.decode)(reader) {
                Ok(insn) => {
                    reader.remove_snapshot();
                    return Ok(insn);
                }
                Err(err) => {
                    reader.revert_to_snapshot();
                    if let Error::More(_) = err {
                        result = Err(err);
                    }
                }
            }
        }
        result
    }
}

pub fn decoder() -> Box<dyn ArchDecoder> {
    Box::new(Decoder::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields() {
        assert_eq!(field(0b1110_1011_0000_0000, 12, 4), 0b1110);
        assert_eq!(field(0b1110_1011_0000_0000, 9, 3), 0b101);
        assert_eq!(expect(0x4e75, 0xffff, 0x4e75), Ok(()));
        assert_eq!(expect(0x4e75, 0xfff0, 0x4e40), Err(Error::Failed));
    }

    #[test]
    fn rule_names_are_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            for b in &CATALOG[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn decode_keeps_position_on_failure() {
        let mut reader = BitReader::new(&[0xff, 0xff, 0x4e, 0x75]);
        assert!(Decoder::new().decode(&mut reader).is_err());
        assert_eq!(reader.bit_position(), 0);
        assert_eq!(reader.depth(), 0);
    }

    #[test]
    fn short_input_reports_more() {
        // move.l #imm,d0 without the immediate
        let mut reader = BitReader::new(&[0x20, 0x3c, 0x00]);
        assert!(matches!(
            Decoder::new().decode(&mut reader),
            Err(Error::More(_))
        ));
    }
}
