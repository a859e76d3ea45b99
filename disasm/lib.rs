//! Re-editable disassembler for the Motorola 68000.
//!
//! A binary is decoded once into a [`DisassemblyMap`], afterwards ranges of
//! the map can be decoded again as code or reclassified as literal data.
//!
//! ```
//! use disasm68k::{Decoder, Options};
//!
//! let decoder = Decoder::new(Options::default());
//! let map = decoder.decode(&[0x20, 0x08, 0x4e, 0x75]).unwrap();
//! assert_eq!(map.item_count(), 3);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod literal;

#[cfg(feature = "print")]
mod printer;

use alloc::{boxed::Box, string::String, vec};

use disasm68k_core::{bits::BitReader, ArchDecoder};
use log::{debug, trace};

pub use disasm68k_core::{
    error::{Corruption, Error, MapError, ProjectError},
    insn::{Cpu, Insn, Size},
    item::{DataKind, Item, ItemKind},
    label::{AddressLabel, Labels},
    map::DisassemblyMap,
    mnemonic::Mnemonic,
    operand::{EaMask, IndexReg, Operand, RegKind, RegisterList},
    Options,
};

pub use crate::literal::Literal;

#[cfg(feature = "print")]
pub use crate::printer::{
    Casing, FormatterFn, ItemText, Listing, Printer, PrinterExt, RenderingSettings, Style, WriteExt,
};

pub struct Decoder {
    opts: Options,
    decoder: Box<dyn ArchDecoder>,
}

impl Decoder {
    pub fn new(opts: Options) -> Self {
        Self {
            opts,
            decoder: disasm68k_isa::decoder(),
        }
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    pub fn base_address(&self) -> u64 {
        self.opts.base_address
    }

    /// Decodes `data` loaded at the base address.
    pub fn decode(&self, data: &[u8]) -> Result<DisassemblyMap, MapError> {
        let start = self.opts.base_address;
        let end = start + data.len() as u64;
        let mut map = DisassemblyMap::new(start, end);
        let mut reader = BitReader::with_offset(data, start);
        self.decode_stream(&mut map, &mut reader)?;
        map.put(Item::end(end))?;
        map.link_labels();
        Ok(map)
    }

    /// Decodes the items in `start..end` again as instructions.
    pub fn decode_range(
        &self,
        map: &mut DisassemblyMap,
        start: u64,
        end: u64,
    ) -> Result<(), MapError> {
        self.check_range(map, start, end)?;
        if start & 1 != 0 {
            return Err(MapError::OddAddress(start));
        }
        let data = map.extract_data(start, end)?;
        map.cleanup_labels(start, end);
        map.remove_range(start, end)?;
        let mut reader = BitReader::with_offset(&data, start);
        self.decode_stream(map, &mut reader)?;
        map.link_labels();
        Ok(())
    }

    /// Replaces the items in `start..end` with literal data.
    pub fn set_literal_range(
        &self,
        map: &mut DisassemblyMap,
        start: u64,
        end: u64,
        literal: Literal,
    ) -> Result<(), MapError> {
        self.check_range(map, start, end)?;
        let data = map.extract_data(start, end)?;
        let items = literal::items(start, &data, literal)?;
        if items.is_empty() {
            debug!("{start:#x}..{end:#x}: range is too short for {literal:?}");
            return Ok(());
        }
        debug!(
            "{start:#x}..{end:#x}: {} items of {literal:?}",
            items.len()
        );
        map.cleanup_labels(start, end);
        map.remove_range(start, end)?;
        for item in items {
            map.put(item)?;
        }
        map.link_labels();
        Ok(())
    }

    pub fn rename_label<S: Into<String>>(
        &self,
        map: &mut DisassemblyMap,
        address: u64,
        name: S,
    ) -> Result<(), MapError> {
        map.rename_label(address, name)
    }

    fn check_range(&self, map: &DisassemblyMap, start: u64, end: u64) -> Result<(), MapError> {
        if map.start() != self.opts.base_address {
            return Err(MapError::BaseMismatch {
                map: map.start(),
                decoder: self.opts.base_address,
            });
        }
        if start > end {
            return Err(MapError::ReversedRange { start, end });
        }
        if start < map.start() {
            return Err(MapError::OutOfBounds(start));
        }
        if end > map.end() {
            return Err(MapError::OutOfBounds(end));
        }
        Ok(())
    }

    /// Registers the targets of reference operands as labels.
    fn bind_labels(map: &mut DisassemblyMap, address: u64, insn: &mut Insn) {
        for operand in insn.operands_mut() {
            if let Some(target) = operand.target(address) {
                let label = map.put_label(target, address);
                operand.bind_label(Some(label));
            }
        }
    }

    fn decode_stream(
        &self,
        map: &mut DisassemblyMap,
        reader: &mut BitReader,
    ) -> Result<(), MapError> {
        let start = reader.address_position();
        let mut insns = 0;
        let mut literals = 0;
        while !reader.is_finished() {
            let address = reader.address_position();
            reader.take_snapshot();
            match self.decoder.decode(reader) {
                Ok(mut insn) => {
                    let bytes = reader.remove_snapshot().to_vec();
                    Self::bind_labels(map, address, &mut insn);
                    map.put(Item::insn(address, bytes, insn))?;
                    insns += 1;
                }
                Err(err) => {
                    reader.revert_to_snapshot();
                    trace!("{address:#x}: {err}, emitting literal bytes");
                    // two single bytes keep the next attempt word aligned
                    for _ in 0..2 {
                        let address = reader.address_position();
                        match reader.read_u8() {
                            Ok(byte) => map.put(Item::new(address, vec![byte], ItemKind::Bytes))?,
                            Err(_) => break,
                        }
                        literals += 1;
                    }
                }
            }
        }
        debug!(
            "{start:#x}..{:#x}: decoded {insns} instructions, {literals} literal bytes",
            reader.address_position()
        );
        Ok(())
    }
}
