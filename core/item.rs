use alloc::vec::Vec;

use crate::{insn::Insn, macros::define_catalog};

define_catalog! {
    /// Serialized identifiers of the pseudo instructions.
    pub enum DataKind {
        Bytes     = 0x1001 => "dc.b",
        ByteRun   = 0x1002 => "dcb.b",
        LongRun   = 0x1003 => "dcb.l",
        Text      = 0x1004 => "dc.b",
        WordRun   = 0x1005 => "dcb.w",
        Longs     = 0x1006 => "dc.l",
        Words     = 0x1007 => "dc.w",
        End       = 0x1008 => "<end>",
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Insn(Insn),
    /// `dc.b` table.
    Bytes,
    /// `dc.w` table.
    Words,
    /// `dc.l` table.
    Longs,
    /// `dcb.b` run of a single byte.
    ByteRun(u8),
    /// `dcb.w` run of a single word.
    WordRun(u16),
    /// `dcb.l` run of a single long word.
    LongRun(u32),
    /// String literal.
    Text,
    /// Zero length marker at the end of the map.
    End,
}

/// Decoded item of a disassembly map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    address: u64,
    bytes: Vec<u8>,
    kind: ItemKind,
}

impl Item {
    pub fn new(address: u64, bytes: Vec<u8>, kind: ItemKind) -> Self {
        Self {
            address,
            bytes,
            kind,
        }
    }

    pub fn insn(address: u64, bytes: Vec<u8>, insn: Insn) -> Self {
        Self::new(address, bytes, ItemKind::Insn(insn))
    }

    pub fn end(address: u64) -> Self {
        Self::new(address, Vec::new(), ItemKind::End)
    }

    pub fn address(&self) -> u64 {
        self.address
    }

    /// Address of the next item.
    pub fn end_address(&self) -> u64 {
        self.address + self.bytes.len() as u64
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut ItemKind {
        &mut self.kind
    }

    pub fn as_insn(&self) -> Option<&Insn> {
        match &self.kind {
            ItemKind::Insn(insn) => Some(insn),
            _ => None,
        }
    }

    pub fn data_kind(&self) -> Option<DataKind> {
        Some(match self.kind {
            ItemKind::Insn(_) => return None,
            ItemKind::Bytes => DataKind::Bytes,
            ItemKind::Words => DataKind::Words,
            ItemKind::Longs => DataKind::Longs,
            ItemKind::ByteRun(_) => DataKind::ByteRun,
            ItemKind::WordRun(_) => DataKind::WordRun,
            ItemKind::LongRun(_) => DataKind::LongRun,
            ItemKind::Text => DataKind::Text,
            ItemKind::End => DataKind::End,
        })
    }

    /// Serialized type identifier.
    pub fn type_id(&self) -> u16 {
        match &self.kind {
            ItemKind::Insn(insn) => insn.mnemonic().id(),
            _ => self.data_kind().map_or(0, DataKind::id),
        }
    }

    /// Repeat count of run items.
    pub fn count(&self) -> usize {
        match self.kind {
            ItemKind::ByteRun(_) => self.bytes.len(),
            ItemKind::WordRun(_) => self.bytes.len() / 2,
            ItemKind::LongRun(_) => self.bytes.len() / 4,
            _ => 0,
        }
    }
}
