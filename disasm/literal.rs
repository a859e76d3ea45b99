//! Conversion of raw bytes to pseudo instruction items.

use alloc::vec::Vec;

use byteorder::{ByteOrder, BE};
use disasm68k_core::{
    error::MapError,
    item::{Item, ItemKind},
};

/// Representation of a reclassified byte range.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Literal {
    /// `dc.b` tables of at most `n` bytes.
    Bytes(usize),
    /// `dc.w` tables of at most `n` words.
    Words(usize),
    /// `dc.l` tables of at most `n` long words.
    Longs(usize),
    /// `dcb.b` runs.
    ByteRun,
    /// `dcb.w` runs.
    WordRun,
    /// `dcb.l` runs.
    LongRun,
    /// A single string literal.
    Text,
}

impl Literal {
    /// Size of a single unit in bytes.
    pub fn unit(&self) -> usize {
        match self {
            Self::Bytes(_) | Self::ByteRun | Self::Text => 1,
            Self::Words(_) | Self::WordRun => 2,
            Self::Longs(_) | Self::LongRun => 4,
        }
    }
}

fn check_alignment(len: usize, unit: usize) -> Result<(), MapError> {
    if len % unit != 0 {
        return Err(MapError::Unaligned { len, unit });
    }
    Ok(())
}

fn tables(start: u64, data: &[u8], unit: usize, chunk: usize) -> Result<Vec<Item>, MapError> {
    if chunk == 0 {
        return Err(MapError::ZeroChunk);
    }
    check_alignment(data.len(), unit)?;
    let kind = match unit {
        1 => ItemKind::Bytes,
        2 => ItemKind::Words,
        _ => ItemKind::Longs,
    };
    // a single table never outgrows the range
    let group = unit.saturating_mul(chunk).min(data.len().max(unit));
    Ok(data
        .chunks(group)
        .enumerate()
        .map(|(i, bytes)| Item::new(start + (i * group) as u64, bytes.to_vec(), kind.clone()))
        .collect())
}

fn run_kind(unit: &[u8]) -> ItemKind {
    match unit.len() {
        1 => ItemKind::ByteRun(unit[0]),
        2 => ItemKind::WordRun(BE::read_u16(unit)),
        _ => ItemKind::LongRun(BE::read_u32(unit)),
    }
}

fn runs(start: u64, data: &[u8], unit: usize) -> Result<Vec<Item>, MapError> {
    if data.len() < unit {
        return Ok(Vec::new());
    }
    check_alignment(data.len(), unit)?;

    let mut items = Vec::new();
    let mut first = 0;
    let mut pos = unit;
    loop {
        let done = pos >= data.len();
        if done || data[pos..pos + unit] != data[first..first + unit] {
            let bytes = &data[first..pos];
            let kind = run_kind(&data[first..first + unit]);
            items.push(Item::new(start + first as u64, bytes.to_vec(), kind));
            first = pos;
        }
        if done {
            break;
        }
        pos += unit;
    }
    Ok(items)
}

/// Splits `data` located at `start` into items.
///
/// Returns no items if the range is too short to hold a single run.
pub(crate) fn items(start: u64, data: &[u8], literal: Literal) -> Result<Vec<Item>, MapError> {
    let unit = literal.unit();
    match literal {
        Literal::Bytes(chunk) | Literal::Words(chunk) | Literal::Longs(chunk) => {
            tables(start, data, unit, chunk)
        }
        Literal::ByteRun | Literal::WordRun | Literal::LongRun => runs(start, data, unit),
        Literal::Text if data.is_empty() => Ok(Vec::new()),
        Literal::Text => Ok(alloc::vec![Item::new(start, data.to_vec(), ItemKind::Text)]),
    }
}
