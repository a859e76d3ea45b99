use alloc::vec::Vec;

use crate::error::Error;

/// Saved cursor state of a [`BitReader`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Snapshot {
    pos: usize,
}

/// MSB-first bit reader over a byte slice with a stack of rollback points.
///
/// The reader is used for speculative parsing: a caller takes a snapshot,
/// tries to match a grammar and either reverts to the snapshot or removes it
/// and keeps the consumed bytes.
#[derive(Clone, Debug)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Position in bits.
    pos: usize,
    offset: u64,
    snapshots: Vec<Snapshot>,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_offset(data, 0)
    }

    /// Creates a reader whose first byte is located at `offset`.
    pub fn with_offset(data: &'a [u8], offset: u64) -> Self {
        Self {
            data,
            pos: 0,
            offset,
            snapshots: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Current position in bits.
    pub fn bit_position(&self) -> usize {
        self.pos
    }

    /// Current byte position, rounded down.
    pub fn position(&self) -> usize {
        self.pos / 8
    }

    /// Absolute address of the current byte.
    pub fn address_position(&self) -> u64 {
        self.offset + self.position() as u64
    }

    pub fn is_finished(&self) -> bool {
        self.pos >= self.data.len() * 8
    }

    pub fn remaining_bits(&self) -> usize {
        (self.data.len() * 8).saturating_sub(self.pos)
    }

    /// Moves the cursor to the byte position `pos`.
    pub fn seek(&mut self, pos: usize) -> Result<(), Error> {
        if pos > self.data.len() {
            return Err(Error::More((pos - self.data.len()) * 8));
        }
        self.pos = pos * 8;
        Ok(())
    }

    /// Reads `count` bits (at most 32) as an unsigned integer.
    pub fn read(&mut self, count: u32) -> Result<u32, Error> {
        debug_assert!(count <= 32);
        let count = count as usize;
        let remaining = self.remaining_bits();
        if count > remaining {
            return Err(Error::More(count - remaining));
        }

        let mut value = 0u32;
        let mut left = count;
        while left > 0 {
            let byte = self.data[self.pos / 8];
            let used = self.pos % 8;
            let take = core::cmp::min(8 - used, left);
            let bits = (byte >> (8 - used - take)) & (0xff >> (8 - take));
            value = (value << take) | bits as u32;
            self.pos += take;
            left -= take;
        }
        Ok(value)
    }

    pub fn read_u8(&mut self) -> Result<u8, Error> {
        self.read(8).map(|i| i as u8)
    }

    pub fn read_u16(&mut self) -> Result<u16, Error> {
        self.read(16).map(|i| i as u16)
    }

    pub fn read_u32(&mut self) -> Result<u32, Error> {
        self.read(32)
    }

    pub fn read_i8(&mut self) -> Result<i8, Error> {
        self.read_u8().map(|i| i as i8)
    }

    pub fn read_i16(&mut self) -> Result<i16, Error> {
        self.read_u16().map(|i| i as i16)
    }

    pub fn read_i32(&mut self) -> Result<i32, Error> {
        self.read_u32().map(|i| i as i32)
    }

    /// Number of active snapshots.
    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }

    /// Pushes the current position onto the snapshot stack.
    pub fn take_snapshot(&mut self) {
        self.snapshots.push(Snapshot { pos: self.pos });
    }

    /// Pops the last snapshot and restores its position.
    pub fn revert_to_snapshot(&mut self) {
        if let Some(snapshot) = self.snapshots.pop() {
            self.pos = snapshot.pos;
        }
    }

    /// Pops the last snapshot and returns the bytes consumed since it was
    /// taken.
    ///
    /// A partially consumed trailing byte is included.
    pub fn remove_snapshot(&mut self) -> &'a [u8] {
        match self.snapshots.pop() {
            Some(snapshot) => {
                let start = snapshot.pos / 8;
                let end = (self.pos + 7) / 8;
                &self.data[start..end]
            }
            None => &[],
        }
    }
}
