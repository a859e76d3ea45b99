use core::fmt;
use std::io;

/// Local failure of a single decode attempt.
///
/// Never escapes the decode engine, the attempt is reverted instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Need more bits to decode an instruction.
    More(usize),
    /// Bit pattern does not match.
    Failed,
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::More(_) => fmt.write_str("Need more data"),
            Self::Failed => fmt.write_str("Failed to decode"),
        }
    }
}

impl std::error::Error for Error {}

/// Invalid use of the disassembly map or of a range operation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MapError {
    #[error("start address {start:#010x} is greater than end address {end:#010x}")]
    ReversedRange { start: u64, end: u64 },
    #[error("address {0:#010x} is not the start of a decoded item")]
    NotItemBoundary(u64),
    #[error("address {0:#010x} is outside of the map")]
    OutOfBounds(u64),
    #[error("cannot decode at odd address {0:#010x}")]
    OddAddress(u64),
    #[error("map does not have the same base as the decoder, map = {map:#010x}, decoder = {decoder:#010x}")]
    BaseMismatch { map: u64, decoder: u64 },
    #[error("chunk size must not be zero")]
    ZeroChunk,
    #[error("range length {len} is not divisible by {unit}")]
    Unaligned { len: usize, unit: usize },
    #[error("address {0:#010x} is already occupied")]
    Occupied(u64),
    #[error("no label at address {0:#010x}")]
    NoLabel(u64),
}

/// Inconsistency found while loading a project file.
#[derive(Debug, thiserror::Error)]
pub enum Corruption {
    #[error("invalid magic {0:#010x}")]
    Magic(u32),
    #[error("unsupported version {0}")]
    Version(u32),
    #[error("unknown item type {0:#06x}")]
    ItemType(u16),
    #[error("unknown operand type {0:#06x}")]
    OperandType(u16),
    #[error("invalid {what} value {value}")]
    Value { what: &'static str, value: i64 },
    #[error("negative length {0}")]
    Length(i32),
    #[error("label {0:#010x} is referenced but not defined")]
    MissingLabel(u64),
    #[error("label name is not valid utf-8")]
    Name(#[from] std::string::FromUtf8Error),
    #[error("items do not cover {start:#010x}..{end:#010x}")]
    Partition { start: u64, end: u64 },
    #[error(transparent)]
    Map(#[from] MapError),
    #[error("truncated record")]
    Truncated(#[source] io::Error),
}

impl From<io::Error> for Corruption {
    fn from(err: io::Error) -> Self {
        Self::Truncated(err)
    }
}

/// Failure to save or load a project file.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("cannot write project file")]
    Io(#[from] io::Error),
    #[error("cannot load project file, it may be corrupted")]
    Corrupted(#[from] Corruption),
}
