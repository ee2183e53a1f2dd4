//! Error types for Huffman table construction and decoding.

use core::fmt;

/// The main error type of this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Errors related to building a Huffman table from its lines.
    Table(TableError),
    /// Errors related to decoding values with a Huffman table.
    Huffman(HuffmanError),
    /// The lookup array of a table could not be allocated.
    OutOfMemory,
}

/// Errors related to building a Huffman table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// No line has a non-zero prefix length.
    Empty,
    /// A prefix length exceeds 32 bits.
    InvalidPrefixLength,
    /// A range length exceeds 32 bits.
    InvalidRangeLength,
    /// The out-of-band line is not the last line, or appears more than once.
    MisplacedOutOfBand,
    /// The lower range line is not directly before the upper range line,
    /// or appears more than once.
    MisplacedLowerRange,
    /// The prefix lengths describe more codes than fit into their lengths.
    Oversubscribed,
    /// The prefix lengths leave some bit patterns without a code.
    Incomplete,
}

/// Errors related to Huffman decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuffmanError {
    /// Unexpected out-of-band value.
    UnexpectedOob,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table(e) => write!(f, "{e}"),
            Self::Huffman(e) => write!(f, "{e}"),
            Self::OutOfMemory => write!(f, "failed to allocate Huffman table"),
        }
    }
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Huffman table has no codes"),
            Self::InvalidPrefixLength => write!(f, "prefix length exceeds 32 bits"),
            Self::InvalidRangeLength => write!(f, "range length exceeds 32 bits"),
            Self::MisplacedOutOfBand => write!(f, "out-of-band line must be the last line"),
            Self::MisplacedLowerRange => {
                write!(f, "lower range line must precede the upper range line")
            }
            Self::Oversubscribed => write!(f, "Huffman code lengths are oversubscribed"),
            Self::Incomplete => write!(f, "Huffman code lengths are incomplete"),
        }
    }
}

impl fmt::Display for HuffmanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedOob => write!(f, "unexpected out-of-band value"),
        }
    }
}

impl core::error::Error for DecodeError {}
impl core::error::Error for TableError {}
impl core::error::Error for HuffmanError {}

impl From<TableError> for DecodeError {
    fn from(e: TableError) -> Self {
        Self::Table(e)
    }
}

impl From<HuffmanError> for DecodeError {
    fn from(e: HuffmanError) -> Self {
        Self::Huffman(e)
    }
}

/// Result type for Huffman table operations.
pub type Result<T> = core::result::Result<T, DecodeError>;

macro_rules! bail {
    ($err:expr) => {
        return Err($err.into())
    };
}

macro_rules! err {
    ($err:expr) => {
        Err($err.into())
    };
}

pub(crate) use bail;
pub(crate) use err;
