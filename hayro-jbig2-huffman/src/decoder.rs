//! Decoding integers with a Huffman table (B.4 "Using a Huffman table").
//!
//! The decoder keeps a window of 32 bits whose most significant bit is the
//! next unread bit of the stream, backed by the following word. Looking up
//! a code is a single index into the table with the top bits of the window.

use crate::error::{HuffmanError, Result, err};
use crate::table::{Entry, HuffmanTable};
use crate::word_stream::WordStream;

/// What a single code decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuffmanResult {
    /// An integer.
    Value(i32),
    /// The out-of-band line of a table that has one.
    OutOfBand,
}

impl HuffmanResult {
    /// The decoded value, or `None` for the out-of-band marker.
    pub fn value(self) -> Option<i32> {
        match self {
            Self::Value(v) => Some(v),
            Self::OutOfBand => None,
        }
    }

    /// Whether this is the out-of-band marker.
    pub fn is_oob(self) -> bool {
        self == Self::OutOfBand
    }
}

/// A cursor decoding Huffman codes from a word stream.
///
/// The decoder can be used with different tables for consecutive values, as
/// JBIG2 interleaves codes of several tables in one stream.
pub struct HuffmanDecoder<'a, W: WordStream + ?Sized> {
    words: &'a W,
    /// The next 32 unread bits, MSB first.
    current: u32,
    /// The word at `byte_offset + 4`.
    lookahead: u32,
    /// The offset of the word `current` was taken from. Always a multiple of 4.
    byte_offset: usize,
    /// The number of bits of that word already consumed (0-31).
    bit_offset: u32,
}

impl<'a, W: WordStream + ?Sized> HuffmanDecoder<'a, W> {
    /// Create a new decoder positioned at the start of the stream.
    pub fn new(words: &'a W) -> Self {
        Self {
            words,
            current: words.get_word(0),
            lookahead: words.get_word(4),
            byte_offset: 0,
            bit_offset: 0,
        }
    }

    /// Decode the next code with `table`.
    ///
    /// The top bits of the window index the table. Extension entries
    /// consume their bits and repeat the lookup in their sub-table until a
    /// terminal entry is reached. If that entry still has range bits, they
    /// are read and added to its base value (subtracted for the lower range
    /// line). The range bits are consumed before the out-of-band flag is
    /// checked, so an OOB line with range bits still advances past them.
    #[inline]
    pub fn decode(&mut self, table: &HuffmanTable) -> HuffmanResult {
        let mut table = table;

        let terminal = loop {
            let entry = table.lookup(self.current);
            self.consume(entry.prefix_len());

            match entry {
                Entry::Terminal(terminal) => break terminal,
                Entry::Extension { table: next, .. } => table = next,
            }
        };

        let value = if terminal.range_len() > 0 {
            let htoffset = self.read_bits(terminal.range_len());
            terminal.resolve(htoffset)
        } else {
            terminal.value()
        };

        if terminal.is_oob() {
            HuffmanResult::OutOfBand
        } else {
            HuffmanResult::Value(value)
        }
    }

    /// Decode a value that may not be out-of-band.
    pub fn decode_value(&mut self, table: &HuffmanTable) -> Result<i32> {
        match self.decode(table) {
            HuffmanResult::Value(v) => Ok(v),
            HuffmanResult::OutOfBand => err!(HuffmanError::UnexpectedOob),
        }
    }

    /// Read `count` raw bits, MSB first. `count` must not exceed 32.
    #[inline(always)]
    pub fn read_bits(&mut self, count: u8) -> u32 {
        debug_assert!(count <= 32);

        let bits = shr(self.current, 32 - count as u32);
        self.consume(count);

        bits
    }

    /// Skip the remaining bits of a partially read byte.
    pub fn skip_to_byte_boundary(&mut self) {
        let bit_pos = self.bit_offset & 7;

        if bit_pos != 0 {
            self.consume((8 - bit_pos) as u8);
        }
    }

    /// Skip the given number of bytes.
    pub fn advance(&mut self, bytes: usize) {
        let target = self
            .bit_position()
            .saturating_add(bytes.saturating_mul(8));
        self.seek(target);
    }

    /// The number of whole bytes consumed so far.
    pub fn byte_offset(&self) -> usize {
        self.bit_position() >> 3
    }

    /// The number of bits consumed so far.
    pub fn bit_position(&self) -> usize {
        self.byte_offset * 8 + self.bit_offset as usize
    }

    /// Move to the given absolute bit position and refill the window.
    fn seek(&mut self, bit_position: usize) {
        self.byte_offset = (bit_position / 32) * 4;
        self.bit_offset = (bit_position % 32) as u32;

        let word = self.words.get_word(self.byte_offset);
        self.lookahead = self.words.get_word(self.byte_offset.saturating_add(4));
        self.current = (word << self.bit_offset) | shr(self.lookahead, 32 - self.bit_offset);
    }

    /// Consume `count` bits (at most 32), refilling the window from the next
    /// word when crossing a word boundary.
    #[inline(always)]
    fn consume(&mut self, count: u8) {
        debug_assert!(count <= 32);

        let mut shift = count as u32;
        self.bit_offset += count as u32;

        if self.bit_offset >= 32 {
            self.current = self.lookahead;
            self.byte_offset += 4;
            self.lookahead = self.words.get_word(self.byte_offset + 4);
            self.bit_offset -= 32;
            shift = self.bit_offset;
        }

        self.current = (self.current << shift) | shr(self.lookahead, 32 - self.bit_offset);
    }
}

/// A right shift that yields zero when shifting out all 32 bits.
#[inline(always)]
fn shr(word: u32, count: u32) -> u32 {
    word.checked_shr(count).unwrap_or(0)
}
