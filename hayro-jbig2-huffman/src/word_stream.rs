//! The word source that Huffman decoding pulls bits from.

use alloc::vec::Vec;

/// A big-endian view of encoded data as 32-bit words.
///
/// Implementors must return zero for every byte at or beyond the end of the
/// underlying data, so that a decoder running past the end reads an infinite
/// run of zero bits instead of failing.
pub trait WordStream {
    /// Return the four bytes starting at `byte_offset`, most significant
    /// byte first.
    ///
    /// Decoders only call this with offsets that are multiples of four.
    fn get_word(&self, byte_offset: usize) -> u32;
}

impl WordStream for [u8] {
    #[inline(always)]
    fn get_word(&self, byte_offset: usize) -> u32 {
        match self.get(byte_offset..byte_offset.saturating_add(4)) {
            Some(bytes) => u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            None => {
                // Partial or missing word, pad with zeroes.
                let tail = self.get(byte_offset..).unwrap_or(&[]);
                let mut bytes = [0; 4];
                bytes[..tail.len()].copy_from_slice(tail);

                u32::from_be_bytes(bytes)
            }
        }
    }
}

impl WordStream for Vec<u8> {
    #[inline(always)]
    fn get_word(&self, byte_offset: usize) -> u32 {
        self.as_slice().get_word(byte_offset)
    }
}

impl<const N: usize> WordStream for [u8; N] {
    #[inline(always)]
    fn get_word(&self, byte_offset: usize) -> u32 {
        self.as_slice().get_word(byte_offset)
    }
}

impl<T: WordStream + ?Sized> WordStream for &T {
    #[inline(always)]
    fn get_word(&self, byte_offset: usize) -> u32 {
        (**self).get_word(byte_offset)
    }
}
