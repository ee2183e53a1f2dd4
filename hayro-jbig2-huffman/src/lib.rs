/*!
Table-driven Huffman decoding of integers for JBIG2.

`hayro-jbig2-huffman` implements the Huffman coding of ITU-T T.88 Annex B
(also known as ISO/IEC 14492). Tables are described by their lines (prefix
length, range length, and the low end of the range they encode) and compiled
into flat lookup tables, so that decoding a value costs a single table
lookup plus reading its range bits.

The crate consists of three parts:
- [`HuffmanTable`], built from a list of [`TableLine`]s using the canonical
  code assignment of B.3.
- [`HuffmanDecoder`], a cursor decoding values with any number of tables from
  a [`WordStream`].
- The standard tables B.1 to B.15 ([`StandardTable`], requires the `std`
  feature).

# Example
```rust
use hayro_jbig2_huffman::{HuffmanDecoder, HuffmanResult, StandardTable};

let data = [0xe9, 0xcb, 0xf4, 0x00];
let mut decoder = HuffmanDecoder::new(&data);

assert_eq!(decoder.decode(StandardTable::D.table()), HuffmanResult::Value(8));
assert_eq!(decoder.decode(StandardTable::B.table()), HuffmanResult::Value(5));
assert_eq!(decoder.decode(StandardTable::B.table()), HuffmanResult::OutOfBand);
assert_eq!(decoder.decode(StandardTable::A.table()), HuffmanResult::Value(8));
```

# Safety
This crate forbids unsafe code via a crate-level attribute.
*/

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod decoder;
mod error;
#[cfg(feature = "std")]
mod standard;
mod table;
mod word_stream;

pub use decoder::{HuffmanDecoder, HuffmanResult};
pub use error::{DecodeError, HuffmanError, Result, TableError};
#[cfg(feature = "std")]
pub use standard::{
    StandardTable, TABLE_A, TABLE_B, TABLE_C, TABLE_D, TABLE_E, TABLE_F, TABLE_G, TABLE_H,
    TABLE_I, TABLE_J, TABLE_K, TABLE_L, TABLE_M, TABLE_N, TABLE_O,
};
pub use table::{Entry, HuffmanTable, LOG_TABLE_SIZE_MAX, LineKind, TableLine, Terminal};
pub use word_stream::WordStream;
