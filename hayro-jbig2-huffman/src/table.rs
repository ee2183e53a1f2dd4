//! Building Huffman lookup tables (B.3 "Assigning the prefix codes").
//!
//! A table is a flat array indexed by the next `log_table_size` bits of the
//! bitstream. Every index whose top bits match a code holds that code's
//! entry, so a single lookup resolves a code. Lines whose prefix and range
//! bits together fit into the table are resolved completely at build time.
//! Codes longer than the table is wide continue in an extension table.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use log::{debug, warn};

use crate::error::{DecodeError, Result, TableError, bail};

/// The largest number of bits used to index a single lookup table.
pub const LOG_TABLE_SIZE_MAX: u8 = 8;

/// The role a table line plays when decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// A line covering `range_low...range_low + 2^range_len - 1`.
    Normal,
    /// The lower range line (-∞...range_low), decoded by subtraction.
    Lower,
    /// The upper range line (range_low...+∞).
    Upper,
    /// The out-of-band marker.
    OutOfBand,
}

/// A line of a Huffman table, as listed in Annex B.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLine {
    /// The value the range offset is applied to. Lower range lines count
    /// down from it, all other lines count up.
    pub range_low: i32,
    /// Prefix code length (PREFLEN). Lines with a zero prefix length get no
    /// code.
    pub prefix_len: u8,
    /// Number of range bits following the prefix (RANGELEN).
    pub range_len: u8,
    /// The role of the line.
    pub kind: LineKind,
}

impl TableLine {
    /// A line covering `2^range_len` values starting at `range_low`.
    pub const fn new(range_low: i32, prefix_len: u8, range_len: u8) -> Self {
        Self::with_kind(range_low, prefix_len, range_len, LineKind::Normal)
    }

    /// The line for all values at or below `top`.
    pub const fn lower(top: i32, prefix_len: u8, range_len: u8) -> Self {
        Self::with_kind(top, prefix_len, range_len, LineKind::Lower)
    }

    /// The line for all values at or above `range_low`.
    pub const fn upper(range_low: i32, prefix_len: u8, range_len: u8) -> Self {
        Self::with_kind(range_low, prefix_len, range_len, LineKind::Upper)
    }

    /// The out-of-band line. It carries no value and no range bits.
    pub const fn oob(prefix_len: u8) -> Self {
        Self::with_kind(0, prefix_len, 0, LineKind::OutOfBand)
    }

    const fn with_kind(range_low: i32, prefix_len: u8, range_len: u8, kind: LineKind) -> Self {
        Self {
            range_low,
            prefix_len,
            range_len,
            kind,
        }
    }
}

/// A table entry that finishes a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terminal {
    prefix_len: u8,
    range_len: u8,
    value: i32,
    lower: bool,
    oob: bool,
}

impl Terminal {
    /// The number of bits consumed by the lookup itself.
    ///
    /// For resolved entries this includes the range bits.
    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// The number of range bits still to be read after the lookup, or zero
    /// if the value is already resolved.
    pub fn range_len(&self) -> u8 {
        self.range_len
    }

    /// The decoded value if `range_len` is zero, otherwise the base value
    /// the range offset is applied to.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Whether the range offset is subtracted from the base value.
    pub fn is_lower(&self) -> bool {
        self.lower
    }

    /// Whether this entry decodes to the out-of-band marker.
    pub fn is_oob(&self) -> bool {
        self.oob
    }

    /// Apply a range offset read from the bitstream.
    #[inline(always)]
    pub(crate) fn resolve(&self, htoffset: u32) -> i32 {
        apply_offset(self.value, htoffset, self.lower)
    }
}

/// An entry of a Huffman lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// The code ends here.
    Terminal(Terminal),
    /// The code is longer than the table is wide. After consuming
    /// `prefix_len` bits, decoding continues in `table`.
    Extension {
        /// The number of bits consumed before switching tables.
        prefix_len: u8,
        /// The table that resolves the rest of the code.
        table: Box<HuffmanTable>,
    },
}

impl Entry {
    /// The number of bits consumed by looking up this entry.
    pub fn prefix_len(&self) -> u8 {
        match self {
            Self::Terminal(t) => t.prefix_len,
            Self::Extension { prefix_len, .. } => *prefix_len,
        }
    }
}

/// A Huffman lookup table for JBIG2 decoding.
///
/// The table is immutable once built and can be shared between any number
/// of decoders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTable {
    log_table_size: u8,
    entries: Vec<Entry>,
}

/// A prefix code assigned to a table line.
#[derive(Debug, Clone, Copy)]
struct Code {
    code: u32,
    len: u8,
    line: TableLine,
}

impl HuffmanTable {
    /// Build a Huffman table from lines with explicit roles.
    ///
    /// The out-of-band line, if any, must be the last line, and the lower
    /// range line, if any, must directly precede the upper range line
    /// (i.e. the layout of B.2 is `[ranges.., lower, upper, oob]`).
    pub fn build(lines: &[TableLine]) -> Result<Self> {
        Self::build_inner(lines)
            .inspect_err(|e| warn!("failed to build Huffman table: {e}"))
    }

    /// Build a Huffman table from lines laid out as in B.2, deriving their
    /// roles from their position.
    ///
    /// The kinds stored in `lines` are ignored. If `has_oob` is set, the last
    /// line is the out-of-band line. The line before the upper range line
    /// (the second to last non-OOB line) is the lower range line.
    pub fn build_positional(lines: &[TableLine], has_oob: bool) -> Result<Self> {
        let lower = lower_position(lines.len(), has_oob);

        let lines: Vec<TableLine> = lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let kind = if has_oob && i + 1 == lines.len() {
                    LineKind::OutOfBand
                } else if Some(i) == lower {
                    LineKind::Lower
                } else {
                    LineKind::Normal
                };

                TableLine { kind, ..*line }
            })
            .collect();

        Self::build(&lines)
    }

    fn build_inner(lines: &[TableLine]) -> Result<Self> {
        validate(lines)?;
        let codes = assign_codes(lines)?;

        if codes.is_empty() {
            bail!(TableError::Empty);
        }

        Self::from_codes(&codes)
    }

    /// Lay out the given codes in a lookup table, creating extension tables
    /// for codes that don't fit.
    fn from_codes(codes: &[Code]) -> Result<Self> {
        let mut log_table_size = codes
            .iter()
            .map(|c| {
                let combined = c.len as u32 + c.line.range_len as u32;

                // Large ranges are read separately, only the prefix needs
                // to fit into the table.
                if combined > LOG_TABLE_SIZE_MAX as u32 {
                    c.len
                } else {
                    combined as u8
                }
            })
            .filter(|&size| size <= LOG_TABLE_SIZE_MAX)
            .max()
            .unwrap_or(0);

        if codes.iter().any(|c| c.len > log_table_size) {
            log_table_size = LOG_TABLE_SIZE_MAX;
        }

        let size = 1_usize << log_table_size;
        let mut slots: Vec<Option<Entry>> = Vec::new();
        slots
            .try_reserve_exact(size)
            .map_err(|_| DecodeError::OutOfMemory)?;
        slots.resize_with(size, || None);

        let mut extensions: BTreeMap<usize, Vec<Code>> = BTreeMap::new();

        for code in codes {
            if code.len > log_table_size {
                let excess = code.len - log_table_size;
                let index = (code.code >> excess) as usize;

                extensions.entry(index).or_default().push(Code {
                    code: code.code & low_mask(excess),
                    len: excess,
                    line: code.line,
                });

                continue;
            }

            let line = &code.line;
            let lower = line.kind == LineKind::Lower;
            let oob = line.kind == LineKind::OutOfBand;
            let shift = log_table_size - code.len;
            let start = (code.code as usize) << shift;
            let end = (code.code as usize + 1) << shift;
            let combined = code.len as u32 + line.range_len as u32;

            for (j, slot) in slots[start..end].iter_mut().enumerate() {
                let index = start + j;

                let terminal = if combined <= LOG_TABLE_SIZE_MAX as u32 {
                    // The range bits directly follow the prefix in the index.
                    let htoffset = (index >> (shift - line.range_len)) as u32
                        & low_mask(line.range_len);

                    Terminal {
                        prefix_len: code.len + line.range_len,
                        range_len: 0,
                        value: apply_offset(line.range_low, htoffset, lower),
                        lower,
                        oob,
                    }
                } else {
                    Terminal {
                        prefix_len: code.len,
                        range_len: line.range_len,
                        value: line.range_low,
                        lower,
                        oob,
                    }
                };

                *slot = Some(Entry::Terminal(terminal));
            }
        }

        for (index, group) in extensions {
            debug!(
                "building extension table at index {index:#x} for {} codes",
                group.len()
            );

            let table = Self::from_codes(&group)?;
            slots[index] = Some(Entry::Extension {
                prefix_len: log_table_size,
                table: Box::new(table),
            });
        }

        let Some(entries) = slots.into_iter().collect::<Option<Vec<_>>>() else {
            bail!(TableError::Incomplete);
        };

        Ok(Self {
            log_table_size,
            entries,
        })
    }

    /// The number of bits used to index the table.
    pub fn log_table_size(&self) -> u8 {
        self.log_table_size
    }

    /// All entries of the table, `2^log_table_size` of them.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Look up the entry for a bit window whose most significant bit is the
    /// next unread bit.
    #[inline(always)]
    pub fn lookup(&self, window: u32) -> &Entry {
        let index = (window as u64) >> (32 - self.log_table_size as u32);
        &self.entries[index as usize]
    }
}

/// The position of the lower range line in a B.2 layout of `len` lines.
fn lower_position(len: usize, has_oob: bool) -> Option<usize> {
    len.checked_sub(if has_oob { 3 } else { 2 })
}

fn validate(lines: &[TableLine]) -> Result<()> {
    for line in lines {
        if line.prefix_len > 32 {
            bail!(TableError::InvalidPrefixLength);
        }

        if line.range_len > 32 {
            bail!(TableError::InvalidRangeLength);
        }
    }

    let is_oob = |l: &&TableLine| l.kind == LineKind::OutOfBand;
    let has_oob = match lines.iter().filter(is_oob).count() {
        0 => false,
        1 if lines.last().is_some_and(|l| is_oob(&l)) => true,
        _ => bail!(TableError::MisplacedOutOfBand),
    };

    let mut lower = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| l.kind == LineKind::Lower)
        .map(|(i, _)| i);

    match (lower.next(), lower.next()) {
        (None, _) => {}
        (Some(pos), None) if Some(pos) == lower_position(lines.len(), has_oob) => {}
        _ => bail!(TableError::MisplacedLowerRange),
    }

    Ok(())
}

/// Assign canonical prefix codes to all used lines (B.3).
///
/// Codes are returned in order of increasing length, and in line order
/// among codes of the same length.
fn assign_codes(lines: &[TableLine]) -> Result<Vec<Code>> {
    // Step 1: "Build a histogram in the array LENCOUNT counting the number of times
    // each prefix length value occurs in PREFLEN: LENCOUNT[I] is the number of times
    // that the value I occurs in the array PREFLEN."
    let lenmax = lines.iter().map(|l| l.prefix_len).max().unwrap_or(0) as usize;
    let mut lencount = alloc::vec![0_u64; lenmax + 1];
    for line in lines {
        lencount[line.prefix_len as usize] += 1;
    }

    // Step 2: "Let LENMAX be the largest value for which LENCOUNT[LENMAX] > 0. Set:
    // CURLEN = 1, FIRSTCODE[0] = 0, LENCOUNT[0] = 0"
    // "Note that the PREFLEN value 0 indicates that the table line is never used."
    lencount[0] = 0;
    let mut firstcode = 0_u64;
    let mut codes = Vec::with_capacity(lines.len());

    // Step 3: "While CURLEN ≤ LENMAX, perform the following operations:"
    for curlen in 1..=lenmax {
        // a) "Set: FIRSTCODE[CURLEN] = (FIRSTCODE[CURLEN − 1] + LENCOUNT[CURLEN − 1]) × 2"
        firstcode = (firstcode + lencount[curlen - 1]) << 1;
        let mut curcode = firstcode;

        // b) "If PREFLEN[CURTEMP] = CURLEN, then set:
        //        CODES[CURTEMP] = CURCODE
        //        CURCODE = CURCODE + 1"
        for line in lines.iter().filter(|l| l.prefix_len as usize == curlen) {
            if curcode >> curlen != 0 {
                bail!(TableError::Oversubscribed);
            }

            codes.push(Code {
                code: curcode as u32,
                len: curlen as u8,
                line: *line,
            });
            curcode += 1;
        }
    }

    Ok(codes)
}

#[inline(always)]
fn apply_offset(base: i32, htoffset: u32, lower: bool) -> i32 {
    if lower {
        base.wrapping_sub_unsigned(htoffset)
    } else {
        base.wrapping_add_unsigned(htoffset)
    }
}

#[inline(always)]
fn low_mask(bits: u8) -> u32 {
    ((1_u64 << bits) - 1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terminal(entry: &Entry) -> &Terminal {
        match entry {
            Entry::Terminal(t) => t,
            Entry::Extension { .. } => panic!("expected a terminal entry"),
        }
    }

    fn table_a_lines() -> [TableLine; 4] {
        [
            TableLine::new(0, 1, 4),
            TableLine::new(16, 2, 8),
            TableLine::new(272, 3, 16),
            TableLine::upper(65808, 3, 32),
        ]
    }

    #[test]
    fn canonical_codes_follow_line_order() {
        let lines = [
            TableLine::new(10, 3, 0),
            TableLine::new(20, 2, 0),
            TableLine::new(30, 3, 0),
            TableLine::new(40, 1, 0),
        ];
        let codes = assign_codes(&lines).unwrap();
        let assigned: Vec<_> = codes
            .iter()
            .map(|c| (c.line.range_low, c.code, c.len))
            .collect();

        assert_eq!(
            assigned,
            [(40, 0b0, 1), (20, 0b10, 2), (10, 0b110, 3), (30, 0b111, 3)]
        );
    }

    #[test]
    fn zero_prefix_lines_get_no_code() {
        let lines = [
            TableLine::new(0, 1, 0),
            TableLine::lower(-1, 0, 32),
            TableLine::upper(1, 1, 32),
        ];
        let codes = assign_codes(&lines).unwrap();

        assert_eq!(codes.len(), 2);
        assert!(codes.iter().all(|c| c.line.kind != LineKind::Lower));
    }

    #[test]
    fn assigned_codes_are_prefix_free() {
        let lines = [
            TableLine::new(-256, 8, 8),
            TableLine::new(0, 1, 0),
            TableLine::new(1, 2, 0),
            TableLine::new(2, 3, 0),
            TableLine::new(3, 4, 3),
            TableLine::new(11, 5, 6),
            TableLine::lower(-257, 8, 32),
            TableLine::upper(75, 7, 32),
            TableLine::oob(6),
        ];
        let codes = assign_codes(&lines).unwrap();

        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i == j || a.len > b.len {
                    continue;
                }

                assert_ne!(
                    b.code >> (b.len - a.len),
                    a.code,
                    "code {i} is a prefix of code {j}"
                );
            }
        }
    }

    #[test]
    fn small_ranges_are_folded() {
        let table = HuffmanTable::build(&table_a_lines()).unwrap();

        // 0...15 (prefix 0, 4 range bits) is the largest folded line.
        assert_eq!(table.log_table_size(), 5);
        assert_eq!(table.entries().len(), 32);

        for index in 0..16 {
            let t = terminal(&table.entries()[index]);
            assert_eq!(t.prefix_len(), 5);
            assert_eq!(t.range_len(), 0);
            assert_eq!(t.value(), index as i32);
        }

        // 16...271 has 8 range bits and is read separately.
        let t = terminal(&table.entries()[0b10000]);
        assert_eq!(t.prefix_len(), 2);
        assert_eq!(t.range_len(), 8);
        assert_eq!(t.value(), 16);
    }

    /// Check that every slot holds the entry of the one code whose bits
    /// prefix the slot index.
    fn assert_slots_match_codes(lines: &[TableLine]) {
        let table = HuffmanTable::build(lines).unwrap();
        let codes = assign_codes(lines).unwrap();
        let size = table.log_table_size();

        for (index, entry) in table.entries().iter().enumerate() {
            let mut matching = codes
                .iter()
                .filter(|c| index >> (size - c.len) == c.code as usize);
            let code = matching.next().unwrap();
            assert!(matching.next().is_none(), "slot {index} matches two codes");

            let t = terminal(entry);
            let line = &code.line;
            let combined = code.len + line.range_len;
            assert_eq!(t.is_lower(), line.kind == LineKind::Lower, "slot {index}");
            assert_eq!(t.is_oob(), line.kind == LineKind::OutOfBand, "slot {index}");

            if combined <= LOG_TABLE_SIZE_MAX {
                let htoffset = (index >> (size - combined)) as u32 & low_mask(line.range_len);
                assert_eq!(t.prefix_len(), combined, "slot {index}");
                assert_eq!(t.range_len(), 0, "slot {index}");
                assert_eq!(
                    t.value(),
                    apply_offset(line.range_low, htoffset, t.is_lower()),
                    "slot {index}"
                );
            } else {
                assert_eq!(t.prefix_len(), code.len, "slot {index}");
                assert_eq!(t.range_len(), line.range_len, "slot {index}");
                assert_eq!(t.value(), line.range_low, "slot {index}");
            }
        }
    }

    #[test]
    fn every_slot_holds_its_code() {
        assert_slots_match_codes(&table_a_lines());
        assert_slots_match_codes(&[
            TableLine::new(-15, 4, 2),
            TableLine::new(0, 1, 0),
            TableLine::new(1, 3, 1),
            TableLine::lower(-16, 4, 32),
            TableLine::upper(3, 3, 32),
            TableLine::oob(3),
        ]);
    }

    #[test]
    fn folded_lower_line_subtracts() {
        let lines = [
            TableLine::new(1, 1, 0),
            TableLine::lower(0, 2, 3),
            TableLine::upper(2, 2, 0),
        ];
        let table = HuffmanTable::build(&lines).unwrap();

        // Lower line has code 10 followed by three range bits.
        let t = terminal(table.lookup(0b10_101 << 27));
        assert!(t.is_lower());
        assert_eq!(t.value(), -5);
        assert_eq!(t.prefix_len(), 5);
    }

    #[test]
    fn long_codes_use_extension_tables() {
        let mut lines = Vec::new();
        for i in 0..8 {
            lines.push(TableLine::new(i, (i + 1) as u8, 0));
        }
        // Two codes of nine bits complete the code space.
        lines.push(TableLine::new(100, 9, 0));
        lines.push(TableLine::new(101, 9, 0));

        let table = HuffmanTable::build(&lines).unwrap();
        assert_eq!(table.log_table_size(), LOG_TABLE_SIZE_MAX);

        let Entry::Extension { prefix_len, table: ext } = &table.entries()[0xff] else {
            panic!("expected an extension entry");
        };
        assert_eq!(*prefix_len, 8);
        assert_eq!(ext.log_table_size(), 1);
        assert_eq!(terminal(&ext.entries()[0]).value(), 100);
        assert_eq!(terminal(&ext.entries()[1]).value(), 101);
    }

    #[test]
    fn positional_roles_match_annex_b_layout() {
        let lines = [
            TableLine::new(0, 1, 0),
            TableLine::new(1, 2, 0),
            TableLine::new(-1, 3, 0),
            TableLine::new(2, 4, 0),
            TableLine::new(0, 4, 0),
        ];
        let positional = HuffmanTable::build_positional(&lines, true).unwrap();
        let explicit = HuffmanTable::build(&[
            TableLine::new(0, 1, 0),
            TableLine::new(1, 2, 0),
            TableLine::lower(-1, 3, 0),
            TableLine::upper(2, 4, 0),
            TableLine::oob(4),
        ])
        .unwrap();

        assert_eq!(positional, explicit);
    }

    #[test]
    fn oob_line_must_be_last() {
        let lines = [
            TableLine::new(0, 1, 0),
            TableLine::oob(2),
            TableLine::upper(1, 2, 32),
        ];

        assert_eq!(
            HuffmanTable::build(&lines),
            Err(DecodeError::Table(TableError::MisplacedOutOfBand))
        );
    }

    #[test]
    fn lower_line_must_precede_upper_line() {
        let lines = [
            TableLine::lower(-1, 1, 32),
            TableLine::new(0, 2, 0),
            TableLine::upper(1, 2, 32),
        ];

        assert_eq!(
            HuffmanTable::build(&lines),
            Err(DecodeError::Table(TableError::MisplacedLowerRange))
        );
    }

    #[test]
    fn rejects_invalid_lengths() {
        assert_eq!(
            HuffmanTable::build(&[TableLine::new(0, 33, 0)]),
            Err(DecodeError::Table(TableError::InvalidPrefixLength))
        );
        assert_eq!(
            HuffmanTable::build(&[TableLine::new(0, 1, 33)]),
            Err(DecodeError::Table(TableError::InvalidRangeLength))
        );
    }

    #[test]
    fn rejects_oversubscribed_codes() {
        let lines = [
            TableLine::new(0, 1, 0),
            TableLine::new(1, 1, 0),
            TableLine::new(2, 1, 0),
        ];

        assert_eq!(
            HuffmanTable::build(&lines),
            Err(DecodeError::Table(TableError::Oversubscribed))
        );
    }

    #[test]
    fn rejects_incomplete_codes() {
        let lines = [TableLine::new(0, 1, 0), TableLine::new(1, 2, 0)];

        assert_eq!(
            HuffmanTable::build(&lines),
            Err(DecodeError::Table(TableError::Incomplete))
        );
    }

    #[test]
    fn rejects_empty_tables() {
        assert_eq!(
            HuffmanTable::build(&[]),
            Err(DecodeError::Table(TableError::Empty))
        );
        assert_eq!(
            HuffmanTable::build(&[TableLine::new(0, 0, 4)]),
            Err(DecodeError::Table(TableError::Empty))
        );
    }
}
