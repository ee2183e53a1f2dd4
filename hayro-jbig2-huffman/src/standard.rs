//! The standard Huffman tables of Annex B (tables B.1 to B.15).

use std::sync::LazyLock;

use crate::table::{HuffmanTable, TableLine, TableLine as L};

/// One of the fifteen standard Huffman tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardTable {
    /// Table B.1.
    A,
    /// Table B.2.
    B,
    /// Table B.3.
    C,
    /// Table B.4.
    D,
    /// Table B.5.
    E,
    /// Table B.6.
    F,
    /// Table B.7.
    G,
    /// Table B.8.
    H,
    /// Table B.9.
    I,
    /// Table B.10.
    J,
    /// Table B.11.
    K,
    /// Table B.12.
    L,
    /// Table B.13.
    M,
    /// Table B.14.
    N,
    /// Table B.15.
    O,
}

impl StandardTable {
    /// All standard tables, in order.
    pub const ALL: [Self; 15] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
        Self::I,
        Self::J,
        Self::K,
        Self::L,
        Self::M,
        Self::N,
        Self::O,
    ];

    /// The built lookup table. Tables are built on first use.
    pub fn table(self) -> &'static HuffmanTable {
        match self {
            Self::A => &TABLE_A,
            Self::B => &TABLE_B,
            Self::C => &TABLE_C,
            Self::D => &TABLE_D,
            Self::E => &TABLE_E,
            Self::F => &TABLE_F,
            Self::G => &TABLE_G,
            Self::H => &TABLE_H,
            Self::I => &TABLE_I,
            Self::J => &TABLE_J,
            Self::K => &TABLE_K,
            Self::L => &TABLE_L,
            Self::M => &TABLE_M,
            Self::N => &TABLE_N,
            Self::O => &TABLE_O,
        }
    }

    /// The lines the table is built from.
    pub fn lines(self) -> &'static [TableLine] {
        match self {
            Self::A => LINES_A,
            Self::B => LINES_B,
            Self::C => LINES_C,
            Self::D => LINES_D,
            Self::E => LINES_E,
            Self::F => LINES_F,
            Self::G => LINES_G,
            Self::H => LINES_H,
            Self::I => LINES_I,
            Self::J => LINES_J,
            Self::K => LINES_K,
            Self::L => LINES_L,
            Self::M => LINES_M,
            Self::N => LINES_N,
            Self::O => LINES_O,
        }
    }

    /// Whether the table has an out-of-band line (HTOOB).
    pub fn has_oob(self) -> bool {
        matches!(self, Self::B | Self::C | Self::H | Self::I | Self::J)
    }
}

fn build_standard(table: StandardTable) -> HuffmanTable {
    match HuffmanTable::build(table.lines()) {
        Ok(built) => built,
        Err(e) => unreachable!("standard table {table:?} is malformed: {e}"),
    }
}

/// Table B.1, built on first use.
pub static TABLE_A: LazyLock<HuffmanTable> = LazyLock::new(|| build_standard(StandardTable::A));
/// Table B.2, built on first use.
pub static TABLE_B: LazyLock<HuffmanTable> = LazyLock::new(|| build_standard(StandardTable::B));
/// Table B.3, built on first use.
pub static TABLE_C: LazyLock<HuffmanTable> = LazyLock::new(|| build_standard(StandardTable::C));
/// Table B.4, built on first use.
pub static TABLE_D: LazyLock<HuffmanTable> = LazyLock::new(|| build_standard(StandardTable::D));
/// Table B.5, built on first use.
pub static TABLE_E: LazyLock<HuffmanTable> = LazyLock::new(|| build_standard(StandardTable::E));
/// Table B.6, built on first use.
pub static TABLE_F: LazyLock<HuffmanTable> = LazyLock::new(|| build_standard(StandardTable::F));
/// Table B.7, built on first use.
pub static TABLE_G: LazyLock<HuffmanTable> = LazyLock::new(|| build_standard(StandardTable::G));
/// Table B.8, built on first use.
pub static TABLE_H: LazyLock<HuffmanTable> = LazyLock::new(|| build_standard(StandardTable::H));
/// Table B.9, built on first use.
pub static TABLE_I: LazyLock<HuffmanTable> = LazyLock::new(|| build_standard(StandardTable::I));
/// Table B.10, built on first use.
pub static TABLE_J: LazyLock<HuffmanTable> = LazyLock::new(|| build_standard(StandardTable::J));
/// Table B.11, built on first use.
pub static TABLE_K: LazyLock<HuffmanTable> = LazyLock::new(|| build_standard(StandardTable::K));
/// Table B.12, built on first use.
pub static TABLE_L: LazyLock<HuffmanTable> = LazyLock::new(|| build_standard(StandardTable::L));
/// Table B.13, built on first use.
pub static TABLE_M: LazyLock<HuffmanTable> = LazyLock::new(|| build_standard(StandardTable::M));
/// Table B.14, built on first use.
pub static TABLE_N: LazyLock<HuffmanTable> = LazyLock::new(|| build_standard(StandardTable::N));
/// Table B.15, built on first use.
pub static TABLE_O: LazyLock<HuffmanTable> = LazyLock::new(|| build_standard(StandardTable::O));

/// Lines of table B.1 (HTOOB = 0).
const LINES_A: &[TableLine] = &[
    L::new(0, 1, 4),        // 0..=15
    L::new(16, 2, 8),       // 16..=271
    L::new(272, 3, 16),     // 272..=65807
    L::upper(65808, 3, 32), // 65808..
];

/// Lines of table B.2 (HTOOB = 1).
const LINES_B: &[TableLine] = &[
    L::new(0, 1, 0),     // 0
    L::new(1, 2, 0),     // 1
    L::new(2, 3, 0),     // 2
    L::new(3, 4, 3),     // 3..=10
    L::new(11, 5, 6),    // 11..=74
    L::upper(75, 6, 32), // 75..
    L::oob(6),           // OOB
];

/// Lines of table B.3 (HTOOB = 1).
const LINES_C: &[TableLine] = &[
    L::new(-256, 8, 8),    // -256..=-1
    L::new(0, 1, 0),       // 0
    L::new(1, 2, 0),       // 1
    L::new(2, 3, 0),       // 2
    L::new(3, 4, 3),       // 3..=10
    L::new(11, 5, 6),      // 11..=74
    L::lower(-257, 8, 32), // ..=-257
    L::upper(75, 7, 32),   // 75..
    L::oob(6),             // OOB
];

/// Lines of table B.4 (HTOOB = 0).
const LINES_D: &[TableLine] = &[
    L::new(1, 1, 0),     // 1
    L::new(2, 2, 0),     // 2
    L::new(3, 3, 0),     // 3
    L::new(4, 4, 3),     // 4..=11
    L::new(12, 5, 6),    // 12..=75
    L::upper(76, 5, 32), // 76..
];

/// Lines of table B.5 (HTOOB = 0).
const LINES_E: &[TableLine] = &[
    L::new(-255, 7, 8),    // -255..=0
    L::new(1, 1, 0),       // 1
    L::new(2, 2, 0),       // 2
    L::new(3, 3, 0),       // 3
    L::new(4, 4, 3),       // 4..=11
    L::new(12, 5, 6),      // 12..=75
    L::lower(-256, 7, 32), // ..=-256
    L::upper(76, 6, 32),   // 76..
];

/// Lines of table B.6 (HTOOB = 0).
const LINES_F: &[TableLine] = &[
    L::new(-2048, 5, 10),   // -2048..=-1025
    L::new(-1024, 4, 9),    // -1024..=-513
    L::new(-512, 4, 8),     // -512..=-257
    L::new(-256, 4, 7),     // -256..=-129
    L::new(-128, 5, 6),     // -128..=-65
    L::new(-64, 5, 5),      // -64..=-33
    L::new(-32, 4, 5),      // -32..=-1
    L::new(0, 2, 7),        // 0..=127
    L::new(128, 3, 7),      // 128..=255
    L::new(256, 3, 8),      // 256..=511
    L::new(512, 4, 9),      // 512..=1023
    L::new(1024, 4, 10),    // 1024..=2047
    L::lower(-2049, 6, 32), // ..=-2049
    L::upper(2048, 6, 32),  // 2048..
];

/// Lines of table B.7 (HTOOB = 0).
const LINES_G: &[TableLine] = &[
    L::new(-1024, 4, 9),    // -1024..=-513
    L::new(-512, 3, 8),     // -512..=-257
    L::new(-256, 4, 7),     // -256..=-129
    L::new(-128, 5, 6),     // -128..=-65
    L::new(-64, 5, 5),      // -64..=-33
    L::new(-32, 4, 5),      // -32..=-1
    L::new(0, 4, 5),        // 0..=31
    L::new(32, 5, 5),       // 32..=63
    L::new(64, 5, 6),       // 64..=127
    L::new(128, 4, 7),      // 128..=255
    L::new(256, 3, 8),      // 256..=511
    L::new(512, 3, 9),      // 512..=1023
    L::new(1024, 3, 10),    // 1024..=2047
    L::lower(-1025, 5, 32), // ..=-1025
    L::upper(2048, 5, 32),  // 2048..
];

/// Lines of table B.8 (HTOOB = 1).
const LINES_H: &[TableLine] = &[
    L::new(-15, 8, 3),     // -15..=-8
    L::new(-7, 9, 1),      // -7..=-6
    L::new(-5, 8, 1),      // -5..=-4
    L::new(-3, 9, 0),      // -3
    L::new(-2, 7, 0),      // -2
    L::new(-1, 4, 0),      // -1
    L::new(0, 2, 1),       // 0..=1
    L::new(2, 5, 0),       // 2
    L::new(3, 6, 0),       // 3
    L::new(4, 3, 4),       // 4..=19
    L::new(20, 6, 1),      // 20..=21
    L::new(22, 4, 4),      // 22..=37
    L::new(38, 4, 5),      // 38..=69
    L::new(70, 5, 6),      // 70..=133
    L::new(134, 5, 7),     // 134..=261
    L::new(262, 6, 7),     // 262..=389
    L::new(390, 7, 8),     // 390..=645
    L::new(646, 6, 10),    // 646..=1669
    L::lower(-16, 9, 32),  // ..=-16
    L::upper(1670, 9, 32), // 1670..
    L::oob(2),             // OOB
];

/// Lines of table B.9 (HTOOB = 1).
const LINES_I: &[TableLine] = &[
    L::new(-31, 8, 4),     // -31..=-16
    L::new(-15, 9, 2),     // -15..=-12
    L::new(-11, 8, 2),     // -11..=-8
    L::new(-7, 9, 1),      // -7..=-6
    L::new(-5, 7, 1),      // -5..=-4
    L::new(-3, 4, 1),      // -3..=-2
    L::new(-1, 3, 1),      // -1..=0
    L::new(1, 3, 1),       // 1..=2
    L::new(3, 5, 1),       // 3..=4
    L::new(5, 6, 1),       // 5..=6
    L::new(7, 3, 5),       // 7..=38
    L::new(39, 6, 2),      // 39..=42
    L::new(43, 4, 5),      // 43..=74
    L::new(75, 4, 6),      // 75..=138
    L::new(139, 5, 7),     // 139..=266
    L::new(267, 5, 8),     // 267..=522
    L::new(523, 6, 8),     // 523..=778
    L::new(779, 7, 9),     // 779..=1290
    L::new(1291, 6, 11),   // 1291..=3338
    L::lower(-32, 9, 32),  // ..=-32
    L::upper(3339, 9, 32), // 3339..
    L::oob(2),             // OOB
];

/// Lines of table B.10 (HTOOB = 1).
const LINES_J: &[TableLine] = &[
    L::new(-21, 7, 4),     // -21..=-6
    L::new(-5, 8, 0),      // -5
    L::new(-4, 7, 0),      // -4
    L::new(-3, 5, 0),      // -3
    L::new(-2, 2, 2),      // -2..=1
    L::new(2, 5, 0),       // 2
    L::new(3, 6, 0),       // 3
    L::new(4, 7, 0),       // 4
    L::new(5, 8, 0),       // 5
    L::new(6, 2, 6),       // 6..=69
    L::new(70, 5, 5),      // 70..=101
    L::new(102, 6, 5),     // 102..=133
    L::new(134, 6, 6),     // 134..=197
    L::new(198, 6, 7),     // 198..=325
    L::new(326, 6, 8),     // 326..=581
    L::new(582, 6, 9),     // 582..=1093
    L::new(1094, 6, 10),   // 1094..=2117
    L::new(2118, 7, 11),   // 2118..=4165
    L::lower(-22, 8, 32),  // ..=-22
    L::upper(4166, 8, 32), // 4166..
    L::oob(2),             // OOB
];

/// Lines of table B.11 (HTOOB = 0).
const LINES_K: &[TableLine] = &[
    L::new(1, 1, 0),      // 1
    L::new(2, 2, 1),      // 2..=3
    L::new(4, 4, 0),      // 4
    L::new(5, 4, 1),      // 5..=6
    L::new(7, 5, 1),      // 7..=8
    L::new(9, 5, 2),      // 9..=12
    L::new(13, 6, 2),     // 13..=16
    L::new(17, 7, 2),     // 17..=20
    L::new(21, 7, 3),     // 21..=28
    L::new(29, 7, 4),     // 29..=44
    L::new(45, 7, 5),     // 45..=76
    L::new(77, 7, 6),     // 77..=140
    L::upper(141, 7, 32), // 141..
];

/// Lines of table B.12 (HTOOB = 0).
const LINES_L: &[TableLine] = &[
    L::new(1, 1, 0),     // 1
    L::new(2, 2, 0),     // 2
    L::new(3, 3, 1),     // 3..=4
    L::new(5, 5, 0),     // 5
    L::new(6, 5, 1),     // 6..=7
    L::new(8, 6, 1),     // 8..=9
    L::new(10, 7, 0),    // 10
    L::new(11, 7, 1),    // 11..=12
    L::new(13, 7, 2),    // 13..=16
    L::new(17, 7, 3),    // 17..=24
    L::new(25, 7, 4),    // 25..=40
    L::new(41, 8, 5),    // 41..=72
    L::upper(73, 8, 32), // 73..
];

/// Lines of table B.13 (HTOOB = 0).
const LINES_M: &[TableLine] = &[
    L::new(1, 1, 0),      // 1
    L::new(2, 3, 0),      // 2
    L::new(3, 4, 0),      // 3
    L::new(4, 5, 0),      // 4
    L::new(5, 4, 1),      // 5..=6
    L::new(7, 3, 3),      // 7..=14
    L::new(15, 6, 1),     // 15..=16
    L::new(17, 6, 2),     // 17..=20
    L::new(21, 6, 3),     // 21..=28
    L::new(29, 6, 4),     // 29..=44
    L::new(45, 6, 5),     // 45..=76
    L::new(77, 7, 6),     // 77..=140
    L::upper(141, 7, 32), // 141..
];

/// Lines of table B.14 (HTOOB = 0).
const LINES_N: &[TableLine] = &[
    L::new(-2, 3, 0), // -2
    L::new(-1, 3, 0), // -1
    L::new(0, 1, 0),  // 0
    L::new(1, 3, 0),  // 1
    L::new(2, 3, 0),  // 2
];

/// Lines of table B.15 (HTOOB = 0).
const LINES_O: &[TableLine] = &[
    L::new(-24, 7, 4),    // -24..=-9
    L::new(-8, 6, 2),     // -8..=-5
    L::new(-4, 5, 1),     // -4..=-3
    L::new(-2, 4, 0),     // -2
    L::new(-1, 3, 0),     // -1
    L::new(0, 1, 0),      // 0
    L::new(1, 3, 0),      // 1
    L::new(2, 4, 0),      // 2
    L::new(3, 5, 1),      // 3..=4
    L::new(5, 6, 2),      // 5..=8
    L::new(9, 7, 4),      // 9..=24
    L::lower(-25, 7, 32), // ..=-25
    L::upper(25, 7, 32),  // 25..
];
