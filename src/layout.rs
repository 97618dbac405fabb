//! Bit layouts of the time-ordered UUIDs issued by this crate.
//!
//! # UUIDv7
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          unix_ts_ms                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          unix_ts_ms           |  ver  |        counter        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|                        counter                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             rand                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! The 42-bit `counter` spans the 12-bit `rand_a` field and the upper 30 bits of `rand_b`.
//!
//! # SQL Server UUIDv8
//!
//! SQL Server compares `uniqueidentifier` values starting from the last six bytes, then bytes
//! 8-9, then bytes 7, 6, 5, 4, 3, 2, 1 and 0 (see [`sql_server_order`]). This layout places the
//! timestamp and the counter in that order of significance:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             rand                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |              rand             |  ver  | c[3:0]|    c[11:4]    |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|  c[25:20] |    c[19:12]   |           unix_ts_ms          |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          unix_ts_ms                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```

use crate::{bits, Uuid};

/// A timestamp and counter pair issued by a [`SequenceGenerator`](crate::SequenceGenerator).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Sequence {
    /// Unix timestamp in milliseconds.
    pub timestamp: u64,

    /// Monotonic counter within `timestamp`.
    pub counter: u64,
}

/// Bit arrangement of a time-ordered UUID.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Layout {
    /// Standard UUIDv7 with the timestamp prefix.
    V7,
    /// UUIDv8 ordered under SQL Server's `uniqueidentifier` comparison.
    SqlServerV8,
}

impl Layout {
    /// Returns the layout known for a version number, if any.
    ///
    /// Every UUIDv8 is read as [`Layout::SqlServerV8`], the only version 8 layout known here.
    pub const fn from_version(version: u8) -> Option<Self> {
        match version {
            7 => Some(Self::V7),
            8 => Some(Self::SqlServerV8),
            _ => None,
        }
    }

    /// Returns the version number stamped into UUIDs of this layout.
    pub const fn version(self) -> u8 {
        match self {
            Self::V7 => 7,
            Self::SqlServerV8 => 8,
        }
    }

    /// Returns the bit width of the counter field.
    pub const fn counter_bits(self) -> u32 {
        match self {
            Self::V7 => 42,
            Self::SqlServerV8 => 26,
        }
    }

    /// Returns the largest counter value the layout can hold.
    pub const fn max_counter(self) -> u64 {
        (1 << self.counter_bits()) - 1
    }

    /// Builds a UUID from a sequence, taking the remaining bits from `rand`.
    ///
    /// # Panics
    ///
    /// Panics if the timestamp is not a 48-bit integer or the counter exceeds
    /// [`max_counter`](Self::max_counter).
    pub fn encode(self, seq: Sequence, rand: u64) -> Uuid {
        assert!(seq.timestamp < 1 << 48, "timestamp out of 48-bit range");
        assert!(seq.counter <= self.max_counter(), "counter out of range");

        match self {
            Self::V7 => Uuid::from_fields_v7(
                seq.timestamp,
                (seq.counter >> 30) as u16,
                ((seq.counter & 0x3fff_ffff) << 32) | (rand & 0xffff_ffff),
            ),
            Self::SqlServerV8 => {
                let mut bytes = [0u8; 16];
                bytes[..6].copy_from_slice(&rand.to_be_bytes()[2..]);
                bytes[6] = (seq.counter & 0x0f) as u8;
                bytes[7] = (seq.counter >> 4) as u8;
                bytes[8] = (seq.counter >> 20) as u8;
                bytes[9] = (seq.counter >> 12) as u8;
                bytes[10..].copy_from_slice(&seq.timestamp.to_be_bytes()[2..]);
                bits::set_version_and_variant(bytes, 8)
            }
        }
    }

    /// Extracts the sequence from a UUID, or returns `None` if the version field does not match
    /// the layout.
    pub fn decode(self, uuid: &Uuid) -> Option<Sequence> {
        if bits::get_version(uuid) != self.version() {
            return None;
        }

        let b = uuid.as_bytes();
        let seq = match self {
            Self::V7 => Sequence {
                timestamp: be_u48(&b[..6]),
                counter: (((b[6] & 0x0f) as u64) << 38)
                    | ((b[7] as u64) << 30)
                    | (((b[8] & 0x3f) as u64) << 24)
                    | ((b[9] as u64) << 16)
                    | ((b[10] as u64) << 8)
                    | b[11] as u64,
            },
            Self::SqlServerV8 => Sequence {
                timestamp: be_u48(&b[10..]),
                counter: (((b[8] & 0x3f) as u64) << 20)
                    | ((b[9] as u64) << 12)
                    | ((b[7] as u64) << 4)
                    | (b[6] & 0x0f) as u64,
            },
        };
        Some(seq)
    }
}

fn be_u48(src: &[u8]) -> u64 {
    src.iter().fold(0, |acc, e| (acc << 8) | *e as u64)
}

/// Rearranges the bytes of a UUID into the order SQL Server compares `uniqueidentifier` values,
/// so that comparing the returned arrays reproduces SQL Server's `ORDER BY`.
pub fn sql_server_order(uuid: &Uuid) -> [u8; 16] {
    const ORDER: [usize; 16] = [10, 11, 12, 13, 14, 15, 8, 9, 7, 6, 5, 4, 3, 2, 1, 0];
    let b = uuid.as_bytes();
    ORDER.map(|i| b[i])
}
