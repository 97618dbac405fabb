//! Decoding of version, timestamp and sequence fields.
//!
//! Decoding is permissive: the version nibble is always read, while the timestamp and the
//! sequence are read only from the versions that carry them. A missing field is reported as
//! `None`, never as an error.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::{bits, Layout, Uuid};

/// Number of 100-nanosecond ticks from the Gregorian reform (1582-10-15) to the Unix epoch.
const GREGORIAN_TO_UNIX_TICKS: i64 = 0x01b2_1dd2_1381_4000;

const TICKS_PER_SECOND: i64 = 10_000_000;

/// Returns the date-time embedded in a UUIDv1, v6, v7 or v8 (SQL Server layout).
///
/// Returns `None` for other versions and for timestamps `chrono` cannot represent.
///
/// # Examples
///
/// ```rust
/// use uuidnext::{try_decode_timestamp, Uuid};
///
/// let uuid: Uuid = "017f22e2-79b0-7cc3-98c4-dc0c0c07398f".parse()?;
/// let date = try_decode_timestamp(&uuid).unwrap();
/// assert_eq!(date.timestamp_millis(), 0x017f_22e2_79b0);
///
/// let nil = Uuid::NIL;
/// assert_eq!(try_decode_timestamp(&nil), None);
/// # Ok::<(), uuidnext::ParseError>(())
/// ```
pub fn try_decode_timestamp(uuid: &Uuid) -> Option<DateTime<Utc>> {
    let b = uuid.as_bytes();
    match bits::get_version(uuid) {
        1 => {
            // time_low, time_mid, time_hi
            let ticks = ((b[6] as u64 & 0x0f) << 56)
                | ((b[7] as u64) << 48)
                | ((b[4] as u64) << 40)
                | ((b[5] as u64) << 32)
                | u32::from_be_bytes([b[0], b[1], b[2], b[3]]) as u64;
            from_gregorian_ticks(ticks)
        }
        6 => {
            // time_high, time_mid, time_low
            let ticks = ((u32::from_be_bytes([b[0], b[1], b[2], b[3]]) as u64) << 28)
                | ((b[4] as u64) << 20)
                | ((b[5] as u64) << 12)
                | ((b[6] as u64 & 0x0f) << 8)
                | b[7] as u64;
            from_gregorian_ticks(ticks)
        }
        version => {
            let seq = Layout::from_version(version)?.decode(uuid)?;
            DateTime::from_timestamp_millis(seq.timestamp as i64)
        }
    }
}

fn from_gregorian_ticks(ticks: u64) -> Option<DateTime<Utc>> {
    // ticks is a 60-bit integer
    let unix_ticks = ticks as i64 - GREGORIAN_TO_UNIX_TICKS;
    DateTime::from_timestamp(
        unix_ticks.div_euclid(TICKS_PER_SECOND),
        (unix_ticks.rem_euclid(TICKS_PER_SECOND) * 100) as u32,
    )
}

/// Returns the monotonic counter embedded in a UUIDv7 or v8 (SQL Server layout).
///
/// Returns `None` for every other version, including v1 and v6 whose clock sequence is not a
/// monotonic counter.
pub fn try_decode_sequence(uuid: &Uuid) -> Option<u64> {
    let layout = Layout::from_version(bits::get_version(uuid))?;
    layout.decode(uuid).map(|seq| seq.counter)
}

/// Decodes every field a UUID carries.
///
/// # Examples
///
/// ```rust
/// use uuidnext::{decode, Uuid};
///
/// let uuid: Uuid = "00000000-0000-4000-8000-000000000000".parse()?;
/// assert_eq!(decode(&uuid).to_string(), "{ Version: 4 }");
/// # Ok::<(), uuidnext::ParseError>(())
/// ```
pub fn decode(uuid: &Uuid) -> DecodeReport {
    DecodeReport {
        version: bits::get_version(uuid),
        timestamp: try_decode_timestamp(uuid),
        sequence: try_decode_sequence(uuid),
    }
}

/// The fields decoded from a UUID.
///
/// The [`Display`](fmt::Display) form is `{ Version: 7, Timestamp: "<RFC 3339>", Sequence: 42 }`
/// where absent fields are omitted.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct DecodeReport {
    /// The raw version nibble.
    pub version: u8,

    /// The embedded date-time, if the version carries one.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub timestamp: Option<DateTime<Utc>>,

    /// The embedded monotonic counter, if the version carries one.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub sequence: Option<u64>,
}

impl fmt::Display for DecodeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ Version: {}", self.version)?;
        if let Some(timestamp) = self.timestamp {
            let text = timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true);
            write!(f, ", Timestamp: \"{text}\"")?;
        }
        if let Some(sequence) = self.sequence {
            write!(f, ", Sequence: {sequence}")?;
        }
        f.write_str(" }")
    }
}
