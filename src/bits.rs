//! Version and variant field codec.
//!
//! The 4-bit version field occupies the most significant half of byte 6 (bits 48-51) and the
//! variant field the most significant bits of byte 8 (bits 64-65 for the RFC variant).

use crate::Uuid;

/// The variant field values defined by RFC 9562.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Variant {
    /// `0xxx` (Apollo NCS, includes the Nil UUID)
    Var0,
    /// `10xx` (RFC 9562)
    Var10,
    /// `110x` (Microsoft legacy)
    Var110,
    /// `111x` (reserved, includes the Max UUID)
    Var111,
}

/// Stamps the version and `10` variant bits into `bytes`, leaving every other bit untouched.
///
/// # Examples
///
/// ```rust
/// let uuid = uuidnext::set_version_and_variant([0xff; 16], 8);
/// assert_eq!(&uuid.encode() as &str, "ffffffff-ffff-8fff-bfff-ffffffffffff");
/// ```
pub const fn set_version_and_variant(mut bytes: [u8; 16], version: u8) -> Uuid {
    debug_assert!(version < 16);
    bytes[6] = (version << 4) | (bytes[6] & 0x0f);
    bytes[8] = 0x80 | (bytes[8] & 0x3f);
    Uuid::from_bytes(bytes)
}

/// Returns the raw version nibble of a UUID.
///
/// Any value from 0 to 15 is returned as is, whatever the variant field holds.
pub const fn get_version(uuid: &Uuid) -> u8 {
    uuid.as_bytes()[6] >> 4
}

/// Returns the variant field value of a UUID.
pub const fn get_variant(uuid: &Uuid) -> Variant {
    match uuid.as_bytes()[8] >> 5 {
        0b000..=0b011 => Variant::Var0,
        0b100..=0b101 => Variant::Var10,
        0b110 => Variant::Var110,
        _ => Variant::Var111,
    }
}

#[cfg(test)]
mod tests {
    use super::{get_variant, get_version, set_version_and_variant, Variant};
    use crate::Uuid;

    /// Keeps non-version non-variant bits intact
    #[test]
    fn keeps_non_version_non_variant_bits_intact() {
        for version in [1, 4, 5, 6, 7, 8] {
            let all_zero = set_version_and_variant([0x00; 16], version);
            let all_one = set_version_and_variant([0xff; 16], version);
            assert_eq!(u128::from(all_zero), (version as u128) << 76 | 1 << 63);
            assert_eq!(
                u128::from(all_one),
                u128::MAX & !(0xf << 76) & !(0b11 << 62) | (version as u128) << 76 | 1 << 63
            );
            assert_eq!(get_version(&all_zero), version);
            assert_eq!(get_version(&all_one), version);
            assert_eq!(get_variant(&all_zero), Variant::Var10);
            assert_eq!(get_variant(&all_one), Variant::Var10);
        }
    }

    /// Returns unsupported versions as is
    #[test]
    fn returns_unsupported_versions_as_is() {
        let cases = [
            ("00000000-0000-0000-0000-000000000000", 0, Variant::Var0),
            ("ffffffff-ffff-ffff-ffff-ffffffffffff", 15, Variant::Var111),
            ("00000000-0000-2000-c000-000000000000", 2, Variant::Var110),
            ("00000000-0000-b000-a000-000000000000", 11, Variant::Var10),
            ("00000000-0000-4000-7fff-000000000000", 4, Variant::Var0),
        ];
        for (text, version, variant) in cases {
            let e: Uuid = text.parse().unwrap();
            assert_eq!(get_version(&e), version, "{text}");
            assert_eq!(get_variant(&e), variant, "{text}");
        }
    }
}
